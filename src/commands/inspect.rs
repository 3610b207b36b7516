use std::path::PathBuf;
use std::process::ExitCode;

use gtmsel_lib::output::GTMSEL_OUTPUT_VERSION;
use gtmsel_lib::{
    load_document, parse_resource, EngineOptions, GtmselError, GtmselOutput, InspectOutput,
    LoadOptions, ResourceDescriptor, SelectorEngine, Summary,
};
use tracing::{info, warn};

use crate::cli::{OutputFormat, ResourceType};
use crate::formatting::{exit_code_for_inspect, render_error, write_output};
use crate::settings::{format_effective_config, load_config, resolve_inspect_config, InspectFlagSources};

/// Run the inspect command.
#[allow(clippy::too_many_arguments)]
pub async fn run_inspect(
    raw_args: &[String],
    config_path: Option<PathBuf>,
    verbose: bool,
    input: String,
    target: String,
    index: usize,
    input_type: Option<ResourceType>,
    max_matches: usize,
    console_max_matches: usize,
    format: OutputFormat,
    output: Option<PathBuf>,
    fail_on_empty: bool,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output),
    };
    let flags = InspectFlagSources::from_args(raw_args);
    let config = match resolve_inspect_config(max_matches, console_max_matches, &config, &flags) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output),
    };
    let options = EngineOptions::from(&config);
    if verbose {
        info!("{}", format_effective_config(&options, config_path.as_deref()));
    }

    let resource = match parse_resource(&input, input_type.map(Into::into)) {
        Ok(res) => res,
        Err(err) => return render_error(err.into(), format, output),
    };
    let doc = match load_document(&resource, &LoadOptions::from(&config.fetch)).await {
        Ok(doc) => doc,
        Err(err) => return render_error(err, format, output),
    };

    let element = match doc.select_target(&target, index) {
        Ok(Some(element)) => element,
        Ok(None) => {
            return render_error(
                GtmselError::target(format!(
                    "No element matches '{target}' at index {index} in {}",
                    resource.value
                )),
                format,
                output,
            )
        }
        Err(err) => return render_error(GtmselError::target(err.to_string()), format, output),
    };

    let engine = SelectorEngine::new(options);
    let snapshot = engine.inspect(&doc, &element);
    let candidate_count = snapshot.selectors.len();
    if candidate_count == 0 {
        warn!(%target, index, "no selector candidate survived validation");
    }

    let body = GtmselOutput::Inspect(InspectOutput {
        version: GTMSEL_OUTPUT_VERSION.to_string(),
        input: ResourceDescriptor::from(&resource),
        target,
        index,
        summary: Summary::from_snapshot(&snapshot),
        element: snapshot,
    });
    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(GtmselError::Unknown(err.to_string()), format, output);
    }
    exit_code_for_inspect(candidate_count, fail_on_empty)
}
