use std::path::PathBuf;
use std::process::ExitCode;

use gtmsel_lib::output::GTMSEL_OUTPUT_VERSION;
use gtmsel_lib::{
    load_document, parse_resource, EngineOptions, GtmselError, GtmselOutput, HtmlDocument,
    HtmlElement, InspectionSession, InspectorEvent, LoadOptions, ResourceDescriptor,
    SelectorEngine, SessionOutput,
};
use tracing::info;

use crate::cli::{OutputFormat, ResourceType, SessionStep};
use crate::formatting::{render_error, write_output};
use crate::settings::{format_effective_config, load_config};

/// Run the session command: replay scripted steps against one page.
#[allow(clippy::too_many_arguments)]
pub async fn run_session(
    config_path: Option<PathBuf>,
    verbose: bool,
    input: String,
    input_type: Option<ResourceType>,
    events: Vec<SessionStep>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
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

    let mut session = InspectionSession::with_engine(&doc, SelectorEngine::new(options));
    let mut notices = Vec::new();
    for step in &events {
        let event = match to_event(&doc, step) {
            Ok(event) => event,
            Err(err) => return render_error(err, format, output),
        };
        notices.extend(session.handle(event));
    }

    let body = GtmselOutput::Session(SessionOutput {
        version: GTMSEL_OUTPUT_VERSION.to_string(),
        input: ResourceDescriptor::from(&resource),
        notices,
        final_state: session.state().name().to_string(),
        selection: session.selection().cloned(),
    });
    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(GtmselError::Unknown(err.to_string()), format, output);
    }
    ExitCode::SUCCESS
}

fn to_event<'d>(
    doc: &'d HtmlDocument,
    step: &SessionStep,
) -> Result<InspectorEvent<HtmlElement<'d>>, GtmselError> {
    let event = match step {
        SessionStep::On => InspectorEvent::Toggle(true),
        SessionStep::Off => InspectorEvent::Toggle(false),
        SessionStep::Unhover => InspectorEvent::Unhover,
        SessionStep::Click => InspectorEvent::Click,
        SessionStep::Escape => InspectorEvent::Escape,
        SessionStep::Hover { selector, index } => {
            let element = doc
                .select_target(selector, *index)
                .map_err(|e| GtmselError::target(e.to_string()))?
                .ok_or_else(|| {
                    GtmselError::target(format!(
                        "Session step hover={selector}@{index}: no element matches '{selector}' at index {index}"
                    ))
                })?;
            InspectorEvent::Hover(element)
        }
    };
    Ok(event)
}
