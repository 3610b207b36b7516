use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use gtmsel_lib::output::GTMSEL_OUTPUT_VERSION;
use gtmsel_lib::{ElementSnapshot, ErrorOutput, GtmselError, GtmselOutput, SessionNotice};

use crate::cli::OutputFormat;

/// Write output in the requested format.
pub fn write_output(
    body: &GtmselOutput,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => write_json_output(body, output.as_deref())?,
        OutputFormat::Pretty => write_pretty_output(body, output.as_deref())?,
    };
    Ok(())
}

/// Render an error and return the appropriate exit code.
pub fn render_error(err: GtmselError, format: OutputFormat, output: Option<PathBuf>) -> ExitCode {
    let error_payload = err.to_payload();
    let payload = GtmselOutput::Error(ErrorOutput {
        version: GTMSEL_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            if let Some(path) = output {
                if let Err(write_err) = std::fs::write(&path, &content) {
                    eprintln!("Failed to write error output: {}", write_err);
                    println!("{content}");
                }
            } else {
                println!("{content}");
            }
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload, output.as_deref()) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    // Exit code 2 is reserved for fatal errors; an empty inspection uses 1.
    ExitCode::from(2)
}

/// Write JSON output to file or stdout.
fn write_json_output(
    body: &GtmselOutput,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_json::to_string(body)?;
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Write pretty output to file or stdout.
fn write_pretty_output(body: &GtmselOutput, output: Option<&Path>) -> io::Result<()> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let use_human = output.is_none() && stdout_is_tty;

    if use_human {
        let content = format_pretty(body, true);
        println!("{content}");
        return Ok(());
    }

    // Non-tty or file output: keep JSON shape for pipelines/files.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    if let Some(path) = output {
        std::fs::write(path, &content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &GtmselOutput, colorize: bool) -> String {
    match body {
        GtmselOutput::Inspect(out) => {
            let mut buf = String::new();
            let header = color("[INSPECT]", "36", colorize);
            writeln!(
                buf,
                "{} {} (match {} of '{}')",
                header, out.summary.display_name, out.index, out.target
            )
            .ok();
            writeln!(buf, "Input: {} (kind: {})", out.input.value, out.input.kind.as_str()).ok();
            write_element(&mut buf, &out.element, colorize);
            buf
        }
        GtmselOutput::Session(out) => {
            let mut buf = String::new();
            let header = color("[SESSION]", "34", colorize);
            writeln!(buf, "{} Final state: {}", header, out.final_state).ok();
            writeln!(buf, "Input: {} (kind: {})", out.input.value, out.input.kind.as_str()).ok();
            if !out.notices.is_empty() {
                writeln!(buf, "Notices:").ok();
                for notice in &out.notices {
                    let line = match notice {
                        SessionNotice::Activated => "activated".to_string(),
                        SessionNotice::Deactivated => "deactivated".to_string(),
                        SessionNotice::Dismissed => "dismissed (escape)".to_string(),
                        SessionNotice::ElementSelected(snapshot) => {
                            format!("selected {}", snapshot.display_name())
                        }
                    };
                    writeln!(buf, "- {line}").ok();
                }
            }
            if let Some(selection) = &out.selection {
                writeln!(buf, "Selection:").ok();
                write_element(&mut buf, selection, colorize);
            }
            buf
        }
        GtmselOutput::Error(out) => {
            let mut buf = String::new();
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or_else(|| out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
            buf
        }
    }
}

fn write_element(buf: &mut String, element: &ElementSnapshot, colorize: bool) {
    writeln!(buf, "Element: <{}>", element.tag_name.to_ascii_lowercase()).ok();
    writeln!(buf, "Path: {}", element.path).ok();
    if !element.text_content.is_empty() {
        writeln!(buf, "Text: {}", element.text_content).ok();
    }

    let Some(best) = element.best() else {
        writeln!(buf, "{}", color("No valid selector found", "33", colorize)).ok();
        return;
    };
    writeln!(buf, "GTM selector: {}", color(&best.gtm_selector, "32", colorize)).ok();
    writeln!(buf, "Candidates:").ok();
    for candidate in &element.selectors {
        let label = format!("[{}] {:14}", candidate.priority, candidate.selector_type.label());
        writeln!(
            buf,
            "- {} {}  ({})",
            color(&label, priority_color_code(candidate.priority), colorize),
            candidate.selector,
            candidate.description
        )
        .ok();
    }
}

/// Map priority to ANSI color code.
fn priority_color_code(priority: u8) -> &'static str {
    match priority {
        1 | 2 => "32", // green
        3 | 4 => "33", // yellow
        _ => "31",     // red
    }
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

/// Determine exit code for the inspect command.
pub fn exit_code_for_inspect(candidate_count: usize, fail_on_empty: bool) -> ExitCode {
    if candidate_count == 0 && fail_on_empty {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
