use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};
use gtmsel_lib::selector::{DEFAULT_CONSOLE_MAX_MATCHES, DEFAULT_MAX_MATCHES};
use gtmsel_lib::ResourceKind;

#[derive(Parser)]
#[command(name = "gtmsel")]
#[command(
    version,
    about = "GTM Selector Helper - Generate validated CSS selectors for tag-manager triggers",
    long_about = "GTM Selector Helper (gtmsel)\n\nModes:\n- inspect: describe one element of a page and list validated selector candidates, best first, plus a hierarchical selector for the trigger console.\n- session: replay a scripted hover/click/escape inspection session against a page.\n\nInputs are saved HTML files or http(s) URLs. Use --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML, or YAML for .yaml/.yml) with match bounds, depths and fetch settings; CLI flags override config"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect one element and list its selector candidates
    Inspect {
        #[arg(long, help = "Page to inspect (http(s) URL or local .html file)")]
        input: String,

        #[arg(long, help = "CSS selector locating the element to inspect")]
        target: String,

        #[arg(
            long,
            default_value = "0",
            help = "Which match of --target to inspect (0-based, document order)"
        )]
        index: usize,

        #[arg(long, value_enum, help = "Override type detection for the input")]
        input_type: Option<ResourceType>,

        #[arg(
            long,
            default_value_t = DEFAULT_MAX_MATCHES,
            help = "Candidates must match fewer elements than this"
        )]
        max_matches: usize,

        #[arg(
            long,
            default_value_t = DEFAULT_CONSOLE_MAX_MATCHES,
            help = "Hierarchical console selectors may match at most this many elements"
        )]
        console_max_matches: usize,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,

        #[arg(long, help = "Exit with code 1 when no selector candidate survives validation")]
        fail_on_empty: bool,
    },

    /// Replay a scripted inspection session
    Session {
        #[arg(long, help = "Page to inspect (http(s) URL or local .html file)")]
        input: String,

        #[arg(long, value_enum, help = "Override type detection for the input")]
        input_type: Option<ResourceType>,

        #[arg(
            long = "event",
            value_name = "STEP",
            required = true,
            help = "Session step, repeatable: on, off, hover=<css>[@index], unhover, click, escape"
        )]
        events: Vec<SessionStep>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ResourceType {
    Url,
    File,
}

impl From<ResourceType> for ResourceKind {
    fn from(value: ResourceType) -> Self {
        match value {
            ResourceType::Url => ResourceKind::Url,
            ResourceType::File => ResourceKind::File,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
}

/// One scripted interaction of a replayed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStep {
    On,
    Off,
    Hover { selector: String, index: usize },
    Unhover,
    Click,
    Escape,
}

impl FromStr for SessionStep {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let step = raw.trim();
        if let Some(target) = step.strip_prefix("hover=") {
            let (selector, index) = target
                .rsplit_once('@')
                .and_then(|(selector, index)| Some((selector, index.parse::<usize>().ok()?)))
                .unwrap_or((target, 0));
            if selector.trim().is_empty() {
                return Err("hover step needs a selector, e.g. hover=button@0".to_string());
            }
            return Ok(SessionStep::Hover {
                selector: selector.trim().to_string(),
                index,
            });
        }

        match step.to_ascii_lowercase().as_str() {
            "on" => Ok(SessionStep::On),
            "off" => Ok(SessionStep::Off),
            "unhover" => Ok(SessionStep::Unhover),
            "click" => Ok(SessionStep::Click),
            "escape" | "esc" => Ok(SessionStep::Escape),
            other => Err(format!(
                "unknown session step '{other}' (expected on, off, hover=<css>[@index], unhover, click, escape)"
            )),
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
