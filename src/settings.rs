use std::path::Path;

use gtmsel_lib::{Config, EngineOptions, GtmselError};

/// Tracks which CLI flags were explicitly provided vs. defaulted.
#[derive(Debug, Default)]
pub struct InspectFlagSources {
    pub max_matches: bool,
    pub console_max_matches: bool,
}

impl InspectFlagSources {
    pub fn from_args(args: &[String]) -> Self {
        Self {
            max_matches: flag_present(args, "--max-matches"),
            console_max_matches: flag_present(args, "--console-max-matches"),
        }
    }
}

/// Checks if a flag was present in the command-line arguments.
pub fn flag_present(args: &[String], flag: &str) -> bool {
    args.iter()
        .any(|arg| arg == flag || arg.starts_with(&format!("{flag}=")))
}

/// Merge CLI arguments into the config, preferring CLI when flags are present.
///
/// The merged config is validated again, since overrides can break the
/// `consoleMaxMatches < maxMatches` relation.
pub fn resolve_inspect_config(
    cli_max_matches: usize,
    cli_console_max_matches: usize,
    config: &Config,
    flags: &InspectFlagSources,
) -> Result<Config, GtmselError> {
    let resolved = Config {
        max_matches: if flags.max_matches {
            cli_max_matches
        } else {
            config.max_matches
        },
        console_max_matches: if flags.console_max_matches {
            cli_console_max_matches
        } else {
            config.console_max_matches
        },
        ..config.clone()
    };
    resolved.validate()?;
    Ok(resolved)
}

/// Load config from a file, central config, or return defaults.
/// Priority: explicit path > <config dir>/gtmsel/config.toml > defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, GtmselError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        GtmselError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        GtmselError::Config(prefix)
    })?;
    Ok(cfg)
}

/// Format effective engine settings as a single-line string.
pub fn format_effective_config(options: &EngineOptions, config_source: Option<&Path>) -> String {
    let source = config_source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    format!(
        "Effective config [{source}]: maxMatches={}, consoleMaxMatches={}, depths: path={}, structural={}, hierarchy={}, textLimit={}, extraImportantAttributes=[{}]",
        options.max_matches,
        options.console_max_matches,
        options.path_depth,
        options.structural_depth,
        options.hierarchy_levels,
        options.text_limit,
        options.extra_important_attributes.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flag_present_matches_both_spellings() {
        let raw = args(&["gtmsel", "inspect", "--max-matches=20", "--console-max-matches", "4"]);
        assert!(flag_present(&raw, "--max-matches"));
        assert!(flag_present(&raw, "--console-max-matches"));
        assert!(!flag_present(&raw, "--index"));
    }

    #[test]
    fn resolve_prefers_config_when_flags_absent() {
        let config = Config {
            max_matches: 40,
            console_max_matches: 4,
            ..Config::default()
        };
        let resolved =
            resolve_inspect_config(100, 10, &config, &InspectFlagSources::default()).unwrap();
        assert_eq!(resolved.max_matches, 40);
        assert_eq!(resolved.console_max_matches, 4);
    }

    #[test]
    fn resolve_prefers_cli_when_flags_present() {
        let config = Config {
            max_matches: 40,
            ..Config::default()
        };
        let flags = InspectFlagSources::from_args(&args(&["--max-matches", "25"]));
        let resolved = resolve_inspect_config(25, 10, &config, &flags).unwrap();
        assert_eq!(resolved.max_matches, 25);
        assert_eq!(resolved.console_max_matches, 10);
    }

    #[test]
    fn resolve_rejects_inverted_bounds() {
        let flags = InspectFlagSources::from_args(&args(&["--console-max-matches=500"]));
        let err = resolve_inspect_config(100, 500, &Config::default(), &flags).unwrap_err();
        assert!(err.to_string().contains("consoleMaxMatches"));
    }

    #[test]
    fn load_config_wraps_invalid_values() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        file.write_all(b"hierarchyLevels = 0\n").expect("write config");

        let err = load_config(Some(file.path())).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Invalid config"), "got {message}");
        assert!(message.contains("hierarchyLevels"), "got {message}");
    }

    #[test]
    fn effective_config_mentions_source_and_bounds() {
        let line = format_effective_config(&EngineOptions::default(), None);
        assert!(line.contains("[defaults]"));
        assert!(line.contains("maxMatches=100"));
        assert!(line.contains("data-button-type"));
    }
}
