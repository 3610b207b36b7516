use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GtmselError, Result};
use crate::selector::classes::DEFAULT_INTERNAL_PREFIX;
use crate::selector::{DEFAULT_CONSOLE_MAX_MATCHES, DEFAULT_MAX_MATCHES};

const CONFIG_DIR_NAME: &str = "gtmsel";
const CONFIG_FILE_NAME: &str = "config.toml";

pub const DEFAULT_USER_AGENT: &str = concat!("gtmsel/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub max_matches: usize,
    pub console_max_matches: usize,
    pub path_depth: usize,
    pub structural_depth: usize,
    pub hierarchy_levels: usize,
    pub text_limit: usize,
    pub internal_class_prefix: String,
    pub extra_important_attributes: Vec<String>,
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FetchConfig {
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_matches: DEFAULT_MAX_MATCHES,
            console_max_matches: DEFAULT_CONSOLE_MAX_MATCHES,
            path_depth: 3,
            structural_depth: 5,
            hierarchy_levels: 3,
            text_limit: 50,
            internal_class_prefix: DEFAULT_INTERNAL_PREFIX.to_string(),
            extra_important_attributes: vec!["data-button-type".to_string()],
            fetch: FetchConfig::default(),
        }
    }
}

impl Config {
    /// `<config dir>/gtmsel/config.toml`, when the platform has a config dir.
    pub fn central_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads `path`, else the central config when it exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::central_config_path() {
            Some(central) if central.is_file() => Self::from_file(&central),
            _ => {
                debug!("no config file found; using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parses a TOML file, or YAML for `.yaml`/`.yml`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
            .unwrap_or(false);

        let config = if is_yaml {
            serde_yaml::from_str(&raw).map_err(|e| GtmselError::Config(e.to_string()))?
        } else {
            toml::from_str(&raw).map_err(|e| GtmselError::Config(e.to_string()))?
        };
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let bounds = [
            ("maxMatches", self.max_matches),
            ("consoleMaxMatches", self.console_max_matches),
            ("pathDepth", self.path_depth),
            ("structuralDepth", self.structural_depth),
            ("hierarchyLevels", self.hierarchy_levels),
            ("textLimit", self.text_limit),
        ];
        if let Some((name, _)) = bounds.iter().find(|(_, value)| *value == 0) {
            return Err(GtmselError::Config(format!("{name} must be greater than 0")));
        }
        if self.console_max_matches >= self.max_matches {
            return Err(GtmselError::Config(format!(
                "consoleMaxMatches ({}) must be lower than maxMatches ({})",
                self.console_max_matches, self.max_matches
            )));
        }
        if self.internal_class_prefix.trim().is_empty() {
            return Err(GtmselError::Config(
                "internalClassPrefix must not be empty".to_string(),
            ));
        }
        for name in &self.extra_important_attributes {
            let invalid = name.is_empty()
                || name
                    .chars()
                    .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '=' | '[' | ']'));
            if invalid {
                return Err(GtmselError::Config(format!(
                    "Invalid attribute name in extraImportantAttributes: {name:?}"
                )));
            }
        }
        if self.fetch.timeout.is_zero() {
            return Err(GtmselError::Config(
                "fetch.timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
