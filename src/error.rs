use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError;

#[derive(Debug, Error)]
pub enum GtmselError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ParseError),

    #[error("HTTP status {status} fetching {url}")]
    HttpStatus { url: String, status: StatusCode },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Target error: {0}")]
    Target(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl GtmselError {
    pub fn target(message: impl Into<String>) -> Self {
        GtmselError::Target(message.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            GtmselError::Io(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            GtmselError::Network(e) => ErrorPayload::new(
                ErrorCategory::Network,
                e.to_string(),
                "Check connectivity/proxy/VPN and retry; raise fetch.timeout for slow pages.",
            ),
            GtmselError::InvalidUrl(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Verify URL/format (e.g., https://example.com).",
            ),
            GtmselError::HttpStatus { status, .. } => ErrorPayload::new(
                ErrorCategory::Network,
                self.to_string(),
                if status.is_client_error() {
                    "Make sure the page is reachable without login, or save it and pass the .html file instead."
                } else {
                    "The server failed to respond; retry later or pass a saved .html file instead."
                },
            ),
            GtmselError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check JSON/serialization inputs; run with --verbose for details.",
            ),
            GtmselError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("unsupported file extension") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Use a saved HTML page (.html, .htm, .xhtml) or pass --input-type explicitly.",
                    )
                } else if lower.contains("file not found") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Verify the file exists; use an absolute path or run from the working directory.",
                    )
                } else if lower.contains("maxmatches")
                    || lower.contains("depth")
                    || lower.contains("hierarchylevels")
                    || lower.contains("textlimit")
                    || lower.contains("timeout")
                    || lower.contains("extraimportantattributes")
                {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Fix the value in your config file (or the matching CLI flag); all bounds must be positive and consoleMaxMatches < maxMatches.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check flags/paths (e.g., --input page.html --target \"button\") and the config file syntax.",
                    )
                }
            }
            GtmselError::Target(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("malformed") {
                    ErrorPayload::new(
                        ErrorCategory::Target,
                        msg.to_string(),
                        "Quote the --target selector in your shell and check its CSS syntax.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Target,
                        msg.to_string(),
                        "Check --target/--index against the page; content rendered by scripts is not present in saved HTML.",
                    )
                }
            }
            GtmselError::Unknown(msg) => ErrorPayload::new(
                ErrorCategory::Unknown,
                msg.to_string(),
                "Re-run with --verbose; file an issue if persistent.",
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, GtmselError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Network,
    Target,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}
