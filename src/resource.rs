use std::fs;
use std::path::Path;
use thiserror::Error;
use url::Url;

use crate::error::GtmselError;
use crate::types::ResourceKind;

#[derive(Debug, Clone)]
pub struct ParsedResource {
    pub kind: ResourceKind,
    pub value: String,
}

#[derive(Debug, Error)]
pub enum ResourceParseError {
    #[error("Invalid URL '{value}': {message}. Hint: include http(s):// and ensure the URL is well-formed.")]
    InvalidUrl { value: String, message: String },
    #[error("Unsupported URL scheme '{scheme}' in '{value}'. Hint: only http and https pages can be fetched.")]
    UnsupportedScheme { value: String, scheme: String },
    #[error("Local file not found: {path}. Hint: check the path relative to the current working directory or use an absolute path.")]
    FileNotFound { path: String },
    #[error("Unsupported file extension '{extension}'. Supported page extensions: {supported}.")]
    UnsupportedExtension {
        extension: String,
        supported: String,
    },
}

impl From<ResourceParseError> for GtmselError {
    fn from(err: ResourceParseError) -> Self {
        GtmselError::Config(err.to_string())
    }
}

const HTML_EXTENSIONS: &[&str] = &["html", "htm", "xhtml"];

/// Classifies `value` as a URL or a local HTML file.
///
/// With an explicit `override_type` the value is only checked for that kind,
/// so extension-less files can be read with `--input-type file`.
pub fn parse_resource(
    value: &str,
    override_type: Option<ResourceKind>,
) -> Result<ParsedResource, ResourceParseError> {
    match override_type {
        Some(ResourceKind::Url) => parse_url_resource(value),
        Some(ResourceKind::File) => parse_local_resource(value, false),
        None if value.starts_with("http://") || value.starts_with("https://") => {
            parse_url_resource(value)
        }
        None => parse_local_resource(value, true),
    }
}

fn parse_url_resource(value: &str) -> Result<ParsedResource, ResourceParseError> {
    let url = Url::parse(value).map_err(|e| ResourceParseError::InvalidUrl {
        value: value.to_string(),
        message: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ResourceParseError::UnsupportedScheme {
            value: value.to_string(),
            scheme: url.scheme().to_string(),
        });
    }

    Ok(ParsedResource {
        kind: ResourceKind::Url,
        value: url.to_string(),
    })
}

fn parse_local_resource(value: &str, check_extension: bool) -> Result<ParsedResource, ResourceParseError> {
    let path = Path::new(value);

    if check_extension {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        if !HTML_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ResourceParseError::UnsupportedExtension {
                extension: if extension.is_empty() {
                    "no extension".to_string()
                } else {
                    extension
                },
                supported: HTML_EXTENSIONS.join(", "),
            });
        }
    }

    let is_file = fs::metadata(path).map(|m| m.is_file()).unwrap_or(false);
    if !is_file {
        return Err(ResourceParseError::FileNotFound {
            path: path.to_string_lossy().into_owned(),
        });
    }

    Ok(ParsedResource {
        kind: ResourceKind::File,
        value: value.to_string(),
    })
}
