use serde::{Deserialize, Serialize};

/// Classification of an input page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Page fetched over http(s)
    Url,
    /// Saved HTML file on disk
    File,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Url => "url",
            ResourceKind::File => "file",
        }
    }
}
