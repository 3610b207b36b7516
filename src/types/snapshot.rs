//! Element snapshot types for selected page elements.
//!
//! A snapshot is produced fresh on every selection and never mutated
//! afterwards; it holds no live DOM references.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::candidate::SelectorCandidate;

/// Bounded description of one DOM element at selection time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSnapshot {
    /// Upper-case tag name (e.g., "BUTTON")
    pub tag_name: String,
    /// Element id, empty if absent
    pub id: String,
    /// Raw space-joined class list, empty if absent
    pub class_name: String,
    /// Trimmed text content, truncated
    pub text_content: String,
    /// All attributes of the element
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Short ancestor path, root-to-leaf
    pub path: String,
    /// Candidates sorted by ascending priority
    #[serde(default)]
    pub selectors: Vec<SelectorCandidate>,
}

impl ElementSnapshot {
    /// Short label for UI lists: `#id`, else up to two classes, else `<tag>`.
    pub fn display_name(&self) -> String {
        if !self.id.is_empty() {
            return format!("#{}", self.id);
        }
        let classes: Vec<&str> = self.class_name.split_whitespace().collect();
        if !classes.is_empty() {
            let shown = classes.iter().take(2).copied().collect::<Vec<_>>().join(".");
            let more = if classes.len() > 2 { "..." } else { "" };
            return format!(".{shown}{more}");
        }
        format!("<{}>", self.tag_name.to_ascii_lowercase())
    }

    /// Highest-priority candidate, if any survived validation.
    pub fn best(&self) -> Option<&SelectorCandidate> {
        self.selectors.first()
    }
}
