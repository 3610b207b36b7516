//! Selector candidate types.

use serde::{Deserialize, Serialize};

/// Strategy that produced a selector candidate.
///
/// Variants are declared in evaluation order; the derived `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SelectorType {
    #[serde(rename = "ID")]
    Id,
    #[serde(rename = "Data Attribute")]
    DataAttribute,
    #[serde(rename = "Class")]
    Class,
    #[serde(rename = "Attribute")]
    Attribute,
    #[serde(rename = "Structural")]
    Structural,
}

impl SelectorType {
    /// Fixed priority for the strategy; lower is better.
    pub fn priority(self) -> u8 {
        match self {
            SelectorType::Id => 1,
            SelectorType::DataAttribute => 2,
            SelectorType::Class => 3,
            SelectorType::Attribute => 4,
            SelectorType::Structural => 9,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SelectorType::Id => "ID",
            SelectorType::DataAttribute => "Data Attribute",
            SelectorType::Class => "Class",
            SelectorType::Attribute => "Attribute",
            SelectorType::Structural => "Structural",
        }
    }
}

/// One proposed selector for a selected element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorCandidate {
    #[serde(rename = "type")]
    pub selector_type: SelectorType,
    /// Standalone single-element selector
    pub selector: String,
    /// Selector for direct use in a tag-manager trigger console
    pub gtm_selector: String,
    pub description: String,
    pub priority: u8,
}

impl SelectorCandidate {
    /// Builds a candidate with the type's fixed priority and no console selector yet.
    pub fn new(
        selector_type: SelectorType,
        selector: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            selector_type,
            selector: selector.into(),
            gtm_selector: String::new(),
            description: description.into(),
            priority: selector_type.priority(),
        }
    }
}
