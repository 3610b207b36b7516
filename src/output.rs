use crate::error::ErrorPayload;
use crate::inspector::SessionNotice;
use crate::resource::ParsedResource;
use crate::types::{ElementSnapshot, ResourceKind};
use serde::{Deserialize, Serialize};

/// Schema version for output payloads.
pub const GTMSEL_OUTPUT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum GtmselOutput {
    Inspect(InspectOutput),
    Session(SessionOutput),
    Error(ErrorOutput),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub kind: ResourceKind,
    pub value: String,
}

impl From<&ParsedResource> for ResourceDescriptor {
    fn from(resource: &ParsedResource) -> Self {
        Self {
            kind: resource.kind,
            value: resource.value.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectOutput {
    pub version: String,
    pub input: ResourceDescriptor,
    pub target: String,
    pub index: usize,
    pub element: ElementSnapshot,
    pub summary: Summary,
}

/// Headline facts about one inspected element.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub display_name: String,
    pub candidate_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_selector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtm_selector: Option<String>,
}

impl Summary {
    pub fn from_snapshot(snapshot: &ElementSnapshot) -> Self {
        let best = snapshot.best();
        Self {
            display_name: snapshot.display_name(),
            candidate_count: snapshot.selectors.len(),
            best_selector: best.map(|c| c.selector.clone()),
            gtm_selector: best.map(|c| c.gtm_selector.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOutput {
    pub version: String,
    pub input: ResourceDescriptor,
    #[serde(default)]
    pub notices: Vec<SessionNotice>,
    pub final_state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<ElementSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: ErrorPayload,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GtmselError;
    use crate::types::{SelectorCandidate, SelectorType};
    use std::collections::BTreeMap;

    fn snapshot() -> ElementSnapshot {
        let mut id = SelectorCandidate::new(SelectorType::Id, "#buy", "Most stable selector");
        id.gtm_selector = r#"form button[data-testid="buy"]"#.to_string();
        ElementSnapshot {
            tag_name: "BUTTON".to_string(),
            id: "buy".to_string(),
            class_name: "btn".to_string(),
            text_content: "Buy".to_string(),
            attributes: BTreeMap::from([("id".to_string(), "buy".to_string())]),
            path: "button#buy".to_string(),
            selectors: vec![id],
        }
    }

    fn input() -> ResourceDescriptor {
        ResourceDescriptor {
            kind: ResourceKind::File,
            value: "checkout.html".to_string(),
        }
    }

    #[test]
    fn inspect_output_serializes() {
        let element = snapshot();
        let output = GtmselOutput::Inspect(InspectOutput {
            version: GTMSEL_OUTPUT_VERSION.to_string(),
            input: input(),
            target: "button".to_string(),
            index: 0,
            summary: Summary::from_snapshot(&element),
            element,
        });

        let json = serde_json::to_value(&output).expect("serialize inspect output");
        assert_eq!(json["mode"], "inspect");
        assert_eq!(json["input"]["kind"], "file");
        assert_eq!(json["element"]["tagName"], "BUTTON");
        assert_eq!(json["element"]["selectors"][0]["type"], "ID");
        assert_eq!(
            json["element"]["selectors"][0]["gtmSelector"],
            r#"form button[data-testid="buy"]"#
        );
        assert_eq!(json["summary"]["displayName"], "#buy");
        assert_eq!(json["summary"]["bestSelector"], "#buy");
    }

    #[test]
    fn empty_summary_omits_selectors() {
        let mut element = snapshot();
        element.selectors.clear();
        let summary = Summary::from_snapshot(&element);
        assert_eq!(summary.candidate_count, 0);

        let json = serde_json::to_string(&summary).expect("serialize summary");
        assert!(!json.contains("bestSelector"));
        assert!(!json.contains("gtmSelector"));
    }

    #[test]
    fn session_output_serializes_notices() {
        let output = GtmselOutput::Session(SessionOutput {
            version: GTMSEL_OUTPUT_VERSION.to_string(),
            input: input(),
            notices: vec![
                SessionNotice::Activated,
                SessionNotice::ElementSelected(snapshot()),
                SessionNotice::Dismissed,
            ],
            final_state: "inactive".to_string(),
            selection: None,
        });

        let json = serde_json::to_value(&output).expect("serialize session output");
        assert_eq!(json["mode"], "session");
        assert_eq!(json["finalState"], "inactive");
        assert_eq!(json["notices"][0]["notice"], "activated");
        assert_eq!(json["notices"][1]["notice"], "element-selected");
        assert_eq!(json["notices"][1]["element"]["id"], "buy");
        assert!(json.get("selection").is_none());
    }

    #[test]
    fn error_output_round_trips() {
        let payload = GtmselError::target("No element matches 'a.buy'").to_payload();
        let output = GtmselOutput::Error(ErrorOutput {
            version: GTMSEL_OUTPUT_VERSION.to_string(),
            message: Some(payload.message.clone()),
            error: payload,
        });

        let json = serde_json::to_string(&output).expect("serialize error output");
        assert!(json.contains("\"mode\":\"error\""));
        assert!(json.contains("\"category\":\"target\""));

        let parsed: GtmselOutput = serde_json::from_str(&json).expect("parse error output");
        assert!(matches!(parsed, GtmselOutput::Error(_)));
    }
}
