//! GTM Selector Helper Library
//!
//! Turns a DOM element the user points at into a ranked list of validated
//! CSS selectors, plus one hierarchical selector suited to a tag-manager
//! trigger console. Pages come from local HTML files or URLs and are
//! queried headlessly.
//!
//! # Module Overview
//!
//! - [`document`] - DOM element abstraction and the injected query capability
//! - [`selector`] - Describer, candidate strategies and the console selector
//! - [`inspector`] - Hover/click/escape inspection session
//! - [`config`] - Configuration file support
//! - [`resource`] / [`loader`] - Input classification and page loading
//! - [`types`] - Serializable snapshot and candidate records
//! - [`output`] - JSON output schemas
//!
//! # Example
//!
//! ```
//! use gtmsel_lib::{HtmlDocument, SelectorEngine, SelectorType};
//!
//! let doc = HtmlDocument::parse(
//!     r#"<div><form><button id="submit-btn" class="css-x3f btn-primary" data-testid="submit">Submit</button></form></div>"#,
//! );
//! let button = doc.select_target("button", 0).unwrap().unwrap();
//!
//! let snapshot = SelectorEngine::default().inspect(&doc, &button);
//! let kinds: Vec<SelectorType> = snapshot.selectors.iter().map(|c| c.selector_type).collect();
//! assert_eq!(&kinds[..3], &[SelectorType::Id, SelectorType::DataAttribute, SelectorType::Class]);
//! assert_eq!(snapshot.selectors[2].selector, ".btn-primary");
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod inspector;
pub mod loader;
pub mod output;
pub mod resource;
pub mod selector;
pub mod types;

pub use config::{Config, FetchConfig};
pub use document::{DocumentQuery, DomElement, HtmlDocument, HtmlElement, QueryError};
pub use error::{ErrorCategory, ErrorPayload, GtmselError, Result};
pub use inspector::{InspectionSession, InspectorEvent, InspectorState, SessionNotice};
pub use loader::{load_document, load_html, LoadOptions};
pub use output::{
    ErrorOutput, GtmselOutput, InspectOutput, ResourceDescriptor, SessionOutput, Summary,
    GTMSEL_OUTPUT_VERSION,
};
pub use resource::{parse_resource, ParsedResource, ResourceParseError};
pub use selector::classes::{clean_class_name, is_meaningful_class};
pub use selector::{EngineOptions, SelectorEngine};
pub use types::{ElementSnapshot, ResourceKind, SelectorCandidate, SelectorType};
