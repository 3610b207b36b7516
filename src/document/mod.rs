//! Document access for the selector engine.
//!
//! The engine never reaches for a global document. Callers inject a
//! [`DocumentQuery`] capability, and the elements it yields implement
//! [`DomElement`]. [`HtmlDocument`] is the headless implementation used by
//! the CLI and the tests.
//!
//! # Module Structure
//!
//! - `html` - `scraper`-backed document and element handles
//!
//! # Example
//!
//! ```
//! use gtmsel_lib::{DocumentQuery, HtmlDocument};
//!
//! let doc = HtmlDocument::parse(r#"<body><a id="cta" href="/buy">Buy</a></body>"#);
//! assert_eq!(doc.query_count("#cta").unwrap(), 1);
//! assert!(doc.query_count("#").is_err());
//! ```

mod html;

use thiserror::Error;

pub use html::{HtmlDocument, HtmlElement};

/// Failure of a selector query against a document.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Malformed selector '{selector}': {message}")]
    Malformed { selector: String, message: String },
}

/// A DOM-like element node.
pub trait DomElement: Clone + PartialEq {
    /// Upper-case tag name, as a browser DOM reports it.
    fn tag_name(&self) -> String;

    /// Element id, empty when absent.
    fn id(&self) -> String;

    /// Raw `class` attribute, empty when absent.
    fn class_name(&self) -> String;

    /// All attributes in document order.
    fn attributes(&self) -> Vec<(String, String)>;

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes()
            .into_iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value)
    }

    fn parent(&self) -> Option<Self>;

    /// Element children only; text and comment nodes are skipped.
    fn children(&self) -> Vec<Self>;

    fn text_content(&self) -> String;

    fn local_name(&self) -> String {
        self.tag_name().to_ascii_lowercase()
    }

    fn classes(&self) -> Vec<String> {
        self.class_name()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    /// Whether upward walks must stop here (`<body>` or `<html>`).
    fn is_root_boundary(&self) -> bool {
        matches!(self.tag_name().as_str(), "BODY" | "HTML")
    }

    /// Nearest inclusive ancestor satisfying `predicate`.
    fn closest<F>(&self, predicate: F) -> Option<Self>
    where
        F: Fn(&Self) -> bool,
    {
        let mut current = Some(self.clone());
        while let Some(element) = current {
            if predicate(&element) {
                return Some(element);
            }
            current = element.parent();
        }
        None
    }
}

/// `querySelectorAll`-equivalent capability over one document.
pub trait DocumentQuery {
    type Element<'a>: DomElement
    where
        Self: 'a;

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Element<'_>>, QueryError>;

    fn query_count(&self, selector: &str) -> Result<usize, QueryError> {
        self.query_all(selector).map(|matches| matches.len())
    }
}
