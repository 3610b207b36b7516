//! Headless HTML document backed by `scraper`.

use scraper::{ElementRef, Html, Selector};
use std::fmt;

use super::{DocumentQuery, DomElement, QueryError};

/// A parsed HTML document that answers selector queries.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parses a full HTML document; fragments are wrapped in `<html><body>`.
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// The `index`-th element matching `selector`, if any.
    pub fn select_target(
        &self,
        selector: &str,
        index: usize,
    ) -> Result<Option<HtmlElement<'_>>, QueryError> {
        Ok(self.query_all(selector)?.into_iter().nth(index))
    }
}

impl fmt::Debug for HtmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlDocument").finish_non_exhaustive()
    }
}

fn parse_selector(selector: &str) -> Result<Selector, QueryError> {
    Selector::parse(selector).map_err(|e| QueryError::Malformed {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

impl DocumentQuery for HtmlDocument {
    type Element<'a> = HtmlElement<'a>;

    fn query_all(&self, selector: &str) -> Result<Vec<HtmlElement<'_>>, QueryError> {
        let parsed = parse_selector(selector)?;
        Ok(self.html.select(&parsed).map(HtmlElement).collect())
    }

    fn query_count(&self, selector: &str) -> Result<usize, QueryError> {
        let parsed = parse_selector(selector)?;
        Ok(self.html.select(&parsed).count())
    }
}

/// Handle to one element of an [`HtmlDocument`].
#[derive(Clone, Copy)]
pub struct HtmlElement<'a>(ElementRef<'a>);

impl PartialEq for HtmlElement<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0.value(), other.0.value())
    }
}

impl Eq for HtmlElement<'_> {}

impl fmt::Debug for HtmlElement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let element = self.0.value();
        f.debug_struct("HtmlElement")
            .field("tag", &element.name())
            .field("id", &element.id())
            .finish()
    }
}

impl<'a> DomElement for HtmlElement<'a> {
    fn tag_name(&self) -> String {
        self.0.value().name().to_ascii_uppercase()
    }

    fn id(&self) -> String {
        self.0.value().id().unwrap_or_default().to_string()
    }

    fn class_name(&self) -> String {
        self.0.value().attr("class").unwrap_or_default().to_string()
    }

    fn attributes(&self) -> Vec<(String, String)> {
        self.0
            .value()
            .attrs()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.value().attr(name).map(str::to_string)
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent().and_then(ElementRef::wrap).map(HtmlElement)
    }

    fn children(&self) -> Vec<Self> {
        self.0
            .children()
            .filter_map(ElementRef::wrap)
            .map(HtmlElement)
            .collect()
    }

    fn text_content(&self) -> String {
        self.0.text().collect()
    }
}
