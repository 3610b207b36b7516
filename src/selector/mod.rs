//! Selector candidate engine.
//!
//! Given an element and the document it lives in, produces a bounded
//! [`ElementSnapshot`] plus an ordered list of validated
//! [`SelectorCandidate`]s, each carrying a shared console selector.
//!
//! # Module Structure
//!
//! - [`builder`] - Selector string building and escaping
//! - [`classes`] - Meaningful-class filter and hash cleaning
//! - `describe` - Element describer (snapshot + ancestor path)
//! - `generate` - The five per-type strategies and the validity check
//! - `hierarchy` - Hierarchical console selector and its fallback
//!
//! # Example
//!
//! ```
//! use gtmsel_lib::{HtmlDocument, SelectorEngine, SelectorType};
//!
//! let doc = HtmlDocument::parse(r#"<form><button id="buy" data-testid="buy">Buy</button></form>"#);
//! let button = doc.select_target("button", 0).unwrap().unwrap();
//!
//! let snapshot = SelectorEngine::default().inspect(&doc, &button);
//! assert_eq!(snapshot.selectors[0].selector_type, SelectorType::Id);
//! assert_eq!(snapshot.selectors[0].selector, "#buy");
//! ```

pub mod builder;
pub mod classes;
mod describe;
mod generate;
mod hierarchy;

use tracing::debug;

use crate::config::Config;
use crate::document::{DocumentQuery, DomElement};
use crate::types::{ElementSnapshot, SelectorCandidate};

use classes::ClassFilter;
use hierarchy::HierarchyBuilder;

pub use generate::CANDIDATE_ATTRIBUTES;
pub use hierarchy::{GENERIC_IDS, IMPORTANT_ATTRIBUTES, SEMANTIC_TAGS};

/// Default exclusive upper bound of matches for a useful candidate.
pub const DEFAULT_MAX_MATCHES: usize = 100;

/// Default inclusive upper bound of matches for a console selector.
pub const DEFAULT_CONSOLE_MAX_MATCHES: usize = 10;

/// Tuning knobs for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Candidates must match fewer elements than this
    pub max_matches: usize,
    /// Console selectors must match at most this many elements
    pub console_max_matches: usize,
    /// Levels in the snapshot path
    pub path_depth: usize,
    /// Levels in the structural candidate
    pub structural_depth: usize,
    /// Levels visited by the hierarchical builder
    pub hierarchy_levels: usize,
    /// Characters of text kept in the snapshot
    pub text_limit: usize,
    /// Class prefix of the inspector's own marker classes
    pub internal_class_prefix: String,
    /// Appended to [`IMPORTANT_ATTRIBUTES`]
    pub extra_important_attributes: Vec<String>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl EngineOptions {
    /// Built-in important attributes followed by the configured extras.
    pub fn important_attributes(&self) -> impl Iterator<Item = &str> + '_ {
        IMPORTANT_ATTRIBUTES.iter().copied().chain(
            self.extra_important_attributes
                .iter()
                .map(String::as_str)
                .filter(|extra| !IMPORTANT_ATTRIBUTES.contains(extra)),
        )
    }
}

impl From<&Config> for EngineOptions {
    fn from(config: &Config) -> Self {
        Self {
            max_matches: config.max_matches,
            console_max_matches: config.console_max_matches,
            path_depth: config.path_depth,
            structural_depth: config.structural_depth,
            hierarchy_levels: config.hierarchy_levels,
            text_limit: config.text_limit,
            internal_class_prefix: config.internal_class_prefix.clone(),
            extra_important_attributes: config.extra_important_attributes.clone(),
        }
    }
}

/// Describes elements and generates validated selector candidates.
#[derive(Debug, Clone, Default)]
pub struct SelectorEngine {
    options: EngineOptions,
    filter: ClassFilter,
}

impl SelectorEngine {
    pub fn new(options: EngineOptions) -> Self {
        let filter = ClassFilter::new(options.internal_class_prefix.clone());
        Self { options, filter }
    }

    /// Snapshot of `element` with an empty candidate list.
    pub fn describe<E: DomElement>(&self, element: &E) -> ElementSnapshot {
        describe::describe(element, &self.options, &self.filter)
    }

    /// Valid candidates sorted by priority, each with the shared console selector.
    ///
    /// Strategies run independently; a candidate that does not parse or
    /// matches too few or too many elements is dropped silently.
    pub fn generate<D, E>(&self, doc: &D, element: &E) -> Vec<SelectorCandidate>
    where
        D: DocumentQuery + ?Sized,
        E: DomElement,
    {
        let mut candidates: Vec<SelectorCandidate> =
            generate::raw_candidates(element, &self.options, &self.filter)
                .into_iter()
                .filter(|candidate| {
                    let keep = self.is_valid_selector(doc, &candidate.selector);
                    if !keep {
                        debug!(
                            kind = candidate.selector_type.label(),
                            selector = %candidate.selector,
                            "dropping candidate"
                        );
                    }
                    keep
                })
                .collect();
        // Stable: ties keep strategy order.
        candidates.sort_by_key(|candidate| candidate.priority);

        let base = candidates.first().map(|c| c.selector.clone());
        let console = self.console_selector(doc, element, base.as_deref());
        for candidate in &mut candidates {
            candidate.gtm_selector = console.clone();
        }
        candidates
    }

    /// Describe and generate in one step; the record handed to the UI layer.
    pub fn inspect<D, E>(&self, doc: &D, element: &E) -> ElementSnapshot
    where
        D: DocumentQuery + ?Sized,
        E: DomElement,
    {
        let mut snapshot = self.describe(element);
        snapshot.selectors = self.generate(doc, element);
        debug!(
            tag = %snapshot.tag_name,
            candidates = snapshot.selectors.len(),
            "element inspected"
        );
        snapshot
    }

    /// Whether `selector` parses and matches 1 to `max_matches - 1` elements.
    pub fn is_valid_selector<D: DocumentQuery + ?Sized>(&self, doc: &D, selector: &str) -> bool {
        generate::is_valid_selector(doc, selector, self.options.max_matches)
    }

    /// Multi-level console selector, or `None` when it cannot be made precise.
    pub fn build_hierarchical_selector<D, E>(&self, doc: &D, element: &E) -> Option<String>
    where
        D: DocumentQuery + ?Sized,
        E: DomElement,
    {
        HierarchyBuilder::new(&self.options, &self.filter).build(doc, element)
    }

    /// Hierarchical selector, else a single-element guess (never fails).
    pub fn console_selector<D, E>(&self, doc: &D, element: &E, base: Option<&str>) -> String
    where
        D: DocumentQuery + ?Sized,
        E: DomElement,
    {
        let builder = HierarchyBuilder::new(&self.options, &self.filter);
        builder
            .build(doc, element)
            .unwrap_or_else(|| builder.fallback(element, base))
    }
}
