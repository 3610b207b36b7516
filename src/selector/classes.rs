//! Class-name heuristics.
//!
//! Decides which classes are stable enough to target ("meaningful") and
//! recovers readable tokens from hashed CSS-module and CSS-in-JS names.
//! The patterns are literal naming conventions of common styling tools.

use once_cell::sync::Lazy;
use regex::Regex;

/// Prefixes emitted by CSS-in-JS libraries.
pub const CSS_IN_JS_PREFIXES: &[&str] = &["css-", "sc-", "emotion-", "styled-"];

/// Classes too generic to identify anything.
pub const GENERIC_CLASS_WORDS: &[&str] = &["container", "wrapper", "content", "box", "item"];

/// Prefix of the marker classes the inspector UI itself uses.
pub const DEFAULT_INTERNAL_PREFIX: &str = "gtm-selector-helper";

/// Hyphen segments that carry no meaning in hashed names.
const NOISE_SEGMENTS: &[&str] = &["module", "styles", "style"];

/// `Component-module__name___hash`
static CSS_MODULE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+?__([A-Za-z0-9-]+?)___[A-Za-z0-9_-]+$")
        .expect("css module pattern is valid")
});

/// Filter shared by the describer, the class strategy and the console builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassFilter {
    internal_prefix: String,
}

impl Default for ClassFilter {
    fn default() -> Self {
        Self::new(DEFAULT_INTERNAL_PREFIX)
    }
}

impl ClassFilter {
    pub fn new(internal_prefix: impl Into<String>) -> Self {
        Self {
            internal_prefix: internal_prefix.into(),
        }
    }

    /// Generated by a styling tool or by the inspector itself.
    pub fn is_generated(&self, class: &str) -> bool {
        CSS_IN_JS_PREFIXES.iter().any(|p| class.starts_with(p))
            || (!self.internal_prefix.is_empty() && class.starts_with(&self.internal_prefix))
    }

    pub fn is_meaningful(&self, class: &str) -> bool {
        !self.is_generated(class) && is_readable_token(class)
    }

    /// Meaningful classes in their original order.
    pub fn meaningful<'c, S: AsRef<str>>(&self, classes: &'c [S]) -> Vec<&'c str> {
        classes
            .iter()
            .map(AsRef::as_ref)
            .filter(|class| self.is_meaningful(class))
            .collect()
    }

    /// Readable token for a class, with hashing stripped.
    ///
    /// Returns `None` when nothing meaningful survives.
    pub fn clean(&self, class: &str) -> Option<String> {
        if self.is_generated(class) {
            return None;
        }

        let token = if let Some(caps) = CSS_MODULE_PATTERN.captures(class) {
            caps.get(1).map(|m| m.as_str().to_string())?
        } else if is_hash_suffixed(class) {
            hashed_name_segment(class)?
        } else {
            class.to_string()
        };

        (is_readable_token(&token) && !is_hash_like(&token)).then_some(token)
    }
}

/// Whether `class` survives the default filter.
pub fn is_meaningful_class(class: &str) -> bool {
    ClassFilter::default().is_meaningful(class)
}

/// Readable token for `class` under the default filter.
pub fn clean_class_name(class: &str) -> Option<String> {
    ClassFilter::default().clean(class)
}

pub fn is_generic_class(class: &str) -> bool {
    GENERIC_CLASS_WORDS
        .iter()
        .any(|word| word.eq_ignore_ascii_case(class))
}

fn is_readable_token(token: &str) -> bool {
    token.chars().count() > 2
        && !token.starts_with(|c: char| c.is_ascii_digit())
        && !is_generic_class(token)
}

/// Looks like a build-tool hash: alphanumeric with both letters and digits.
fn is_hash_like(segment: &str) -> bool {
    segment.len() >= 5
        && segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && segment.chars().any(|c| c.is_ascii_digit())
        && segment.chars().any(|c| c.is_ascii_alphabetic())
}

/// Hyphenated name whose last segment is a hash (`card-3xK9p`).
fn is_hash_suffixed(class: &str) -> bool {
    match class.rsplit_once('-') {
        Some((head, last)) => !head.is_empty() && is_hash_like(last),
        None => false,
    }
}

/// First readable, non-hash segment of a hash-suffixed name.
fn hashed_name_segment(class: &str) -> Option<String> {
    class
        .split('-')
        .filter(|s| !is_hash_like(s))
        .filter(|s| !NOISE_SEGMENTS.iter().any(|n| n.eq_ignore_ascii_case(s)))
        .find(|s| is_readable_token(s))
        .map(str::to_string)
}
