//! Hierarchical selector for tag-manager trigger consoles.
//!
//! Combines up to a few ancestor levels of meaningful single-element
//! selectors into one descendant selector that must match 1 to
//! `console_max_matches` elements. When that fails, a single-element guess
//! is returned instead.

use tracing::debug;

use crate::document::{DocumentQuery, DomElement};

use super::builder::{join_descendant, SelectorBuilder};
use super::classes::ClassFilter;
use super::generate::count_matches;
use super::EngineOptions;

/// Attributes preferred for a level, in order; configured extras follow.
pub const IMPORTANT_ATTRIBUTES: &[&str] = &[
    "aria-label",
    "data-testid",
    "data-cy",
    "data-qa",
    "data-automation-id",
    "role",
    "name",
    "type",
];

/// Boilerplate ids of app shells.
pub const GENERIC_IDS: &[&str] = &["root", "main", "app", "wrapper", "container", "content"];

/// Tags specific enough to stand alone as a level.
pub const SEMANTIC_TAGS: &[&str] = &[
    "header", "nav", "main", "section", "article", "aside", "footer", "form", "fieldset",
];

const GENERIC_TAGS: &[&str] = &["div", "span"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    /// `data-*` / `aria-*` attribute
    ScopedAttribute,
    Attribute,
    Id,
    Class,
    Tag,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Level {
    selector: String,
    anchor: Anchor,
}

impl Level {
    fn new(selector: String, anchor: Anchor) -> Self {
        Self { selector, anchor }
    }
}

pub(crate) struct HierarchyBuilder<'a> {
    options: &'a EngineOptions,
    filter: &'a ClassFilter,
}

impl<'a> HierarchyBuilder<'a> {
    pub(crate) fn new(options: &'a EngineOptions, filter: &'a ClassFilter) -> Self {
        Self { options, filter }
    }

    /// Multi-level selector, validated against `doc`.
    pub(crate) fn build<D, E>(&self, doc: &D, element: &E) -> Option<String>
    where
        D: DocumentQuery + ?Sized,
        E: DomElement,
    {
        let mut levels: Vec<String> = Vec::new();
        let mut visited = 0;
        let mut current = Some(element.clone());

        while let Some(node) = current {
            if visited >= self.options.hierarchy_levels || node.is_root_boundary() {
                break;
            }
            visited += 1;
            let parent = node.parent();

            let Some(level) = self.level_selector(&node) else {
                // Ancestors alone would match the container, not the element.
                if visited == 1 {
                    debug!("element has no level of its own");
                    return None;
                }
                current = parent;
                continue;
            };
            levels.push(level.selector);
            match level.anchor {
                Anchor::Id => break,
                Anchor::ScopedAttribute => {
                    if let Some(context) = parent
                        .as_ref()
                        .filter(|p| {
                            visited < self.options.hierarchy_levels && !p.is_root_boundary()
                        })
                        .and_then(|p| self.level_selector(p))
                    {
                        levels.push(context.selector);
                    }
                    break;
                }
                _ => {}
            }
            current = parent;
        }

        if levels.len() < 2 {
            debug!(levels = levels.len(), "hierarchical selector needs two levels");
            return None;
        }

        levels.reverse();
        let selector = join_descendant(&levels);
        match count_matches(doc, &selector) {
            Some(count) if (1..=self.options.console_max_matches).contains(&count) => {
                Some(selector)
            }
            count => {
                debug!(%selector, ?count, "hierarchical selector rejected");
                None
            }
        }
    }

    /// Single-element selector, no document validation.
    pub(crate) fn fallback<E: DomElement>(&self, element: &E, base: Option<&str>) -> String {
        let tag = element.local_name();
        if let Some(level) = self.attribute_level(element, &tag) {
            return level.selector;
        }
        let id = element.id();
        if !id.is_empty() {
            return SelectorBuilder::tag(&tag).id(&id).build();
        }
        if let Some(level) = self.class_level(element, &tag) {
            return level.selector;
        }
        match base {
            Some(base) if !base.is_empty() => base.to_string(),
            _ => tag,
        }
    }

    /// Meaningful selector for one level; `None` for plain `div`/`span`.
    fn level_selector<E: DomElement>(&self, element: &E) -> Option<Level> {
        let tag = element.local_name();
        if let Some(level) = self.attribute_level(element, &tag) {
            return Some(level);
        }

        let id = element.id();
        if !id.is_empty() && !is_generic_id(&id) {
            return Some(Level::new(
                SelectorBuilder::tag(&tag).id(&id).build(),
                Anchor::Id,
            ));
        }

        if let Some(level) = self.class_level(element, &tag) {
            return Some(level);
        }

        if SEMANTIC_TAGS.contains(&tag.as_str()) {
            return Some(Level::new(tag, Anchor::Tag));
        }
        if GENERIC_TAGS.contains(&tag.as_str()) {
            return None;
        }
        Some(Level::new(tag, Anchor::Tag))
    }

    fn attribute_level<E: DomElement>(&self, element: &E, tag: &str) -> Option<Level> {
        self.options.important_attributes().find_map(|name| {
            let value = element.attribute(name).filter(|v| !v.is_empty())?;
            let anchor = if name.starts_with("data-") || name.starts_with("aria-") {
                Anchor::ScopedAttribute
            } else {
                Anchor::Attribute
            };
            Some(Level::new(
                SelectorBuilder::tag(tag).attribute(name, &value).build(),
                anchor,
            ))
        })
    }

    /// `tag.class`, or `tag[class*="token"]` when hashing was stripped.
    fn class_level<E: DomElement>(&self, element: &E, tag: &str) -> Option<Level> {
        element.classes().iter().find_map(|raw| {
            let token = self.filter.clean(raw)?;
            let builder = SelectorBuilder::tag(tag);
            let selector = if &token == raw {
                builder.class(raw)
            } else {
                builder.attribute_contains("class", &token)
            };
            Some(Level::new(selector.build(), Anchor::Class))
        })
    }
}

fn is_generic_id(id: &str) -> bool {
    GENERIC_IDS.iter().any(|g| g.eq_ignore_ascii_case(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlDocument;

    fn build_for(html: &str, target: &str) -> (Option<String>, String) {
        let doc = HtmlDocument::parse(html);
        let element = doc.select_target(target, 0).unwrap().expect("target exists");
        let options = EngineOptions::default();
        let filter = ClassFilter::default();
        let builder = HierarchyBuilder::new(&options, &filter);
        (
            builder.build(&doc, &element),
            builder.fallback(&element, Some("#fallback-base")),
        )
    }

    #[test]
    fn scoped_attribute_adds_one_context_level() {
        let (hierarchical, _) = build_for(
            r#"<div><form><button data-testid="submit">Go</button></form></div>"#,
            "button",
        );
        assert_eq!(
            hierarchical.as_deref(),
            Some(r#"form button[data-testid="submit"]"#)
        );
    }

    #[test]
    fn generic_context_level_is_not_added() {
        let (hierarchical, fallback) = build_for(
            r#"<div><button aria-label="Close">x</button></div>"#,
            "button",
        );
        assert_eq!(hierarchical, None);
        assert_eq!(fallback, r#"button[aria-label="Close"]"#);
    }

    #[test]
    fn generic_leaf_never_yields_an_ancestor_selector() {
        let (hierarchical, fallback) = build_for(
            r#"<nav><ul class="menu"><span>x</span></ul></nav><ul class="other"></ul>"#,
            "span",
        );
        assert_eq!(hierarchical, None);
        assert_eq!(fallback, "#fallback-base");
    }

    #[test]
    fn context_level_stays_within_visited_levels() {
        let (hierarchical, _) = build_for(
            r#"<section><form data-testid="signup"><p class="field-row"><input class="email-input"></p></form></section>"#,
            "input",
        );
        assert_eq!(
            hierarchical.as_deref(),
            Some(r#"form[data-testid="signup"] p.field-row input.email-input"#)
        );
    }

    #[test]
    fn id_level_ends_the_walk() {
        let (hierarchical, _) = build_for(
            r#"<section id="pricing"><div><a class="plan-link">Pick</a></div></section>"#,
            "a",
        );
        assert_eq!(hierarchical.as_deref(), Some("section#pricing a.plan-link"));
    }

    #[test]
    fn generic_ids_are_not_used_as_levels() {
        let (hierarchical, _) = build_for(
            r#"<div id="root"><nav><a class="home-link">Home</a></nav></div>"#,
            "a",
        );
        assert_eq!(hierarchical.as_deref(), Some("nav a.home-link"));
    }

    #[test]
    fn css_module_classes_use_substring_match() {
        let (hierarchical, _) = build_for(
            r#"<header><button class="Button-module__primary___a1b2c">Go</button></header>"#,
            "button",
        );
        assert_eq!(
            hierarchical.as_deref(),
            Some(r#"header button[class*="primary"]"#)
        );
    }

    #[test]
    fn overly_broad_selectors_fall_back() {
        let cards: String = (0..12)
            .map(|_| r#"<article><a class="more">More</a></article>"#)
            .collect();
        let (hierarchical, fallback) = build_for(&cards, "a");
        assert_eq!(hierarchical, None);
        assert_eq!(fallback, "a.more");
    }

    #[test]
    fn fallback_order_ends_with_base_then_tag() {
        let (_, fallback) = build_for(r#"<p id="intro">x</p>"#, "p");
        assert_eq!(fallback, "p#intro");

        let (_, fallback) = build_for("<p>x</p>", "p");
        assert_eq!(fallback, "#fallback-base");

        let doc = HtmlDocument::parse("<p>x</p>");
        let element = doc.select_target("p", 0).unwrap().unwrap();
        let options = EngineOptions::default();
        let filter = ClassFilter::default();
        let builder = HierarchyBuilder::new(&options, &filter);
        assert_eq!(builder.fallback(&element, None), "p");
    }

    #[test]
    fn configured_extra_attributes_are_honoured() {
        let doc = HtmlDocument::parse(
            r#"<footer><a data-button-type="newsletter">Join</a></footer>"#,
        );
        let element = doc.select_target("a", 0).unwrap().unwrap();
        let options = EngineOptions::default();
        let filter = ClassFilter::default();
        let builder = HierarchyBuilder::new(&options, &filter);
        assert_eq!(
            builder.build(&doc, &element).as_deref(),
            Some(r#"footer a[data-button-type="newsletter"]"#)
        );
    }
}
