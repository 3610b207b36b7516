//! Per-type candidate strategies and the validity check.

use tracing::debug;

use crate::document::{DocumentQuery, DomElement};
use crate::types::{SelectorCandidate, SelectorType};

use super::builder::{join_child, SelectorBuilder};
use super::classes::ClassFilter;
use super::EngineOptions;

/// Attributes the attribute strategy considers, in order.
pub const CANDIDATE_ATTRIBUTES: &[&str] = &["name", "type", "role", "aria-label", "title"];

/// Number of matches for `selector`, or `None` when it does not parse.
pub(crate) fn count_matches<D: DocumentQuery + ?Sized>(doc: &D, selector: &str) -> Option<usize> {
    match doc.query_count(selector) {
        Ok(count) => Some(count),
        Err(err) => {
            debug!(%selector, error = %err, "selector rejected by document");
            None
        }
    }
}

/// Parses and matches more than zero but fewer than `max_matches` elements.
pub(crate) fn is_valid_selector<D: DocumentQuery + ?Sized>(
    doc: &D,
    selector: &str,
    max_matches: usize,
) -> bool {
    matches!(count_matches(doc, selector), Some(count) if count > 0 && count < max_matches)
}

/// Runs every strategy in evaluation order; nothing is validated yet.
pub(crate) fn raw_candidates<E: DomElement>(
    element: &E,
    options: &EngineOptions,
    filter: &ClassFilter,
) -> Vec<SelectorCandidate> {
    let mut candidates = Vec::new();
    candidates.extend(id_candidate(element));
    candidates.extend(data_attribute_candidates(element));
    candidates.extend(class_candidate(element, filter));
    candidates.extend(attribute_candidates(element));
    candidates.extend(structural_candidate(element, options.structural_depth));
    candidates
}

fn id_candidate<E: DomElement>(element: &E) -> Option<SelectorCandidate> {
    let id = element.id();
    if id.is_empty() {
        return None;
    }
    Some(SelectorCandidate::new(
        SelectorType::Id,
        SelectorBuilder::new().id(&id).build(),
        "Most stable selector",
    ))
}

fn data_attribute_candidates<E: DomElement>(element: &E) -> Vec<SelectorCandidate> {
    element
        .attributes()
        .into_iter()
        .filter(|(name, _)| name.starts_with("data-"))
        .map(|(name, value)| {
            SelectorCandidate::new(
                SelectorType::DataAttribute,
                SelectorBuilder::new().attribute(&name, &value).build(),
                "Test-specific attribute (recommended)",
            )
        })
        .collect()
}

fn class_candidate<E: DomElement>(element: &E, filter: &ClassFilter) -> Option<SelectorCandidate> {
    let classes = element.classes();
    if classes.is_empty() {
        return None;
    }

    let meaningful = filter.meaningful(&classes);
    let chosen: Vec<&str> = if meaningful.is_empty() {
        classes.iter().map(String::as_str).collect()
    } else {
        meaningful
    };

    Some(SelectorCandidate::new(
        SelectorType::Class,
        SelectorBuilder::new().classes(chosen.iter().take(3)).build(),
        "Generally stable",
    ))
}

fn attribute_candidates<E: DomElement>(element: &E) -> Vec<SelectorCandidate> {
    CANDIDATE_ATTRIBUTES
        .iter()
        .filter_map(|&name| {
            let value = element.attribute(name).filter(|v| !v.is_empty())?;
            Some(SelectorCandidate::new(
                SelectorType::Attribute,
                SelectorBuilder::new().attribute(name, &value).build(),
                format!("Based on the {name} attribute"),
            ))
        })
        .collect()
}

/// Child-combinator chain of at most `depth` levels.
///
/// Levels are `#id` (ends the walk) or `tag.firstClass`, with
/// `:nth-child(N)` when same-tag siblings exist, N counted among them.
fn structural_candidate<E: DomElement>(element: &E, depth: usize) -> Option<SelectorCandidate> {
    let mut levels: Vec<String> = Vec::new();
    let mut current = Some(element.clone());

    while let Some(node) = current {
        if node.is_root_boundary() || levels.len() >= depth {
            break;
        }

        let id = node.id();
        if !id.is_empty() {
            levels.push(SelectorBuilder::new().id(&id).build());
            break;
        }

        let mut level = SelectorBuilder::tag(&node.local_name());
        if let Some(first) = node.classes().first() {
            level = level.class(first);
        }

        let parent = node.parent();
        if let Some(parent) = &parent {
            let tag = node.tag_name();
            let same_tag: Vec<E> = parent
                .children()
                .into_iter()
                .filter(|sibling| sibling.tag_name() == tag)
                .collect();
            if same_tag.len() > 1 {
                let position = same_tag
                    .iter()
                    .position(|sibling| sibling == &node)
                    .map_or(1, |index| index + 1);
                level = level.nth_child(position);
            }
        }

        levels.push(level.build());
        current = parent;
    }

    if levels.is_empty() {
        return None;
    }
    levels.reverse();
    Some(SelectorCandidate::new(
        SelectorType::Structural,
        join_child(&levels),
        "Fragile to structural changes",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlDocument;

    fn raw_for(html: &str, target: &str) -> Vec<SelectorCandidate> {
        let doc = HtmlDocument::parse(html);
        let element = doc.select_target(target, 0).unwrap().expect("target exists");
        raw_candidates(&element, &EngineOptions::default(), &ClassFilter::default())
    }

    fn selectors_of(candidates: &[SelectorCandidate], kind: SelectorType) -> Vec<String> {
        candidates
            .iter()
            .filter(|c| c.selector_type == kind)
            .map(|c| c.selector.clone())
            .collect()
    }

    #[test]
    fn every_data_attribute_yields_a_candidate() {
        let raw = raw_for(
            r#"<a data-track="cta" data-pos="top" href="/x">Go</a>"#,
            "a",
        );
        assert_eq!(
            selectors_of(&raw, SelectorType::DataAttribute),
            vec![r#"[data-track="cta"]"#, r#"[data-pos="top"]"#]
        );
    }

    #[test]
    fn class_strategy_prefers_meaningful_and_caps_at_three() {
        let raw = raw_for(
            r#"<div class="css-a1 card featured large promo">x</div>"#,
            "div",
        );
        assert_eq!(
            selectors_of(&raw, SelectorType::Class),
            vec![".card.featured.large"]
        );

        let raw = raw_for(r#"<div class="css-a1 mt">x</div>"#, "div");
        assert_eq!(selectors_of(&raw, SelectorType::Class), vec![".css-a1.mt"]);
    }

    #[test]
    fn attribute_strategy_follows_fixed_order_and_skips_empty() {
        let raw = raw_for(
            r#"<input title="Email" type="email" name="" aria-label="Your email">"#,
            "input",
        );
        assert_eq!(
            selectors_of(&raw, SelectorType::Attribute),
            vec![
                r#"[type="email"]"#,
                r#"[aria-label="Your email"]"#,
                r#"[title="Email"]"#
            ]
        );
    }

    #[test]
    fn structural_selector_numbers_same_tag_siblings() {
        let raw = raw_for(
            r#"<ul class="list"><li>a</li><li class="x">b</li><li>c</li></ul>"#,
            "li.x",
        );
        assert_eq!(
            selectors_of(&raw, SelectorType::Structural),
            vec!["ul.list > li.x:nth-child(2)"]
        );
    }

    #[test]
    fn structural_selector_stops_at_id() {
        let raw = raw_for(
            r#"<div id="shell"><section><p>t</p></section></div>"#,
            "p",
        );
        assert_eq!(
            selectors_of(&raw, SelectorType::Structural),
            vec!["#shell > section > p"]
        );
    }

    #[test]
    fn structural_selector_is_bounded_to_five_levels() {
        let raw = raw_for(
            "<div><div><div><div><div><div><em>deep</em></div></div></div></div></div></div>",
            "em",
        );
        assert_eq!(
            selectors_of(&raw, SelectorType::Structural),
            vec!["div > div > div > div > em"]
        );
    }

    #[test]
    fn validity_requires_one_to_ninety_nine_matches() {
        let items: String = (0..120).map(|i| format!("<li>{i}</li>")).collect();
        let doc = HtmlDocument::parse(&format!("<ul id=\"l\">{items}</ul>"));

        assert!(is_valid_selector(&doc, "#l", 100));
        assert!(is_valid_selector(&doc, "li:nth-child(99)", 100));
        assert!(!is_valid_selector(&doc, "li", 100));
        assert!(!is_valid_selector(&doc, "table", 100));
        assert!(!is_valid_selector(&doc, "li[", 100));
        assert!(!is_valid_selector(&doc, "#123", 100));
    }

    #[test]
    fn validity_bound_is_exclusive() {
        let items: String = (0..100).map(|_| "<i></i>".to_string()).collect();
        let doc = HtmlDocument::parse(&items);
        assert!(!is_valid_selector(&doc, "i", 100));
        assert!(is_valid_selector(&doc, "i", 101));
    }
}
