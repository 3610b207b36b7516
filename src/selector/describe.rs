//! Element describer: a bounded, selector-independent view of one element.

use std::collections::BTreeMap;

use crate::document::DomElement;
use crate::types::ElementSnapshot;

use super::builder::{join_descendant, SelectorBuilder};
use super::classes::ClassFilter;
use super::EngineOptions;

/// Builds the snapshot of `element`; `selectors` is left empty.
pub(crate) fn describe<E: DomElement>(
    element: &E,
    options: &EngineOptions,
    filter: &ClassFilter,
) -> ElementSnapshot {
    ElementSnapshot {
        tag_name: element.tag_name(),
        id: element.id(),
        class_name: element.class_name(),
        text_content: truncate_text(&element.text_content(), options.text_limit),
        attributes: element.attributes().into_iter().collect::<BTreeMap<_, _>>(),
        path: ancestor_path(element, options.path_depth, filter),
        selectors: Vec::new(),
    }
}

fn truncate_text(text: &str, limit: usize) -> String {
    text.trim().chars().take(limit).collect()
}

/// Short root-to-leaf path of at most `depth` levels.
///
/// An id ends the walk: the id'd level is included and nothing above it.
pub(crate) fn ancestor_path<E: DomElement>(element: &E, depth: usize, filter: &ClassFilter) -> String {
    let mut levels: Vec<String> = Vec::new();
    let mut current = Some(element.clone());

    while let Some(node) = current {
        if node.is_root_boundary() || levels.len() >= depth {
            break;
        }

        let mut level = SelectorBuilder::tag(&node.local_name());
        let id = node.id();
        if !id.is_empty() {
            levels.push(level.id(&id).build());
            break;
        }

        let classes = node.classes();
        let meaningful = filter.meaningful(&classes);
        if !meaningful.is_empty() {
            level = level.classes(meaningful.iter().take(2));
        } else if let Some(first) = classes.first() {
            level = level.class(first);
        }

        if let Some((name, value)) = node
            .attributes()
            .into_iter()
            .find(|(name, _)| name.starts_with("data-"))
        {
            level = level.attribute(&name, &value);
        }

        levels.push(level.build());
        current = node.parent();
    }

    levels.reverse();
    join_descendant(&levels)
}
