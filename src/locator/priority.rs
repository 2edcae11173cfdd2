//! First locator phase: prioritized selector scan.
//!
//! First match wins, in catalogue order and then document order.

use dom_query::{NodeRef, Selection};

use crate::dom;
use crate::patterns;
use crate::selector::{self, content::{ARTICLE_SELECTORS, NON_CONTENT_ANCESTORS}};

/// A selector match must carry strictly more readable text than this.
pub const MIN_PRIORITY_TEXT_LEN: usize = 200;

/// Find the first acceptable match of the article selector catalogue.
///
/// Returns the selector that matched together with the node.
#[must_use]
pub fn find_by_priority<'a>(root: &Selection<'a>) -> Option<(&'static str, NodeRef<'a>)> {
    let root_node = *root.nodes().first()?;

    selector::select_each(root, ARTICLE_SELECTORS, |selector, node| {
        let class_id = dom::class_and_id(&node);
        if patterns::is_unlikely(&class_id) {
            tracing::trace!(selector, class_id = %class_id, "priority match rejected: unlikely class/id");
            return None;
        }
        if has_non_content_ancestor(&node, &root_node) {
            tracing::trace!(selector, "priority match rejected: non-content ancestor");
            return None;
        }
        let text_len = dom::clean_text_len(&Selection::from(node));
        if text_len <= MIN_PRIORITY_TEXT_LEN {
            tracing::trace!(selector, text_len, "priority match rejected: too short");
            return None;
        }
        Some((selector, node))
    })
}

/// True if any ancestor below `root` is a chrome tag or has an unlikely class/id.
fn has_non_content_ancestor(node: &NodeRef, root: &NodeRef) -> bool {
    dom::ancestors_until(node, Some(root)).iter().any(|ancestor| {
        dom::is_tag(ancestor, NON_CONTENT_ANCESTORS) || patterns::is_unlikely(&dom::class_and_id(ancestor))
    })
}
