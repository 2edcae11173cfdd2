//! Title Deduplicator
//!
//! Removes the one heading that restates the page title, so the converted
//! body does not open with a copy of the note's title.

use dom_query::{NodeRef, Selection};

use crate::dom;
use crate::patterns::{TITLE_BRACKETS, TITLE_DASH_SUFFIX, TITLE_PIPE_SUFFIX};

/// Shorter string must be at least this fraction of the longer to match.
pub const TITLE_SIMILARITY_RATIO: f64 = 0.7;

/// How many `h2` elements are examined when there is no `h1`.
pub const MAX_H2_CANDIDATES: usize = 3;

/// How many leading children are examined when there are no headings.
pub const MAX_LEADING_CHILDREN: usize = 5;

/// Leading children at or above this text length are never a title.
pub const MAX_LEADING_CHILD_TEXT_LEN: usize = 300;

/// Normalize a title for comparison: site suffix, brackets and case removed.
#[must_use]
pub fn normalize_title(title: &str) -> String {
    let trimmed = title.trim();
    let mut stripped = TITLE_PIPE_SUFFIX.replace(trimmed, "").into_owned();
    stripped = TITLE_DASH_SUFFIX.replace(&stripped, "").into_owned();
    if stripped.trim().is_empty() {
        stripped = trimmed.to_string();
    }
    let unbracketed = TITLE_BRACKETS.replace_all(&stripped, "");
    dom::collapse_whitespace(&unbracketed).to_lowercase()
}

/// Normalize a candidate heading: brackets and case removed. Unlike the page
/// title, a heading keeps its ` - ...` / ` | ...` tail.
fn normalize_heading(text: &str) -> String {
    let unbracketed = TITLE_BRACKETS.replace_all(text.trim(), "");
    dom::collapse_whitespace(&unbracketed).to_lowercase()
}

/// True if two normalized titles are the same or one closely contains the other.
#[must_use]
pub fn titles_match(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }
    let (shorter, longer) = if a.chars().count() <= b.chars().count() { (a, b) } else { (b, a) };
    let ratio = shorter.chars().count() as f64 / longer.chars().count() as f64;
    ratio >= TITLE_SIMILARITY_RATIO && (longer.starts_with(shorter) || longer.contains(shorter))
}

/// Remove the first heading below `root` that repeats `page_title`.
///
/// Returns true if an element was removed. An empty title is a no-op.
pub fn remove_duplicate_title(root: &Selection, page_title: &str) -> bool {
    let wanted = normalize_title(page_title);
    if wanted.is_empty() {
        return false;
    }

    let Some(root_node) = root.nodes().first().copied() else {
        return false;
    };

    let candidates = title_candidates(root, &root_node);
    for node in candidates {
        let text = normalize_heading(&dom::clean_text(&Selection::from(node)));
        if titles_match(&wanted, &text) {
            tracing::debug!(heading = %text, "removed duplicate title");
            dom::remove_node(&node);
            return true;
        }
    }
    false
}

/// `h1` elements; else the first few `h2`; else short leading children.
fn title_candidates<'a>(root: &Selection<'a>, root_node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let h1 = dom::try_select_all(root, "h1");
    if !h1.is_empty() {
        return h1;
    }
    let h2 = dom::try_select_all(root, "h2");
    if !h2.is_empty() {
        return h2.into_iter().take(MAX_H2_CANDIDATES).collect();
    }
    dom::element_children(root_node)
        .into_iter()
        .take(MAX_LEADING_CHILDREN)
        .filter(|child| dom::text_len(&Selection::from(*child)) < MAX_LEADING_CHILD_TEXT_LEN)
        .collect()
}
