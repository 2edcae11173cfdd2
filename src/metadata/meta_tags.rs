//! HTML Meta Tag Lookups
//!
//! `<meta>` and `<link>` readers shared by the metadata extractor.

use dom_query::{Document, NodeRef, Selection};

use crate::dom;

/// Whole-document selection that selector lookups start from.
pub(crate) fn document_root(doc: &Document) -> Selection<'_> {
    doc.select("html")
}

/// All matches of `selector` in the document; invalid selectors match nothing.
pub(crate) fn select_all<'a>(doc: &'a Document, selector: &str) -> Vec<NodeRef<'a>> {
    dom::try_select_all(&document_root(doc), selector)
}

/// Whitespace-collapsed `content` of the first matching meta tag with a
/// non-empty value.
#[must_use]
pub fn meta_content(doc: &Document, selector: &str) -> Option<String> {
    select_all(doc, selector)
        .iter()
        .filter_map(|node| dom::node_attr(node, "content"))
        .map(|content| dom::collapse_whitespace(&content))
        .find(|content| !content.is_empty())
}

/// First non-empty meta `content` over an ordered list of selectors.
#[must_use]
pub fn first_meta_content(doc: &Document, selectors: &[&str]) -> Option<String> {
    selectors.iter().find_map(|selector| meta_content(doc, selector))
}

/// First non-empty `href` over an ordered list of `<link>` selectors.
#[must_use]
pub fn first_link_href(doc: &Document, selectors: &[&str]) -> Option<String> {
    selectors.iter().find_map(|selector| {
        select_all(doc, selector)
            .iter()
            .find_map(|node| dom::node_attr(node, "href"))
    })
}
