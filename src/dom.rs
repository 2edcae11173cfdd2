//! Tree model adapter
//!
//! Read-only helpers over the `dom_query` arena, plus the one mutating
//! primitive the engine needs: cloning a subtree into a private [`Document`].
//! The source page tree is only ever read through these functions.

pub use dom_query::{Document, NodeRef, Selection};
pub use tendril::StrTendril;

use crate::patterns::WHITESPACE_NORMALIZE;

/// Tags whose text never counts as readable content.
const NON_TEXT_TAGS: &[&str] = &["script", "style", "iframe", "noscript", "template"];

// === Attribute Operations ===

/// Get element ID attribute
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> Option<String> {
    sel.attr("id").map(|s| s.to_string())
}

/// Get element class attribute
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get an attribute of a raw node, trimmed, with empty values treated as missing.
#[must_use]
pub fn node_attr(node: &NodeRef, name: &str) -> Option<String> {
    Selection::from(*node)
        .attr(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Check if attribute exists
#[inline]
#[must_use]
pub fn has_attribute(sel: &Selection, name: &str) -> bool {
    sel.has_attr(name)
}

/// Class and id joined with a space, lowercased.
///
/// This is the string every keyword pattern is tested against.
#[must_use]
pub fn class_and_id(node: &NodeRef) -> String {
    let sel = Selection::from(*node);
    let class = class_name(&sel).unwrap_or_default();
    let id = id(&sel).unwrap_or_default();
    format!("{class} {id}").trim().to_lowercase()
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes().first().and_then(node_tag)
}

/// Tag name of a raw node; `None` for text, comment and document nodes.
#[must_use]
pub fn node_tag(node: &NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|t| t.to_ascii_lowercase())
}

/// True if the node is an element with one of the given tag names.
#[must_use]
pub fn is_tag(node: &NodeRef, tags: &[&str]) -> bool {
    node_tag(node).is_some_and(|t| tags.contains(&t.as_str()))
}

/// Element children of a node, in document order.
#[must_use]
pub fn element_children<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.children().into_iter().filter(NodeRef::is_element).collect()
}

// === Text Content ===

/// Get all text content of node and descendants
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Character count of the trimmed raw text content.
#[must_use]
pub fn text_len(sel: &Selection) -> usize {
    sel.text().trim().chars().count()
}

/// Collapse all whitespace runs into single spaces and trim.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_NORMALIZE.replace_all(text, " ").trim().to_string()
}

/// Readable text of a subtree: script/style/iframe/noscript text excluded,
/// whitespace collapsed.
#[must_use]
pub fn clean_text(sel: &Selection) -> String {
    let mut raw = String::new();
    for node in sel.nodes() {
        push_readable_text(node, &mut raw);
    }
    collapse_whitespace(&raw)
}

/// Character count of [`clean_text`].
#[must_use]
pub fn clean_text_len(sel: &Selection) -> usize {
    clean_text(sel).chars().count()
}

fn push_readable_text(node: &NodeRef, out: &mut String) {
    if node.is_text() {
        out.push_str(&node.text());
        return;
    }
    if is_tag(node, NON_TEXT_TAGS) {
        return;
    }
    for child in node.children() {
        push_readable_text(&child, out);
        // keep words from adjacent blocks apart
        if child.is_element() {
            out.push(' ');
        }
    }
}

// === Visibility ===

/// True if the element is explicitly hidden: `hidden` attribute,
/// `aria-hidden="true"`, or inline `display:none` / `visibility:hidden`.
#[must_use]
pub fn is_hidden(node: &NodeRef) -> bool {
    if !node.is_element() {
        return false;
    }
    let sel = Selection::from(*node);
    if sel.has_attr("hidden") {
        return true;
    }
    if sel
        .attr("aria-hidden")
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    {
        return true;
    }
    sel.attr("style").is_some_and(|style| {
        let compact: String = style
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        compact.contains("display:none") || compact.contains("visibility:hidden")
    })
}

// === Tree Navigation ===

/// Ancestors of `node`, nearest first, stopping before `stop` (exclusive).
///
/// With `stop = None` the walk continues up to the document node, which is
/// never included.
#[must_use]
pub fn ancestors_until<'a>(node: &NodeRef<'a>, stop: Option<&NodeRef<'a>>) -> Vec<NodeRef<'a>> {
    let mut out = Vec::new();
    let mut current = node.parent();
    while let Some(parent) = current {
        if stop.is_some_and(|s| s.id == parent.id) || !parent.is_element() {
            break;
        }
        out.push(parent);
        current = parent.parent();
    }
    out
}

/// Number of parent hops from `node` up to `root`.
#[must_use]
pub fn depth_from(node: &NodeRef, root: &NodeRef) -> usize {
    let mut depth = 0;
    let mut current = node.parent();
    while let Some(parent) = current {
        depth += 1;
        if parent.id == root.id {
            break;
        }
        current = parent.parent();
    }
    depth
}

/// True if `node` is still attached below `root`.
#[must_use]
pub fn is_attached(node: &NodeRef, root: &NodeRef) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.id == root.id {
            return true;
        }
        current = parent.parent();
    }
    false
}

/// True if any element of `tags` is an ancestor of `node` (below `root`).
#[must_use]
pub fn has_ancestor_tag(node: &NodeRef, root: &NodeRef, tags: &[&str]) -> bool {
    ancestors_until(node, Some(root))
        .iter()
        .any(|a| is_tag(a, tags))
}

// === Querying ===

/// Query all elements by CSS selector, tolerating invalid selectors.
///
/// An invalid selector yields an empty list instead of aborting the pass.
#[must_use]
pub fn try_select_all<'a>(sel: &Selection<'a>, selector: &str) -> Vec<NodeRef<'a>> {
    sel.try_select(selector)
        .map(|found| found.nodes().to_vec())
        .unwrap_or_default()
}

// === Tree Manipulation ===

/// Remove elements from tree
#[inline]
pub fn remove(sel: &Selection) {
    sel.remove();
}

/// Detach a single node from its parent.
#[inline]
pub fn remove_node(node: &NodeRef) {
    Selection::from(*node).remove();
}

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// A deep copy of one subtree, exclusively owned by one extraction call.
///
/// The clone is produced by re-parsing the subtree's markup, so nothing the
/// cleaner does to it can reach the source document.
pub struct ClonedTree {
    doc: Document,
    root_is_body: bool,
}

impl ClonedTree {
    /// Deep-copy an element. A `<body>` source maps onto the clone's body.
    #[must_use]
    pub fn from_element(sel: &Selection) -> Self {
        let root_is_body = tag_name(sel).is_some_and(|t| t == "body" || t == "html");
        Self {
            doc: Document::from(sel.html().to_string()),
            root_is_body,
        }
    }

    /// Build a tree from an HTML fragment; the clone's body is the root.
    #[must_use]
    pub fn from_fragment(html: &str) -> Self {
        Self {
            doc: Document::from(html),
            root_is_body: true,
        }
    }

    /// Root element of the cloned subtree.
    #[must_use]
    pub fn root(&self) -> Selection<'_> {
        let body = self.doc.select("body");
        if self.root_is_body {
            return body;
        }
        body.nodes()
            .first()
            .and_then(|b| element_children(b).into_iter().next())
            .map_or(body, Selection::from)
    }

    /// The document backing the clone.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Markup of the cloned subtree as it currently stands.
    #[must_use]
    pub fn html(&self) -> String {
        let root = self.root();
        if self.root_is_body {
            root.inner_html().trim().to_string()
        } else {
            root.html().to_string()
        }
    }
}
