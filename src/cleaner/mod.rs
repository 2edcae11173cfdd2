//! Cleaner
//!
//! Destructive noise removal on the cloned content subtree. Passes run in a
//! fixed order and every removal is driven by an explicit rule:
//!
//! 1. site-specific overrides for the page's hostname
//! 2. the generic unwanted-selector catalogue
//! 3. the suspicious class/id keyword sweep
//! 4. short metadata chips (bylines, dates, view counts)
//! 5. empty-element pruning, innermost first
//!
//! The content root itself is never removed.

use dom_query::{NodeRef, Selection};

use crate::dom;
use crate::patterns::{self, METADATA_BLOCK};
use crate::selector::discard::{self, UNWANTED_SELECTORS};

/// A keyword match survives if its trimmed text reaches this many chars.
pub const KEYWORD_KEEP_TEXT_LEN: usize = 500;

/// Only blocks at most this long are tested against the metadata pattern.
pub const METADATA_MAX_TEXT_LEN: usize = 200;

/// Descendants that make a keyword match worth keeping.
const KEYWORD_KEEP_MEDIA: &str = "img, video, picture, figure";

/// Subtrees the keyword and metadata passes never look into.
const VERBATIM_TAGS: &[&str] = &["pre", "code"];

/// Block-level tags; an element containing one is not a metadata chip.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "blockquote", "div", "dl", "fieldset", "figure", "h1", "h2", "h3",
    "h4", "h5", "h6", "li", "main", "ol", "p", "pre", "section", "table", "ul",
];

/// Tags the empty-element pass never removes.
const PRESERVED_EMPTY_TAGS: &[&str] = &[
    "img", "picture", "video", "audio", "source", "iframe", "figure", "table", "thead",
    "tbody", "tfoot", "tr", "th", "td", "caption", "colgroup", "col", "br", "hr",
];

/// Descendants that keep an otherwise text-less element alive.
const MEDIA_DESCENDANTS: &str = "img, picture, video, audio, source, iframe, figure, table";

/// Removal counts per pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanStats {
    pub site_rules: usize,
    pub selectors: usize,
    pub keywords: usize,
    pub metadata: usize,
    pub empty: usize,
}

impl CleanStats {
    /// Total number of removed elements.
    #[must_use]
    pub fn total(&self) -> usize {
        self.site_rules + self.selectors + self.keywords + self.metadata + self.empty
    }
}

/// Run every cleaning pass over `root`.
///
/// `hostname` selects site-specific rules; pass `None` to skip them.
pub fn clean(root: &Selection, hostname: Option<&str>) -> CleanStats {
    let Some(root_node) = root.nodes().first().copied() else {
        return CleanStats::default();
    };

    let mut stats = CleanStats::default();

    if let Some(host) = hostname {
        for rule in discard::rules_for_host(host) {
            stats.site_rules += remove_matching(root, &root_node, rule.selectors, rule.host);
        }
        tracing::debug!(host, removed = stats.site_rules, "site rules pass");
    }

    stats.selectors = remove_matching(root, &root_node, UNWANTED_SELECTORS, "unwanted");
    tracing::debug!(removed = stats.selectors, "selector pass");

    stats.keywords = sweep_keywords(root, &root_node);
    tracing::debug!(removed = stats.keywords, "keyword pass");

    stats.metadata = remove_metadata_blocks(root, &root_node);
    tracing::debug!(removed = stats.metadata, "metadata pass");

    stats.empty = prune_empty(root, &root_node);
    tracing::debug!(removed = stats.empty, "empty pass");

    stats
}

/// Remove every match of every selector; invalid selectors are skipped.
fn remove_matching(root: &Selection, root_node: &NodeRef, selectors: &[&str], rule: &str) -> usize {
    let mut removed = 0;
    for selector in selectors {
        for node in dom::try_select_all(root, selector) {
            if !dom::is_attached(&node, root_node) {
                continue;
            }
            tracing::trace!(rule, selector, tag = ?dom::node_tag(&node), "removed");
            dom::remove_node(&node);
            removed += 1;
        }
    }
    removed
}

fn sweep_keywords(root: &Selection, root_node: &NodeRef) -> usize {
    let mut removed = 0;
    for node in dom::try_select_all(root, "*") {
        if !dom::is_attached(&node, root_node) || in_verbatim(&node, root_node) {
            continue;
        }
        let class_id = dom::class_and_id(&node);
        let Some(keyword) = patterns::suspicious_keyword(&class_id) else {
            continue;
        };

        let sel = Selection::from(node);
        if sel.select(KEYWORD_KEEP_MEDIA).exists() || dom::text_len(&sel) >= KEYWORD_KEEP_TEXT_LEN {
            tracing::trace!(keyword, class_id = %class_id, "keyword match kept");
            continue;
        }

        tracing::trace!(rule = "keyword", keyword, class_id = %class_id, "removed");
        dom::remove_node(&node);
        removed += 1;
    }
    removed
}

fn remove_metadata_blocks(root: &Selection, root_node: &NodeRef) -> usize {
    let mut removed = 0;
    for node in dom::try_select_all(root, "*") {
        if !dom::is_attached(&node, root_node) || in_verbatim(&node, root_node) {
            continue;
        }
        let sel = Selection::from(node);
        let text = dom::clean_text(&sel);
        let len = text.chars().count();
        if len == 0 || len > METADATA_MAX_TEXT_LEN || has_block_descendant(&node) {
            continue;
        }
        if METADATA_BLOCK.is_match(&text) {
            tracing::trace!(rule = "metadata", text = %text, "removed");
            dom::remove_node(&node);
            removed += 1;
        }
    }
    removed
}

/// Remove text-less elements without media, deepest first, so that parents
/// emptied by the removal of their children go too.
fn prune_empty(root: &Selection, root_node: &NodeRef) -> usize {
    let mut removed = 0;
    for node in dom::try_select_all(root, "*").into_iter().rev() {
        if dom::is_tag(&node, PRESERVED_EMPTY_TAGS) || !dom::is_attached(&node, root_node) {
            continue;
        }
        let sel = Selection::from(node);
        if !sel.text().trim().is_empty() || sel.select(MEDIA_DESCENDANTS).exists() {
            continue;
        }
        tracing::trace!(rule = "empty", tag = ?dom::node_tag(&node), "removed");
        dom::remove_node(&node);
        removed += 1;
    }
    removed
}

fn in_verbatim(node: &NodeRef, root: &NodeRef) -> bool {
    dom::is_tag(node, VERBATIM_TAGS) || dom::has_ancestor_tag(node, root, VERBATIM_TAGS)
}

fn has_block_descendant(node: &NodeRef) -> bool {
    node.children().iter().any(|child| {
        child.is_element() && (dom::is_tag(child, BLOCK_TAGS) || has_block_descendant(child))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ClonedTree;

    fn cleaned(html: &str, host: Option<&str>) -> (String, CleanStats) {
        let tree = ClonedTree::from_fragment(html);
        let stats = clean(&tree.root(), host);
        (tree.html(), stats)
    }

    #[test]
    fn test_removes_scripts_and_chrome() {
        let (html, stats) = cleaned(
            "<p>Body text.</p><script>alert(1)</script><nav><a href='/'>Home</a></nav><footer>f</footer>",
            None,
        );
        assert!(html.contains("Body text."));
        assert!(!html.contains("alert"));
        assert!(!html.contains("Home"));
        assert!(stats.selectors >= 3);
    }

    #[test]
    fn test_video_iframes_survive() {
        let (html, _) = cleaned(
            r#"<p>Watch:</p><iframe src="https://www.youtube.com/embed/abc"></iframe><iframe src="https://tracker.example/x"></iframe>"#,
            None,
        );
        assert!(html.contains("youtube.com/embed/abc"));
        assert!(!html.contains("tracker.example"));
    }

    #[test]
    fn test_site_rules_only_for_matching_host() {
        let markup = r#"<p>Answer body.</p><div class="ContentItem-actions">Upvote 12</div>"#;
        let (zhihu, stats) = cleaned(markup, Some("www.zhihu.com"));
        assert!(!zhihu.contains("Upvote"));
        assert_eq!(stats.site_rules, 1);

        let (other, _) = cleaned(markup, Some("example.com"));
        assert!(other.contains("Upvote"));
    }

    #[test]
    fn test_keyword_sweep_keeps_media_and_long_text() {
        let long = "Long related discussion text. ".repeat(20);
        let markup = format!(
            r#"<p>Main.</p>
               <div class="related-posts">Short list</div>
               <div class="share-image"><img src="a.jpg"></div>
               <div class="social-long">{long}</div>"#
        );
        let (html, stats) = cleaned(&markup, None);
        assert!(!html.contains("Short list"));
        assert!(html.contains("a.jpg"));
        assert!(html.contains("Long related discussion"));
        assert_eq!(stats.keywords, 1);
    }

    #[test]
    fn test_keyword_sweep_skips_code() {
        let (html, _) = cleaned(
            r#"<pre><code><span class="menu-token">fn main()</span></code></pre>"#,
            None,
        );
        assert!(html.contains("fn main()"));
    }

    #[test]
    fn test_metadata_chips_removed() {
        let (html, stats) = cleaned(
            "<p>By Jane Doe</p><span>2024-03-05 10:30</span><p>1,234 views</p><p>By the end of the year, sales had doubled.</p>",
            None,
        );
        assert!(!html.contains("Jane Doe"));
        assert!(!html.contains("2024-03-05"));
        assert!(!html.contains("views"));
        assert!(html.contains("By the end of the year"));
        assert_eq!(stats.metadata, 3);
    }

    #[test]
    fn test_metadata_chip_with_block_children_kept() {
        let (html, _) = cleaned("<div><p>Source: Reuters</p><p>Real paragraph.</p></div>", None);
        assert!(!html.contains("Reuters"));
        assert!(html.contains("Real paragraph."));
    }

    #[test]
    fn test_empty_pruning_is_innermost_first() {
        let (html, stats) = cleaned(
            "<p>Text</p><div><section><span> </span></section></div><p><img src='x.png'></p><hr>",
            None,
        );
        assert!(!html.contains("<section"));
        assert!(!html.contains("<div"));
        assert!(html.contains("x.png"));
        assert!(html.contains("<hr>"));
        assert_eq!(stats.empty, 3);
    }

    #[test]
    fn test_root_is_never_removed() {
        let doc = dom::parse(r#"<body><div class="related" id="root"><p>Only child.</p></div></body>"#);
        let tree = ClonedTree::from_element(&doc.select("#root"));
        clean(&tree.root(), None);
        assert!(tree.html().contains("Only child."));
    }
}
