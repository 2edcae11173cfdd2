//! Link Density
//!
//! Ratio of anchor text to total text inside an element. Navigation blocks
//! are mostly links; article bodies are mostly prose.

use dom_query::Selection;

use crate::dom;

/// Collected heuristics on the links of one element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LinkInfo {
    /// Total characters of trimmed anchor text.
    pub link_length: usize,
    /// Anchors with non-empty text.
    pub non_empty_links: usize,
    /// Total characters of the element's trimmed text.
    pub text_length: usize,
}

impl LinkInfo {
    /// Anchor text length divided by total text length; 0 for empty text.
    #[must_use]
    pub fn density(&self) -> f64 {
        if self.text_length == 0 {
            return 0.0;
        }
        self.link_length as f64 / self.text_length as f64
    }
}

/// Collect link text statistics for an element.
#[must_use]
pub fn collect_link_info(element: &Selection) -> LinkInfo {
    let mut info = LinkInfo {
        text_length: dom::text_len(element),
        ..LinkInfo::default()
    };

    for link in element.select("a").iter() {
        let text = link.text();
        let length = text.trim().chars().count();
        if length == 0 {
            continue;
        }
        info.link_length += length;
        info.non_empty_links += 1;
    }

    info
}

/// Link density of an element (`anchor text / total text`).
#[must_use]
pub fn link_density(element: &Selection) -> f64 {
    collect_link_info(element).density()
}
