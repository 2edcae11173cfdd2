//! Content Locator
//!
//! Picks the single element most likely to hold the article body. The
//! prioritized selector scan runs first; heuristic scoring only runs when it
//! finds nothing. The source tree is never modified here.

pub mod priority;
pub mod scoring;

use dom_query::{NodeRef, Selection};

use crate::result::ContentSource;

pub use priority::find_by_priority;
pub use scoring::{best_candidate, score_candidate, Candidate};

/// The element chosen as article root and how it was found.
#[derive(Debug, Clone)]
pub struct Located<'a> {
    pub node: NodeRef<'a>,
    pub source: ContentSource,
}

/// Locate the main content element below `root` (normally `<body>`).
///
/// Returns `None` when neither phase finds a candidate; the caller then falls
/// back to the whole body.
#[must_use]
pub fn locate<'a>(root: &Selection<'a>) -> Option<Located<'a>> {
    if let Some((selector, node)) = priority::find_by_priority(root) {
        tracing::debug!(selector, "content located by priority selector");
        return Some(Located {
            node,
            source: ContentSource::PrioritySelector(selector.to_string()),
        });
    }

    let candidate = scoring::best_candidate(root)?;
    tracing::debug!(score = candidate.score, "content located by scoring");
    Some(Located {
        node: candidate.node,
        source: ContentSource::ScoredCandidate,
    })
}
