//! Second locator phase: heuristic candidate scoring.
//!
//! Every `div`/`section`/`article`/`main` outside page chrome is scored and
//! the highest strictly-greater score wins, so ties keep document order.
//! The constants below were tuned against real pages; output depends on
//! each of them.

use dom_query::{NodeRef, Selection};

use crate::dom;
use crate::link_density;
use crate::patterns::{self, NEGATIVE_KEYWORDS, POSITIVE_KEYWORDS, SENTENCE_TERMINATORS};
use crate::selector::content::{CANDIDATE_TAGS, SCORED_EXCLUDED_ANCESTORS};

/// Candidates with less raw text score 0 without further work.
pub const MIN_CANDIDATE_TEXT_LEN: usize = 200;

/// Base score is `min(sqrt(text_len) * BASE_SCORE_FACTOR, BASE_SCORE_CAP)`.
pub const BASE_SCORE_FACTOR: f64 = 2.0;
pub const BASE_SCORE_CAP: f64 = 500.0;

pub const PARAGRAPH_BONUS: f64 = 10.0;
pub const QUALITY_PARAGRAPH_BONUS: f64 = 15.0;
pub const QUALITY_PARAGRAPH_MIN_LEN: usize = 50;
pub const QUALITY_PARAGRAPH_MAX_LEN: usize = 500;
pub const SENTENCE_PARAGRAPH_BONUS: f64 = 5.0;
pub const MIN_SENTENCE_TERMINATORS: usize = 2;

/// Above this link density the candidate is navigation and scores 0.
pub const LINK_DENSITY_REJECT: f64 = 0.5;
/// `(threshold, multiplier)`: the first threshold exceeded applies.
pub const LINK_DENSITY_STEPS: &[(f64, f64)] = &[(0.3, 0.3), (0.2, 0.5), (0.1, 0.8)];
/// Below every step the score is scaled by `1 - density * LINK_DENSITY_SLOPE`.
pub const LINK_DENSITY_SLOPE: f64 = 0.5;

pub const HEADING_BONUS: f64 = 15.0;
pub const HEADING_CAP: f64 = 60.0;
pub const BLOCKQUOTE_BONUS: f64 = 10.0;
pub const IMAGE_BONUS: f64 = 5.0;
pub const IMAGE_CAP: f64 = 30.0;
pub const CODE_BONUS: f64 = 8.0;
pub const CODE_CAP: f64 = 40.0;
pub const LIST_BONUS: f64 = 5.0;
pub const LIST_CAP: f64 = 25.0;

pub const POSITIVE_MULTIPLIER: f64 = 1.3;
pub const NEGATIVE_MULTIPLIER: f64 = 0.2;
pub const UNLIKELY_MULTIPLIER: f64 = 0.1;

pub const DEEP_NESTING: usize = 10;
pub const DEEP_NESTING_MULTIPLIER: f64 = 0.7;
pub const VERY_DEEP_NESTING: usize = 15;
pub const VERY_DEEP_NESTING_MULTIPLIER: f64 = 0.5;

pub const SIBLING_COUNT_THRESHOLD: usize = 10;
pub const SIMILAR_SIBLING_THRESHOLD: usize = 5;
pub const SIBLING_LENGTH_TOLERANCE: f64 = 0.3;
pub const SIBLING_UNIFORMITY_MULTIPLIER: f64 = 0.3;

/// A scored element considered as the article root.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub node: NodeRef<'a>,
    pub score: f64,
}

/// Score every eligible container below `root` and return the best one.
///
/// Returns `None` when no candidate scores above zero.
#[must_use]
pub fn best_candidate<'a>(root: &Selection<'a>) -> Option<Candidate<'a>> {
    let root_node = *root.nodes().first()?;
    let mut best: Option<Candidate<'a>> = None;
    let mut best_score = 0.0;

    for node in dom::try_select_all(root, CANDIDATE_TAGS) {
        if is_excluded(&node, &root_node) {
            continue;
        }
        let score = score_candidate(&node, &root_node);
        tracing::trace!(
            tag = ?dom::node_tag(&node),
            class_id = %dom::class_and_id(&node),
            score,
            "scored candidate"
        );
        if score > best_score {
            best_score = score;
            best = Some(Candidate { node, score });
        }
    }

    best
}

/// Inside `nav`/`aside`/`footer` (or being one), or below an unlikely container.
fn is_excluded(node: &NodeRef, root: &NodeRef) -> bool {
    if dom::is_tag(node, SCORED_EXCLUDED_ANCESTORS) {
        return true;
    }
    dom::ancestors_until(node, Some(root)).iter().any(|ancestor| {
        dom::is_tag(ancestor, SCORED_EXCLUDED_ANCESTORS)
            || patterns::is_unlikely(&dom::class_and_id(ancestor))
    })
}

/// Score one candidate element; `root` bounds the depth walk.
#[must_use]
pub fn score_candidate(node: &NodeRef, root: &NodeRef) -> f64 {
    let sel = Selection::from(*node);
    let links = link_density::collect_link_info(&sel);
    let text_len = links.text_length;
    if text_len < MIN_CANDIDATE_TEXT_LEN {
        return 0.0;
    }

    let mut score = ((text_len as f64).sqrt() * BASE_SCORE_FACTOR).min(BASE_SCORE_CAP);
    score += paragraph_score(&sel);

    let density = links.density();
    if density > LINK_DENSITY_REJECT {
        return 0.0;
    }
    score *= link_density_multiplier(density);

    score += capped(count(&sel, "h1, h2, h3, h4, h5, h6"), HEADING_BONUS, HEADING_CAP);
    score += count(&sel, "blockquote") as f64 * BLOCKQUOTE_BONUS;
    score += capped(count(&sel, "img[alt]"), IMAGE_BONUS, IMAGE_CAP);
    score += capped(count(&sel, "pre, code"), CODE_BONUS, CODE_CAP);
    score += capped(count(&sel, "ul, ol"), LIST_BONUS, LIST_CAP);

    score *= class_multiplier(&dom::class_and_id(node));
    score *= depth_multiplier(dom::depth_from(node, root));

    if has_uniform_siblings(node, text_len) {
        score *= SIBLING_UNIFORMITY_MULTIPLIER;
    }

    score
}

fn paragraph_score(sel: &Selection) -> f64 {
    let mut score = 0.0;
    for p in sel.select("p").iter() {
        score += PARAGRAPH_BONUS;
        let text = p.text();
        let trimmed = text.trim();
        let len = trimmed.chars().count();
        if (QUALITY_PARAGRAPH_MIN_LEN..=QUALITY_PARAGRAPH_MAX_LEN).contains(&len) {
            score += QUALITY_PARAGRAPH_BONUS;
        }
        let terminators = trimmed.chars().filter(|c| SENTENCE_TERMINATORS.contains(c)).count();
        if terminators >= MIN_SENTENCE_TERMINATORS {
            score += SENTENCE_PARAGRAPH_BONUS;
        }
    }
    score
}

/// Multiplier for a link density already known to be at most [`LINK_DENSITY_REJECT`].
#[must_use]
pub fn link_density_multiplier(density: f64) -> f64 {
    LINK_DENSITY_STEPS
        .iter()
        .find(|(threshold, _)| density > *threshold)
        .map_or(1.0 - density * LINK_DENSITY_SLOPE, |(_, multiplier)| *multiplier)
}

/// Composite class/id multiplier; multiple matches compose.
#[must_use]
pub fn class_multiplier(class_and_id: &str) -> f64 {
    if class_and_id.is_empty() {
        return 1.0;
    }
    let mut multiplier = 1.0;
    if POSITIVE_KEYWORDS.is_match(class_and_id) {
        multiplier *= POSITIVE_MULTIPLIER;
    }
    if NEGATIVE_KEYWORDS.is_match(class_and_id) {
        multiplier *= NEGATIVE_MULTIPLIER;
    }
    if patterns::is_unlikely(class_and_id) {
        multiplier *= UNLIKELY_MULTIPLIER;
    }
    multiplier
}

/// Penalty for candidates buried deep in layout wrappers.
#[must_use]
pub fn depth_multiplier(depth: usize) -> f64 {
    if depth > VERY_DEEP_NESTING {
        VERY_DEEP_NESTING_MULTIPLIER
    } else if depth > DEEP_NESTING {
        DEEP_NESTING_MULTIPLIER
    } else {
        1.0
    }
}

/// Many same-tag siblings of similar length indicate a teaser list.
fn has_uniform_siblings(node: &NodeRef, text_len: usize) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    let siblings: Vec<NodeRef> = dom::element_children(&parent)
        .into_iter()
        .filter(|s| s.id != node.id)
        .collect();
    if siblings.len() <= SIBLING_COUNT_THRESHOLD {
        return false;
    }

    let tag = dom::node_tag(node);
    let tolerance = text_len as f64 * SIBLING_LENGTH_TOLERANCE;
    let similar = siblings
        .iter()
        .filter(|s| dom::node_tag(s) == tag)
        .filter(|s| {
            let len = dom::text_len(&Selection::from(**s)) as f64;
            (len - text_len as f64).abs() <= tolerance
        })
        .count();

    similar > SIMILAR_SIBLING_THRESHOLD
}

fn count(sel: &Selection, selector: &str) -> usize {
    sel.select(selector).length()
}

fn capped(n: usize, bonus: f64, cap: f64) -> f64 {
    (n as f64 * bonus).min(cap)
}
