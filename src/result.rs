//! Result types for extraction output.
//!
//! This module defines the structured output of one extraction call: the
//! cleaned HTML, its Markdown rendering and the page metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which path produced the extracted content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "selector", rename_all = "snake_case")]
pub enum ContentSource {
    /// Matched by the prioritized article selector (carried here).
    PrioritySelector(String),
    /// Chosen by heuristic candidate scoring.
    ScoredCandidate,
    /// Nothing was located, or full-page mode was requested.
    FullBody,
    /// Built from the user's selection.
    Selection,
}

/// Publish date: parsed when possible, raw text otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PublishedDate {
    Parsed(DateTime<Utc>),
    Raw(String),
}

impl PublishedDate {
    /// The parsed timestamp, if the source text could be read as a date.
    #[must_use]
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Parsed(dt) => Some(*dt),
            Self::Raw(_) => None,
        }
    }
}

/// Metadata about the captured page.
///
/// `url`, `title` and `captured_at` are always present; the rest is best
/// effort and `None` when the page does not say.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Page URL as supplied by the host (may be empty).
    pub url: String,

    /// Page title.
    pub title: String,

    /// Site name (e.g. "The Verge"), or the bare hostname.
    pub site_name: Option<String>,

    /// Author name.
    pub author: Option<String>,

    /// Publication date.
    pub published_at: Option<PublishedDate>,

    /// When the page was captured.
    pub captured_at: DateTime<Utc>,

    /// Absolute favicon URL.
    pub favicon: Option<String>,

    /// Page description (meta description).
    pub description: Option<String>,
}

/// Result of content extraction from an HTML document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedContent {
    /// Cleaned HTML of the extracted subtree.
    pub html: String,

    /// Markdown rendering of `html`.
    pub markdown: String,

    /// Extracted metadata about the page.
    pub metadata: Metadata,

    /// How the content was found.
    pub source: ContentSource,
}
