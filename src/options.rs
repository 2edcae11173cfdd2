//! Configuration options for content extraction.
//!
//! The `Options` struct carries what the host knows about the page (URL,
//! title, capture time) and the switches that tune the pipeline.

use chrono::{DateTime, Utc};

/// Configuration options for content extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use web_clip::Options;
///
/// let options = Options {
///     url: Some("https://example.com/post".to_string()),
///     include_images: false,
///     ..Options::default()
/// };
/// assert!(options.site_rules);
/// ```
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Page URL, used as the base for relative links and for site rules.
    ///
    /// Must be an absolute URL when set.
    ///
    /// Default: `None`
    pub url: Option<String>,

    /// Raw page title as the host saw it (e.g. `document.title`).
    ///
    /// When empty the title is read from the page.
    ///
    /// Default: `None`
    pub title: Option<String>,

    /// Capture timestamp; the current time when unset.
    ///
    /// Default: `None`
    pub captured_at: Option<DateTime<Utc>>,

    /// Apply site-specific cleaning rules for known hosts.
    ///
    /// Default: `true`
    pub site_rules: bool,

    /// Remove the heading that repeats the page title.
    ///
    /// Default: `true`
    pub remove_duplicate_title: bool,

    /// Emit images in the Markdown.
    ///
    /// Default: `true`
    pub include_images: bool,

    /// Return [`Error::NoContent`](crate::Error::NoContent) instead of empty
    /// Markdown when nothing readable is left.
    ///
    /// Default: `false`
    pub fail_on_empty: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            url: None,
            title: None,
            captured_at: None,
            site_rules: true,
            remove_duplicate_title: true,
            include_images: true,
            fail_on_empty: false,
        }
    }
}

impl Options {
    /// Options for a page at `url`.
    #[must_use]
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }
}
