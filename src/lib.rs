//! # web-clip
//!
//! Article extraction and HTML to Markdown conversion for web clipping.
//!
//! Given a page's HTML, this library locates the main article, strips
//! navigation, ads, share widgets and other boilerplate from a private copy
//! of it, and renders the result as Markdown together with page metadata.
//!
//! ## Quick Start
//!
//! ```rust
//! use web_clip::{extract, Options};
//!
//! let html = r#"<html><head><title>My Article</title></head>
//! <body><article><h1>My Article</h1><p>Main content here.</p></article></body></html>"#;
//!
//! let result = extract(html, &Options::with_url("https://example.com/post"))?;
//! println!("Title: {}", result.metadata.title);
//! println!("{}", result.markdown);
//! # Ok::<(), web_clip::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Content location**: prioritized article selectors, then candidate scoring
//! - **Cleaning**: selector, keyword and per-site boilerplate removal
//! - **Markdown**: headings, lists, tables, code blocks, images and links
//! - **Metadata**: title, author, publish date, site name, favicon, description

mod error;
mod extract;
mod options;
mod result;

/// DOM helpers over `dom_query`.
pub mod dom;

/// Compiled regex catalogue shared by the heuristics.
pub mod patterns;

/// Selector catalogues for locating, discarding and reading metadata.
pub mod selector;

/// Link density measurement.
pub mod link_density;

/// Main content location (priority selectors, then scoring).
pub mod locator;

/// Boilerplate removal on the cloned content tree.
pub mod cleaner;

/// Removal of a heading that repeats the page title.
pub mod title;

/// HTML to Markdown conversion.
pub mod markdown;

/// Metadata extraction (meta tags, JSON-LD, page markup).
pub mod metadata;

/// URL utilities for validation and resolution.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

use dom_query::Document;

use crate::extract::Mode;

// Public API - re-exports
pub use error::{Error, Result};
pub use options::Options;
pub use result::{ContentSource, ExtractedContent, Metadata, PublishedDate};

/// Extract the main content of a page.
///
/// The article is located first; when nothing qualifies the whole body is
/// cleaned and converted instead.
///
/// # Example
///
/// ```rust
/// use web_clip::{extract, ContentSource, Options};
///
/// let html = "<html><body><p>Just one paragraph.</p></body></html>";
/// let result = extract(html, &Options::default())?;
/// assert_eq!(result.markdown, "Just one paragraph.");
/// assert_eq!(result.source, ContentSource::FullBody);
/// # Ok::<(), web_clip::Error>(())
/// ```
pub fn extract(html: &str, options: &Options) -> Result<ExtractedContent> {
    extract::extract_content(html, options, Mode::Locate)
}

/// Extract from raw bytes, detecting the character encoding first.
pub fn extract_bytes(html: &[u8], options: &Options) -> Result<ExtractedContent> {
    let html = encoding::decode_html(html);
    extract(&html, options)
}

/// Extract from an already-parsed document. The document is not modified.
pub fn extract_document(doc: &Document, options: &Options) -> Result<ExtractedContent> {
    extract::extract_from_document(doc, options, Mode::Locate)
}

/// Clean and convert the whole body, skipping content location.
pub fn extract_full_page(html: &str, options: &Options) -> Result<ExtractedContent> {
    extract::extract_content(html, options, Mode::FullBody)
}

/// Clean and convert a user selection given as HTML.
///
/// `None` or whitespace-only markup is a collapsed selection and yields
/// [`Error::NoSelection`].
pub fn extract_selection(selection: Option<&str>, options: &Options) -> Result<ExtractedContent> {
    extract::extract_selection(selection, options)
}
