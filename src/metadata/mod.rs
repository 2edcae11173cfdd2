//! Metadata extraction module.
//!
//! Best-effort page metadata: title, author, publish date, site name,
//! favicon and description. Every field degrades to `None` (or the
//! documented fallback) rather than failing the extraction.

pub mod date;
pub mod dom_extraction;
pub mod json_ld;
pub mod meta_tags;

use chrono::Utc;
use dom_query::Document;
use url::Url;

use crate::result::Metadata;
use crate::selector::meta::{DESCRIPTION_SELECTORS, FAVICON_SELECTORS, SITE_NAME_SELECTORS, TITLE_SELECTORS};
use crate::url_utils;
use crate::Options;

pub use date::parse_published;
pub use dom_extraction::{examine_title_element, extract_author, extract_date, normalize_author};
pub use json_ld::{extract_json_ld, JsonLd};

/// Path appended to the page origin when the page declares no favicon.
pub const DEFAULT_FAVICON_PATH: &str = "/favicon.ico";

/// Extract all metadata from a document.
///
/// `base` is the parsed page URL, used for the site-name fallback and to
/// resolve the favicon.
#[must_use]
pub fn extract_metadata(doc: &Document, opts: &Options, base: Option<&Url>) -> Metadata {
    let json_ld = json_ld::extract_json_ld(doc);

    let metadata = Metadata {
        url: opts.url.clone().unwrap_or_default(),
        title: extract_title(doc, opts),
        site_name: extract_site_name(doc, &json_ld, base),
        author: dom_extraction::extract_author(doc, json_ld.author.as_deref()),
        published_at: dom_extraction::extract_date(doc, json_ld.date_published.as_deref()),
        captured_at: opts.captured_at.unwrap_or_else(Utc::now),
        favicon: extract_favicon(doc, base),
        description: meta_tags::first_meta_content(doc, DESCRIPTION_SELECTORS),
    };

    tracing::debug!(
        title = %metadata.title,
        author = ?metadata.author,
        site_name = ?metadata.site_name,
        "metadata extracted"
    );
    metadata
}

/// Host-supplied title, then `og:title`/`twitter:title`, then `<title>`,
/// then the first `<h1>`; empty when the page has none.
fn extract_title(doc: &Document, opts: &Options) -> String {
    opts.title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .or_else(|| meta_tags::first_meta_content(doc, TITLE_SELECTORS))
        .or_else(|| dom_extraction::examine_title_element(doc))
        .or_else(|| dom_extraction::first_heading(doc))
        .unwrap_or_default()
}

/// Site-name meta tags, then the JSON-LD publisher, then the hostname
/// without a leading `www.`.
fn extract_site_name(doc: &Document, json_ld: &JsonLd, base: Option<&Url>) -> Option<String> {
    meta_tags::first_meta_content(doc, SITE_NAME_SELECTORS)
        .or_else(|| json_ld.publisher.clone())
        .or_else(|| {
            base.and_then(url_utils::hostname)
                .map(|host| host.strip_prefix("www.").unwrap_or(&host).to_string())
        })
}

/// Declared icon resolved against the page, else `{origin}/favicon.ico`.
fn extract_favicon(doc: &Document, base: Option<&Url>) -> Option<String> {
    let declared = meta_tags::first_link_href(doc, FAVICON_SELECTORS)
        .filter(|href| !url_utils::is_unsafe_url(href))
        .map(|href| url_utils::resolve_url(&href, base));
    if declared.is_some() {
        return declared;
    }
    base.and_then(url_utils::origin)
        .map(|origin| format!("{origin}{DEFAULT_FAVICON_PATH}"))
}
