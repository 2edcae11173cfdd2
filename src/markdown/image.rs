//! Image source resolution through lazy-loading indirection.

use dom_query::NodeRef;
use url::Url;

use crate::dom;
use crate::url_utils;

/// Attributes lazy-loading scripts park the real image URL in, in lookup order.
pub const LAZY_SRC_ATTRIBUTES: &[&str] = &[
    "data-src",
    "data-original",
    "data-lazy-src",
    "data-actualsrc",
    "data-original-src",
    "data-echo",
    "data-lazyload",
    "data-source",
    "data-url",
    "data-img-src",
    "data-real-src",
];

/// Responsive source lists; the first candidate URL is used.
pub const SRCSET_ATTRIBUTES: &[&str] = &["srcset", "data-srcset"];

const PLACEHOLDER_MARKERS: &[&str] = &["placeholder", "loading", "blank"];

/// True if `src` is a stand-in rather than the real image.
#[must_use]
pub fn is_placeholder(src: &str) -> bool {
    let lower = src.trim().to_ascii_lowercase();
    lower.is_empty() || PLACEHOLDER_MARKERS.iter().any(|m| lower.contains(m))
}

/// A source worth emitting: not a placeholder, not inline data, not a script.
fn is_usable(src: &str) -> bool {
    !is_placeholder(src) && !url_utils::is_data_uri(src) && !url_utils::is_unsafe_url(src)
}

/// First URL of a `srcset` value.
#[must_use]
pub fn first_srcset_url(srcset: &str) -> Option<&str> {
    srcset
        .split(',')
        .next()
        .and_then(|candidate| candidate.split_whitespace().next())
        .filter(|url| !url.is_empty())
}

/// Resolve the usable, absolute source of an `<img>`.
///
/// `src` is tried first, then the lazy attributes, then `srcset`. Returns
/// `None` when none of them holds a usable URL; inline `data:` images are
/// never emitted.
#[must_use]
pub fn resolve_image_src(img: &NodeRef, base: Option<&Url>) -> Option<String> {
    let raw = dom::node_attr(img, "src")
        .filter(|src| is_usable(src))
        .or_else(|| {
            LAZY_SRC_ATTRIBUTES
                .iter()
                .filter_map(|attr| dom::node_attr(img, attr))
                .find(|src| is_usable(src))
        })
        .or_else(|| {
            SRCSET_ATTRIBUTES
                .iter()
                .filter_map(|attr| dom::node_attr(img, attr))
                .find_map(|set| first_srcset_url(&set).filter(|url| is_usable(url)).map(str::to_string))
        });

    let Some(raw) = raw else {
        tracing::trace!(src = ?dom::node_attr(img, "src"), "image dropped: no usable source");
        return None;
    };

    let resolved = url_utils::resolve_url(&raw, base);
    (!resolved.is_empty()).then_some(resolved)
}
