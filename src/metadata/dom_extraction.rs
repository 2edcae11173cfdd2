//! DOM-based Metadata Extraction
//!
//! Author and publish date from ordered selector catalogues. Meta tags are
//! read first, then JSON-LD, then visible page markup.

use dom_query::{Document, NodeRef, Selection};

use crate::dom;
use crate::metadata::date;
use crate::metadata::meta_tags::select_all;
use crate::result::PublishedDate;
use crate::selector::meta::{Source, AUTHOR_SELECTORS, DATE_SELECTORS};

/// Accepted author names are shorter than this (in chars).
pub const MAX_AUTHOR_LEN: usize = 100;

/// Locale byline prefixes stripped from author text.
const AUTHOR_PREFIXES: &[&str] = &["作者：", "作者:"];

/// Read one value from a matched element.
fn read_value(node: &NodeRef, source: Source) -> Option<String> {
    let value = match source {
        Source::Content => dom::node_attr(node, "content"),
        Source::DateTime => dom::node_attr(node, "datetime").or_else(|| text_of(node)),
        Source::Text => text_of(node),
    };
    value.map(|v| dom::collapse_whitespace(&v)).filter(|v| !v.is_empty())
}

fn text_of(node: &NodeRef) -> Option<String> {
    Some(dom::clean_text(&Selection::from(*node))).filter(|t| !t.is_empty())
}

/// Strip a byline prefix and validate length.
#[must_use]
pub fn normalize_author(raw: &str) -> Option<String> {
    let collapsed = dom::collapse_whitespace(raw);
    let name = strip_byline_prefix(&collapsed).trim();
    let len = name.chars().count();
    (len > 0 && len < MAX_AUTHOR_LEN).then(|| name.to_string())
}

fn strip_byline_prefix(name: &str) -> &str {
    if let Some(prefix) = AUTHOR_PREFIXES.iter().find(|p| name.starts_with(*p)) {
        return &name[prefix.len()..];
    }
    let Some(head) = name.get(..2) else {
        return name;
    };
    if !head.eq_ignore_ascii_case("by") {
        return name;
    }
    let rest = &name[2..];
    if rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace() || c == ':') {
        rest.trim_start_matches(|c: char| c.is_whitespace() || c == ':')
    } else {
        name
    }
}

/// First value produced by `parse` over the selector entries, in order.
fn first_value<T, F>(doc: &Document, entries: &[&(&str, Source)], mut parse: F) -> Option<T>
where
    F: FnMut(&str) -> Option<T>,
{
    for (selector, source) in entries {
        for node in select_all(doc, selector) {
            if let Some(value) = read_value(&node, *source).and_then(|v| parse(&v)) {
                tracing::trace!(selector, "metadata value found");
                return Some(value);
            }
        }
    }
    None
}

/// Split a catalogue into its meta-tag entries and its markup entries.
fn split_by_source(
    catalogue: &'static [(&'static str, Source)],
) -> (Vec<&'static (&'static str, Source)>, Vec<&'static (&'static str, Source)>) {
    catalogue.iter().partition(|(_, source)| *source == Source::Content)
}

/// Author: meta tags, then JSON-LD, then page markup.
#[must_use]
pub fn extract_author(doc: &Document, json_ld_author: Option<&str>) -> Option<String> {
    let (meta, markup) = split_by_source(AUTHOR_SELECTORS);
    first_value(doc, &meta, normalize_author)
        .or_else(|| json_ld_author.and_then(normalize_author))
        .or_else(|| first_value(doc, &markup, normalize_author))
}

/// Publish date: meta tags, then JSON-LD, then page markup.
#[must_use]
pub fn extract_date(doc: &Document, json_ld_date: Option<&str>) -> Option<PublishedDate> {
    let (meta, markup) = split_by_source(DATE_SELECTORS);
    first_value(doc, &meta, date::parse_published)
        .or_else(|| json_ld_date.and_then(date::parse_published))
        .or_else(|| first_value(doc, &markup, date::parse_published))
}

/// Text of the `<title>` element.
#[must_use]
pub fn examine_title_element(doc: &Document) -> Option<String> {
    select_all(doc, "title")
        .first()
        .map(|node| dom::collapse_whitespace(&node.text()))
        .filter(|t| !t.is_empty())
}

/// Text of the first non-empty `<h1>`.
#[must_use]
pub fn first_heading(doc: &Document) -> Option<String> {
    select_all(doc, "h1")
        .iter()
        .filter_map(text_of)
        .next()
}
