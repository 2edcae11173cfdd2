//! JSON-LD Metadata Parsing
//!
//! Reads Schema.org JSON-LD blocks embedded in the page. Only the facts the
//! metadata extractor consults are kept: article author, publish date and
//! publisher name.

use dom_query::{Document, Selection};
use serde_json::{Map, Value};

use crate::dom;

/// Facts gathered from all JSON-LD blocks of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonLd {
    /// `author` of the first article-like object that names one.
    pub author: Option<String>,
    /// `datePublished` of the first article-like object that has one.
    pub date_published: Option<String>,
    /// Article `publisher.name`, else the name of an Organization/WebSite.
    pub publisher: Option<String>,
}

/// Schema types treated as the page's article.
const ARTICLE_TYPES: &[&str] = &[
    "article",
    "newsarticle",
    "blogposting",
    "techarticle",
    "scholarlyarticle",
    "report",
    "socialmediaposting",
    "discussionforumposting",
    "liveblogposting",
    "webpage",
];

const PUBLISHER_TYPES: &[&str] = &["organization", "newsmediaorganization", "website"];

/// Extract metadata facts from every `application/ld+json` script.
///
/// Malformed blocks are skipped.
#[must_use]
pub fn extract_json_ld(doc: &Document) -> JsonLd {
    let mut facts = JsonLd::default();
    let mut fallback_publisher = None;

    for script in doc.select(r#"script[type="application/ld+json"]"#).nodes() {
        let text = dom::text_content(&Selection::from(*script)).trim().to_string();
        if text.is_empty() {
            continue;
        }
        let value: Value = match serde_json::from_str(&text) {
            Ok(v) => v,
            Err(err) => {
                tracing::trace!(error = %err, "skipping malformed JSON-LD");
                continue;
            }
        };
        visit(&value, &mut facts, &mut fallback_publisher);
    }

    if facts.publisher.is_none() {
        facts.publisher = fallback_publisher;
    }
    facts
}

fn visit(value: &Value, facts: &mut JsonLd, fallback_publisher: &mut Option<String>) {
    match value {
        Value::Array(items) => {
            for item in items {
                visit(item, facts, fallback_publisher);
            }
        }
        Value::Object(map) => {
            let types = schema_types(map);
            if types.iter().any(|t| ARTICLE_TYPES.contains(&t.as_str())) {
                if facts.author.is_none() {
                    facts.author = map.get("author").and_then(person_name);
                }
                if facts.date_published.is_none() {
                    facts.date_published = string_value(map.get("datePublished"));
                }
                if facts.publisher.is_none() {
                    facts.publisher = map.get("publisher").and_then(person_name);
                }
            } else if types.iter().any(|t| PUBLISHER_TYPES.contains(&t.as_str())) && fallback_publisher.is_none() {
                *fallback_publisher = string_value(map.get("name"));
            }
            if let Some(graph) = map.get("@graph") {
                visit(graph, facts, fallback_publisher);
            }
            if let Some(main) = map.get("mainEntity") {
                visit(main, facts, fallback_publisher);
            }
        }
        _ => {}
    }
}

/// Lowercased `@type` values (string or array).
fn schema_types(map: &Map<String, Value>) -> Vec<String> {
    match map.get("@type") {
        Some(Value::String(t)) => vec![t.to_lowercase()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_lowercase)
            .collect(),
        _ => Vec::new(),
    }
}

/// Name of a person or organization given as a string, an object with
/// `name`, or an array of either (first usable entry).
fn person_name(value: &Value) -> Option<String> {
    match value {
        Value::String(_) => string_value(Some(value)),
        Value::Object(map) => string_value(map.get("name")),
        Value::Array(items) => items.iter().find_map(person_name),
        _ => None,
    }
}

fn string_value(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(dom::collapse_whitespace)
        .filter(|s| !s.is_empty())
}
