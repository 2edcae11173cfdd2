//! End-to-end extraction tests.
//!
//! Full pages through `extract` and friends: located content, fallbacks,
//! error cases and the serialized result.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use web_clip::{dom, extract, extract_bytes, extract_document, extract_full_page, ContentSource, Error, Options};

const PROSE: &str = "The committee met on Tuesday to review the proposal, and members agreed that more data was needed before a decision. ";

fn news_page() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <title>City Council Delays Vote | Example News</title>
    <meta name="author" content="Jane Doe">
    <meta property="article:published_time" content="2024-05-01T09:30:00Z">
</head>
<body>
    <header><a href="/">Example News</a></header>
    <nav><a href="/world">World</a><a href="/sport">Sport</a></nav>
    <article>
        <h1>City Council Delays Vote</h1>
        <p>{p1}</p>
        <div class="share-buttons"><a href="https://x.com/share">Share</a></div>
        <h2>What happens next</h2>
        <p>{p2}</p>
        <p>Read the <a href="/report.pdf">full report</a>.</p>
    </article>
    <aside class="related"><ul><li><a href="/a">Other story</a></li></ul></aside>
    <footer>Copyright Example News</footer>
</body>
</html>"#,
        p1 = PROSE.repeat(2),
        p2 = PROSE.repeat(2)
    )
}

#[test]
fn test_news_article_extraction() {
    let options = Options::with_url("https://news.example.com/local/council-vote");

    match extract(&news_page(), &options) {
        Ok(result) => {
            assert_eq!(result.source, ContentSource::PrioritySelector("article".to_string()));
            assert!(result.markdown.starts_with("The committee met"), "markdown: {}", result.markdown);
            assert!(result.markdown.contains("## What happens next"));
            assert!(result
                .markdown
                .contains("[full report](https://news.example.com/report.pdf)"));
            assert!(!result.markdown.contains("# City Council Delays Vote"));
            assert!(!result.markdown.contains("Share"));
            assert!(!result.markdown.contains("Other story"));
            assert!(!result.markdown.contains("Copyright"));
            assert!(!result.html.contains("share-buttons"));
            assert_eq!(result.metadata.author.as_deref(), Some("Jane Doe"));
            assert_eq!(result.metadata.site_name.as_deref(), Some("news.example.com"));
        }
        Err(err) => panic!("Extraction failed: {err:?}"),
    }
}

#[test]
fn test_scored_candidate_when_no_selector_matches() {
    let html = format!(
        r#"<html><body>
            <div id="sidebar"><a href="/1">One</a> <a href="/2">Two</a> <a href="/3">Three</a></div>
            <div id="story">
                <p>{}</p>
                <p>{}</p>
                <p>{}</p>
            </div>
        </body></html>"#,
        PROSE, PROSE, PROSE
    );

    let result = extract(&html, &Options::default()).unwrap();
    assert_eq!(result.source, ContentSource::ScoredCandidate);
    assert!(result.markdown.starts_with("The committee met"));
    assert!(!result.markdown.contains("Three"));
}

#[test]
fn test_fallback_to_full_body() {
    let html = "<html><body><p>Just a short note.</p></body></html>";
    let result = extract(html, &Options::default()).unwrap();
    assert_eq!(result.source, ContentSource::FullBody);
    assert_eq!(result.markdown, "Just a short note.");
}

#[test]
fn test_full_page_mode() {
    let result = extract_full_page(&news_page(), &Options::default()).unwrap();
    assert_eq!(result.source, ContentSource::FullBody);
    assert!(result.markdown.contains("The committee met"));
    assert!(!result.markdown.contains("Sport"));
    assert!(!result.markdown.contains("Copyright"));
}

#[test]
fn test_empty_body_is_not_an_error_by_default() {
    let result = extract("<html><body></body></html>", &Options::default()).unwrap();
    assert!(result.markdown.is_empty());
    assert!(result.html.is_empty());
}

#[test]
fn test_fail_on_empty() {
    let options = Options {
        fail_on_empty: true,
        ..Options::default()
    };
    let html = "<html><body><nav><a href=\"/\">Home</a></nav><script>track()</script></body></html>";
    assert!(matches!(extract(html, &options), Err(Error::NoContent)));
}

#[test]
fn test_no_body_does_not_panic() {
    let html = "<html><head><title>No Body</title></head></html>";
    let result = extract(html, &Options::default()).unwrap();
    assert_eq!(result.metadata.title, "No Body");
}

#[test]
fn test_malformed_html() {
    let html = "<html><body><p>Unclosed paragraph<div>Nested<p>Badly</body>";
    let result = extract(html, &Options::default()).unwrap();
    assert!(result.markdown.contains("Unclosed paragraph"));
    assert!(result.markdown.contains("Badly"));
}

#[test]
fn test_invalid_url() {
    let options = Options::with_url("/relative/path");
    match extract("<p>x</p>", &options) {
        Err(Error::InvalidUrl(msg)) => assert!(msg.contains("/relative/path")),
        other => panic!("expected InvalidUrl, got {other:?}"),
    }
}

#[test]
fn test_source_document_is_not_modified() {
    let doc = dom::parse(&news_page());
    let before = doc.html().to_string();

    let result = extract_document(&doc, &Options::default()).unwrap();
    assert!(!result.markdown.contains("Share"));

    assert_eq!(doc.html().to_string(), before);
    assert!(doc.select("div.share-buttons").exists());
    assert!(doc.select("nav").exists());
}

#[test]
fn test_repeated_extraction_is_stable() {
    let options = Options::with_url("https://news.example.com/a");
    let first = extract(&news_page(), &options).unwrap();
    let second = extract(&news_page(), &options).unwrap();
    assert_eq!(first.markdown, second.markdown);
    assert_eq!(first.html, second.html);
    assert_eq!(first.source, second.source);
}

#[test]
fn test_extract_bytes_with_legacy_charset() {
    let html = b"<html><head><meta charset=\"windows-1252\"><title>Caf\xE9</title></head><body><p>Caf\xE9 au lait</p></body></html>";
    let result = extract_bytes(html, &Options::default()).unwrap();
    assert_eq!(result.metadata.title, "Caf\u{e9}");
    assert_eq!(result.markdown, "Caf\u{e9} au lait");
}

#[test]
fn test_result_serializes_to_json() {
    let result = extract(&news_page(), &Options::with_url("https://news.example.com/a")).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["source"]["kind"], "priority_selector");
    assert_eq!(json["source"]["selector"], "article");
    assert_eq!(json["metadata"]["url"], "https://news.example.com/a");
    assert_eq!(json["metadata"]["published_at"], "2024-05-01T09:30:00Z");
    assert!(json["markdown"].as_str().unwrap().contains("What happens next"));
}
