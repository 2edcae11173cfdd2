//! Metadata extraction tests: title, author, dates, site identity.

#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use web_clip::metadata::{extract_json_ld, normalize_author};
use web_clip::{dom, extract, Options, PublishedDate};

fn metadata_of(html: &str, url: Option<&str>) -> web_clip::Metadata {
    let opts = Options {
        url: url.map(str::to_string),
        ..Options::default()
    };
    match extract(html, &opts) {
        Ok(result) => result.metadata,
        Err(err) => panic!("Extraction failed: {err:?}"),
    }
}

#[test]
fn test_open_graph_page() {
    let html = r#"<html><head>
        <title>Fallback Title</title>
        <meta property="og:title" content="Open Graph Title">
        <meta property="og:site_name" content="The Paper">
        <meta property="og:description" content="Summary of the story.">
        <meta property="article:published_time" content="2023-11-20T08:15:00+02:00">
        <link rel="shortcut icon" href="https://static.thepaper.example/icon.ico">
    </head><body><p>Body</p></body></html>"#;

    let meta = metadata_of(html, Some("https://thepaper.example/news/1"));
    assert_eq!(meta.title, "Open Graph Title");
    assert_eq!(meta.site_name.as_deref(), Some("The Paper"));
    assert_eq!(meta.description.as_deref(), Some("Summary of the story."));
    assert_eq!(meta.favicon.as_deref(), Some("https://static.thepaper.example/icon.ico"));
    assert_eq!(
        meta.published_at,
        Some(PublishedDate::Parsed(Utc.with_ymd_and_hms(2023, 11, 20, 6, 15, 0).unwrap()))
    );
}

#[test]
fn test_json_ld_author_and_date() {
    let html = r#"<html><head>
        <script type="application/ld+json">
        {"@context":"https://schema.org","@graph":[
            {"@type":"WebSite","name":"Ignored"},
            {"@type":"NewsArticle","author":[{"@type":"Person","name":"Ana Lima"}],
             "datePublished":"2024-01-15","publisher":{"@type":"Organization","name":"Daily Wire Service"}}
        ]}
        </script>
    </head><body><p>Body</p></body></html>"#;

    let meta = metadata_of(html, None);
    assert_eq!(meta.author.as_deref(), Some("Ana Lima"));
    assert_eq!(meta.site_name.as_deref(), Some("Daily Wire Service"));
    assert_eq!(
        meta.published_at.and_then(|d| d.as_datetime()),
        Some(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap())
    );
}

#[test]
fn test_malformed_json_ld_is_ignored() {
    let doc = dom::parse(r#"<html><head><script type="application/ld+json">{"@type": "Article", </script></head></html>"#);
    let ld = extract_json_ld(&doc);
    assert!(ld.author.is_none());
    assert!(ld.date_published.is_none());
}

#[test]
fn test_byline_markup_author() {
    let html = r#"<html><body><article><span class="byline">By Sam Ortiz</span><p>Text</p></article></body></html>"#;
    let meta = metadata_of(html, None);
    assert_eq!(meta.author.as_deref(), Some("Sam Ortiz"));
}

#[test]
fn test_unparseable_date_kept_raw() {
    let html = r#"<html><head><meta property="article:published_time" content="last Tuesday"></head><body></body></html>"#;
    let meta = metadata_of(html, None);
    assert_eq!(meta.published_at, Some(PublishedDate::Raw("last Tuesday".to_string())));
}

#[test]
fn test_cjk_date_in_markup() {
    let html = r#"<html><body><span class="publish-time">2024年3月5日 10:00</span><p>正文</p></body></html>"#;
    let meta = metadata_of(html, None);
    assert_eq!(
        meta.published_at,
        Some(PublishedDate::Parsed(Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap()))
    );
}

#[test]
fn test_site_name_and_favicon_fallbacks() {
    let meta = metadata_of("<html><head><title>T</title></head><body></body></html>", Some("https://www.blog.example/p/1"));
    assert_eq!(meta.site_name.as_deref(), Some("blog.example"));
    assert_eq!(meta.favicon.as_deref(), Some("https://www.blog.example/favicon.ico"));
    assert_eq!(meta.url, "https://www.blog.example/p/1");
}

#[test]
fn test_relative_favicon_resolved() {
    let html = r#"<html><head><link rel="icon" href="assets/icon.svg"></head><body></body></html>"#;
    let meta = metadata_of(html, Some("https://site.example/dir/page.html"));
    assert_eq!(meta.favicon.as_deref(), Some("https://site.example/dir/assets/icon.svg"));
}

#[test]
fn test_captured_at_from_options() {
    let when = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    let opts = Options {
        captured_at: Some(when),
        ..Options::default()
    };
    let result = extract("<html><body><p>x</p></body></html>", &opts).unwrap();
    assert_eq!(result.metadata.captured_at, when);
}

#[test]
fn test_missing_everything() {
    let meta = metadata_of("<html><body><p>Plain</p></body></html>", None);
    assert_eq!(meta.title, "");
    assert_eq!(meta.author, None);
    assert_eq!(meta.published_at, None);
    assert_eq!(meta.site_name, None);
    assert_eq!(meta.favicon, None);
    assert_eq!(meta.description, None);
}

#[test]
fn test_author_normalization() {
    assert_eq!(normalize_author("BY  Lee Chen").as_deref(), Some("Lee Chen"));
    assert_eq!(normalize_author("Byron Gale").as_deref(), Some("Byron Gale"));
    assert_eq!(normalize_author("   "), None);
}
