//! Metadata Selectors
//!
//! Ordered lookups for author, publish date, site name and favicon.
//! Meta tags first, then schema.org microdata, then common class names,
//! then platform-specific markup.

/// Where a metadata value is read from once its selector matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The `content` attribute (meta tags).
    Content,
    /// The `datetime` attribute, falling back to text.
    DateTime,
    /// The element's text.
    Text,
}

/// Author lookups in priority order.
pub static AUTHOR_SELECTORS: &[(&str, Source)] = &[
    (r#"meta[name="author"]"#, Source::Content),
    (r#"meta[property="article:author"]"#, Source::Content),
    (r#"meta[name="twitter:creator"]"#, Source::Content),
    (r#"meta[name="byl"]"#, Source::Content),
    (r#"[itemprop="author"] [itemprop="name"]"#, Source::Text),
    (r#"[itemprop="author"]"#, Source::Text),
    (r#"[rel="author"]"#, Source::Text),
    (".author-name", Source::Text),
    (".author", Source::Text),
    (".byline", Source::Text),
    (".post-author", Source::Text),
    // platform-specific
    ("#js_name", Source::Text),
    (".AuthorInfo-name", Source::Text),
    (".author-info .name", Source::Text),
    (".article-author .name", Source::Text),
];

/// Publish-date lookups in priority order.
pub static DATE_SELECTORS: &[(&str, Source)] = &[
    (r#"meta[property="article:published_time"]"#, Source::Content),
    (r#"meta[name="pubdate"]"#, Source::Content),
    (r#"meta[name="publishdate"]"#, Source::Content),
    (r#"meta[itemprop="datePublished"]"#, Source::Content),
    (r#"meta[name="date"]"#, Source::Content),
    (r#"meta[name="DC.date.issued"]"#, Source::Content),
    ("time[datetime]", Source::DateTime),
    (r#"[itemprop="datePublished"]"#, Source::DateTime),
    ("time", Source::Text),
    (".publish-time", Source::Text),
    (".post-date", Source::Text),
    (".entry-date", Source::Text),
    (".date", Source::Text),
    // platform-specific
    ("#publish_time", Source::Text),
    (".article-info-box .time", Source::Text),
];

/// Site-name meta tags.
pub static SITE_NAME_SELECTORS: &[&str] = &[
    r#"meta[property="og:site_name"]"#,
    r#"meta[name="application-name"]"#,
    r#"meta[name="apple-mobile-web-app-title"]"#,
];

/// Favicon links.
pub static FAVICON_SELECTORS: &[&str] = &[
    r#"link[rel="icon"]"#,
    r#"link[rel="shortcut icon"]"#,
    r#"link[rel~="icon"]"#,
    r#"link[rel="apple-touch-icon"]"#,
];

/// Description meta tags.
pub static DESCRIPTION_SELECTORS: &[&str] = &[
    r#"meta[name="description"]"#,
    r#"meta[property="og:description"]"#,
    r#"meta[name="twitter:description"]"#,
];

/// Title meta tags consulted when the host supplies no title.
pub static TITLE_SELECTORS: &[&str] = &[
    r#"meta[property="og:title"]"#,
    r#"meta[name="twitter:title"]"#,
];
