//! Article container selectors, in priority order.
//!
//! Structured markers (schema.org, data attributes) come first because they
//! are authored on purpose; platform CMS classes next; generic semantic
//! containers last.

/// Selectors tried by the first locator phase.
pub static ARTICLE_SELECTORS: &[&str] = &[
    // schema.org
    r#"[itemprop="articleBody"]"#,
    r#"[itemtype*="schema.org/Article"]"#,
    r#"[itemtype*="schema.org/NewsArticle"]"#,
    r#"[itemtype*="schema.org/BlogPosting"]"#,
    r#"[itemtype*="schema.org/TechArticle"]"#,
    // data attributes
    "[data-article-body]",
    r#"[data-testid="article-body"]"#,
    r#"[data-component="article-body"]"#,
    r#"[data-role="article"]"#,
    r#"[data-type="article"]"#,
    "[data-post-content]",
    // platform and CMS classes
    "#js_content",
    ".rich_media_content",
    ".Post-RichText",
    ".RichText",
    ".article-viewer",
    ".markdown-body",
    "#content_views",
    "#article_content",
    ".show-content",
    ".article-content",
    ".article-body",
    ".article__body",
    ".post-content",
    ".post-body",
    ".entry-content",
    ".story-body",
    "#article-body",
    ".c-article-body",
    // generic semantic containers
    "article",
    "main",
    r#"[role="main"]"#,
];

/// Tags scored by the second locator phase.
pub const CANDIDATE_TAGS: &str = "div, section, article, main";

/// Semantic containers that never hold the article.
pub const NON_CONTENT_ANCESTORS: &[&str] = &["nav", "aside", "header", "footer"];

/// Containers the scored phase refuses to look inside.
pub const SCORED_EXCLUDED_ANCESTORS: &[&str] = &["nav", "aside", "footer"];
