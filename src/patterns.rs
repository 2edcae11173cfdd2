//! Compiled regex patterns and keyword lists for content extraction.
//!
//! All patterns are compiled once at first use using `LazyLock`.
//! They are immutable tables; changing any of them changes extraction output.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Candidate Classification Patterns
// =============================================================================

/// Matches class/id strings of elements unlikely to hold article content.
pub static UNLIKELY_CANDIDATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)-ad-|ai2html|banner|breadcrumbs|combx|comment|community|cover-wrap|disqus|extra|footer|gdpr|header|legends|menu|related|remark|replies|rss|shoutbox|sidebar|skyscraper|social|sponsor|supplemental|ad-break|agegate|pagination|pager|popup|yom-remote|navbar|navigation|share|recommend|advert|promo|subscribe|newsletter",
    )
    .expect("UNLIKELY_CANDIDATES regex")
});

/// Narrower override: an unlikely-looking class/id that still names content.
pub static MAYBE_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)article|body|column|content|main|shadow|post|entry|story|rich_?text")
        .expect("MAYBE_CANDIDATE regex")
});

/// Class/id keywords that raise a candidate's score.
pub static POSITIVE_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)article|body|content|entry|hentry|h-entry|main|page|post|text|blog|story|rich_media|richtext|markdown",
    )
    .expect("POSITIVE_KEYWORDS regex")
});

/// Class/id keywords that lower a candidate's score.
pub static NEGATIVE_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)-ad-|hidden|^hid$| hid$| hid |^hid |banner|combx|comment|com-|contact|foot|footnote|gdpr|masthead|media|meta|outbrain|promo|related|scroll|share|shoutbox|sidebar|skyscraper|sponsor|shopping|tags|tool|widget|recommend|advert",
    )
    .expect("NEGATIVE_KEYWORDS regex")
});

/// True if a class/id string marks an unlikely candidate without the override.
#[must_use]
pub fn is_unlikely(class_and_id: &str) -> bool {
    !class_and_id.is_empty()
        && UNLIKELY_CANDIDATES.is_match(class_and_id)
        && !MAYBE_CANDIDATE.is_match(class_and_id)
}

/// Sentence terminators, Latin and CJK.
pub const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?', '。', '！', '？'];

// =============================================================================
// Cleaner Keyword Sweep
// =============================================================================

/// Lowercase substrings of class/id that mark an element as noise.
///
/// Grouped by kind; the sweep treats them as one flat list.
pub const SUSPICIOUS_KEYWORDS: &[&str] = &[
    // navigation
    "navbar",
    "navigation",
    "breadcrumb",
    "menu",
    "pagination",
    "pager",
    "toc-",
    // promo
    "promo",
    "sponsor",
    "advert",
    "adsense",
    "ad-slot",
    "ad-container",
    "banner",
    // dynamic ui
    "popup",
    "modal",
    "overlay",
    "tooltip",
    "dropdown",
    "toolbar",
    "toast",
    "sticky",
    "floating",
    // lists and feeds
    "related",
    "recommend",
    "feed",
    "trending",
    "popular",
    "more-stories",
    "read-more",
    "you-may-like",
    "also-read",
    // interactive widgets
    "share",
    "social",
    "like-button",
    "follow",
    "vote",
    "rating",
    "reaction",
    "comment",
    "reply",
    "subscribe",
    "newsletter",
    "login",
    "signup",
    "download-app",
    "qrcode",
    // locale-specific (pinyin class names on CJK platforms)
    "guanzhu",
    "dianzan",
    "fenxiang",
    "tuijian",
    "xiangguan",
    "shoucang",
    "dashang",
    "erweima",
];

/// Returns the first suspicious keyword contained in a lowercase class/id string.
#[must_use]
pub fn suspicious_keyword(class_and_id: &str) -> Option<&'static str> {
    if class_and_id.is_empty() {
        return None;
    }
    SUSPICIOUS_KEYWORDS
        .iter()
        .copied()
        .find(|kw| class_and_id.contains(kw))
}

// =============================================================================
// Metadata Chip Pattern
// =============================================================================

/// Matches short inline metadata blocks: bylines, dates, view counts, sources.
///
/// A byline is only a whole line of up to four capitalized words, so prose
/// opening with "By the ..." is left alone.
pub static METADATA_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        ^(?:
            by\s+(?-i:\p{Lu})\S*(?:\s+(?-i:\p{Lu})\S*){0,3}\s*$
          | written\s+by\s+\S
          | posted\s+(?:by|on)\s+\S
          | (?:published|updated)(?:\s+on\s+\S|\s*[:：]|\s+\d)
          | (?:author|source|photo|image|credit)\s*[:：]
          | 作者\s*[:：] | 来源\s*[:：] | 发布(?:于|时间) | 发表于 | 编辑\s*[:：] | 原文链接
          | (?:阅读|浏览)\s*[:：]?\s*\d
        )
        | ^\d{4}\s*[-/.年]\s*\d{1,2}\s*[-/.月]\s*\d{1,2}\s*日?(?:\s+\d{1,2}:\d{2}(?::\d{2})?)?$
        | ^[\d,.]+\s*[kKwW万]?\s*(?:views?|reads?|likes?|comments?|次阅读|阅读|浏览|人阅读)$
        ",
    )
    .expect("METADATA_BLOCK regex")
});

// =============================================================================
// Title Normalization Patterns
// =============================================================================

/// Trailing `| Site Name` style suffix.
pub static TITLE_PIPE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*[|｜]\s*[^|｜]*$").expect("TITLE_PIPE_SUFFIX regex")
});

/// Trailing ` - Site Name` style suffix (dash family requires surrounding spaces).
pub static TITLE_DASH_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+[-–—_·]\s+[^-–—_·]*$").expect("TITLE_DASH_SUFFIX regex")
});

/// Bracket punctuation removed before title comparison.
pub static TITLE_BRACKETS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\[\]()（）【】「」『』《》<>]").expect("TITLE_BRACKETS regex")
});

// =============================================================================
// Date Patterns
// =============================================================================

/// Year/month/day written with CJK or numeric separators.
pub static LOCALE_YMD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})\s*[年/.\-]\s*(\d{1,2})\s*[月/.\-]\s*(\d{1,2})").expect("LOCALE_YMD regex")
});

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Matches multiple whitespace characters for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex"));

/// Whitespace the converter collapses in non-verbatim text.
pub static INLINE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\n\r\f]+").expect("INLINE_WHITESPACE regex"));

/// Matches multiple consecutive newlines.
pub static MULTIPLE_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("MULTIPLE_NEWLINES regex"));

/// Language hint in a `class` value, e.g. `language-rust` or `lang-js`.
pub static CODE_LANGUAGE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)(?:language|lang)-([A-Za-z0-9_+#.\-]+)").expect("CODE_LANGUAGE_CLASS regex")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlikely_respects_override() {
        assert!(is_unlikely("sidebar"));
        assert!(is_unlikely("site-footer"));
        assert!(!is_unlikely("sidebar-content"));
        assert!(!is_unlikely("article-body"));
        assert!(!is_unlikely(""));
    }

    #[test]
    fn positive_and_negative_keywords() {
        assert!(POSITIVE_KEYWORDS.is_match("post-body"));
        assert!(NEGATIVE_KEYWORDS.is_match("share-tools"));
        assert!(!NEGATIVE_KEYWORDS.is_match("story"));
    }

    #[test]
    fn suspicious_keyword_finds_first_match() {
        assert_eq!(suspicious_keyword("post-share-bar"), Some("share"));
        assert_eq!(suspicious_keyword("article-body"), None);
        assert_eq!(suspicious_keyword(""), None);
        assert_eq!(suspicious_keyword("wx-dashang-box"), Some("dashang"));
    }

    #[test]
    fn metadata_block_matches_chips() {
        assert!(METADATA_BLOCK.is_match("By Jane Doe"));
        assert!(METADATA_BLOCK.is_match("Source: Reuters"));
        assert!(METADATA_BLOCK.is_match("2024-03-05 10:30"));
        assert!(METADATA_BLOCK.is_match("2024年3月5日"));
        assert!(METADATA_BLOCK.is_match("1,234 views"));
        assert!(METADATA_BLOCK.is_match("作者：张三"));
        assert!(METADATA_BLOCK.is_match("阅读 1024"));
        assert!(!METADATA_BLOCK.is_match("Bypass surgery is common."));
        assert!(!METADATA_BLOCK.is_match("By the end of the year, sales had doubled."));
        assert!(!METADATA_BLOCK.is_match("Published research rarely agrees."));
        assert!(!METADATA_BLOCK.is_match("In 2024-03-05 we shipped the release."));
    }

    #[test]
    fn title_suffix_patterns() {
        assert_eq!(TITLE_PIPE_SUFFIX.replace("My Article | Site", ""), "My Article");
        assert_eq!(TITLE_DASH_SUFFIX.replace("My Article - Site", ""), "My Article");
        assert_eq!(TITLE_DASH_SUFFIX.replace("Self-hosting guide", ""), "Self-hosting guide");
    }

    #[test]
    fn code_language_class() {
        let caps = CODE_LANGUAGE_CLASS.captures("hljs language-rust");
        assert_eq!(caps.and_then(|c| c.get(1)).map(|m| m.as_str()), Some("rust"));
        assert!(CODE_LANGUAGE_CLASS.captures("highlight").is_none());
    }

    #[test]
    fn whitespace_normalize_collapses_spaces() {
        let result = WHITESPACE_NORMALIZE.replace_all("hello   world", " ");
        assert_eq!(result, "hello world");
    }
}
