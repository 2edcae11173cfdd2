//! URL Utility Functions
//!
//! Resolution of link and image targets against the page URL, plus the
//! scheme checks that keep script URLs out of the Markdown.

use url::Url;

/// Schemes left untouched by resolution.
const PASSTHROUGH_SCHEMES: &[&str] = &["data:", "mailto:", "tel:", "javascript:", "vbscript:"];

/// Prefixes of targets that must never be emitted as links or images.
const UNSAFE_PREFIXES: &[&str] = &["javascript:", "vbscript:", "data:text/html", "data:application/"];

/// Parse `s` if it is an absolute http(s) URL with a host.
#[must_use]
pub fn is_absolute_url(s: &str) -> Option<Url> {
    let s = s.trim();
    if !s.starts_with("http://") && !s.starts_with("https://") {
        return None;
    }
    Url::parse(s).ok().filter(|url| url.host().is_some())
}

/// Rewrite a protocol-relative `//host/path` to `https://host/path`.
#[must_use]
pub fn upgrade_protocol_relative(s: &str) -> String {
    match s.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => s.to_string(),
    }
}

/// Resolve a possibly relative URL against `base`.
///
/// Absolute targets and passthrough schemes are returned as written. Without
/// a base, relative targets are returned unchanged.
#[must_use]
pub fn resolve_url(raw: &str, base: Option<&Url>) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let target = upgrade_protocol_relative(trimmed);

    let lower = target.to_ascii_lowercase();
    if PASSTHROUGH_SCHEMES.iter().any(|p| lower.starts_with(p)) {
        return target;
    }
    if Url::parse(&target).is_ok() {
        return target;
    }

    match base.map(|b| b.join(&target)) {
        Some(Ok(resolved)) => resolved.to_string(),
        _ => target,
    }
}

/// Lowercased target with whitespace and control characters removed, the
/// way browsers read a scheme.
fn scheme_view(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase()
}

/// True for script-bearing targets (`javascript:`, `vbscript:`, HTML or
/// application data URIs).
#[must_use]
pub fn is_unsafe_url(s: &str) -> bool {
    let view = scheme_view(s);
    UNSAFE_PREFIXES.iter().any(|p| view.starts_with(p))
}

/// True for any inline `data:` URI.
#[must_use]
pub fn is_data_uri(s: &str) -> bool {
    scheme_view(s).starts_with("data:")
}

/// Lowercase hostname of a URL.
#[must_use]
pub fn hostname(url: &Url) -> Option<String> {
    url.host_str().map(str::to_ascii_lowercase)
}

/// `scheme://host[:port]` of an http(s) URL.
#[must_use]
pub fn origin(url: &Url) -> Option<String> {
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let origin = url.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}
