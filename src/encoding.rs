//! Byte input decoding.
//!
//! Pages handed over as raw bytes are decoded to UTF-8 before parsing. The
//! charset comes from a byte-order mark, else from a `<meta>` declaration
//! near the top of the document, else UTF-8.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// Bytes scanned for a charset declaration.
pub const CHARSET_SNIFF_LEN: usize = 1024;

/// `<meta charset=...>` and the `http-equiv` content-type form.
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]*?charset\s*=\s*["']?\s*([A-Za-z0-9_\-:.]+)"#).expect("META_CHARSET regex")
});

/// Charset label declared in the first [`CHARSET_SNIFF_LEN`] bytes.
fn declared_charset(html: &[u8]) -> Option<String> {
    let head = String::from_utf8_lossy(&html[..html.len().min(CHARSET_SNIFF_LEN)]);
    META_CHARSET
        .captures(&head)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Pick the encoding of an HTML byte buffer.
#[must_use]
pub fn sniff_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }
    declared_charset(html)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode HTML bytes to a UTF-8 string; malformed sequences become U+FFFD.
#[must_use]
pub fn decode_html(html: &[u8]) -> String {
    let encoding = sniff_encoding(html);
    let (decoded, used, had_errors) = encoding.decode(html);
    if used != UTF_8 || had_errors {
        tracing::debug!(encoding = used.name(), had_errors, "decoded page bytes");
    }
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bom_wins_over_meta() {
        let mut html = vec![0xEF, 0xBB, 0xBF];
        html.extend_from_slice(br#"<meta charset="windows-1252"><p>x</p>"#);
        assert_eq!(sniff_encoding(&html), UTF_8);
        assert!(decode_html(&html).starts_with("<meta"));
    }

    #[test]
    fn test_meta_charset_forms() {
        assert_eq!(sniff_encoding(br#"<META CHARSET=gbk>"#).name(), "GBK");
        assert_eq!(
            sniff_encoding(br#"<meta http-equiv="Content-Type" content="text/html; charset=Shift_JIS">"#).name(),
            "Shift_JIS"
        );
        assert_eq!(sniff_encoding(b"<html><body>plain</body></html>"), UTF_8);
    }

    #[test]
    fn test_unknown_label_falls_back_to_utf8() {
        assert_eq!(sniff_encoding(br#"<meta charset="not-a-charset">"#), UTF_8);
    }

    #[test]
    fn test_decode_legacy_encodings() {
        let latin = b"<meta charset=\"ISO-8859-1\"><p>Caf\xE9</p>";
        assert!(decode_html(latin).contains("Caf\u{e9}"));

        // "中文" in GBK
        let gbk = b"<meta charset=\"gbk\"><p>\xD6\xD0\xCE\xC4</p>";
        assert!(decode_html(gbk).contains("\u{4e2d}\u{6587}"));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let out = decode_html(b"<p>ok \xFF\xFE end</p>");
        assert!(out.contains("ok"));
        assert!(out.contains('\u{FFFD}'));
        assert!(out.contains("end"));
    }
}
