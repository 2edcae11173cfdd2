//! Publish date parsing.
//!
//! A generic pass over common machine and human formats, then the
//! year/month/day pattern used by CJK sites, then the raw text if it is
//! short enough to be a date at all.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::patterns::LOCALE_YMD;
use crate::result::PublishedDate;

/// Unparsed date text at or above this length is discarded.
pub const MAX_RAW_DATE_LEN: usize = 50;

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%d %H:%M:%S%z", "%Y-%m-%d %H:%M:%S %z"];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%b. %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%A, %B %d, %Y",
    "%B %d %Y",
];

/// Parse a date string with the generic formats.
#[must_use]
pub fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.and_utc());
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .and_then(midnight_utc)
}

/// Year/month/day anywhere in the text, e.g. `2024年3月5日` or `2024.03.05`.
#[must_use]
pub fn parse_locale_ymd(text: &str) -> Option<DateTime<Utc>> {
    let caps = LOCALE_YMD.captures(text)?;
    let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
    let month = caps.get(2)?.as_str().parse::<u32>().ok()?;
    let day = caps.get(3)?.as_str().parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day).and_then(midnight_utc)
}

fn midnight_utc(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc())
}

/// Interpret publish-date text, degrading to the raw string and then to nothing.
#[must_use]
pub fn parse_published(text: &str) -> Option<PublishedDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Some(dt) = parse_datetime(text).or_else(|| parse_locale_ymd(text)) {
        return Some(PublishedDate::Parsed(dt));
    }
    if text.chars().count() < MAX_RAW_DATE_LEN {
        return Some(PublishedDate::Raw(text.to_string()));
    }
    None
}
