//! The normalized post record shared by every ingestion path.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Naive date-time layouts accepted in addition to RFC 3339 / RFC 2822.
/// Values without a zone are read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A single social-media post.
///
/// Every `Post` carries a valid `date`: constructors return `None` when the
/// timestamp cannot be parsed, so callers never see partial records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Raw text body, exactly as ingested.
    pub content: String,
    /// Original timestamp representation, preserved verbatim.
    pub timestamp: String,
    /// Parsed instant used for ordering and bucketing.
    pub date: DateTime<Utc>,
}

impl Post {
    /// Builds a post from a raw content/timestamp pair.
    ///
    /// Returns `None` if `timestamp` is not a recognised date-time.
    #[must_use]
    pub fn from_raw(content: impl Into<String>, timestamp: impl Into<String>) -> Option<Self> {
        let timestamp = timestamp.into();
        let date = parse_timestamp(&timestamp)?;
        Some(Self {
            content: content.into(),
            timestamp,
            date,
        })
    }

    /// Builds a post from an already-known instant. The `timestamp` field is
    /// the RFC 3339 rendering of `date` with millisecond precision.
    #[must_use]
    pub fn at(content: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            content: content.into(),
            timestamp: date.to_rfc3339_opts(SecondsFormat::Millis, true),
            date,
        }
    }

    /// Content with one wrapping quote stripped from each end, for display.
    #[must_use]
    pub fn display_content(&self) -> &str {
        let text = self.content.strip_prefix('"').unwrap_or(&self.content);
        text.strip_suffix('"').unwrap_or(text)
    }
}

/// Parses a timestamp in any of the supported layouts.
///
/// Accepts RFC 3339, RFC 2822, naive `YYYY-MM-DD[T ]HH:MM[:SS[.fff]]`
/// (read as UTC) and bare `YYYY-MM-DD` (midnight UTC). Surrounding whitespace
/// is ignored.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Orders posts most-recent-first.
///
/// Posts with equal instants may come out in any relative order.
#[must_use]
pub fn sort_by_recency(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_unstable_by(|a, b| b.date.cmp(&a.date));
    posts
}
