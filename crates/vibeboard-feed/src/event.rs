//! Event feed model and the mapping from events to posts.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use vibeboard_core::{sort_by_recency, Post};

/// Kind number of profile metadata.
pub const METADATA_KIND: u32 = 0;

/// Kind number of a short text note.
pub const TEXT_NOTE_KIND: u32 = 1;

/// A signed event as exported by a relay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NostrEvent {
    /// Event identifier (hex of SHA-256 hash).
    pub id: String,
    /// Author public key (hex).
    pub pubkey: String,
    pub kind: u32,
    /// Unix timestamp of creation.
    pub created_at: u64,
    #[serde(default)]
    pub tags: Vec<Vec<String>>,
    pub content: String,
    #[serde(default)]
    pub sig: String,
}

/// One line of an event dump: either a bare event or a relay
/// `["EVENT", <subscription>, <event>]` message.
#[derive(Deserialize)]
#[serde(untagged)]
enum EventLine {
    Bare(NostrEvent),
    Relay(String, String, NostrEvent),
}

/// The parts of a metadata event's JSON content that are read.
#[derive(Deserialize)]
struct ProfileMetadata {
    picture: Option<String>,
}

/// Inclusive time range limiting which events become posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyWindow {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl RecencyWindow {
    /// The `days` days ending at `now`.
    #[must_use]
    pub fn ending_at(now: DateTime<Utc>, days: u32) -> Self {
        Self {
            since: now - Duration::days(i64::from(days)),
            until: now,
        }
    }

    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.since <= instant && instant <= self.until
    }
}

/// Parses newline-delimited JSON events. Lines that are blank, malformed,
/// or relay messages other than `EVENT` are skipped.
#[must_use]
pub fn parse_event_lines(body: &str) -> Vec<NostrEvent> {
    let mut events = Vec::new();
    let mut skipped = 0_usize;
    for line in body.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match serde_json::from_str::<EventLine>(line) {
            Ok(EventLine::Bare(event)) => events.push(event),
            Ok(EventLine::Relay(label, _, event)) if label == "EVENT" => events.push(event),
            Ok(EventLine::Relay(..)) | Err(_) => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::debug!(skipped, kept = events.len(), "skipped unparseable event lines");
    }
    events
}

/// Maps events to posts, most recent first.
///
/// Keeps text notes by `author_hex` created inside `window`. Duplicate event
/// ids (the same note served by several sources) are kept once.
#[must_use]
pub fn events_to_posts(
    events: impl IntoIterator<Item = NostrEvent>,
    author_hex: &str,
    window: &RecencyWindow,
) -> Vec<Post> {
    let mut seen_ids: HashSet<String> = HashSet::new();
    let posts = events
        .into_iter()
        .filter(|e| e.kind == TEXT_NOTE_KIND && e.pubkey.eq_ignore_ascii_case(author_hex))
        .filter(|e| seen_ids.insert(e.id.clone()))
        .filter_map(|e| {
            let created_at = i64::try_from(e.created_at).ok()?;
            let date = DateTime::from_timestamp(created_at, 0)?;
            window.contains(date).then(|| Post::at(e.content, date))
        })
        .collect();
    sort_by_recency(posts)
}

/// Picture URL from the newest metadata event by `author_hex`.
///
/// `None` when there is no such event, its content is not a JSON object, or
/// it carries no non-blank `picture`.
#[must_use]
pub fn profile_picture(
    events: impl IntoIterator<Item = NostrEvent>,
    author_hex: &str,
) -> Option<String> {
    let latest = events
        .into_iter()
        .filter(|e| e.kind == METADATA_KIND && e.pubkey.eq_ignore_ascii_case(author_hex))
        .max_by_key(|e| e.created_at)?;

    match serde_json::from_str::<ProfileMetadata>(&latest.content) {
        Ok(metadata) => metadata
            .picture
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty()),
        Err(e) => {
            tracing::debug!(id = %latest.id, error = %e, "unparseable profile metadata");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const AUTHOR: &str = "1beecee55f69ebc2890403606f28b5e8ebbab23d226730e12b4bf762d29d2162";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 8, 0, 0, 0).unwrap()
    }

    fn event(id: &str, kind: u32, created_at: DateTime<Utc>, content: &str) -> NostrEvent {
        NostrEvent {
            id: id.to_string(),
            pubkey: AUTHOR.to_string(),
            kind,
            created_at: u64::try_from(created_at.timestamp()).unwrap(),
            tags: Vec::new(),
            content: content.to_string(),
            sig: String::new(),
        }
    }

    #[test]
    fn window_spans_requested_days() {
        let window = RecencyWindow::ending_at(now(), 7);
        assert_eq!(window.since, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        assert!(window.contains(window.since));
        assert!(window.contains(window.until));
        assert!(!window.contains(window.since - Duration::seconds(1)));
    }

    #[test]
    fn maps_text_notes_most_recent_first() {
        let window = RecencyWindow::ending_at(now(), 7);
        let events = vec![
            event("a", 1, Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap(), "older"),
            event("b", 1, Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap(), "newer"),
        ];
        let posts = events_to_posts(events, AUTHOR, &window);
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].content, "newer");
        assert_eq!(posts[0].timestamp, "2024-03-05T10:00:00.000Z");
        assert_eq!(posts[1].content, "older");
    }

    #[test]
    fn drops_other_kinds_authors_and_out_of_window() {
        let window = RecencyWindow::ending_at(now(), 7);
        let inside = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        let mut stranger = event("c", 1, inside, "stranger");
        stranger.pubkey = "ff".repeat(32);
        let events = vec![
            event("a", 0, inside, "{\"name\":\"profile\"}"),
            stranger,
            event("d", 1, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(), "too old"),
            event("e", 1, Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap(), "future"),
            event("f", 1, inside, "keep"),
        ];
        let posts = events_to_posts(events, AUTHOR, &window);
        let contents: Vec<&str> = posts.iter().map(|p| p.content.as_str()).collect();
        assert_eq!(contents, ["keep"]);
    }

    #[test]
    fn duplicate_ids_kept_once() {
        let window = RecencyWindow::ending_at(now(), 7);
        let at = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        let events = vec![event("a", 1, at, "dup"), event("a", 1, at, "dup")];
        assert_eq!(events_to_posts(events, AUTHOR, &window).len(), 1);
    }

    #[test]
    fn author_match_ignores_case() {
        let window = RecencyWindow::ending_at(now(), 7);
        let at = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        let events = vec![event("a", 1, at, "hi")];
        let upper = AUTHOR.to_ascii_uppercase();
        assert_eq!(events_to_posts(events, &upper, &window).len(), 1);
    }

    #[test]
    fn picture_absent_without_metadata_event() {
        let at = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        let events = vec![event("a", 1, at, r#"{"picture":"https://note.example/p.png"}"#)];
        assert!(profile_picture(events, AUTHOR).is_none());
    }

    #[test]
    fn picture_absent_for_malformed_metadata() {
        let at = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        let events = vec![event("a", 0, at, "{not json")];
        assert!(profile_picture(events, AUTHOR).is_none());
    }

    #[test]
    fn picture_taken_from_newest_metadata_event() {
        let older = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let newer = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        let mut stranger = event("s", 0, newer, r#"{"picture":"https://other.example/x.png"}"#);
        stranger.pubkey = "ff".repeat(32);
        let events = vec![
            event("a", 0, older, r#"{"picture":"https://img.example/old.png"}"#),
            event("b", 0, newer, r#"{"name":"akazdayo","picture":"https://img.example/new.png"}"#),
            stranger,
        ];
        assert_eq!(
            profile_picture(events, AUTHOR).as_deref(),
            Some("https://img.example/new.png")
        );
    }

    #[test]
    fn blank_picture_is_absent() {
        let at = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        let events = vec![event("a", 0, at, r#"{"picture":"  "}"#)];
        assert!(profile_picture(events, AUTHOR).is_none());
    }

    #[test]
    fn parses_bare_and_relay_lines() {
        let bare = format!(
            r#"{{"id":"a","pubkey":"{AUTHOR}","kind":1,"created_at":1709280000,"tags":[],"content":"hi","sig":"00"}}"#
        );
        let body = format!(
            "{bare}\n\n[\"EVENT\",\"sub1\",{bare}]\n[\"EOSE\",\"sub1\"]\n[\"NOTICE\",\"x\",{bare}]\nnot json\n"
        );
        let events = parse_event_lines(&body);
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.content == "hi"));
    }

    #[test]
    fn missing_tags_and_sig_default() {
        let line = format!(
            r#"{{"id":"a","pubkey":"{AUTHOR}","kind":1,"created_at":1709280000,"content":"hi"}}"#
        );
        let events = parse_event_lines(&line);
        assert_eq!(events.len(), 1);
        assert!(events[0].tags.is_empty());
        assert!(events[0].sig.is_empty());
    }
}
