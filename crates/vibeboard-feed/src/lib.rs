//! Post ingestion for vibeboard.
//!
//! Two paths produce [`vibeboard_core::Post`] lists: the delimited-text
//! [`records`] parser, and the [`PostSource`] contract backed by an event
//! feed. Both drop malformed input silently rather than failing.

pub mod error;
pub mod event;
pub mod identity;
pub mod records;
pub mod source;

pub use error::FeedError;
pub use event::{
    events_to_posts, parse_event_lines, profile_picture, NostrEvent, RecencyWindow, METADATA_KIND,
    TEXT_NOTE_KIND,
};
pub use identity::Identity;
pub use records::{parse_posts_csv, read_posts_csv};
pub use source::{fetch_posts, fetch_profile_picture, EventDumpSource, PostSource};
