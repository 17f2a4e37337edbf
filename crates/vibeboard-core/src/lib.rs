//! Shared domain types and configuration for vibeboard.
//!
//! Holds the normalized [`Post`] record, the chronological ordering applied
//! right after ingestion, the 24-slot [`HourlyActivity`] histogram, the
//! [`Summary`] record returned by the external summarizer, and the
//! env-driven [`AppConfig`].

pub mod activity;
pub mod app_config;
pub mod config;
pub mod error;
pub mod offset;
pub mod post;
pub mod summary;

pub use activity::{ActivityBucket, HourlyActivity, HOURS_PER_DAY};
pub use app_config::{AppConfig, ProfileCredentials};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use offset::parse_utc_offset;
pub use post::{parse_timestamp, sort_by_recency, Post};
pub use summary::{normalize_theme_color, Summary, DEFAULT_THEME_COLOR};
