//! Optional side channel that republishes a summary as a profile bio.
//!
//! Publishing is fire-and-forget: [`publish_best_effort`] logs failures and
//! never returns them, so the dashboard pipeline is unaffected.

pub mod client;
pub mod error;
pub mod format;

pub use client::{publish_best_effort, ProfileClient};
pub use error::ProfileError;
pub use format::{compose_bio, format_profile_bio};
