//! Post summarization for vibeboard.
//!
//! Builds a capped digest of recent posts, sends it to a generative model,
//! and caches the structured [`vibeboard_core::Summary`] for the session.
//! A missing or failing summarizer yields "no summary", never an error.

pub mod digest;
pub mod error;
pub mod gemini;
pub mod session;
pub mod summarizer;

pub use digest::{build_digest, build_prompt, DIGEST_LIMIT};
pub use error::SummaryError;
pub use gemini::GeminiClient;
pub use session::{SummarySession, SummaryState};
pub use summarizer::{summarize_posts, Summarizer};
