//! Once-per-session summary cache.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::OnceCell;
use vibeboard_core::{Post, Summary};

use crate::summarizer::{summarize_posts, Summarizer};

/// Observable progress of the session's summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryState {
    /// Nothing requested yet.
    Idle,
    /// A request is in flight.
    Pending,
    Ready,
    /// The summarizer is disabled or the request failed.
    Unavailable,
}

/// Requests at most one summary per session and caches the outcome.
///
/// The first [`ensure`](Self::ensure) call with a non-empty post list
/// triggers the request. Concurrent callers await that same request, and
/// later callers get the cached result, including a cached "unavailable".
pub struct SummarySession<S> {
    summarizer: Option<S>,
    author_name: String,
    started: AtomicBool,
    result: OnceCell<Option<Summary>>,
}

impl<S: Summarizer + Sync> SummarySession<S> {
    #[must_use]
    pub fn new(summarizer: Option<S>, author_name: impl Into<String>) -> Self {
        Self {
            summarizer,
            author_name: author_name.into(),
            started: AtomicBool::new(false),
            result: OnceCell::new(),
        }
    }

    /// Returns the session summary, requesting it if this is the first
    /// call with posts.
    pub async fn ensure(&self, posts: &[Post]) -> Option<Summary> {
        if let Some(cached) = self.result.get() {
            return cached.clone();
        }
        if posts.is_empty() {
            return None;
        }

        self.result
            .get_or_init(|| async {
                self.started.store(true, Ordering::SeqCst);
                summarize_posts(self.summarizer.as_ref(), &self.author_name, posts).await
            })
            .await
            .clone()
    }

    #[must_use]
    pub fn state(&self) -> SummaryState {
        match self.result.get() {
            Some(Some(_)) => SummaryState::Ready,
            Some(None) => SummaryState::Unavailable,
            None if self.started.load(Ordering::SeqCst) => SummaryState::Pending,
            None => SummaryState::Idle,
        }
    }

    /// The cached summary, if one was obtained.
    #[must_use]
    pub fn summary(&self) -> Option<&Summary> {
        self.result.get().and_then(Option::as_ref)
    }
}
