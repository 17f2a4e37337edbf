use std::future::Future;

use vibeboard_core::{Post, Summary};

use crate::digest::{build_digest, build_prompt};
use crate::error::SummaryError;

/// A generative model that turns a prompt into a structured [`Summary`].
pub trait Summarizer {
    fn summarize(&self, prompt: &str) -> impl Future<Output = Result<Summary, SummaryError>> + Send;
}

/// Summarizes `posts`, absorbing every failure into `None`.
///
/// - No summarizer configured: returns `None` without a request.
/// - No posts: returns `None` without a request.
/// - Request or decoding failure: logged at `warn`, returns `None`. Not retried.
pub async fn summarize_posts<S: Summarizer + Sync>(
    summarizer: Option<&S>,
    author_name: &str,
    posts: &[Post],
) -> Option<Summary> {
    let Some(summarizer) = summarizer else {
        tracing::info!("summarizer disabled: no credentials configured");
        return None;
    };
    if posts.is_empty() {
        tracing::debug!("no posts to summarize");
        return None;
    }

    let prompt = build_prompt(author_name, &build_digest(posts));
    match summarizer.summarize(&prompt).await {
        Ok(summary) => Some(summary),
        Err(e) => {
            tracing::warn!(error = %e, "summary unavailable");
            None
        }
    }
}
