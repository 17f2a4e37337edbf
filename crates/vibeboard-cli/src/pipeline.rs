//! Ingest, sort, aggregate and summarize, then hand off to rendering.

use chrono::{FixedOffset, Utc};
use vibeboard_core::{sort_by_recency, AppConfig, HourlyActivity, Post, Summary};
use vibeboard_feed::{
    fetch_posts, fetch_profile_picture, EventDumpSource, PostSource, RecencyWindow,
};
use vibeboard_profile::{format_profile_bio, publish_best_effort, ProfileClient};
use vibeboard_summary::{GeminiClient, Summarizer, SummarySession, SummaryState};

use crate::render::{Dashboard, SummaryCard};

const USER_AGENT: &str = concat!("vibeboard/", env!("CARGO_PKG_VERSION"));

/// Builds the configured summarizer, or `None` when disabled by flag or by
/// missing credentials.
pub(crate) fn build_summarizer(
    config: &AppConfig,
    no_summary: bool,
) -> anyhow::Result<Option<GeminiClient>> {
    if no_summary {
        return Ok(None);
    }
    let Some(api_key) = config.gemini_api_key.as_deref() else {
        return Ok(None);
    };
    let client = GeminiClient::with_base_url(
        api_key,
        &config.gemini_model,
        config.request_timeout_secs,
        &config.gemini_base_url,
    )?;
    Ok(Some(client))
}

/// Event-feed ingest. An empty result becomes an empty list so the zero
/// state renders; every other failure is returned.
pub(crate) async fn ingest_feed<S: PostSource + Sync>(
    source: &S,
    identity: &str,
    sources: &[String],
    days: u32,
) -> anyhow::Result<Vec<Post>> {
    let window = RecencyWindow::ending_at(Utc::now(), days);
    match fetch_posts(source, identity, sources, &window).await {
        Ok(posts) => Ok(posts),
        Err(e) if e.is_no_records() => {
            tracing::warn!(identity, "no posts found in the recency window");
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

/// Avatar lookup for the dashboard header. Absent on any failure.
pub(crate) async fn avatar_url<S: PostSource + Sync>(
    source: &S,
    identity: &str,
    sources: &[String],
) -> Option<String> {
    fetch_profile_picture(source, identity, sources).await
}

/// Whether any endpoint is something [`EventDumpSource`] reads. Live relay
/// URLs are skipped by it.
pub(crate) fn has_readable_source(sources: &[String]) -> bool {
    sources
        .iter()
        .any(|s| !(s.starts_with("ws://") || s.starts_with("wss://")))
}

pub(crate) fn feed_source(config: &AppConfig) -> anyhow::Result<EventDumpSource> {
    Ok(EventDumpSource::new(config.request_timeout_secs, USER_AGENT)?)
}

/// Sorts `posts`, then aggregates and summarizes them concurrently.
pub(crate) async fn assemble<S: Summarizer + Sync>(
    posts: Vec<Post>,
    author_name: &str,
    offset: FixedOffset,
    session: &SummarySession<S>,
) -> Dashboard {
    let posts = sort_by_recency(posts);

    let (_, activity) = tokio::join!(session.ensure(&posts), async {
        let activity = HourlyActivity::from_posts(&posts, offset);
        if session.state() == SummaryState::Pending {
            tracing::info!(total = activity.total(), "activity ready; summary pending");
        }
        activity
    });

    Dashboard {
        author_name: author_name.to_string(),
        avatar_url: None,
        offset,
        card: SummaryCard::from_session(session.state(), session.summary()),
        activity,
        posts,
    }
}

/// Republishes `summary` as the profile bio. Failures are logged only.
pub(crate) async fn publish_summary(config: &AppConfig, summary: &Summary) {
    let Some(credentials) = config.profile.as_ref() else {
        tracing::warn!("--publish given but VRCHAT_* credentials are not configured");
        return;
    };
    let client = match ProfileClient::new(credentials, config.request_timeout_secs) {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(error = %e, "profile client unavailable");
            return;
        }
    };
    publish_best_effort(&client, &format_profile_bio(summary)).await;
}
