//! The external event-source contract and its event-dump implementation.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use vibeboard_core::{sort_by_recency, Post};

use crate::error::FeedError;
use crate::event::{events_to_posts, parse_event_lines, profile_picture, NostrEvent, RecencyWindow};
use crate::identity::Identity;

/// Anything that can return an author's recent posts.
///
/// Implementations return posts inside `window`, each with a valid instant.
/// Zero posts is reported as [`FeedError::NoRecords`].
pub trait PostSource {
    fn fetch_recent_posts(
        &self,
        identity: &Identity,
        sources: &[String],
        window: &RecencyWindow,
    ) -> impl Future<Output = Result<Vec<Post>, FeedError>> + Send;

    /// Avatar URL from the author's profile metadata. Sources that carry no
    /// metadata return `None`.
    fn fetch_profile_picture(
        &self,
        _identity: &Identity,
        _sources: &[String],
    ) -> impl Future<Output = Result<Option<String>, FeedError>> + Send {
        async { Ok(None) }
    }
}

/// Validates `identity` and fetches posts from `source`, most recent first.
///
/// The identity check runs before any I/O.
///
/// # Errors
///
/// - [`FeedError::InvalidIdentity`] if `identity` is malformed.
/// - [`FeedError::NoRecords`] if nothing was found.
/// - Any other error the source surfaces.
pub async fn fetch_posts<S: PostSource + Sync>(
    source: &S,
    identity: &str,
    sources: &[String],
    window: &RecencyWindow,
) -> Result<Vec<Post>, FeedError> {
    let identity = Identity::parse(identity)?;
    tracing::info!(
        identity = %identity,
        sources = sources.len(),
        since = %window.since,
        "fetching recent posts"
    );
    let posts = source.fetch_recent_posts(&identity, sources, window).await?;
    if posts.is_empty() {
        return Err(FeedError::NoRecords);
    }
    Ok(sort_by_recency(posts))
}

/// Looks up the author's avatar URL. Never fails: an invalid identity or a
/// source error is logged and reported as `None`.
pub async fn fetch_profile_picture<S: PostSource + Sync>(
    source: &S,
    identity: &str,
    sources: &[String],
) -> Option<String> {
    let identity = match Identity::parse(identity) {
        Ok(identity) => identity,
        Err(e) => {
            tracing::warn!(error = %e, "skipping profile picture lookup");
            return None;
        }
    };
    match source.fetch_profile_picture(&identity, sources).await {
        Ok(picture) => picture,
        Err(e) => {
            tracing::warn!(identity = %identity, error = %e, "profile picture lookup failed");
            None
        }
    }
}

/// Reads newline-delimited event dumps from HTTP endpoints or local files.
///
/// Sources are read one at a time. A source that fails is logged and
/// skipped. Live relay (`ws://`, `wss://`) endpoints are not supported and
/// are skipped the same way.
pub struct EventDumpSource {
    client: Client,
}

impl EventDumpSource {
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    async fn read_source(&self, endpoint: &str) -> Result<Vec<NostrEvent>, FeedError> {
        let body = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            self.client
                .get(endpoint)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?
        } else if endpoint.starts_with("ws://") || endpoint.starts_with("wss://") {
            return Err(FeedError::UnsupportedSource {
                endpoint: endpoint.to_string(),
                reason: "live relay subscriptions are not supported; use an event export".into(),
            });
        } else {
            tokio::fs::read_to_string(endpoint)
                .await
                .map_err(|source| FeedError::Io {
                    path: endpoint.to_string(),
                    source,
                })?
        };
        Ok(parse_event_lines(&body))
    }

    /// Events from every source that could be read, in source order.
    async fn collect_events(&self, sources: &[String]) -> Vec<NostrEvent> {
        let mut events = Vec::new();
        for endpoint in sources {
            match self.read_source(endpoint).await {
                Ok(batch) => {
                    tracing::debug!(source = %endpoint, count = batch.len(), "read events");
                    events.extend(batch);
                }
                Err(e) => {
                    tracing::warn!(source = %endpoint, error = %e, "event source failed");
                }
            }
        }
        events
    }
}

impl PostSource for EventDumpSource {
    async fn fetch_recent_posts(
        &self,
        identity: &Identity,
        sources: &[String],
        window: &RecencyWindow,
    ) -> Result<Vec<Post>, FeedError> {
        let events = self.collect_events(sources).await;
        let posts = events_to_posts(events, identity.pubkey_hex(), window);
        tracing::info!(count = posts.len(), "mapped events to posts");
        if posts.is_empty() {
            return Err(FeedError::NoRecords);
        }
        Ok(posts)
    }

    async fn fetch_profile_picture(
        &self,
        identity: &Identity,
        sources: &[String],
    ) -> Result<Option<String>, FeedError> {
        let events = self.collect_events(sources).await;
        Ok(profile_picture(events, identity.pubkey_hex()))
    }
}
