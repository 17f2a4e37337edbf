//! HTTP client for the VRChat user profile endpoint.
//!
//! An update reads the current profile first so that fields other than the
//! bio are written back unchanged.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, COOKIE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use vibeboard_core::ProfileCredentials;

use crate::error::ProfileError;
use crate::format::compose_bio;

const DEFAULT_BASE_URL: &str = "https://vrchat.com";

/// The API rejects non-browser user agents.
const BROWSER_UA: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/142.0.0.0 Safari/537.36";

/// Profile fields carried over from the current profile.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrentProfile {
    status: Option<String>,
    status_description: Option<String>,
    #[serde(default)]
    bio_links: Vec<String>,
    pronouns: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileUpdate<'a> {
    status: Option<&'a str>,
    status_description: Option<&'a str>,
    bio: &'a str,
    bio_links: &'a [String],
    pronouns: Option<&'a str>,
}

/// Client that rewrites one user's profile bio.
pub struct ProfileClient {
    client: Client,
    user_url: String,
    bio_prefix: String,
}

impl ProfileClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Http`] if the client cannot be constructed.
    pub fn new(credentials: &ProfileCredentials, timeout_secs: u64) -> Result<Self, ProfileError> {
        Self::with_base_url(credentials, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Http`] if the client cannot be constructed, or
    /// [`ProfileError::InvalidCredentials`] if the cookies are not valid
    /// header characters.
    pub fn with_base_url(
        credentials: &ProfileCredentials,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ProfileError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut cookie = HeaderValue::from_str(&format!(
            "auth={}; twoFactorAuth={}",
            credentials.auth_cookie, credentials.two_factor_cookie
        ))
        .map_err(|e| ProfileError::InvalidCredentials(e.to_string()))?;
        cookie.set_sensitive(true);
        headers.insert(COOKIE, cookie);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(BROWSER_UA)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            user_url: format!(
                "{}/api/1/users/{}",
                base_url.trim_end_matches('/'),
                credentials.user_id
            ),
            bio_prefix: credentials.bio_prefix.clone(),
        })
    }

    /// Replaces the profile bio with the prefix line followed by `text`.
    ///
    /// # Errors
    ///
    /// - [`ProfileError::Http`] on network failure.
    /// - [`ProfileError::UnexpectedStatus`] if either request is rejected.
    /// - [`ProfileError::Deserialize`] if the current profile is malformed.
    pub async fn update_bio(&self, text: &str) -> Result<(), ProfileError> {
        let current = self.fetch_current().await?;
        let bio = compose_bio(&self.bio_prefix, text);
        let update = ProfileUpdate {
            status: current.status.as_deref(),
            status_description: current.status_description.as_deref(),
            bio: &bio,
            bio_links: &current.bio_links,
            pronouns: current.pronouns.as_deref(),
        };

        let response = self.client.put(&self.user_url).json(&update).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProfileError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.user_url.clone(),
            });
        }
        tracing::info!(status = status.as_u16(), "profile bio updated");
        Ok(())
    }

    async fn fetch_current(&self) -> Result<CurrentProfile, ProfileError> {
        let response = self.client.get(&self.user_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProfileError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.user_url.clone(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ProfileError::Deserialize {
            context: self.user_url.clone(),
            source: e,
        })
    }
}

/// Publishes `text` and logs the outcome. Never fails.
pub async fn publish_best_effort(client: &ProfileClient, text: &str) {
    if let Err(e) = client.update_bio(text).await {
        tracing::warn!(error = %e, "profile update failed; dashboard unaffected");
    }
}
