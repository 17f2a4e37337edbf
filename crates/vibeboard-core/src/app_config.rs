use chrono::FixedOffset;

/// Credentials for the optional profile side channel.
#[derive(Clone, PartialEq, Eq)]
pub struct ProfileCredentials {
    pub user_id: String,
    pub auth_cookie: String,
    pub two_factor_cookie: String,
    /// First line of every published bio.
    pub bio_prefix: String,
}

impl std::fmt::Debug for ProfileCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileCredentials")
            .field("user_id", &self.user_id)
            .field("auth_cookie", &"[redacted]")
            .field("two_factor_cookie", &"[redacted]")
            .field("bio_prefix", &self.bio_prefix)
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// npub or hex public key; only required by the event-source path.
    pub identity: Option<String>,
    pub sources: Vec<String>,
    pub recency_days: u32,
    /// Offset used for both hour bucketing and timeline display.
    pub display_offset: FixedOffset,
    pub author_name: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    /// Presence enables the summarizer.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    /// Presence enables the profile side channel.
    pub profile: Option<ProfileCredentials>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("identity", &self.identity)
            .field("sources", &self.sources)
            .field("recency_days", &self.recency_days)
            .field("display_offset", &self.display_offset)
            .field("author_name", &self.author_name)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("profile", &self.profile)
            .finish()
    }
}
