use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    /// The identity string is neither an npub nor a hex public key.
    #[error("invalid identity \"{identity}\": {reason}")]
    InvalidIdentity { identity: String, reason: String },

    /// The source produced zero posts. Callers render an empty dashboard.
    #[error("no records found")]
    NoRecords,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported source \"{endpoint}\": {reason}")]
    UnsupportedSource { endpoint: String, reason: String },
}

impl FeedError {
    /// `true` for the recoverable empty-result condition.
    #[must_use]
    pub fn is_no_records(&self) -> bool {
        matches!(self, FeedError::NoRecords)
    }
}
