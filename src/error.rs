//! Error types for the RescueTime client

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no RescueTime API key provided")]
    MissingCredential,

    #[error("invalid base url {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("RescueTime API error: {message}")]
    Api { message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("bad timestamp {value:?}: {reason}")]
    BadTimestamp { value: String, reason: String },

    #[error("row {row}, column {column:?}: {reason}")]
    FieldDecode {
        row: usize,
        column: String,
        reason: String,
    },
}

impl Error {
    /// Only transport failures are worth retrying; everything else is deterministic.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
