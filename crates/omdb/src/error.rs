//! Typed error enum for the OMDb client.

use thiserror::Error;

/// Errors from OMDb lookups. None of them is fatal to the caller: every
/// variant means "no metadata for this title".
#[derive(Debug, Error)]
pub enum OmdbError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("movie not found: {0}")]
    NotFound(String),
    #[error("empty title")]
    EmptyTitle,
    #[error("OMDb API key is not configured (set OMDB_API_KEY)")]
    MissingApiKey,
    #[error("client initialization failed: {0}")]
    ClientInit(String),
    #[error("all retries exhausted, last error: {0}")]
    RetriesExhausted(Box<OmdbError>),
}

impl OmdbError {
    /// Whether this error is transient and should be retried.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpRequest(_) => true,
            Self::HttpStatus { code, .. } => matches!(code, 429 | 500 | 502 | 503 | 504),
            _ => false,
        }
    }

    /// Whether OMDb answered but knows no such title.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
