use std::time::Duration;

use crate::error::OmdbError;
use crate::types::{MovieLookup, OmdbResponse};

/// Retries after the first attempt for transient failures.
pub const MAX_RETRIES: usize = 2;
const RETRY_DELAYS_MS: [u64; 3] = [0, 250, 750];

/// Client for the OMDb `?t=` title lookup.
pub struct OmdbClient {
    pub(crate) client: reqwest::Client,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
}

impl std::fmt::Debug for OmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OmdbClient")
            .field("client", &self.client)
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl OmdbClient {
    /// Creates a client for `base_url` (for example `http://www.omdbapi.com`).
    ///
    /// # Errors
    /// Returns an error if the key is blank or the HTTP client cannot be built.
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self, OmdbError> {
        if api_key.trim().is_empty() {
            return Err(OmdbError::MissingApiKey);
        }
        let base_url = base_url.trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OmdbError::ClientInit(e.to_string()))?;
        Ok(Self { client, api_key, base_url })
    }

    /// Builds a client from resolved configuration.
    ///
    /// # Errors
    /// Returns [`OmdbError::MissingApiKey`] when no key is configured.
    pub fn from_config(config: &moviedb_core::AppConfig) -> Result<Self, OmdbError> {
        let api_key = config.omdb_api_key.clone().ok_or(OmdbError::MissingApiKey)?;
        Self::new(
            api_key,
            config.omdb_base_url.clone(),
            Duration::from_secs(config.http_timeout_secs),
        )
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Looks up a movie by title.
    ///
    /// # Errors
    /// Returns [`OmdbError::NotFound`] when OMDb has no match, and transport or
    /// parse errors otherwise. Transient failures are retried first.
    pub async fn lookup(&self, title: &str) -> Result<MovieLookup, OmdbError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(OmdbError::EmptyTitle);
        }

        let mut last_error: Option<OmdbError> = None;
        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                let delay_ms = RETRY_DELAYS_MS.get(attempt).copied().unwrap_or(750);
                let delay = Duration::from_millis(delay_ms);
                tokio::time::sleep(delay).await;
                tracing::warn!("OMDb retry attempt {attempt}/{MAX_RETRIES} after {delay:?}");
            }

            match self.fetch(title).await {
                Ok(response) => {
                    if !response.is_success() {
                        let reason = response.error.unwrap_or_else(|| "no match".to_owned());
                        tracing::debug!(title, reason = %reason, "OMDb lookup found nothing");
                        return Err(OmdbError::NotFound(title.to_owned()));
                    }
                    return Ok(MovieLookup::from_response(response, title));
                },
                Err(e) if e.is_transient() => last_error = Some(e),
                Err(e) => return Err(e),
            }
        }

        Err(OmdbError::RetriesExhausted(Box::new(
            last_error.unwrap_or_else(|| OmdbError::NotFound(title.to_owned())),
        )))
    }

    async fn fetch(&self, title: &str) -> Result<OmdbResponse, OmdbError> {
        let response = self
            .client
            .get(format!("{}/", self.base_url))
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(OmdbError::HttpStatus {
                code: status.as_u16(),
                body: truncate(&body, 200).to_owned(),
            });
        }

        serde_json::from_str(&body).map_err(|e| OmdbError::JsonParse {
            context: format!("OMDb response (body: {})", truncate(&body, 200)),
            source: e,
        })
    }
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
