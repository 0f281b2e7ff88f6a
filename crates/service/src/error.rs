//! Typed error enum for the service layer.
//!
//! Unifies storage and lookup failures so callers can match on the failure
//! mode instead of downcasting opaque boxes.

use std::io;
use std::path::PathBuf;

use moviedb_omdb::OmdbError;
use moviedb_storage::StorageError;
use thiserror::Error;

/// Service-layer error.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (I/O, encoding).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Metadata lookup failed or found nothing.
    #[error("lookup: {0}")]
    Lookup(#[from] OmdbError),

    /// Caller provided invalid input (empty title, rating out of range).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Writing a generated file failed.
    #[error("failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ServiceError {
    /// Whether OMDb answered but had no such title. Transport failures and
    /// exhausted retries are not misses.
    #[must_use]
    pub const fn is_lookup_miss(&self) -> bool {
        match self {
            Self::Lookup(e) => e.is_not_found(),
            _ => false,
        }
    }
}
