use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the core crate (parsing user-facing values, config I/O).
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("unknown data source: {0} (expected csv or json)")]
    InvalidBackend(String),

    #[error("unknown duplicate policy: {0} (expected reject or upsert)")]
    InvalidDuplicatePolicy(String),

    #[error("unknown sort order: {0} (expected asc or desc)")]
    InvalidSortOrder(String),

    #[error("failed to write config {}: {source}", path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
