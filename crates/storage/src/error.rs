//! Typed error enum for the storage layer.
//!
//! Missing files and corrupt content are not errors here: they degrade to an
//! empty catalog plus a diagnostic. What remains are genuine I/O failures and
//! encoding failures on write.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Storage-layer error.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading, writing, or renaming a backing file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Delimited-text encoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Document encoding failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StorageError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }

    /// Whether the failure came from the filesystem (permissions, disk full).
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}
