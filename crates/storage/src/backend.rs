//! Backend selection with enum dispatch.

use std::path::Path;

use moviedb_core::{AppConfig, BackendKind, DuplicatePolicy, MovieRecord};

use crate::csv_storage::CsvStorage;
use crate::error::StorageError;
use crate::json_storage::JsonStorage;
use crate::traits::{LoadedCatalog, MovieStore};

macro_rules! dispatch {
    ($self:expr, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            StorageBackend::Csv(s) => <CsvStorage as MovieStore>::$method(s, $($arg),*),
            StorageBackend::Json(s) => <JsonStorage as MovieStore>::$method(s, $($arg),*),
        }
    };
}

/// The active backend, chosen once from configuration.
#[derive(Clone, Debug)]
pub enum StorageBackend {
    Csv(CsvStorage),
    Json(JsonStorage),
}

impl StorageBackend {
    /// Opens a backend of `kind` at `path`. `policy` overrides the backend default.
    ///
    /// # Errors
    /// Returns an error if the CSV backend cannot create its initial file.
    pub fn open(
        kind: BackendKind,
        path: &Path,
        policy: Option<DuplicatePolicy>,
    ) -> Result<Self, StorageError> {
        let policy = policy.unwrap_or_else(|| kind.default_duplicate_policy());
        let backend = match kind {
            BackendKind::Csv => Self::Csv(CsvStorage::new(path)?.with_duplicate_policy(policy)),
            BackendKind::Json => Self::Json(JsonStorage::new(path).with_duplicate_policy(policy)),
        };
        tracing::debug!(
            kind = %kind,
            path = %path.display(),
            policy = %policy,
            "storage backend opened"
        );
        Ok(backend)
    }

    /// Opens the backend described by `config`.
    ///
    /// # Errors
    /// See [`StorageBackend::open`].
    pub fn from_config(config: &AppConfig) -> Result<Self, StorageError> {
        Self::open(
            config.data_source,
            &config.data_path(),
            Some(config.effective_duplicate_policy()),
        )
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Csv(s) => s.path(),
            Self::Json(s) => s.path(),
        }
    }
}

impl MovieStore for StorageBackend {
    fn kind(&self) -> BackendKind {
        dispatch!(self, kind())
    }

    fn duplicate_policy(&self) -> DuplicatePolicy {
        dispatch!(self, duplicate_policy())
    }

    fn load(&self) -> Result<LoadedCatalog, StorageError> {
        dispatch!(self, load())
    }

    fn add(&self, movie: &MovieRecord) -> Result<bool, StorageError> {
        dispatch!(self, add(movie))
    }

    fn delete(&self, title: &str) -> Result<bool, StorageError> {
        dispatch!(self, delete(title))
    }

    fn update(&self, title: &str, rating: f64, poster_url: &str) -> Result<bool, StorageError> {
        dispatch!(self, update(title, rating, poster_url))
    }
}
