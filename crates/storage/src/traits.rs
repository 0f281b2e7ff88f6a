//! The storage contract shared by every backend.

use moviedb_core::{BackendKind, Catalog, DuplicatePolicy, MovieRecord};

use crate::error::StorageError;

/// Result of reading a backing file: the records plus anything that was
/// skipped or repaired along the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedCatalog {
    pub movies: Catalog,
    /// Human-readable diagnostics (corrupt document, malformed rows).
    pub warnings: Vec<String>,
}

impl LoadedCatalog {
    pub(crate) fn warn(&mut self, message: String) {
        tracing::warn!("{message}");
        self.warnings.push(message);
    }
}

/// List/add/delete/update over a whole-file catalog.
///
/// A missing backing file is an empty catalog for every operation. Duplicate
/// adds and unknown titles are reported through `Ok(false)`; `Err` is reserved
/// for I/O and encoding failures.
///
/// Nothing is cached: every call re-reads the file. There is no file locking
/// either. Two processes mutating the same catalog at once can lose each
/// other's changes, and concurrent rewrites share one `<file>.tmp` sibling.
/// Single-writer use is assumed.
pub trait MovieStore: Send + Sync {
    /// Which format this store persists.
    fn kind(&self) -> BackendKind;

    /// Policy applied by [`MovieStore::add`] on an identity collision.
    fn duplicate_policy(&self) -> DuplicatePolicy;

    /// Reads every persisted record together with load diagnostics.
    fn load(&self) -> Result<LoadedCatalog, StorageError>;

    /// Reads every persisted record.
    fn list(&self) -> Result<Catalog, StorageError> {
        Ok(self.load()?.movies)
    }

    /// Persists `movie`. Returns `false` when the duplicate policy rejected it.
    fn add(&self, movie: &MovieRecord) -> Result<bool, StorageError>;

    /// Removes the record with exactly this title. Returns `false` if absent.
    fn delete(&self, title: &str) -> Result<bool, StorageError>;

    /// Replaces rating and poster of an existing record, leaving title and
    /// year untouched. Returns `false` if absent.
    fn update(&self, title: &str, rating: f64, poster_url: &str) -> Result<bool, StorageError>;
}

/// Whether `movie` collides with an existing record under the reject policy:
/// same title, or same external id when both sides carry one.
pub(crate) fn has_identity(catalog: &Catalog, movie: &MovieRecord) -> bool {
    if catalog.contains_key(&movie.title) {
        return true;
    }
    movie.external_id.as_deref().is_some_and(|id| {
        catalog.values().any(|existing| existing.external_id.as_deref() == Some(id))
    })
}

/// Applies an update in memory. Returns `false` if the title is absent.
pub(crate) fn apply_update(catalog: &mut Catalog, title: &str, rating: f64, poster_url: &str) -> bool {
    match catalog.get_mut(title) {
        Some(movie) => {
            movie.rating = rating;
            movie.poster_url = moviedb_core::normalize_poster(poster_url.to_owned());
            true
        },
        None => false,
    }
}
