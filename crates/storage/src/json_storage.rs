//! Structured-document backend.
//!
//! A single JSON object keyed by title:
//!
//! ```json
//! {
//!     "Inception": {
//!         "year": 2010,
//!         "rating": 8.8,
//!         "posterUrl": "https://...",
//!         "externalId": "tt1375666"
//!     }
//! }
//! ```
//!
//! Unreadable content never fails a load: the catalog is empty and the file is
//! left alone until the next write replaces it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use moviedb_core::constants::NO_POSTER;
use moviedb_core::{
    BackendKind, Catalog, DuplicatePolicy, MovieRecord, normalize_poster, parse_rating, parse_year,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::StorageError;
use crate::fs_util::{read_optional, write_atomic};
use crate::traits::{LoadedCatalog, MovieStore, apply_update, has_identity};

/// Value stored under each title key.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentEntry {
    #[serde(default, deserialize_with = "lenient_year")]
    year: Option<i32>,
    /// `None` when the stored rating is missing or not numeric.
    #[serde(default, deserialize_with = "lenient_rating")]
    rating: Option<f64>,
    #[serde(default, alias = "poster_url")]
    poster_url: Option<String>,
    #[serde(default, alias = "imdbID", skip_serializing_if = "Option::is_none")]
    external_id: Option<String>,
}

impl DocumentEntry {
    fn from_record(movie: &MovieRecord) -> Self {
        Self {
            year: movie.year,
            rating: Some(movie.rating),
            poster_url: Some(movie.poster_url.clone()),
            external_id: movie.external_id.clone(),
        }
    }

    fn into_record(self, title: String, rating: f64) -> MovieRecord {
        MovieRecord {
            title,
            year: self.year,
            rating,
            poster_url: self.poster_url.map_or_else(|| NO_POSTER.to_owned(), normalize_poster),
            external_id: self.external_id.filter(|id| !id.trim().is_empty()),
        }
    }
}

/// Accepts `2010`, `"2010"`, `"2010–2012"`, `"unknown"` and `null`.
fn lenient_year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => parse_year(&s),
        _ => None,
    })
}

/// Accepts numbers and numeric strings; anything else reads as `None`.
fn lenient_rating<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_rating(&s),
        _ => None,
    })
}

/// JSON file store. Upserts on add unless configured otherwise.
#[derive(Clone, Debug)]
pub struct JsonStorage {
    path: PathBuf,
    policy: DuplicatePolicy,
}

impl JsonStorage {
    /// Creates a store for `path`. The file is not touched until the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), policy: BackendKind::Json.default_duplicate_policy() }
    }

    #[must_use]
    pub const fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, catalog: &Catalog) -> Result<(), StorageError> {
        write_atomic(&self.path, &encode(catalog)?)
    }
}

impl MovieStore for JsonStorage {
    fn kind(&self) -> BackendKind {
        BackendKind::Json
    }

    fn duplicate_policy(&self) -> DuplicatePolicy {
        self.policy
    }

    fn load(&self) -> Result<LoadedCatalog, StorageError> {
        match read_optional(&self.path)? {
            Some(bytes) => Ok(decode(&bytes)),
            None => {
                tracing::debug!(path = %self.path.display(), "JSON catalog missing, treating as empty");
                Ok(LoadedCatalog::default())
            },
        }
    }

    fn add(&self, movie: &MovieRecord) -> Result<bool, StorageError> {
        let mut catalog = self.list()?;
        if self.policy == DuplicatePolicy::Reject && has_identity(&catalog, movie) {
            tracing::debug!(title = %movie.title, "duplicate movie rejected");
            return Ok(false);
        }
        catalog.insert(movie.title.clone(), movie.clone());
        self.save(&catalog)?;
        tracing::info!(title = %movie.title, "movie saved to JSON catalog");
        Ok(true)
    }

    fn delete(&self, title: &str) -> Result<bool, StorageError> {
        let mut catalog = self.list()?;
        if catalog.remove(title).is_none() {
            return Ok(false);
        }
        self.save(&catalog)?;
        tracing::info!(title, "movie deleted from JSON catalog");
        Ok(true)
    }

    fn update(&self, title: &str, rating: f64, poster_url: &str) -> Result<bool, StorageError> {
        let mut catalog = self.list()?;
        if !apply_update(&mut catalog, title, rating, poster_url) {
            return Ok(false);
        }
        self.save(&catalog)?;
        tracing::info!(title, rating, "movie updated in JSON catalog");
        Ok(true)
    }
}

/// Pretty-prints the catalog with four-space indentation.
fn encode(catalog: &Catalog) -> Result<Vec<u8>, StorageError> {
    let document: BTreeMap<&str, DocumentEntry> = catalog
        .iter()
        .map(|(title, movie)| (title.as_str(), DocumentEntry::from_record(movie)))
        .collect();

    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    document.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Parses file content. Never fails: corruption becomes a diagnostic.
fn decode(bytes: &[u8]) -> LoadedCatalog {
    let mut loaded = LoadedCatalog::default();
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return loaded;
    }

    let entries = match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(entries)) => entries,
        Ok(other) => {
            loaded.warn(format!(
                "JSON catalog is not an object (found {}); treating as empty",
                value_kind(&other)
            ));
            return loaded;
        },
        Err(e) => {
            loaded.warn(format!("JSON catalog is corrupt ({e}); treating as empty"));
            return loaded;
        },
    };

    for (title, value) in entries {
        if title.trim().is_empty() {
            loaded.warn("skipping JSON entry with empty title".to_owned());
            continue;
        }
        match serde_json::from_value::<DocumentEntry>(value) {
            Ok(entry) => {
                let rating = entry.rating.unwrap_or_else(|| {
                    loaded.warn(format!("'{title}' has no valid rating, using 0.0"));
                    0.0
                });
                loaded.movies.insert(title.clone(), entry.into_record(title, rating));
            },
            Err(e) => loaded.warn(format!("skipping JSON entry '{title}': {e}")),
        }
    }
    loaded
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
