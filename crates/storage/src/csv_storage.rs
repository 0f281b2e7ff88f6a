//! Delimited-text backend.
//!
//! One header row (`title,rating,year,posterUrl,externalId`) followed by one
//! row per movie. Quoting follows RFC 4180 through the `csv` crate. Columns are
//! resolved by header name, so files written before `externalId` existed (or
//! with the older `poster_url`/`imdbID` names) still load.

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use moviedb_core::constants::{CSV_HEADER, NO_POSTER};
use moviedb_core::{
    BackendKind, Catalog, DuplicatePolicy, MovieRecord, normalize_poster, parse_rating, parse_year,
};

use crate::error::StorageError;
use crate::fs_util::{missing_trailing_newline, open_append, read_optional, write_atomic};
use crate::traits::{LoadedCatalog, MovieStore, apply_update, has_identity};

/// CSV file store. Rejects duplicate identities on add unless configured otherwise.
#[derive(Clone, Debug)]
pub struct CsvStorage {
    path: PathBuf,
    policy: DuplicatePolicy,
}

impl CsvStorage {
    /// Opens the store, creating a header-only file (and its directory) if absent.
    ///
    /// # Errors
    /// Returns an error if the missing file cannot be created.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if !path.exists() {
            write_atomic(&path, &encode(&Catalog::new())?)?;
            tracing::debug!(path = %path.display(), "created empty CSV catalog");
        }
        Ok(Self { path, policy: BackendKind::Csv.default_duplicate_policy() })
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

    /// Loads the catalog and reports whether the header is exactly [`CSV_HEADER`].
    /// A missing or empty file counts as canonical since appending writes the header.
    fn read_with_layout(&self) -> Result<(LoadedCatalog, bool), StorageError> {
        match read_optional(&self.path)? {
            Some(bytes) => Ok(decode_with_layout(&bytes)),
            None => {
                tracing::debug!(path = %self.path.display(), "CSV catalog missing, treating as empty");
                Ok((LoadedCatalog::default(), true))
            },
        }
    }

    fn append(&self, movie: &MovieRecord) -> Result<(), StorageError> {
        let needs_header = match std::fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };
        let needs_newline = !needs_header && missing_trailing_newline(&self.path)?;

        let mut file = open_append(&self.path)?;
        if needs_newline {
            std::io::Write::write_all(&mut file, b"\n")
                .map_err(|e| StorageError::io(&self.path, e))?;
        }
        let mut writer = WriterBuilder::new().from_writer(file);
        if needs_header {
            writer.write_record(CSV_HEADER)?;
        }
        writer.write_record(to_row(movie))?;
        writer.flush().map_err(|e| StorageError::io(&self.path, e))
    }
}

impl MovieStore for CsvStorage {
    fn kind(&self) -> BackendKind {
        BackendKind::Csv
    }

    fn duplicate_policy(&self) -> DuplicatePolicy {
        self.policy
    }

    fn load(&self) -> Result<LoadedCatalog, StorageError> {
        self.read_with_layout().map(|(loaded, _)| loaded)
    }

    fn add(&self, movie: &MovieRecord) -> Result<bool, StorageError> {
        let (loaded, canonical) = self.read_with_layout()?;
        let mut catalog = loaded.movies;
        if self.policy == DuplicatePolicy::Reject && has_identity(&catalog, movie) {
            tracing::debug!(title = %movie.title, "duplicate movie rejected");
            return Ok(false);
        }

        // Rows are appended in canonical column order, so any other header
        // layout gets rewritten first.
        if canonical && !catalog.contains_key(&movie.title) {
            self.append(movie)?;
        } else {
            if !canonical {
                tracing::debug!(path = %self.path.display(), "rewriting CSV catalog with canonical header");
            }
            catalog.insert(movie.title.clone(), movie.clone());
            self.save(&catalog)?;
        }
        tracing::info!(title = %movie.title, "movie saved to CSV catalog");
        Ok(true)
    }

    fn delete(&self, title: &str) -> Result<bool, StorageError> {
        let mut catalog = self.list()?;
        if catalog.remove(title).is_none() {
            return Ok(false);
        }
        self.save(&catalog)?;
        tracing::info!(title, "movie deleted from CSV catalog");
        Ok(true)
    }

    fn update(&self, title: &str, rating: f64, poster_url: &str) -> Result<bool, StorageError> {
        let mut catalog = self.list()?;
        if !apply_update(&mut catalog, title, rating, poster_url) {
            return Ok(false);
        }
        self.save(&catalog)?;
        tracing::info!(title, rating, "movie updated in CSV catalog");
        Ok(true)
    }
}

fn to_row(movie: &MovieRecord) -> [String; 5] {
    [
        movie.title.clone(),
        movie.rating.to_string(),
        movie.year_display(),
        movie.poster_url.clone(),
        movie.external_id.clone().unwrap_or_default(),
    ]
}

/// Serializes the whole catalog, header included.
fn encode(catalog: &Catalog) -> Result<Vec<u8>, StorageError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for movie in catalog.values() {
        writer.write_record(to_row(movie))?;
    }
    writer.into_inner().map_err(|e| StorageError::Csv(e.into_error().into()))
}

/// Positions of the known columns in the header row.
#[derive(Debug, Default)]
struct Columns {
    title: Option<usize>,
    rating: Option<usize>,
    year: Option<usize>,
    poster: Option<usize>,
    external_id: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut columns = Self::default();
        for (idx, name) in headers.iter().enumerate() {
            let slot = match name.trim().trim_start_matches('\u{feff}') {
                "title" => &mut columns.title,
                "rating" => &mut columns.rating,
                "year" => &mut columns.year,
                "posterUrl" | "poster_url" => &mut columns.poster,
                "externalId" | "imdbID" => &mut columns.external_id,
                _ => continue,
            };
            slot.get_or_insert(idx);
        }
        columns
    }
}

fn cell(record: &StringRecord, column: Option<usize>) -> Option<&str> {
    column.and_then(|idx| record.get(idx)).filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
fn decode(bytes: &[u8]) -> LoadedCatalog {
    decode_with_layout(bytes).0
}

fn is_canonical_header(headers: &StringRecord) -> bool {
    headers.len() == CSV_HEADER.len()
        && headers
            .iter()
            .zip(CSV_HEADER)
            .all(|(name, expected)| name.trim().trim_start_matches('\u{feff}') == expected)
}

/// Parses file content and reports whether the header has the canonical
/// layout. Never fails: bad rows become diagnostics.
fn decode_with_layout(bytes: &[u8]) -> (LoadedCatalog, bool) {
    let mut loaded = LoadedCatalog::default();
    if bytes.iter().all(u8::is_ascii_whitespace) {
        // Only a truly empty file gets a header written on append.
        return (loaded, bytes.is_empty());
    }

    let mut reader = ReaderBuilder::new().flexible(true).from_reader(bytes);
    let (columns, canonical) = match reader.headers() {
        Ok(headers) => (Columns::from_headers(headers), is_canonical_header(headers)),
        Err(e) => {
            loaded.warn(format!("unreadable CSV header: {e}"));
            return (loaded, false);
        },
    };
    if columns.title.is_none() {
        loaded.warn("CSV header has no title column; treating catalog as empty".to_owned());
        return (loaded, false);
    }

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                loaded.warn(format!("skipping malformed CSV row: {e}"));
                continue;
            },
        };
        let line = record.position().map_or(0, csv::Position::line);

        let Some(title) = cell(&record, columns.title) else {
            loaded.warn(format!("skipping CSV row on line {line}: empty title"));
            continue;
        };

        let rating = match cell(&record, columns.rating).map(|raw| (raw, parse_rating(raw))) {
            Some((_, Some(rating))) => rating,
            Some((raw, None)) => {
                loaded.warn(format!("'{title}' has invalid rating '{raw}', using 0.0"));
                0.0
            },
            None => {
                loaded.warn(format!("'{title}' has no rating, using 0.0"));
                0.0
            },
        };

        let movie = MovieRecord {
            title: title.to_owned(),
            year: cell(&record, columns.year).and_then(parse_year),
            rating,
            poster_url: cell(&record, columns.poster)
                .map_or_else(|| NO_POSTER.to_owned(), |p| normalize_poster(p.to_owned())),
            external_id: cell(&record, columns.external_id).map(str::to_owned),
        };

        if loaded.movies.insert(movie.title.clone(), movie).is_some() {
            loaded.warn(format!("duplicate CSV row for '{title}', keeping the last one"));
        }
    }
    (loaded, canonical)
}
