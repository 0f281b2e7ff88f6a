//! Shared constants for moviedb.

/// Stored in place of a poster URL when none is known.
pub const NO_POSTER: &str = "no poster available";

/// Textual form of an unknown release year (CSV cell, display).
pub const UNKNOWN_YEAR: &str = "unknown";

/// Lowest rating accepted from user input.
pub const MIN_RATING: f64 = 1.0;

/// Highest rating accepted from user input.
pub const MAX_RATING: f64 = 10.0;

/// Header row of the delimited-text backend, in column order.
pub const CSV_HEADER: [&str; 5] = ["title", "rating", "year", "posterUrl", "externalId"];

/// File name of the delimited-text catalog inside the data directory.
pub const CSV_FILE_NAME: &str = "movies.csv";

/// File name of the structured-document catalog inside the data directory.
pub const JSON_FILE_NAME: &str = "movies.json";

/// Default OMDb endpoint.
pub const DEFAULT_OMDB_URL: &str = "http://www.omdbapi.com";

/// Default timeout for OMDb requests in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Default number of histogram buckets over the 0–10 rating range.
pub const DEFAULT_HISTOGRAM_BINS: usize = 10;
