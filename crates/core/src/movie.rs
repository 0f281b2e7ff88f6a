//! Movie record model.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{NO_POSTER, UNKNOWN_YEAR};

/// The full set of persisted movies, keyed by exact title.
pub type Catalog = BTreeMap<String, MovieRecord>;

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    /// Identity key. Compared case-sensitively, never normalized.
    pub title: String,
    /// Release year, `None` when unknown.
    pub year: Option<i32>,
    pub rating: f64,
    /// Poster URL or [`NO_POSTER`].
    pub poster_url: String,
    /// IMDb identifier, present for records enriched through a lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl MovieRecord {
    /// Creates a record with an unknown year and no poster.
    #[must_use]
    pub fn new(title: impl Into<String>, rating: f64) -> Self {
        Self {
            title: title.into(),
            year: None,
            rating,
            poster_url: NO_POSTER.to_owned(),
            external_id: None,
        }
    }

    #[must_use]
    pub const fn with_year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }

    /// Sets the poster URL; blank values fall back to [`NO_POSTER`].
    #[must_use]
    pub fn with_poster(mut self, poster_url: impl Into<String>) -> Self {
        self.poster_url = normalize_poster(poster_url.into());
        self
    }

    #[must_use]
    pub fn with_external_id(mut self, external_id: Option<String>) -> Self {
        self.external_id = external_id.filter(|id| !id.trim().is_empty());
        self
    }

    /// Year as shown to users and written to CSV cells.
    #[must_use]
    pub fn year_display(&self) -> String {
        self.year.map_or_else(|| UNKNOWN_YEAR.to_owned(), |y| y.to_string())
    }

    #[must_use]
    pub fn has_poster(&self) -> bool {
        self.poster_url != NO_POSTER
    }

    /// IMDb page for enriched records.
    #[must_use]
    pub fn imdb_url(&self) -> Option<String> {
        self.external_id.as_ref().map(|id| format!("https://www.imdb.com/title/{id}/"))
    }
}

impl fmt::Display for MovieRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - Rating: {:.1}", self.title, self.year_display(), self.rating)
    }
}

/// Maps blank poster values to [`NO_POSTER`].
#[must_use]
pub fn normalize_poster(poster_url: String) -> String {
    let trimmed = poster_url.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n/a") {
        NO_POSTER.to_owned()
    } else if trimmed.len() == poster_url.len() {
        poster_url
    } else {
        trimmed.to_owned()
    }
}

/// Parses a release year, keeping only the leading year of ranges like `2010–2012`.
///
/// Returns `None` for `unknown`, `N/A`, blanks and anything without leading digits.
#[must_use]
pub fn parse_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    let end = trimmed.find(|c: char| !c.is_ascii_digit()).unwrap_or(trimmed.len());
    trimmed.get(..end).filter(|digits| !digits.is_empty()).and_then(|d| d.parse().ok())
}

/// Parses a rating cell. `N/A` and garbage yield `None`.
#[must_use]
pub fn parse_rating(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|r| r.is_finite())
}
