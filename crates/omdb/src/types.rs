//! OMDb wire format.

use moviedb_core::constants::NO_POSTER;
use moviedb_core::{MovieRecord, normalize_poster, parse_rating, parse_year};
use serde::Deserialize;

/// Raw `?t=` response. Every field is optional because failures carry only
/// `Response` and `Error`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OmdbResponse {
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
}

impl OmdbResponse {
    pub(crate) fn is_success(&self) -> bool {
        self.response.as_deref().is_some_and(|r| r.eq_ignore_ascii_case("true"))
    }
}

/// Metadata found for a title.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieLookup {
    /// Canonical title as OMDb spells it.
    pub title: String,
    pub year: Option<i32>,
    /// `None` when OMDb reports `N/A`.
    pub imdb_rating: Option<f64>,
    pub poster_url: String,
    pub imdb_id: Option<String>,
}

impl MovieLookup {
    pub(crate) fn from_response(response: OmdbResponse, requested: &str) -> Self {
        Self {
            title: response
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| requested.to_owned()),
            year: response.year.as_deref().and_then(parse_year),
            imdb_rating: response.imdb_rating.as_deref().and_then(parse_rating),
            poster_url: response.poster.map_or_else(|| NO_POSTER.to_owned(), normalize_poster),
            imdb_id: response.imdb_id.filter(|id| !id.trim().is_empty() && id != "N/A"),
        }
    }

    /// Rating to store: OMDb's rating, or `0.0` when it has none.
    #[must_use]
    pub fn rating_or_default(&self) -> f64 {
        self.imdb_rating.unwrap_or(0.0)
    }

    /// Converts into a catalog record using the OMDb rating.
    #[must_use]
    pub fn into_record(self) -> MovieRecord {
        let rating = self.rating_or_default();
        MovieRecord::new(self.title, rating)
            .with_year(self.year)
            .with_poster(self.poster_url)
            .with_external_id(self.imdb_id)
    }
}
