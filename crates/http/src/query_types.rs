//! Request query types.

use moviedb_core::SortOrder;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct MoviesQuery {
    /// Case-insensitive title filter.
    pub q: Option<String>,
    /// `asc` or `desc`; sorts by rating instead of by year.
    pub order: Option<String>,
}

impl MoviesQuery {
    pub fn sort_order(&self) -> Result<Option<SortOrder>, String> {
        self.order
            .as_deref()
            .map(|raw| raw.parse::<SortOrder>().map_err(|e| e.to_string()))
            .transpose()
    }
}
