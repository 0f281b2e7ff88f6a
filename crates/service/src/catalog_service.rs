use std::cmp::Ordering;
use std::sync::Arc;

use moviedb_core::constants::{MAX_RATING, MIN_RATING};
use moviedb_core::{MovieRecord, SortOrder};
use moviedb_omdb::OmdbClient;
use moviedb_storage::MovieStore;
use rand::Rng;
use rand::seq::IteratorRandom;

use crate::error::ServiceError;
use crate::histogram::Histogram;
use crate::stats::RatingStats;

/// User-supplied fields for a new movie.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub rating: f64,
    pub year: Option<i32>,
    pub poster_url: Option<String>,
    pub external_id: Option<String>,
}

impl NewMovie {
    #[must_use]
    pub fn new(title: impl Into<String>, rating: f64) -> Self {
        Self { title: title.into(), rating, ..Self::default() }
    }

    fn into_record(self) -> MovieRecord {
        let record = MovieRecord::new(self.title.trim(), self.rating)
            .with_year(self.year)
            .with_external_id(self.external_id);
        match self.poster_url {
            Some(poster) => record.with_poster(poster),
            None => record,
        }
    }
}

/// What happened to an add request.
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    Added(MovieRecord),
    /// The backend's duplicate policy refused it.
    Duplicate(MovieRecord),
}

impl AddOutcome {
    #[must_use]
    pub const fn is_added(&self) -> bool {
        matches!(self, Self::Added(_))
    }

    #[must_use]
    pub const fn movie(&self) -> &MovieRecord {
        match self {
            Self::Added(movie) | Self::Duplicate(movie) => movie,
        }
    }
}

/// Catalog operations on top of whichever backend is active.
pub struct CatalogService {
    storage: Arc<dyn MovieStore>,
}

impl CatalogService {
    #[must_use]
    pub fn new(storage: Arc<dyn MovieStore>) -> Self {
        Self { storage }
    }

    #[must_use]
    pub fn storage(&self) -> &dyn MovieStore {
        self.storage.as_ref()
    }

    /// All movies, newest first. Unknown years sort ahead of every known year,
    /// ties break on title.
    pub fn list_movies(&self) -> Result<Vec<MovieRecord>, ServiceError> {
        let mut movies: Vec<MovieRecord> = self.storage.list()?.into_values().collect();
        movies.sort_by(|a, b| by_year_desc(a, b).then_with(|| a.title.cmp(&b.title)));
        Ok(movies)
    }

    pub fn add_movie(&self, movie: NewMovie) -> Result<AddOutcome, ServiceError> {
        validate_title(&movie.title)?;
        validate_rating(movie.rating)?;
        validate_year(movie.year)?;
        self.store(movie.into_record())
    }

    /// Looks `title` up on OMDb and adds the result. `rating` replaces OMDb's
    /// rating when given.
    pub async fn add_from_lookup(
        &self,
        omdb: &OmdbClient,
        title: &str,
        rating: Option<f64>,
    ) -> Result<AddOutcome, ServiceError> {
        validate_title(title)?;
        if let Some(rating) = rating {
            validate_rating(rating)?;
        }

        let mut record = omdb.lookup(title).await?.into_record();
        if let Some(rating) = rating {
            record.rating = rating;
        }
        self.store(record)
    }

    fn store(&self, record: MovieRecord) -> Result<AddOutcome, ServiceError> {
        if self.storage.add(&record)? {
            Ok(AddOutcome::Added(record))
        } else {
            Ok(AddOutcome::Duplicate(record))
        }
    }

    pub fn delete_movie(&self, title: &str) -> Result<bool, ServiceError> {
        Ok(self.storage.delete(title)?)
    }

    /// Sets a new rating and, when given, a new poster. Returns `false` if the
    /// title is unknown.
    pub fn update_movie(
        &self,
        title: &str,
        rating: f64,
        poster_url: Option<&str>,
    ) -> Result<bool, ServiceError> {
        validate_rating(rating)?;
        let poster = match poster_url {
            Some(poster) => poster.to_owned(),
            None => match self.storage.list()?.remove(title) {
                Some(existing) => existing.poster_url,
                None => return Ok(false),
            },
        };
        Ok(self.storage.update(title, rating, &poster)?)
    }

    pub fn stats(&self) -> Result<Option<RatingStats>, ServiceError> {
        let movies: Vec<MovieRecord> = self.storage.list()?.into_values().collect();
        Ok(RatingStats::compute(&movies))
    }

    pub fn random_movie<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Option<MovieRecord>, ServiceError> {
        Ok(self.storage.list()?.into_values().choose(rng))
    }

    /// Case-insensitive substring match on titles, alphabetical.
    pub fn search(&self, term: &str) -> Result<Vec<MovieRecord>, ServiceError> {
        let needle = term.trim().to_lowercase();
        Ok(self
            .storage
            .list()?
            .into_values()
            .filter(|movie| movie.title.to_lowercase().contains(&needle))
            .collect())
    }

    pub fn sorted_by_rating(&self, order: SortOrder) -> Result<Vec<MovieRecord>, ServiceError> {
        let mut movies: Vec<MovieRecord> = self.storage.list()?.into_values().collect();
        movies.sort_by(|a, b| {
            let by_rating = a.rating.total_cmp(&b.rating);
            let by_rating = match order {
                SortOrder::Ascending => by_rating,
                SortOrder::Descending => by_rating.reverse(),
            };
            by_rating.then_with(|| a.title.cmp(&b.title))
        });
        Ok(movies)
    }

    pub fn histogram(&self, bins: usize) -> Result<Histogram, ServiceError> {
        if bins == 0 {
            return Err(ServiceError::InvalidInput("histogram needs at least one bin".to_owned()));
        }
        let ratings: Vec<f64> = self.storage.list()?.values().map(|m| m.rating).collect();
        Ok(Histogram::from_ratings(&ratings, bins))
    }
}

fn by_year_desc(a: &MovieRecord, b: &MovieRecord) -> Ordering {
    match (a.year, b.year) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => y.cmp(&x),
    }
}

fn validate_title(title: &str) -> Result<(), ServiceError> {
    if title.trim().is_empty() {
        return Err(ServiceError::InvalidInput("title must not be empty".to_owned()));
    }
    Ok(())
}

/// Years are stored as plain digits, so only positive years round-trip.
fn validate_year(year: Option<i32>) -> Result<(), ServiceError> {
    match year {
        Some(year) if year < 1 => {
            Err(ServiceError::InvalidInput(format!("year must be positive, got {year}")))
        },
        _ => Ok(()),
    }
}

/// Ratings must be finite and within 1–10.
pub fn validate_rating(rating: f64) -> Result<(), ServiceError> {
    if rating.is_finite() && (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(ServiceError::InvalidInput(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )))
    }
}
