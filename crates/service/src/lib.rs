//! Catalog operations for moviedb.
//!
//! Everything here talks to storage through `Arc<dyn MovieStore>` only and
//! never learns which backend is active.

mod catalog_service;
pub mod error;
pub mod histogram;
pub mod stats;
pub mod website;

pub use catalog_service::{AddOutcome, CatalogService, NewMovie, validate_rating};
pub use error::ServiceError;
pub use histogram::{Histogram, HistogramBin};
pub use stats::RatingStats;
