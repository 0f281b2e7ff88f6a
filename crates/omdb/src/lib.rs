//! OMDb lookup client for moviedb
//!
//! Given a free-text title, fetches year, rating, poster and IMDb id. Every
//! failure is an [`OmdbError`]; callers treat all of them as "not found".

mod client;
pub mod error;
mod types;

pub use client::{MAX_RETRIES, OmdbClient, truncate};
pub use error::OmdbError;
pub use types::MovieLookup;
