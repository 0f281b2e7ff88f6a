//! Storage layer for moviedb
//!
//! Two interchangeable whole-file backends behind the [`MovieStore`] trait:
//! [`CsvStorage`] (delimited text) and [`JsonStorage`] (one JSON document).
//! Every mutation other than a plain append rewrites the file through a
//! temp-file-and-rename step.

mod backend;
mod csv_storage;
mod error;
mod fs_util;
mod json_storage;
#[cfg(test)]
mod tests;
mod traits;

pub use backend::StorageBackend;
pub use csv_storage::CsvStorage;
pub use error::StorageError;
pub use json_storage::JsonStorage;
pub use traits::{LoadedCatalog, MovieStore};
