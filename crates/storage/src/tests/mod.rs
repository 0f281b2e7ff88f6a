//! Test utilities and module declarations for storage tests.

use std::path::Path;

use moviedb_core::{BackendKind, MovieRecord};
use tempfile::TempDir;

use crate::StorageBackend;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_backend(kind: BackendKind) -> (StorageBackend, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(file_name(kind));
    let backend = StorageBackend::open(kind, &path, None).unwrap();
    (backend, temp_dir)
}

pub const fn file_name(kind: BackendKind) -> &'static str {
    match kind {
        BackendKind::Csv => "movies.csv",
        BackendKind::Json => "movies.json",
    }
}

pub fn create_test_movie(title: &str, rating: f64, year: i32) -> MovieRecord {
    MovieRecord::new(title, rating)
        .with_year(Some(year))
        .with_poster(format!("http://posters.example/{}.jpg", title.replace(' ', "_")))
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn read_file(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

pub const BOTH: [BackendKind; 2] = [BackendKind::Csv, BackendKind::Json];

mod csv_tests;
