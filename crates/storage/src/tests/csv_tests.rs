#![expect(clippy::unwrap_used, reason = "test code")]

use moviedb_core::{DuplicatePolicy, MovieRecord};

use super::{create_test_movie, read_file};
use crate::{CsvStorage, MovieStore};

fn csv_storage() -> (CsvStorage, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let storage = CsvStorage::new(dir.path().join("data").join("movies.csv")).unwrap();
    (storage, dir)
}

#[test]
fn test_new_creates_header_only_file() {
    let (storage, _dir) = csv_storage();
    assert_eq!(read_file(storage.path()), "title,rating,year,posterUrl,externalId\n");
}

#[test]
fn test_new_keeps_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movies.csv");
    std::fs::write(&path, "title,rating,year\nHeat,8.3,1995\n").unwrap();

    let storage = CsvStorage::new(&path).unwrap();
    assert_eq!(storage.list().unwrap()["Heat"].year, Some(1995));
}

#[test]
fn test_la_haine_lifecycle() {
    let (storage, _dir) = csv_storage();

    let movie = MovieRecord::new("La haine", 8.1).with_year(Some(1995)).with_poster("http://poster");
    assert!(storage.add(&movie).unwrap());
    let listed = storage.list().unwrap();
    assert_eq!(listed.len(), 1);
    let entry = &listed["La haine"];
    assert!((entry.rating - 8.1).abs() < f64::EPSILON);
    assert_eq!(entry.year, Some(1995));
    assert_eq!(entry.poster_url, "http://poster");

    assert!(storage.update("La haine", 9.0, "http://new").unwrap());
    let entry = &storage.list().unwrap()["La haine"];
    assert!((entry.rating - 9.0).abs() < f64::EPSILON);
    assert_eq!(entry.poster_url, "http://new");
    assert_eq!(entry.year, Some(1995));

    assert!(storage.delete("La haine").unwrap());
    assert!(storage.list().unwrap().is_empty());
    assert_eq!(read_file(storage.path()), "title,rating,year,posterUrl,externalId\n");
}

#[test]
fn test_quoting_survives_round_trip() {
    let (storage, _dir) = csv_storage();
    let tricky = [
        "Crouching Tiger, Hidden Dragon",
        "The \"Great\" Escape",
        "Line\nBreak",
        "Trailing, \"both\"\r\n",
    ];
    for title in tricky {
        assert!(storage.add(&create_test_movie(title, 7.0, 2000)).unwrap());
    }
    // Rewrite path goes through the full encoder.
    assert!(storage.update(tricky[0], 7.5, "http://a,b").unwrap());

    let listed = storage.list().unwrap();
    assert_eq!(listed.len(), tricky.len());
    for title in tricky {
        assert!(listed.contains_key(title), "missing {title:?}");
    }
    assert_eq!(listed[tricky[0]].poster_url, "http://a,b");
}

#[test]
fn test_reject_on_same_external_id() {
    let (storage, _dir) = csv_storage();
    let original = create_test_movie("Inception", 8.8, 2010).with_external_id(Some("tt1375666".into()));
    assert!(storage.add(&original).unwrap());

    let renamed = create_test_movie("Inception (2010)", 8.8, 2010)
        .with_external_id(Some("tt1375666".into()));
    assert!(!storage.add(&renamed).unwrap());
    assert_eq!(storage.list().unwrap().len(), 1);
}

#[test]
fn test_records_without_external_id_do_not_collide() {
    let (storage, _dir) = csv_storage();
    assert!(storage.add(&create_test_movie("Heat", 8.3, 1995)).unwrap());
    assert!(storage.add(&create_test_movie("Ronin", 7.2, 1998)).unwrap());
    assert_eq!(storage.list().unwrap().len(), 2);
}

#[test]
fn test_append_after_missing_trailing_newline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movies.csv");
    std::fs::write(&path, "title,rating,year,posterUrl,externalId\nHeat,8.3,1995,,").unwrap();

    let storage = CsvStorage::new(&path).unwrap();
    assert!(storage.add(&create_test_movie("Ronin", 7.2, 1998)).unwrap());

    let listed = storage.list().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed["Heat"].external_id, None);
    assert_eq!(listed["Ronin"].year, Some(1998));
}

#[test]
fn test_append_to_empty_file_writes_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movies.csv");
    let storage = CsvStorage::new(&path).unwrap();
    std::fs::write(&path, "").unwrap();

    assert!(storage.add(&create_test_movie("Heat", 8.3, 1995)).unwrap());
    assert!(read_file(&path).starts_with("title,rating,year,posterUrl,externalId\n"));
    assert_eq!(storage.list().unwrap().len(), 1);
}

#[test]
fn test_load_reports_bad_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movies.csv");
    std::fs::write(
        &path,
        "title,rating,year,posterUrl,externalId\n,1.0,2000,,\nHeat,oops,1995,,\nRonin,7.2,1998,,\n",
    )
    .unwrap();

    let storage = CsvStorage::new(&path).unwrap();
    let loaded = storage.load().unwrap();
    assert_eq!(loaded.movies.len(), 2);
    assert_eq!(loaded.warnings.len(), 2);
}

#[test]
fn test_upsert_override_replaces_row() {
    let (storage, _dir) = csv_storage();
    let storage = storage.with_duplicate_policy(DuplicatePolicy::Upsert);

    assert!(storage.add(&create_test_movie("Heat", 8.3, 1995)).unwrap());
    assert!(storage.add(&create_test_movie("Heat", 9.1, 1995)).unwrap());

    let listed = storage.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert!((listed["Heat"].rating - 9.1).abs() < f64::EPSILON);
    assert_eq!(read_file(storage.path()).lines().count(), 2);
}

#[test]
fn test_rewrite_leaves_no_temp_file() {
    let (storage, dir) = csv_storage();
    storage.add(&create_test_movie("Heat", 8.3, 1995)).unwrap();
    storage.delete("Heat").unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(dir.path().join("data"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("movies.csv")]);
}

#[test]
fn test_add_to_reordered_header_rewrites_canonically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movies.csv");
    std::fs::write(&path, "title,year,rating,posterUrl,externalId\nHeat,1995,8.3,,\n").unwrap();

    let storage = CsvStorage::new(&path).unwrap();
    assert!(storage.add(&create_test_movie("Ronin", 7.2, 1998)).unwrap());

    let listed = storage.list().unwrap();
    assert_eq!(listed["Ronin"].year, Some(1998));
    assert!((listed["Ronin"].rating - 7.2).abs() < f64::EPSILON);
    assert_eq!(listed["Heat"].year, Some(1995));
    assert!(read_file(&path).starts_with("title,rating,year,posterUrl,externalId\n"));
}

#[test]
fn test_add_to_header_without_title_is_listed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movies.csv");
    std::fs::write(&path, "name,score\nAmelie,8.3\n").unwrap();

    let storage = CsvStorage::new(&path).unwrap();
    assert!(storage.add(&create_test_movie("Heat", 8.3, 1995)).unwrap());

    let listed = storage.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed.contains_key("Heat"));
}

#[test]
fn test_legacy_header_keeps_external_id_identity() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movies.csv");
    std::fs::write(&path, "title,rating,year,poster_url\nHeat,8.3,1995,http://p\n").unwrap();
    let storage = CsvStorage::new(&path).unwrap();

    let first = MovieRecord::new("Inception", 8.8).with_external_id(Some("tt1375666".into()));
    let second =
        MovieRecord::new("Inception (2010)", 8.8).with_external_id(Some("tt1375666".into()));
    assert!(storage.add(&first).unwrap());
    assert!(!storage.add(&second).unwrap());

    let listed = storage.list().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed["Inception"].external_id.as_deref(), Some("tt1375666"));
    assert_eq!(listed["Heat"].poster_url, "http://p");
}

#[test]
fn test_add_to_blank_file_writes_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movies.csv");
    let storage = CsvStorage::new(&path).unwrap();
    std::fs::write(&path, "\n\n").unwrap();

    assert!(storage.add(&create_test_movie("Heat", 8.3, 1995)).unwrap());
    assert_eq!(storage.list().unwrap().len(), 1);
    assert!(read_file(&path).starts_with("title,rating,year,posterUrl,externalId\n"));
}
