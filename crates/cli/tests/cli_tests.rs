#![expect(clippy::unwrap_used, reason = "test code")]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Runs `moviedb` against an isolated config file and data directory.
fn moviedb(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("moviedb").unwrap();
    cmd.arg("--config")
        .arg(dir.path().join("config.json"))
        .arg("--data-dir")
        .arg(dir.path().join("data"))
        .env_remove("MOVIEDB_DATA_SOURCE")
        .env_remove("MOVIEDB_DUPLICATE_POLICY")
        .env_remove("OMDB_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("moviedb").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Personal movie catalog"));
}

#[test]
fn test_cli_serve_help() {
    let mut cmd = Command::cargo_bin("moviedb").unwrap();
    cmd.arg("serve").arg("--help").assert().success().stdout(predicate::str::contains("port"));
}

#[test]
fn test_list_empty_catalog_creates_csv() {
    let dir = TempDir::new().unwrap();
    moviedb(&dir).arg("list").assert().success().stdout("No movies found.\n");
    let csv = std::fs::read_to_string(dir.path().join("data/movies.csv")).unwrap();
    assert_eq!(csv, "title,rating,year,posterUrl,externalId\n");
}

#[test]
fn test_add_list_update_delete() {
    let dir = TempDir::new().unwrap();
    moviedb(&dir)
        .args(["add", "La haine", "--rating", "8.1", "--year", "1995"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added La haine (1995) - Rating: 8.1"));
    moviedb(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. La haine (1995) Rating: 8.1"));

    moviedb(&dir).args(["update", "La haine", "9"]).assert().success();
    moviedb(&dir)
        .args(["search", "HAINE"])
        .assert()
        .success()
        .stdout("La haine (1995) - Rating: 9.0\n");

    moviedb(&dir).args(["delete", "La haine"]).assert().success();
    moviedb(&dir)
        .args(["delete", "La haine"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not in the catalog"));
}

#[test]
fn test_duplicate_add_fails_on_csv() {
    let dir = TempDir::new().unwrap();
    moviedb(&dir).args(["add", "Heat", "--rating", "8.3"]).assert().success();
    moviedb(&dir)
        .args(["add", "Heat", "--rating", "8.3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already in the catalog"));
}

#[test]
fn test_rating_out_of_range() {
    let dir = TempDir::new().unwrap();
    moviedb(&dir)
        .args(["add", "Heat", "--rating", "11"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("rating must be between"));
}

#[test]
fn test_lookup_without_api_key() {
    let dir = TempDir::new().unwrap();
    moviedb(&dir)
        .args(["add", "Inception"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("OMDB_API_KEY"));
}

#[test]
fn test_source_switch_persists() {
    let dir = TempDir::new().unwrap();
    moviedb(&dir).args(["source", "json"]).assert().success();
    let config = std::fs::read_to_string(dir.path().join("config.json")).unwrap();
    assert!(config.contains("\"DATA_SOURCE\": \"json\""));

    moviedb(&dir).args(["add", "Heat", "--rating", "8.3"]).assert().success();
    assert!(dir.path().join("data/movies.json").exists());
    assert!(!dir.path().join("data/movies.csv").exists());

    // JSON upserts by default
    moviedb(&dir).args(["add", "Heat", "--rating", "9"]).assert().success();
    moviedb(&dir).arg("stats").assert().success().stdout(predicate::str::contains("Average rating: 9.00"));
}

#[test]
fn test_source_flag_overrides_config() {
    let dir = TempDir::new().unwrap();
    moviedb(&dir).args(["--source", "json", "list"]).assert().success();
    assert!(!dir.path().join("data/movies.csv").exists());
    moviedb(&dir).args(["--source", "xml", "list"]).assert().failure();
}

#[test]
fn test_sort_and_histogram() {
    let dir = TempDir::new().unwrap();
    moviedb(&dir).args(["add", "Heat", "--rating", "8.3"]).assert().success();
    moviedb(&dir).args(["add", "Ronin", "--rating", "7.2"]).assert().success();

    moviedb(&dir)
        .args(["sort", "--order", "asc"])
        .assert()
        .success()
        .stdout("Ronin (unknown) - Rating: 7.2\nHeat (unknown) - Rating: 8.3\n");
    moviedb(&dir)
        .args(["histogram", "--bins", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Movie Ratings Histogram"));
    moviedb(&dir).args(["histogram", "--bins", "0"]).assert().failure();
}

#[test]
fn test_generate_website() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("site/index.html");
    moviedb(&dir).args(["add", "Tom & Jerry", "--rating", "7"]).assert().success();
    moviedb(&dir)
        .arg("generate-website")
        .arg("--output")
        .arg(&output)
        .args(["--title", "Saturday"])
        .assert()
        .success()
        .stdout(predicate::str::contains("generated successfully"));

    let page = std::fs::read_to_string(output).unwrap();
    assert!(page.contains("Tom &amp; Jerry"));
    assert!(page.contains("Saturday"));
}

#[test]
fn test_menu_exits_on_zero() {
    let dir = TempDir::new().unwrap();
    moviedb(&dir)
        .arg("menu")
        .write_stdin("1\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exiting MovieApp."));
}
