#![expect(clippy::unwrap_used, reason = "test code")]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use moviedb_core::BackendKind;
use moviedb_service::{CatalogService, NewMovie};
use moviedb_storage::{MovieStore, StorageBackend};
use tempfile::TempDir;
use tower::ServiceExt;

use crate::{AppState, create_router};

fn create_test_app(movies: &[(&str, f64, Option<i32>)]) -> (Router, TempDir) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("movies.json");
    let backend: Arc<dyn MovieStore> =
        Arc::new(StorageBackend::open(BackendKind::Json, &path, None).unwrap());
    let catalog = CatalogService::new(backend);
    for &(title, rating, year) in movies {
        catalog.add_movie(NewMovie { year, ..NewMovie::new(title, rating) }).unwrap();
    }
    let state = Arc::new(AppState::new(Arc::new(catalog)));
    (create_router(state), dir)
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response =
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn titles(body: &str) -> Vec<String> {
    let movies: Vec<serde_json::Value> = serde_json::from_str(body).unwrap();
    movies.iter().map(|m| m["title"].as_str().unwrap().to_owned()).collect()
}

#[tokio::test]
async fn test_health() {
    let (app, _dir) = create_test_app(&[]);
    assert_eq!(get(app, "/health").await, (StatusCode::OK, "ok".to_owned()));
}

#[tokio::test]
async fn test_page_renders_escaped_titles() {
    let (app, _dir) = create_test_app(&[("Tom & Jerry", 7.0, Some(1992))]);
    let (status, body) = get(app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Tom &amp; Jerry"));
    assert!(body.contains("My Movie App"));
    assert!(!body.contains("__TEMPLATE_"));
}

#[tokio::test]
async fn test_page_for_empty_catalog() {
    let (app, _dir) = create_test_app(&[]);
    let (_, body) = get(app, "/").await;
    assert!(body.contains("No movies in the catalog yet."));
}

#[tokio::test]
async fn test_api_movies_newest_first() {
    let (app, _dir) =
        create_test_app(&[("Scarface", 8.3, Some(1983)), ("Inception", 8.8, Some(2010))]);
    let (status, body) = get(app, "/api/movies").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["Inception", "Scarface"]);
    assert!(body.contains("\"posterUrl\""));
}

#[tokio::test]
async fn test_api_movies_search_and_order() {
    let movies = [("Heat", 8.3, None), ("Heathers", 7.1, None), ("Ronin", 7.2, None)];

    let (app, _dir) = create_test_app(&movies);
    let (_, body) = get(app, "/api/movies?q=HEAT&order=asc").await;
    assert_eq!(titles(&body), vec!["Heathers", "Heat"]);

    let (app, _dir) = create_test_app(&movies);
    let (_, body) = get(app, "/api/movies?order=desc").await;
    assert_eq!(titles(&body), vec!["Heat", "Ronin", "Heathers"]);
}

#[tokio::test]
async fn test_api_movies_rejects_bad_order() {
    let (app, _dir) = create_test_app(&[]);
    let (status, body) = get(app, "/api/movies?order=sideways").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("\"error\""));
}

#[tokio::test]
async fn test_api_stats() {
    let (app, _dir) = create_test_app(&[]);
    assert_eq!(get(app, "/api/stats").await.1, "null");

    let (app, _dir) = create_test_app(&[("Heat", 8.0, None), ("Ronin", 6.0, None)]);
    let stats: serde_json::Value = serde_json::from_str(&get(app, "/api/stats").await.1).unwrap();
    assert_eq!(stats["count"], 2);
    assert_eq!(stats["best"][0], "Heat");
    assert_eq!(stats["worstRating"], 6.0);
}
