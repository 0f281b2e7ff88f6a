use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use moviedb_core::{MovieRecord, SortOrder};
use moviedb_service::RatingStats;

use crate::AppState;
use crate::api_error::ApiError;
use crate::blocking::blocking_json;
use crate::query_types::MoviesQuery;

/// `GET /api/movies[?q=term][&order=asc|desc]`
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MoviesQuery>,
) -> Result<Json<Vec<MovieRecord>>, ApiError> {
    let order = query.sort_order().map_err(ApiError::BadRequest)?;
    let catalog = Arc::clone(&state.catalog);
    blocking_json(move || match (query.q.as_deref(), order) {
        (Some(term), None) => catalog.search(term),
        (Some(term), Some(order)) => {
            let mut movies = catalog.search(term)?;
            movies.sort_by(|a, b| match order {
                SortOrder::Ascending => a.rating.total_cmp(&b.rating),
                SortOrder::Descending => b.rating.total_cmp(&a.rating),
            });
            Ok(movies)
        },
        (None, Some(order)) => catalog.sorted_by_rating(order),
        (None, None) => catalog.list_movies(),
    })
    .await
}

/// `GET /api/stats`; `null` for an empty catalog.
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Option<RatingStats>>, ApiError> {
    let catalog = Arc::clone(&state.catalog);
    blocking_json(move || catalog.stats()).await
}
