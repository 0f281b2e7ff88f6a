//! Catalog page served at `/`, rendered from the same template as
//! `generate-website`.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use moviedb_service::website::render_page;

use crate::AppState;
use crate::api_error::ApiError;
use crate::blocking::blocking_result;

pub async fn serve_catalog_page(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let catalog = Arc::clone(&state.catalog);
    let movies = blocking_result(move || catalog.list_movies()).await?;
    let page = render_page(&state.template, &state.page_title, &movies);
    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "text/html; charset=utf-8")], Html(page))
        .into_response())
}
