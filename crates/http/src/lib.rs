//! HTTP view of the movie catalog.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::shadow_reuse, reason = "Shadowing for Arc clones is idiomatic")]

pub mod api_error;
mod blocking;
mod handlers;
mod query_types;
mod viewer;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use moviedb_service::CatalogService;
use moviedb_service::website::{DEFAULT_PAGE_TITLE, DEFAULT_TEMPLATE};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared state for all handlers.
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    /// Page template with the title and grid placeholders.
    pub template: String,
    pub page_title: String,
}

impl AppState {
    /// State serving the bundled template.
    #[must_use]
    pub fn new(catalog: Arc<CatalogService>) -> Self {
        Self {
            catalog,
            template: DEFAULT_TEMPLATE.to_owned(),
            page_title: DEFAULT_PAGE_TITLE.to_owned(),
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(viewer::serve_catalog_page))
        .route("/health", get(health))
        .route("/api/movies", get(handlers::movies::list_movies))
        .route("/api/stats", get(handlers::movies::get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
