use std::sync::Arc;

use anyhow::Result;
use moviedb_core::AppConfig;
use moviedb_http::{AppState, create_router};

use super::open_catalog;

pub(crate) async fn run(config: &AppConfig, port: u16, host: String) -> Result<()> {
    let catalog = Arc::new(open_catalog(config)?);
    let state = Arc::new(AppState::new(catalog));

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!(source = %config.data_source, "Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
