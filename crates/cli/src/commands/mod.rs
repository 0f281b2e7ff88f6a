use std::sync::Arc;

use anyhow::{Context, Result};
use moviedb_core::AppConfig;
use moviedb_service::CatalogService;
use moviedb_storage::StorageBackend;

pub(crate) mod catalog;
pub(crate) mod menu;
pub(crate) mod render;
pub(crate) mod serve;
pub(crate) mod source;
pub(crate) mod website;

/// Opens the configured backend. Corrupt content is reported as warnings on
/// stderr by the storage layer.
pub(crate) fn open_catalog(config: &AppConfig) -> Result<CatalogService> {
    let path = config.data_path();
    let backend = StorageBackend::from_config(config)
        .with_context(|| format!("failed to open catalog at {}", path.display()))?;
    Ok(CatalogService::new(Arc::new(backend)))
}
