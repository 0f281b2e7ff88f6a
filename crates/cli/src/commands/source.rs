use std::path::Path;

use anyhow::{Context, Result};
use moviedb_core::BackendKind;
use moviedb_core::config::save_data_source;

pub(crate) fn run(config_path: &Path, kind: BackendKind) -> Result<()> {
    save_data_source(config_path, kind)
        .with_context(|| format!("failed to update {}", config_path.display()))?;
    println!("Data source set to {kind}");
    Ok(())
}
