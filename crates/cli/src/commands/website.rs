use std::path::Path;

use anyhow::{Context, Result};
use moviedb_core::AppConfig;
use moviedb_service::website::{DEFAULT_PAGE_TITLE, DEFAULT_TEMPLATE, generate_website};

use super::open_catalog;

pub(crate) fn run(
    config: &AppConfig,
    output: &Path,
    template: Option<&Path>,
    title: Option<String>,
) -> Result<()> {
    let template = match template {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read template {}", path.display()))?,
        None => DEFAULT_TEMPLATE.to_owned(),
    };
    let title = title.unwrap_or_else(|| DEFAULT_PAGE_TITLE.to_owned());
    let movies = open_catalog(config)?.list_movies()?;
    generate_website(output, &template, &title, &movies)?;
    println!("Website was generated successfully: {}", output.display());
    Ok(())
}
