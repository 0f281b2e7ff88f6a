use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use moviedb_core::{AppConfig, SortOrder};
use moviedb_omdb::OmdbClient;
use moviedb_service::{AddOutcome, NewMovie};

use super::{open_catalog, render};
use crate::AddArgs;

pub(crate) fn run_list(config: &AppConfig) -> Result<()> {
    let movies = open_catalog(config)?.list_movies()?;
    render::write_numbered(&mut io::stdout().lock(), &movies)?;
    Ok(())
}

pub(crate) async fn run_add(config: &AppConfig, args: AddArgs) -> Result<()> {
    let catalog = open_catalog(config)?;
    let outcome = match args.rating {
        Some(rating) => catalog.add_movie(NewMovie {
            title: args.title,
            rating,
            year: args.year,
            poster_url: args.poster,
            external_id: args.imdb_id,
        })?,
        None => {
            let omdb = OmdbClient::from_config(config)
                .context("OMDb lookup needs OMDB_API_KEY; pass --rating to add manually")?;
            catalog.add_from_lookup(&omdb, &args.title, None).await?
        },
    };

    match outcome {
        AddOutcome::Added(movie) => {
            tracing::info!(title = %movie.title, "movie added");
            println!("Added {movie}");
            Ok(())
        },
        AddOutcome::Duplicate(movie) => bail!("'{}' is already in the catalog", movie.title),
    }
}

pub(crate) fn run_delete(config: &AppConfig, title: &str) -> Result<()> {
    if !open_catalog(config)?.delete_movie(title)? {
        bail!("'{title}' is not in the catalog");
    }
    println!("'{title}' has been deleted");
    Ok(())
}

pub(crate) fn run_update(
    config: &AppConfig,
    title: &str,
    rating: f64,
    poster: Option<&str>,
) -> Result<()> {
    if !open_catalog(config)?.update_movie(title, rating, poster)? {
        bail!("'{title}' is not in the catalog");
    }
    println!("Updated '{title}' with new rating: {rating:.1}");
    Ok(())
}

pub(crate) fn run_stats(config: &AppConfig) -> Result<()> {
    let stats = open_catalog(config)?.stats()?;
    render::write_stats(&mut io::stdout().lock(), stats.as_ref())?;
    Ok(())
}

pub(crate) fn run_random(config: &AppConfig) -> Result<()> {
    let movie = open_catalog(config)?.random_movie(&mut rand::thread_rng())?;
    render::write_random(&mut io::stdout().lock(), movie.as_ref())?;
    Ok(())
}

pub(crate) fn run_search(config: &AppConfig, term: &str) -> Result<()> {
    let found = open_catalog(config)?.search(term)?;
    render::write_movies(&mut io::stdout().lock(), &found, "No movies found with that title.")?;
    Ok(())
}

pub(crate) fn run_sort(config: &AppConfig, order: SortOrder) -> Result<()> {
    let movies = open_catalog(config)?.sorted_by_rating(order)?;
    render::write_movies(&mut io::stdout().lock(), &movies, "No movies to sort.")?;
    Ok(())
}

pub(crate) fn run_histogram(config: &AppConfig, bins: usize) -> Result<()> {
    let histogram = open_catalog(config)?.histogram(bins)?;
    let mut out = io::stdout().lock();
    render::write_histogram(&mut out, &histogram)?;
    out.flush()?;
    Ok(())
}
