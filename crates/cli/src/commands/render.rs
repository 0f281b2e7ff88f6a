//! Text output shared by the one-shot commands and the interactive menu.

use std::io::{self, Write};

use moviedb_core::MovieRecord;
use moviedb_service::{Histogram, RatingStats};

const HISTOGRAM_WIDTH: usize = 40;

/// Numbered listing; the numbers are what the menu asks for.
pub(crate) fn write_numbered(out: &mut impl Write, movies: &[MovieRecord]) -> io::Result<()> {
    if movies.is_empty() {
        return writeln!(out, "No movies found.");
    }
    writeln!(out, "Movies in Database:")?;
    for (index, movie) in movies.iter().enumerate() {
        writeln!(
            out,
            "{}. {} ({}) Rating: {:.1}",
            index + 1,
            movie.title,
            movie.year_display(),
            movie.rating
        )?;
    }
    Ok(())
}

pub(crate) fn write_movies(
    out: &mut impl Write,
    movies: &[MovieRecord],
    empty_message: &str,
) -> io::Result<()> {
    if movies.is_empty() {
        return writeln!(out, "{empty_message}");
    }
    for movie in movies {
        writeln!(out, "{movie}")?;
    }
    Ok(())
}

pub(crate) fn write_stats(out: &mut impl Write, stats: Option<&RatingStats>) -> io::Result<()> {
    let Some(stats) = stats else {
        return writeln!(out, "No movies in the database to analyze.");
    };
    writeln!(out, "Statistics:")?;
    writeln!(out, "Average rating: {:.2}", stats.average)?;
    writeln!(out, "Median rating: {:.2}", stats.median)?;
    writeln!(
        out,
        "Best movie(s): {} with a rating of {:.1}",
        stats.best.join(", "),
        stats.best_rating
    )?;
    writeln!(
        out,
        "Worst movie(s): {} with a rating of {:.1}",
        stats.worst.join(", "),
        stats.worst_rating
    )
}

pub(crate) fn write_random(out: &mut impl Write, movie: Option<&MovieRecord>) -> io::Result<()> {
    match movie {
        Some(movie) => writeln!(out, "Random Movie: {movie}"),
        None => writeln!(out, "No movies available."),
    }
}

pub(crate) fn write_histogram(out: &mut impl Write, histogram: &Histogram) -> io::Result<()> {
    if histogram.total() == 0 {
        return writeln!(out, "No movies to display.");
    }
    writeln!(out, "Movie Ratings Histogram")?;
    write!(out, "{}", histogram.render(HISTOGRAM_WIDTH))
}
