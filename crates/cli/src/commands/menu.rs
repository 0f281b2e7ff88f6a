//! Interactive numbered menu over a catalog.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use moviedb_core::constants::DEFAULT_HISTOGRAM_BINS;
use moviedb_core::{AppConfig, MovieRecord, SortOrder};
use moviedb_service::{AddOutcome, CatalogService, NewMovie};

use super::{open_catalog, render};

const MENU: &str = "\
*** Welcome to My Movies Database ***
    1. List movies
    2. Add movie
    3. Delete movie
    4. Update movie
    5. Stats
    6. Random movie
    7. Search movie
    8. Sort movies
    9. Show as histogram
    0. Exit
";

pub(crate) fn run(config: &AppConfig) -> Result<()> {
    let catalog = open_catalog(config)?;
    let stdin = io::stdin();
    Menu::new(&catalog, stdin.lock(), io::stdout().lock()).run()
}

pub(crate) struct Menu<'a, R, W> {
    catalog: &'a CatalogService,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub(crate) fn new(catalog: &'a CatalogService, input: R, out: W) -> Self {
        Self { catalog, input, out }
    }

    /// Loops until `0` or end of input.
    pub(crate) fn run(&mut self) -> Result<()> {
        loop {
            write!(self.out, "{MENU}")?;
            let choice = match self.read_choice()? {
                Some(0) | None => break,
                Some(choice) => choice,
            };
            if let Err(e) = self.dispatch(choice) {
                if e.is::<io::Error>() {
                    return Err(e);
                }
                writeln!(self.out, "Error: {e:#}")?;
            }
            writeln!(self.out)?;
        }
        writeln!(self.out, "Exiting MovieApp.")?;
        Ok(())
    }

    fn dispatch(&mut self, choice: u8) -> Result<()> {
        match choice {
            1 => self.list(),
            2 => self.add(),
            3 => self.delete(),
            4 => self.update(),
            5 => self.stats(),
            6 => self.random(),
            7 => self.search(),
            8 => self.sort(),
            _ => self.histogram(),
        }
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.out, "{text}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    fn read_choice(&mut self) -> io::Result<Option<u8>> {
        let mut text = "Enter choice (0-9): ";
        loop {
            let Some(answer) = self.prompt(text)? else {
                return Ok(None);
            };
            match answer.parse::<u8>() {
                Ok(choice) if choice <= 9 => return Ok(Some(choice)),
                _ => text = "Invalid choice. Please enter a number between 0 and 9: ",
            }
        }
    }

    /// Shows the numbered list and asks for a position in it.
    fn pick(&mut self, action: &str, empty: &str) -> Result<Option<MovieRecord>> {
        let mut movies = self.catalog.list_movies()?;
        if movies.is_empty() {
            writeln!(self.out, "{empty}")?;
            return Ok(None);
        }
        render::write_numbered(&mut self.out, &movies)?;

        let question = format!("Which movie do you want to {action}? Enter a number: ");
        let Some(answer) = self.prompt(&question)? else {
            return Ok(None);
        };
        match answer.parse::<usize>() {
            Ok(n) if (1..=movies.len()).contains(&n) => Ok(Some(movies.swap_remove(n - 1))),
            _ => {
                writeln!(self.out, "Invalid input. Please enter a valid number.")?;
                Ok(None)
            },
        }
    }

    fn list(&mut self) -> Result<()> {
        let movies = self.catalog.list_movies()?;
        render::write_numbered(&mut self.out, &movies)?;
        Ok(())
    }

    fn add(&mut self) -> Result<()> {
        let Some(title) = self.prompt("Enter the movie name to add: ")? else {
            return Ok(());
        };
        let Some(rating) = self.prompt("Enter your rating between 1 and 10: ")? else {
            return Ok(());
        };
        let Ok(rating) = rating.parse::<f64>() else {
            writeln!(self.out, "Invalid rating. Please enter a numeric value.")?;
            return Ok(());
        };
        let Some(year) =
            self.prompt("Enter the movie release year (or press Enter if unknown): ")?
        else {
            return Ok(());
        };
        let year = if year.is_empty() {
            None
        } else if let Ok(year) = year.parse::<i32>() {
            Some(year)
        } else {
            writeln!(self.out, "Invalid year. Please enter a number.")?;
            return Ok(());
        };

        match self.catalog.add_movie(NewMovie { year, ..NewMovie::new(title, rating) })? {
            AddOutcome::Added(movie) => writeln!(
                self.out,
                "Added {} with rating {:.1}, released in {}, to the database.",
                movie.title,
                movie.rating,
                movie.year_display()
            )?,
            AddOutcome::Duplicate(movie) => {
                writeln!(self.out, "ERROR: {} is already in the database.", movie.title)?;
            },
        }
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        let Some(movie) = self.pick("delete", "No movies to delete.")? else {
            return Ok(());
        };
        let question = format!("Are you sure you want to delete '{}'? (y/n): ", movie.title);
        let confirmed = self.prompt(&question)?.is_some_and(|a| a.eq_ignore_ascii_case("y"));
        if confirmed && self.catalog.delete_movie(&movie.title)? {
            writeln!(self.out, "'{}' has been deleted from the list.", movie.title)?;
        } else {
            writeln!(self.out, "'{}' was not deleted.", movie.title)?;
        }
        Ok(())
    }

    fn update(&mut self) -> Result<()> {
        let Some(movie) = self.pick("update", "No movies to update.")? else {
            return Ok(());
        };
        let question = format!("Enter the new rating for '{}' (1-10): ", movie.title);
        let Some(rating) = self.prompt(&question)? else {
            return Ok(());
        };
        let Ok(rating) = rating.parse::<f64>() else {
            writeln!(self.out, "Invalid input. Please enter a numeric value.")?;
            return Ok(());
        };
        if self.catalog.update_movie(&movie.title, rating, None)? {
            writeln!(self.out, "Updated '{}' with new rating: {rating:.1}", movie.title)?;
        } else {
            writeln!(self.out, "Movie '{}' not found.", movie.title)?;
        }
        Ok(())
    }

    fn stats(&mut self) -> Result<()> {
        let stats = self.catalog.stats()?;
        render::write_stats(&mut self.out, stats.as_ref())?;
        Ok(())
    }

    fn random(&mut self) -> Result<()> {
        let movie = self.catalog.random_movie(&mut rand::thread_rng())?;
        render::write_random(&mut self.out, movie.as_ref())?;
        Ok(())
    }

    fn search(&mut self) -> Result<()> {
        let Some(term) = self.prompt("Enter the movie title or keyword to search: ")? else {
            return Ok(());
        };
        let found = self.catalog.search(&term)?;
        render::write_movies(&mut self.out, &found, "No movies found with that title.")?;
        Ok(())
    }

    fn sort(&mut self) -> Result<()> {
        let mut text = "Do you want to sort movies in ascending or descending order? (a/d): ";
        let order = loop {
            let Some(answer) = self.prompt(text)? else {
                return Ok(());
            };
            match answer.parse::<SortOrder>() {
                Ok(order) => break order,
                Err(_) => {
                    text = "Invalid input. Please enter 'a' for ascending or 'd' for descending: ";
                },
            }
        };
        let movies = self.catalog.sorted_by_rating(order)?;
        render::write_movies(&mut self.out, &movies, "No movies to sort.")?;
        Ok(())
    }

    fn histogram(&mut self) -> Result<()> {
        let histogram = self.catalog.histogram(DEFAULT_HISTOGRAM_BINS)?;
        render::write_histogram(&mut self.out, &histogram)?;
        Ok(())
    }
}
