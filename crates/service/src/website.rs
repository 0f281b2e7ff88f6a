//! Static page rendering: a template with two placeholders and the movie grid.

use std::fmt::Write as _;
use std::path::Path;

use moviedb_core::MovieRecord;

use crate::error::ServiceError;

/// Template bundled with the binary.
pub const DEFAULT_TEMPLATE: &str = include_str!("index_template.html");
pub const TITLE_PLACEHOLDER: &str = "__TEMPLATE_TITLE__";
pub const GRID_PLACEHOLDER: &str = "__TEMPLATE_MOVIE_GRID__";
pub const DEFAULT_PAGE_TITLE: &str = "My Movie App";

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// One `<li>` per movie, in the given order.
#[must_use]
pub fn render_movie_grid(movies: &[MovieRecord]) -> String {
    if movies.is_empty() {
        return "        <li class=\"empty\">No movies in the catalog yet.</li>\n".to_owned();
    }

    let mut grid = String::new();
    for movie in movies {
        let title = escape_html(&movie.title);
        let poster = if movie.has_poster() {
            format!(
                "<img class=\"movie-poster\" src=\"{}\" title=\"{title}\" alt=\"{title}\"/>",
                escape_html(&movie.poster_url)
            )
        } else {
            "<div class=\"movie-poster placeholder\">No poster</div>".to_owned()
        };
        let heading = match movie.imdb_url() {
            Some(url) => format!("<a href=\"{}\" target=\"_blank\">{title}</a>", escape_html(&url)),
            None => title.clone(),
        };
        let _ = write!(
            grid,
            "        <li>\n\
             \x20           <div class=\"movie\">\n\
             \x20               {poster}\n\
             \x20               <div class=\"movie-title\">{heading}</div>\n\
             \x20               <div class=\"movie-year\">{}</div>\n\
             \x20               <div class=\"movie-rating\">Rating: {:.1}</div>\n\
             \x20           </div>\n\
             \x20       </li>\n",
            escape_html(&movie.year_display()),
            movie.rating,
        );
    }
    grid
}

/// Fills both placeholders of `template`.
#[must_use]
pub fn render_page(template: &str, page_title: &str, movies: &[MovieRecord]) -> String {
    template
        .replace(TITLE_PLACEHOLDER, &escape_html(page_title))
        .replace(GRID_PLACEHOLDER, &render_movie_grid(movies))
}

/// Renders the page and writes it to `output`, creating parent directories.
///
/// # Errors
/// Returns [`ServiceError::Output`] if the file cannot be written.
pub fn generate_website(
    output: &Path,
    template: &str,
    page_title: &str,
    movies: &[MovieRecord],
) -> Result<(), ServiceError> {
    let page = render_page(template, page_title, movies);
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|source| ServiceError::Output { path: parent.to_path_buf(), source })?;
    }
    std::fs::write(output, page)
        .map_err(|source| ServiceError::Output { path: output.to_path_buf(), source })?;
    tracing::info!(path = %output.display(), movies = movies.len(), "website generated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_has_placeholders() {
        assert!(DEFAULT_TEMPLATE.contains(TITLE_PLACEHOLDER));
        assert!(DEFAULT_TEMPLATE.contains(GRID_PLACEHOLDER));
    }

    #[test]
    fn test_render_page_fills_placeholders() {
        let movies = vec![
            MovieRecord::new("Inception", 8.8)
                .with_year(Some(2010))
                .with_poster("http://poster/inception.jpg")
                .with_external_id(Some("tt1375666".into())),
        ];
        let page = render_page(DEFAULT_TEMPLATE, "My Movies", &movies);
        assert!(!page.contains(TITLE_PLACEHOLDER));
        assert!(!page.contains(GRID_PLACEHOLDER));
        assert!(page.contains("<title>My Movies</title>"));
        assert!(page.contains("src=\"http://poster/inception.jpg\""));
        assert!(page.contains("https://www.imdb.com/title/tt1375666/"));
        assert!(page.contains("<div class=\"movie-year\">2010</div>"));
        assert!(page.contains("Rating: 8.8"));
    }

    #[test]
    fn test_render_escapes_markup() {
        let movies = vec![MovieRecord::new("<script>alert('x')</script> & co", 5.0)];
        let grid = render_movie_grid(&movies);
        assert!(!grid.contains("<script>"));
        assert!(grid.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co"));
    }

    #[test]
    fn test_empty_catalog_renders_message() {
        let page = render_page("<ul>__TEMPLATE_MOVIE_GRID__</ul>", "t", &[]);
        assert!(page.contains("No movies in the catalog yet."));
    }

    #[test]
    fn test_unknown_year_and_missing_poster() {
        let grid = render_movie_grid(&[MovieRecord::new("Mystery", 6.0)]);
        assert!(grid.contains("movie-poster placeholder"));
        assert!(grid.contains("<div class=\"movie-year\">unknown</div>"));
    }

    #[test]
    fn test_generate_website_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("site").join("index.html");
        generate_website(&output, DEFAULT_TEMPLATE, DEFAULT_PAGE_TITLE, &[]).unwrap();
        let written = std::fs::read_to_string(output).unwrap();
        assert!(written.contains("<h1>My Movie App</h1>"));
    }
}
