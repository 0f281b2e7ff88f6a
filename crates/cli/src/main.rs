use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use moviedb_core::config::default_config_path;
use moviedb_core::constants::DEFAULT_HISTOGRAM_BINS;
use moviedb_core::{AppConfig, BackendKind, ConfigFile, SortOrder};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "moviedb")]
#[command(about = "Personal movie catalog backed by CSV or JSON", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/moviedb/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory holding movies.csv / movies.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Backend for this run only (csv|json)
    #[arg(long, global = true)]
    source: Option<BackendKind>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List movies, newest first
    List,
    /// Add a movie; looks it up on OMDb unless --rating is given
    Add(AddArgs),
    Delete {
        title: String,
    },
    /// Change a movie's rating, and optionally its poster
    Update {
        title: String,
        rating: f64,
        #[arg(long)]
        poster: Option<String>,
    },
    Stats,
    Random,
    /// Case-insensitive title search
    Search {
        term: String,
    },
    /// List movies by rating
    Sort {
        #[arg(short, long, default_value = "desc")]
        order: SortOrder,
    },
    /// Text histogram of ratings
    Histogram {
        #[arg(short, long, default_value_t = DEFAULT_HISTOGRAM_BINS)]
        bins: usize,
    },
    /// Render the catalog into a static HTML page
    GenerateWebsite {
        #[arg(short, long, default_value = "index.html")]
        output: PathBuf,
        /// Template with __TEMPLATE_TITLE__ and __TEMPLATE_MOVIE_GRID__
        #[arg(short, long)]
        template: Option<PathBuf>,
        #[arg(long)]
        title: Option<String>,
    },
    /// Serve the catalog page and JSON API
    Serve {
        #[arg(short, long, default_value = "5000")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Persist the default data source
    Source {
        kind: BackendKind,
    },
    /// Interactive menu
    Menu,
}

#[derive(Args)]
struct AddArgs {
    title: String,
    #[arg(short, long)]
    rating: Option<f64>,
    #[arg(short, long)]
    year: Option<i32>,
    #[arg(long)]
    poster: Option<String>,
    #[arg(long)]
    imdb_id: Option<String>,
}

impl Cli {
    fn resolve_config(&self, config_path: &std::path::Path) -> AppConfig {
        let mut config = AppConfig::from_env(&ConfigFile::load(config_path));
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(source) = self.source {
            config.data_source = source;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = cli.resolve_config(&config_path);
    tracing::debug!(?config, "resolved configuration");

    match cli.command {
        Commands::List => commands::catalog::run_list(&config)?,
        Commands::Add(args) => commands::catalog::run_add(&config, args).await?,
        Commands::Delete { title } => commands::catalog::run_delete(&config, &title)?,
        Commands::Update { title, rating, poster } => {
            commands::catalog::run_update(&config, &title, rating, poster.as_deref())?;
        },
        Commands::Stats => commands::catalog::run_stats(&config)?,
        Commands::Random => commands::catalog::run_random(&config)?,
        Commands::Search { term } => commands::catalog::run_search(&config, &term)?,
        Commands::Sort { order } => commands::catalog::run_sort(&config, order)?,
        Commands::Histogram { bins } => commands::catalog::run_histogram(&config, bins)?,
        Commands::GenerateWebsite { output, template, title } => {
            commands::website::run(&config, &output, template.as_deref(), title)?;
        },
        Commands::Serve { port, host } => commands::serve::run(&config, port, host).await?,
        Commands::Source { kind } => commands::source::run(&config_path, kind)?,
        Commands::Menu => commands::menu::run(&config)?,
    }

    Ok(())
}
