use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use genius_client::Config;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "genius-lookup", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Genius client access token (overrides GENIUS_ACCESS_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// JSON file holding a captured search response, used when the live
    /// search is unavailable
    #[arg(long, global = true)]
    fallback: Option<PathBuf>,

    /// Genius API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Look up a single artist
    ///
    /// Searches Genius for the term, takes the first hit's primary artist,
    /// and fetches that artist's details. Prints the resulting record as
    /// JSON. Fields that could not be resolved are null.
    Artist {
        /// Free-text search term
        term: String,
    },
    /// Look up many artists at once
    ///
    /// Produces exactly one row per term, in the columns search_term,
    /// artist_name, artist_id and followers_count. An error column is added
    /// when any lookup failed.
    ///
    /// With --concurrency 1 rows follow input order; with more workers they
    /// follow completion order.
    Batch {
        /// Search terms
        terms: Vec<String>,

        /// Read additional terms from a file, one per line
        #[arg(long, short)]
        file: Option<PathBuf>,

        /// Concurrent lookups (default: from config)
        #[arg(long, short)]
        concurrency: Option<usize>,

        /// Print rows as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Show the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults if it does not exist
    Init,
}

impl Cli {
    /// Apply global flags on top of the loaded configuration.
    fn overlay(&self, mut config: Config) -> Config {
        if let Some(token) = &self.token {
            config = config.with_access_token(token.clone());
        }
        if let Some(path) = &self.fallback {
            config = config.with_fallback_source(path.clone());
        }
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url.clone());
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config(&cli.overlay(Config::load()?)),
            ConfigAction::Path => commands::config::show_path(),
            ConfigAction::Example => commands::config::show_example(),
            ConfigAction::Init => commands::config::init_config(),
        },
        Commands::Artist { term } => {
            let config = cli.overlay(Config::load()?);
            commands::run_artist(&config, term).await
        }
        Commands::Batch {
            terms,
            file,
            concurrency,
            json,
        } => {
            let config = cli.overlay(Config::load()?);
            let terms = commands::batch::collect_terms(terms, file.as_deref())?;
            commands::run_batch(&config, terms, *concurrency, *json).await
        }
    }
}
