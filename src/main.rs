mod config;
mod core;
mod query;
mod search;
mod sources;
mod ui;

use crate::config::{ConfigManager, PantryConfig};
use crate::core::PantryError;
use crate::query::{parse_query, parse_query_with, Delimiters};
use crate::search::SearchEngine;
use crate::sources::{CacheState, CatalogCache, CatalogSource};
use crate::ui::{log_error, log_success, print_banner, print_results};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::io::Write;
use std::path::PathBuf;
use std::process::exit;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pantry", version)]
struct Cli {
    /// Directory holding config.toml
    #[arg(long, env = "PANTRY_HOME", default_value = ".pantry", global = true)]
    home: PathBuf,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank recipes against a comma-separated ingredient list
    Search {
        ingredients: String,
        #[arg(long)]
        catalog: Option<String>,
        #[arg(long, action)]
        preparation: bool,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Read ingredient lists line by line, loading the catalog once
    Interactive {
        #[arg(long)]
        catalog: Option<String>,
        #[arg(long, action)]
        preparation: bool,
    },
    Config {
        #[arg(long)]
        set_catalog: Option<String>,
        #[arg(long, action)]
        show: bool,
    },
}

struct SearchOptions {
    split_whitespace: bool,
    show_preparation: bool,
    limit: Option<usize>,
}

impl SearchOptions {
    fn new(config: &PantryConfig, preparation: bool, limit: Option<usize>) -> Self {
        Self {
            split_whitespace: config.split_whitespace,
            show_preparation: preparation || config.show_preparation,
            limit,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli);
    print_banner();
    if let Err(e) = run(cli).await {
        log_error(&e.to_string());
        exit(1);
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_manager = ConfigManager::new(&cli.home);
    let mut config = config_manager.load().await?;
    debug!(home = %cli.home.display(), catalog = %config.catalog, "configuration loaded");

    match cli.command {
        Commands::Search {
            ingredients,
            catalog,
            preparation,
            limit,
        } => {
            let location = catalog.unwrap_or_else(|| config.catalog.clone());
            let mut cache = CatalogCache::new(CatalogSource::from_location(&location));
            let options = SearchOptions::new(&config, preparation, limit);
            run_search(&ingredients, &mut cache, &options).await?;
        }
        Commands::Interactive {
            catalog,
            preparation,
        } => {
            let location = catalog.unwrap_or_else(|| config.catalog.clone());
            let mut cache = CatalogCache::new(CatalogSource::from_location(&location));
            let options = SearchOptions::new(&config, preparation, None);
            run_interactive(&mut cache, &options).await?;
        }
        Commands::Config { set_catalog, show } => {
            if let Some(location) = set_catalog {
                config.catalog = location.clone();
                config_manager.save(&config).await?;
                log_success(&format!("Catalog location updated to: {}", location));
            } else if show {
                println!("Current Configuration:");
                println!("   Catalog: {}", config.catalog);
                println!("   Split on whitespace: {}", config.split_whitespace);
                println!("   Show preparation: {}", config.show_preparation);
            } else {
                println!("Use --show or --set-catalog <LOCATION>");
            }
        }
    }

    Ok(())
}

/// Parse, load, rank, render. An invalid query never touches the catalog.
async fn run_search(
    raw: &str,
    cache: &mut CatalogCache,
    options: &SearchOptions,
) -> Result<(), PantryError> {
    let query = if options.split_whitespace {
        parse_query_with(raw, Delimiters { whitespace: true })?
    } else {
        parse_query(raw)?
    };

    if !matches!(cache.state(), CacheState::Loaded(_)) {
        debug!(terms = query.len(), "catalog not cached yet");
    }
    let catalog = cache.get_or_load().await?;

    let mut results = SearchEngine::rank(&catalog.recipes, &query);
    if let Some(limit) = options.limit {
        results.truncate(limit);
    }

    print_results(&results, query.terms(), options.show_preparation);
    Ok(())
}

async fn run_interactive(
    cache: &mut CatalogCache,
    options: &SearchOptions,
) -> Result<(), PantryError> {
    println!(
        "{}",
        "Enter ingredients separated by commas ('quit' to exit).".dimmed()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("ingredients> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().eq_ignore_ascii_case("quit") {
            break;
        }

        match run_search(&line, cache, options).await {
            Ok(()) => {}
            Err(PantryError::InvalidQuery) => log_error(&PantryError::InvalidQuery.to_string()),
            // Keep the session alive; the cache retries on the next query.
            Err(e @ (PantryError::CatalogLoad(_)
            | PantryError::CatalogParse(_)
            | PantryError::NetworkError(_))) => log_error(&e.to_string()),
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "rezepte": [
            { "name": "Pancakes", "ingredients": ["2 eggs", "milk", "flour"], "preparation": "Mix. Fry." }
        ]
    }"#;

    fn options() -> SearchOptions {
        SearchOptions::new(&PantryConfig::default(), false, None)
    }

    #[tokio::test]
    async fn invalid_query_never_reads_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = CatalogCache::new(CatalogSource::File(dir.path().join("missing.json")));

        let result = run_search(" ,., ", &mut cache, &options()).await;

        assert!(matches!(result, Err(PantryError::InvalidQuery)));
        assert!(matches!(cache.state(), CacheState::Uninitialized));
    }

    #[tokio::test]
    async fn failed_catalog_load_recovers_on_next_search() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rezepte.json");
        let mut cache = CatalogCache::new(CatalogSource::File(path.clone()));

        let result = run_search("egg", &mut cache, &options()).await;
        assert!(matches!(result, Err(PantryError::CatalogLoad(_))));
        assert!(matches!(cache.state(), CacheState::Failed(_)));

        std::fs::write(&path, CATALOG).unwrap();
        run_search("egg", &mut cache, &options()).await.unwrap();
        assert!(matches!(cache.state(), CacheState::Loaded(_)));
    }

    #[tokio::test]
    async fn whitespace_option_is_honored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rezepte.json");
        std::fs::write(&path, CATALOG).unwrap();
        let mut cache = CatalogCache::new(CatalogSource::File(path));

        let config = PantryConfig {
            split_whitespace: true,
            ..PantryConfig::default()
        };
        let opts = SearchOptions::new(&config, false, Some(1));
        assert!(opts.split_whitespace);

        run_search("eggs milk", &mut cache, &opts).await.unwrap();
        assert!(matches!(cache.state(), CacheState::Loaded(_)));
    }
}
