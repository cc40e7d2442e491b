use std::sync::Arc;

use fetchr::{
    FetchrError,
    cli::{Cli, Commands, ConfigCommands, join_words},
    commands,
    config::FetchrConfig,
    loader::{FallbackLoader, spawn_load},
    search::SearchEngine,
    store::RecordStore,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

type Result<T> = std::result::Result<T, FetchrError>;

/// Logs go to stderr, filtered by `FETCHR_LOG` (default `warn`)
fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("FETCHR_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load the dataset into a fresh engine
///
/// Tries the `--data` file (or the configured one), then the name list,
/// then the built-in commanders.
fn build_engine(config: &FetchrConfig, cli: &Cli) -> Result<SearchEngine> {
    let data_file = cli
        .data
        .clone()
        .or_else(|| config.data_file.clone())
        .or_else(FetchrConfig::default_data_file);
    let loader = FallbackLoader::standard(data_file, config.names_file.clone());

    let store = Arc::new(RecordStore::new());
    let handle = spawn_load(&store, Arc::new(loader));
    handle
        .join()
        .map_err(|_| FetchrError::InvalidInput("Dataset loader thread panicked".into()))??;

    info!(records = store.snapshot().len(), "Engine ready");
    Ok(SearchEngine::with_settings(store, config.search_settings()))
}

/// Handle configuration subcommands
///
/// # Errors
///
/// Returns `FetchrError` if the key or value is invalid or saving fails.
fn handle_config_command(mut config: FetchrConfig, command: &ConfigCommands, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            if !quiet {
                println!("# {}", FetchrConfig::config_path()?.display());
            }
            println!("{config}");
        }
        ConfigCommands::Set { key, value } => {
            config.set(key, value)?;
            config.save()?;
            if !quiet {
                println!("Set {key} = {value}");
            }
        }
    }
    Ok(())
}

/// Main entry point for the fetchr application
///
/// Loads configuration, parses command-line arguments, and dispatches to the
/// appropriate command handler.
///
/// # Errors
///
/// Returns `FetchrError` if configuration loading fails, the dataset cannot
/// be loaded, or any command handler returns an error.
fn main() -> Result<()> {
    init_logging();

    let config = FetchrConfig::load()?;
    let cli = Cli::parse_args();
    let quiet = cli.quiet || config.quiet;
    let command = cli.get_command();

    match &command {
        Commands::Config { command } => return handle_config_command(config, command, quiet),
        Commands::Import { pages, out } => return commands::import(pages, out, quiet),
        Commands::Fetch { out, url } => {
            let out = out
                .clone()
                .or_else(|| cli.data.clone())
                .or_else(|| config.data_file.clone())
                .or_else(FetchrConfig::default_data_file)
                .ok_or_else(|| FetchrError::InvalidInput("No output path; pass --out".into()))?;
            return commands::fetch(&out, url.as_deref(), quiet);
        }
        _ => {}
    }

    let engine = build_engine(&config, &cli)?;

    match &command {
        Commands::Pick => commands::pick(&engine, config.list_threshold, quiet),
        Commands::Prefix { letters, partners } => commands::prefix(&engine, letters, *partners, quiet),
        Commands::Search { query } => commands::search(&engine, &join_words(query), quiet),
        Commands::Closest { query } => commands::closest(&engine, &join_words(query), quiet),
        Commands::Partner { name } => commands::partner(&engine, &join_words(name), quiet),
        Commands::List { color, cmc } => commands::list(&engine, color.as_deref(), *cmc, quiet),
        Commands::Random { count } => commands::random(&engine, *count, quiet),
        Commands::Stats => commands::stats(&engine, quiet),
        Commands::Config { .. } | Commands::Import { .. } | Commands::Fetch { .. } => unreachable!(),
    }
}
