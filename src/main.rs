mod config;
mod http_server;
mod logging;
mod ports;
mod services;
#[cfg(test)]
mod test_utils;
mod ytmusic_rs;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::WrapErr};
use serde_json::Value;

use crate::{
    config::Config,
    http_server::app::HttpServerConfig,
    logging::setup_logging,
    services::search::{
        SearchService,
        client::YtMusicHttpAdapter,
        types::ErrorResponse,
    },
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The config file to use
    #[arg(short, long, env = "YTMUSIC_SEARCH_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Console log level (default: info)
    #[arg(long, default_value = "info", global = true, env = "LOG_LEVEL")]
    log_level: log::LevelFilter,

    /// File log level (default: debug)
    #[arg(long, default_value = "debug", global = true)]
    log_file_level: log::LevelFilter,

    /// Path to log file
    #[arg(long, env = "YTMUSIC_SEARCH_LOG_FILE", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the HTTP search API
    Serve {
        /// The address to bind to
        #[arg(long, default_value = "127.0.0.1", env = "HOST")]
        host: String,

        /// The port to run the server on
        #[arg(short, long, default_value = "8080", env = "PORT")]
        port: u16,
    },
    /// Run a single search and print the result as JSON
    Search {
        /// The free-text query, e.g. "Imagine Dragons Believer"
        query: String,

        /// Print every ranked result with scores instead of the best match
        #[arg(short, long)]
        detailed: bool,
    },
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Create a default config file, if it doesn't exist
    CreateDefault,
    /// Print the path to the config file
    Path,
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    log::debug!("Loading configuration");
    match path {
        Some(path) => Config::from_file(path),
        None => Config::load(),
    }
    .wrap_err("Failed to load ytmusic-search config")
}

fn build_search_service(config: &Config) -> SearchService {
    match YtMusicHttpAdapter::new(&config.provider) {
        Ok(adapter) => SearchService::new(Arc::new(adapter), config.search.max_results),
        Err(err) => {
            log::error!("Failed to initialize YouTube Music client: {:#}", err);
            SearchService::unavailable(config.search.max_results)
        }
    }
}

/// JSON printed by the `search` command. Search failures become an
/// `{"error": ...}` object instead of a process error.
async fn search_output(service: &SearchService, query: &str, detailed: bool) -> Result<Value> {
    let value = match service.search(query).await {
        Ok(response) if detailed => serde_json::to_value(&response)?,
        Ok(response) => match response.to_compat() {
            Some(compat) => serde_json::to_value(compat)?,
            None => serde_json::to_value(&response)?,
        },
        Err(err) => serde_json::to_value(ErrorResponse::new(err.to_string()))?,
    };
    Ok(value)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    setup_logging(args.log_level, args.log_file.clone(), args.log_file_level)?;

    log::debug!("ytmusic-search starting");

    match args.command {
        Commands::Config(config_commands) => match config_commands {
            ConfigCommands::CreateDefault => {
                log::debug!("Creating default config");
                let path = match args.config {
                    Some(path) => {
                        Config::write_default(&path)?;
                        path
                    }
                    None => Config::create_default()?,
                };
                log::info!("Default config created at: {}", path.display());
            }
            ConfigCommands::Path => match args.config.or_else(Config::config_path) {
                Some(path) => println!("{}", path.display()),
                None => println!("No default config path found"),
            },
        },
        Commands::Search { query, detailed } => {
            let config = load_config(args.config.as_deref())?;
            let service = build_search_service(&config);
            let output = search_output(&service, &query, detailed).await?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Serve { host, port } => {
            let config = load_config(args.config.as_deref())?;
            log::info!("Starting HTTP server on {}:{}", host, port);
            http_server::app::start(HttpServerConfig {
                host,
                port,
                search: build_search_service(&config),
            })
            .await?;
        }
    }

    Ok(())
}
