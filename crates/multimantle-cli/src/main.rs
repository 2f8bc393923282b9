//! Multimantle CLI
//!
//! # Commands
//!
//! - `play`: Interactive game session on stdin, one command per line
//! - `import`: Bulk-load word vectors, neighbor rows and similarity ranges
//!
//! # Exit Codes
//! 0 on success, 1 on runtime error, 2 on configuration or usage error.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use multimantle_core::Config;
use multimantle_storage::{RocksDbConfig, RocksDbVectorStore};
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod error;

pub use error::{exit_code_for_error, CliExitCode};

/// Multimantle - multiplayer semantic word guessing
#[derive(Parser)]
#[command(name = "multimantle")]
#[command(version)]
#[command(about = "Multiplayer semantic word-guessing game engine")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: layered config/ directory and environment)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database directory, overriding `storage.path`
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively, reading commands from stdin
    Play(commands::play::PlayArgs),
    /// Import precomputed data into the database
    Import(commands::import::ImportArgs),
}

fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let location = config.logging.include_location;
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_file(location)
        .with_line_number(location)
        .with_writer(std::io::stderr);

    if config.logging.format == "compact" {
        builder.compact().init();
    } else {
        builder.init();
    }
}

/// Both loaders validate before returning.
fn load_config(path: Option<&PathBuf>) -> multimantle_core::CoreResult<Config> {
    match path {
        Some(path) => Config::from_file(path),
        None => Config::load(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            init_logging(cli.verbose, &Config::default());
            error!("Invalid configuration: {}", e);
            std::process::exit(exit_code_for_error(&e).into());
        }
    };
    if let Some(db) = cli.db {
        config.storage.path = db;
    }
    init_logging(cli.verbose, &config);

    let store = match RocksDbVectorStore::open_with_config(
        &config.storage.path,
        RocksDbConfig::from(&config.storage),
    ) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("Failed to open database: {}", e);
            std::process::exit(CliExitCode::Error.into());
        }
    };

    let exit_code = match cli.command {
        Commands::Play(args) => commands::play::handle_play(args, &config, store).await,
        Commands::Import(args) => commands::import::handle_import(args, &store),
    };

    std::process::exit(exit_code);
}

#[cfg(test)]
mod tests {
    use super::*;
    use multimantle_core::CoreError;

    #[test]
    fn test_load_config_rejects_invalid_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        std::fs::write(&path, "[game]\ndefault_status_count = 0\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, CoreError::ConfigError(ref msg) if msg.contains("default_status_count")));
        assert_eq!(i32::from(exit_code_for_error(&err)), 2);
    }

    #[test]
    fn test_load_config_from_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("ok.toml");
        std::fs::write(&path, "[game]\ndefault_top_count = 3\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.game.default_top_count, 3);
    }
}
