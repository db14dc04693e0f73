//! # ourtoken-cli
//!
//! Command-line interface for the OurToken harness.
//!
//! ## Usage
//!
//! ```bash
//! # Known networks, development chains marked
//! ourtoken networks
//!
//! # Deploy the token on an in-process development chain
//! ourtoken deploy
//! ourtoken deploy --chain-id 31337 --config ourtoken.toml
//!
//! # Effective configuration
//! ourtoken config --show --json
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ourtoken_config::HarnessConfig;

mod commands;
mod error;
mod output;

pub use error::CliError;

/// OurToken CLI
#[derive(Parser, Debug)]
#[command(name = "ourtoken")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Harness config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// List known networks
    Networks,
    /// Deploy the token to a development chain
    Deploy {
        /// Override the active chain id
        #[arg(long)]
        chain_id: Option<u64>,
    },
    /// Show configuration
    Config {
        /// Show the effective configuration
        #[arg(long)]
        show: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<HarnessConfig, CliError> {
    let config = match path {
        Some(path) => HarnessConfig::load(path)?,
        None => HarnessConfig::default(),
    };
    let config = config.with_env_overrides()?;
    tracing::debug!(chain_id = config.chain_id, accounts = config.accounts, "config loaded");
    Ok(config)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = load_config(cli.config.as_ref())?;
    match cli.command {
        Commands::Networks => commands::networks(&config, cli.json),
        Commands::Deploy { chain_id } => {
            if let Some(chain_id) = chain_id {
                tracing::debug!(chain_id, "chain id overridden on the command line");
                config.chain_id = chain_id;
            }
            commands::deploy(&config, cli.json)
        }
        Commands::Config { show } => commands::show_config(&config, show, cli.json),
    }
}

fn main() {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let json = cli.json;
    if let Err(e) = run(cli) {
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "error": e.to_string(),
                    "success": false
                })
            );
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}
