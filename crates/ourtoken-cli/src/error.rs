//! CLI error types

use thiserror::Error;

use ourtoken_config::ConfigError;
use ourtoken_devchain::DevChainError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Config file or environment problem
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Development chain failure
    #[error("Chain error: {0}")]
    Chain(#[from] DevChainError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML rendering error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}
