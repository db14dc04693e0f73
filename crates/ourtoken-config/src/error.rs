//! Configuration errors

use std::path::PathBuf;
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Could not read the config file
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File contents are not valid config TOML
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Initial supply is not a base-unit integer
    #[error("invalid initial supply: {0}")]
    InvalidSupply(String),

    /// Chain id or name is not in the network table
    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    /// Environment override is malformed
    #[error("invalid value for {var}: {value}")]
    InvalidEnv {
        /// Variable name
        var: &'static str,
        /// Offending value
        value: String,
    },
}
