//! # ourtoken-config
//!
//! Static configuration shared by deployment and tests:
//!
//! - the network table (chain id → display name)
//! - the token constants (name, symbol, decimals, initial supply)
//! - the list of development chains the unit-test suite may run on
//! - [`HarnessConfig`], an optional TOML/env overlay on top of the above

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod harness;
mod network;
mod token;

pub use error::ConfigError;
pub use harness::{HarnessConfig, CHAIN_ID_ENV};
pub use network::{
    is_development_chain, NetworkConfig, NetworkInfo, DEVELOPMENT_CHAINS, HARDHAT_CHAIN_ID,
    SEPOLIA_CHAIN_ID,
};
pub use token::{initial_supply, DECIMALS, INITIAL_SUPPLY, TOKEN_NAME, TOKEN_SYMBOL};

/// Result alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
