//! # ourtoken-token
//!
//! The standard fungible token the harness deploys and tests.
//!
//! [`Token`] is the ledger (balances, allowances, total supply). Its write
//! operations return the [`Event`] they emit or a [`TokenError`] carrying the
//! standard custom error. [`dispatch`] exposes the ledger through the usual
//! Solidity ABI so the development chain can drive it with calldata.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod dispatch;
mod error;
mod event;
pub mod interface;
mod ledger;

pub use dispatch::{dispatch, CallOutput, Revert};
pub use error::TokenError;
pub use event::{Event, Log};
pub use ledger::Token;

/// Result alias for ledger operations
pub type TokenResult<T> = Result<T, TokenError>;
