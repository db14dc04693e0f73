//! # ourtoken-abi
//!
//! Solidity ABI encoding and decoding for the token interface.
//!
//! - Encoding function calls and return values
//! - Decoding calldata, return data and revert payloads
//! - Function selectors, event topics and custom-error definitions
//!
//! # Example
//!
//! ```rust
//! use ourtoken_abi::{decode, encode_function_call, function_selector, ParamType, Token};
//! use ourtoken_primitives::{Address, U256};
//!
//! let selector = function_selector("transfer(address,uint256)");
//! let args = [Token::Address(Address::ZERO), Token::Uint(U256::from(10))];
//! let data = encode_function_call(selector, &args);
//! let args = decode(&[ParamType::Address, ParamType::Uint(256)], &data[4..]).unwrap();
//! assert_eq!(args[1], Token::Uint(U256::from(10)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod decode;
mod encode;
mod error;
mod interface;
mod types;

pub use decode::decode;
pub use encode::{encode, encode_function_call, event_topic, function_selector};
pub use error::AbiError;
pub use interface::{ErrorDef, EventDef, FunctionDef};
pub use types::{ParamType, Token};

/// Result alias for ABI operations
pub type AbiResult<T> = Result<T, AbiError>;
