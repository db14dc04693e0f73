//! # ourtoken-primitives
//!
//! Primitive types shared by the token ledger, the ABI codec and the
//! development chain.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod hash;

pub use address::{Address, AddressError};
pub use hash::{HashError, H256};

// Re-export primitive-types for U256
pub use primitive_types::U256;

/// Block height type
pub type BlockNumber = u64;

/// Transaction nonce type
pub type Nonce = u64;

/// Chain identifier type
pub type ChainId = u64;
