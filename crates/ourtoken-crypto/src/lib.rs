//! # ourtoken-crypto
//!
//! Cryptographic primitives used by the development chain.
//!
//! - Keccak-256 hashing (selectors, event topics, transaction hashes)
//! - ECDSA signing (secp256k1)
//! - Public key recovery and address derivation

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod hash;
mod signature;

pub use error::CryptoError;
pub use hash::keccak256;
pub use signature::{
    private_key_from_hex, public_key_to_address, recover_address, recover_public_key, sign,
    PrivateKey, PublicKey, Signature,
};
