//! Development chain errors

use thiserror::Error;

use ourtoken_abi::AbiError;
use ourtoken_config::ConfigError;
use ourtoken_crypto::CryptoError;
use ourtoken_primitives::{Address, ChainId};

use crate::Receipt;

/// Development chain error
#[derive(Debug, Error)]
pub enum DevChainError {
    /// Signing or sender recovery failed
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Calldata or return data could not be encoded/decoded
    #[error("abi error: {0}")]
    Abi(#[from] AbiError),

    /// Configuration problem
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Transaction nonce does not match the account nonce
    #[error("nonce mismatch for {sender}: expected {expected}, got {got}")]
    NonceMismatch {
        /// Recovered sender
        sender: Address,
        /// Account nonce
        expected: u64,
        /// Transaction nonce
        got: u64,
    },

    /// Transaction was signed for another chain
    #[error("chain id mismatch: expected {expected}, got {got}")]
    ChainIdMismatch {
        /// This chain
        expected: ChainId,
        /// Transaction chain id
        got: ChainId,
    },

    /// No contract at the target address
    #[error("no contract deployed at {0}")]
    UnknownContract(Address),

    /// Creation transaction submitted without the artifact to instantiate
    #[error("contract creation requires an artifact")]
    MissingArtifact,

    /// Execution reverted
    #[error("transaction reverted (0x{})", hex::encode(.data))]
    Reverted {
        /// Revert payload
        data: Vec<u8>,
        /// Receipt of the mined, failed transaction; `None` for read-only calls
        receipt: Option<Box<Receipt>>,
    },

    /// Deployment not found in the registry
    #[error("no deployment named {0}")]
    UnknownDeployment(String),

    /// Snapshot id was never taken
    #[error("unknown snapshot {0}")]
    UnknownSnapshot(usize),

    /// Signer index out of range
    #[error("no signer at index {0}")]
    UnknownSigner(usize),

    /// Operation restricted to development chains
    #[error("chain {0} is not a development chain")]
    NotDevelopmentChain(ChainId),

    /// Malformed decimal amount
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

impl DevChainError {
    /// Revert payload, if this is a revert
    pub fn revert_data(&self) -> Option<&[u8]> {
        match self {
            DevChainError::Reverted { data, .. } => Some(data),
            _ => None,
        }
    }
}
