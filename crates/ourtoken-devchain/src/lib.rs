//! # ourtoken-devchain
//!
//! A single-node, in-process development chain for deploying and exercising
//! the token.
//!
//! ## Pieces
//!
//! 1. **DevChain**: signed transactions, one block per transaction, receipts
//!    with logs, read-only calls, snapshots
//! 2. **Deployments**: tagged deploy scripts and cached fixtures
//! 3. **TokenHandle**: typed token calls bound to a signer
//! 4. **Assertions**: event and custom-error checks on receipts and results
//!
//! ## Usage
//!
//! ```ignore
//! let mut chain = DevChain::from_config(&HarnessConfig::from_env()?)?;
//! let mut deployments = Deployments::with_default_scripts();
//! deployments.fixture(&mut chain, &["all"])?;
//! let address = deployments.get("Token")?.address;
//! let token = TokenHandle::at(&chain, address, chain.signer(0)?.clone())?;
//! token.transfer(&mut chain, user, parse_ether("10")?)?.assert_emitted("Transfer");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod assertions;
mod chain;
mod contract;
mod deployments;
mod error;
mod handle;
mod receipt;
mod signer;
mod tx;
mod units;

pub use assertions::{custom_error_name, ReceiptAssertions, RevertAssertions};
pub use chain::{Checkpoint, DevChain, SnapshotId};
pub use contract::{Artifact, Contract, Execution, TokenArtifact};
pub use deployments::{DeployScript, DeployToken, Deployment, Deployments, NamedAccounts};
pub use error::DevChainError;
pub use handle::TokenHandle;
pub use receipt::{Receipt, TxStatus};
pub use signer::{Signer, DEV_PRIVATE_KEYS};
pub use tx::{create_address, SignedTransaction, TransactionRequest};
pub use units::{format_units, parse_ether, parse_units};

/// Result alias for chain operations
pub type DevChainResult<T> = Result<T, DevChainError>;
