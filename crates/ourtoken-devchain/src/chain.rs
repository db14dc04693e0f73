//! In-process development chain
//!
//! Every transaction is mined in its own block. Contract state, nonces and
//! receipts live in memory and can be snapshotted and restored.

use std::collections::HashMap;

use ourtoken_abi::{encode, Token as AbiToken};
use ourtoken_config::{is_development_chain, HarnessConfig, NetworkConfig};
use ourtoken_primitives::{Address, BlockNumber, ChainId, Nonce, H256};

use crate::contract::{Artifact, Contract};
use crate::receipt::{Receipt, TxStatus};
use crate::tx::{create_address, SignedTransaction, TransactionRequest};
use crate::{DevChainError, DevChainResult, Signer};

/// Default number of development signers
const DEFAULT_ACCOUNTS: usize = 10;

/// Handle to a saved chain state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SnapshotId(pub usize);

/// Chain state saved outside the snapshot stack
///
/// Unlike a [`SnapshotId`], a checkpoint stays valid across `revert_to`.
#[derive(Clone)]
pub struct Checkpoint {
    state: ChainState,
}

impl Checkpoint {
    /// Block number at the time of the checkpoint
    pub fn block_number(&self) -> BlockNumber {
        self.state.block_number
    }
}

/// Mutable chain state, cloned for snapshots
#[derive(Clone, Default)]
struct ChainState {
    block_number: BlockNumber,
    nonces: HashMap<Address, Nonce>,
    contracts: HashMap<Address, Box<dyn Contract>>,
    receipts: HashMap<H256, Receipt>,
}

/// Single-node development chain
pub struct DevChain {
    chain_id: ChainId,
    network_name: String,
    signers: Vec<Signer>,
    state: ChainState,
    snapshots: Vec<ChainState>,
}

impl DevChain {
    /// Create a chain with the default development signers
    pub fn new(chain_id: ChainId) -> DevChainResult<Self> {
        Self::build(chain_id, &NetworkConfig::builtin(), DEFAULT_ACCOUNTS)
    }

    /// Create a chain from harness configuration
    pub fn from_config(config: &HarnessConfig) -> DevChainResult<Self> {
        Self::build(config.chain_id, &config.network_table()?, config.accounts)
    }

    fn build(chain_id: ChainId, networks: &NetworkConfig, accounts: usize) -> DevChainResult<Self> {
        let network_name = networks.name_of(chain_id).unwrap_or("unknown").to_string();
        let signers = Signer::dev_accounts(accounts)?;
        tracing::debug!(chain_id, network = %network_name, accounts, "dev chain started");
        Ok(Self {
            chain_id,
            network_name,
            signers,
            state: ChainState::default(),
            snapshots: Vec::new(),
        })
    }

    /// Chain id
    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Network display name
    pub fn network_name(&self) -> &str {
        &self.network_name
    }

    /// Whether this chain is one of the development chains
    pub fn is_development(&self) -> bool {
        is_development_chain(self.chain_id)
    }

    /// Fail unless this is a development chain
    pub fn require_development(&self) -> DevChainResult<()> {
        if self.is_development() {
            Ok(())
        } else {
            Err(DevChainError::NotDevelopmentChain(self.chain_id))
        }
    }

    /// Number of the latest mined block
    pub fn block_number(&self) -> BlockNumber {
        self.state.block_number
    }

    /// Development signers, in account order
    pub fn signers(&self) -> &[Signer] {
        &self.signers
    }

    /// Signer at `index`
    pub fn signer(&self, index: usize) -> DevChainResult<&Signer> {
        self.signers
            .get(index)
            .ok_or(DevChainError::UnknownSigner(index))
    }

    /// Next nonce of `address`
    pub fn nonce(&self, address: &Address) -> Nonce {
        self.state.nonces.get(address).copied().unwrap_or_default()
    }

    /// Whether a contract is deployed at `address`
    pub fn has_contract(&self, address: &Address) -> bool {
        self.state.contracts.contains_key(address)
    }

    /// Name of the contract deployed at `address`
    pub fn contract_name(&self, address: &Address) -> Option<&str> {
        self.state.contracts.get(address).map(|c| c.name())
    }

    /// Receipt of a mined transaction
    pub fn receipt(&self, tx_hash: &H256) -> Option<&Receipt> {
        self.state.receipts.get(tx_hash)
    }

    /// Deploy `artifact` from `signer` with the given constructor arguments
    pub fn deploy(
        &mut self,
        signer: &Signer,
        artifact: &dyn Artifact,
        args: &[AbiToken],
    ) -> DevChainResult<Receipt> {
        tracing::debug!(
            contract = artifact.contract_name(),
            deployer = %signer.address(),
            "deploying"
        );
        let request =
            TransactionRequest::create(self.chain_id, self.nonce(&signer.address()), encode(args));
        self.apply(request.sign(signer)?, Some(artifact))
    }

    /// Sign and send a call to `to` with the signer's current nonce
    pub fn send(&mut self, signer: &Signer, to: Address, data: Vec<u8>) -> DevChainResult<Receipt> {
        let request =
            TransactionRequest::call(self.chain_id, self.nonce(&signer.address()), to, data);
        self.send_transaction(request.sign(signer)?)
    }

    /// Execute a signed call transaction
    ///
    /// A reverted transaction is still mined and consumes the nonce; the
    /// error carries its receipt.
    pub fn send_transaction(&mut self, tx: SignedTransaction) -> DevChainResult<Receipt> {
        self.apply(tx, None)
    }

    /// Execute `data` against `to` without mining
    pub fn call(&self, from: Address, to: Address, data: &[u8]) -> DevChainResult<Vec<u8>> {
        let mut contract = self
            .state
            .contracts
            .get(&to)
            .ok_or(DevChainError::UnknownContract(to))?
            .clone_box();
        contract
            .execute(to, from, data)
            .map(|execution| execution.output)
            .map_err(|revert| DevChainError::Reverted {
                data: revert.data,
                receipt: None,
            })
    }

    /// Copy of the current state
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            state: self.state.clone(),
        }
    }

    /// Replace the current state with `checkpoint`
    ///
    /// The snapshot stack is left untouched.
    pub fn restore(&mut self, checkpoint: &Checkpoint) {
        self.state = checkpoint.state.clone();
        tracing::debug!(block = self.state.block_number, "restored checkpoint");
    }

    /// Save the current state
    pub fn snapshot(&mut self) -> SnapshotId {
        self.snapshots.push(self.state.clone());
        let id = SnapshotId(self.snapshots.len() - 1);
        tracing::debug!(snapshot = id.0, block = self.state.block_number, "snapshot taken");
        id
    }

    /// Restore the state saved by `id`
    ///
    /// Snapshots taken after `id` are discarded; `id` itself stays valid.
    pub fn revert_to(&mut self, id: SnapshotId) -> DevChainResult<()> {
        let saved = self
            .snapshots
            .get(id.0)
            .ok_or(DevChainError::UnknownSnapshot(id.0))?;
        self.state = saved.clone();
        self.snapshots.truncate(id.0 + 1);
        tracing::debug!(snapshot = id.0, block = self.state.block_number, "reverted to snapshot");
        Ok(())
    }

    fn apply(
        &mut self,
        tx: SignedTransaction,
        artifact: Option<&dyn Artifact>,
    ) -> DevChainResult<Receipt> {
        let sender = tx.recover_sender()?;
        let request = &tx.request;
        if request.chain_id != self.chain_id {
            return Err(DevChainError::ChainIdMismatch {
                expected: self.chain_id,
                got: request.chain_id,
            });
        }
        let expected = self.nonce(&sender);
        if request.nonce != expected {
            return Err(DevChainError::NonceMismatch {
                sender,
                expected,
                got: request.nonce,
            });
        }

        let (outcome, contract_address) = match request.to {
            Some(to) => {
                let mut contract = self
                    .state
                    .contracts
                    .get(&to)
                    .ok_or(DevChainError::UnknownContract(to))?
                    .clone_box();
                let result = contract.execute(to, sender, &request.data);
                (result.map(|execution| (execution, Some(contract))), None)
            }
            None => {
                let artifact = artifact.ok_or(DevChainError::MissingArtifact)?;
                let address = create_address(&sender, request.nonce);
                let outcome = artifact
                    .instantiate(address, sender, &request.data)
                    .map(|(contract, execution)| (execution, Some(contract)));
                (outcome, Some(address))
            }
        };

        let tx_hash = tx.hash();
        self.state.nonces.insert(sender, expected + 1);
        self.state.block_number += 1;

        let mut receipt = Receipt {
            tx_hash,
            block_number: self.state.block_number,
            from: sender,
            to: request.to,
            contract_address: None,
            status: TxStatus::Success,
            logs: Vec::new(),
            output: Vec::new(),
            revert_data: Vec::new(),
        };

        match outcome {
            Ok((execution, contract)) => {
                let target = contract_address.or(request.to);
                if let (Some(target), Some(contract)) = (target, contract) {
                    self.state.contracts.insert(target, contract);
                }
                receipt.contract_address = contract_address;
                receipt.logs = execution.logs;
                receipt.output = execution.output;
                tracing::debug!(
                    tx = %tx_hash,
                    block = receipt.block_number,
                    from = %sender,
                    logs = receipt.logs.len(),
                    "transaction mined"
                );
                self.state.receipts.insert(tx_hash, receipt.clone());
                Ok(receipt)
            }
            Err(revert) => {
                receipt.status = TxStatus::Failure;
                receipt.revert_data = revert.data.clone();
                tracing::debug!(
                    tx = %tx_hash,
                    block = receipt.block_number,
                    from = %sender,
                    revert = %hex::encode(&revert.data),
                    "transaction reverted"
                );
                self.state.receipts.insert(tx_hash, receipt.clone());
                Err(DevChainError::Reverted {
                    data: revert.data,
                    receipt: Some(Box::new(receipt)),
                })
            }
        }
    }
}

impl std::fmt::Debug for DevChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevChain")
            .field("chain_id", &self.chain_id)
            .field("network", &self.network_name)
            .field("block_number", &self.state.block_number)
            .field("contracts", &self.state.contracts.len())
            .field("snapshots", &self.snapshots.len())
            .finish()
    }
}
