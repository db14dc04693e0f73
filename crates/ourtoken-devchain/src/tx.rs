//! Transactions and contract addresses

use ourtoken_crypto::{keccak256, recover_address, CryptoError, Signature};
use ourtoken_primitives::{Address, ChainId, Nonce, H256};
use rlp::RlpStream;

use crate::{DevChainResult, Signer};

/// Unsigned transaction
///
/// `to == None` creates a contract whose constructor input is `data`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionRequest {
    /// Chain the transaction is valid on
    pub chain_id: ChainId,
    /// Sender nonce
    pub nonce: Nonce,
    /// Target contract, `None` for creation
    pub to: Option<Address>,
    /// Calldata or constructor input
    pub data: Vec<u8>,
}

impl TransactionRequest {
    /// Call `to` with `data`
    pub fn call(chain_id: ChainId, nonce: Nonce, to: Address, data: Vec<u8>) -> Self {
        Self {
            chain_id,
            nonce,
            to: Some(to),
            data,
        }
    }

    /// Create a contract
    pub fn create(chain_id: ChainId, nonce: Nonce, data: Vec<u8>) -> Self {
        Self {
            chain_id,
            nonce,
            to: None,
            data,
        }
    }

    /// Hash covered by the signature
    pub fn signing_hash(&self) -> H256 {
        let mut buf = Vec::with_capacity(8 + 8 + 1 + 20 + self.data.len());
        buf.extend_from_slice(&self.chain_id.to_be_bytes());
        buf.extend_from_slice(&self.nonce.to_be_bytes());
        match &self.to {
            Some(to) => {
                buf.push(1);
                buf.extend_from_slice(to.as_bytes());
            }
            None => buf.push(0),
        }
        buf.extend_from_slice(&self.data);
        keccak256(&buf)
    }

    /// Sign with `signer`
    pub fn sign(self, signer: &Signer) -> DevChainResult<SignedTransaction> {
        let signature = signer.sign(&self.signing_hash())?;
        Ok(SignedTransaction {
            request: self,
            signature,
        })
    }
}

/// Signed transaction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransaction {
    /// Signed payload
    pub request: TransactionRequest,
    /// Sender signature
    pub signature: Signature,
}

impl SignedTransaction {
    /// Transaction hash
    pub fn hash(&self) -> H256 {
        let mut buf = self.request.signing_hash().as_bytes().to_vec();
        buf.extend_from_slice(&self.signature.to_bytes());
        keccak256(&buf)
    }

    /// Recover the sender from the signature
    ///
    /// Signatures with a high `s` value are rejected.
    pub fn recover_sender(&self) -> DevChainResult<Address> {
        if !self.signature.is_low_s() {
            let reason = "s value is not canonical".to_string();
            return Err(CryptoError::InvalidSignature(reason).into());
        }
        Ok(recover_address(&self.request.signing_hash(), &self.signature)?)
    }
}

/// Address of the contract created by `sender` at `nonce`
///
/// `keccak256(rlp([sender, nonce]))[12..]`
pub fn create_address(sender: &Address, nonce: Nonce) -> Address {
    let mut stream = RlpStream::new_list(2);
    stream.append(sender);
    if nonce == 0 {
        stream.append_empty_data();
    } else {
        stream.append(&nonce);
    }
    keccak256(&stream.out()).to_address()
}
