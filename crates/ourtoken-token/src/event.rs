//! Token events and the log entries they become on chain

use bytes::Bytes;

use ourtoken_abi::{decode, encode, Token as AbiToken};
use ourtoken_primitives::{Address, H256, U256};

use crate::interface;

/// Log entry emitted during transaction execution
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Log {
    /// Contract address that emitted the log
    pub address: Address,
    /// Log topics (event signature hash, then indexed parameters)
    pub topics: Vec<H256>,
    /// Non-indexed parameters, ABI-encoded
    pub data: Bytes,
}

impl Log {
    /// Get the first topic (the event signature hash)
    pub fn topic0(&self) -> Option<&H256> {
        self.topics.first()
    }
}

/// Events emitted by the token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// `Transfer(address indexed from, address indexed to, uint256 value)`
    Transfer {
        /// Debited account (zero for mints)
        from: Address,
        /// Credited account
        to: Address,
        /// Amount moved
        value: U256,
    },
    /// `Approval(address indexed owner, address indexed spender, uint256 value)`
    Approval {
        /// Token holder
        owner: Address,
        /// Approved spender
        spender: Address,
        /// New allowance
        value: U256,
    },
}

impl Event {
    /// Solidity event name
    pub fn name(&self) -> &'static str {
        match self {
            Event::Transfer { .. } => "Transfer",
            Event::Approval { .. } => "Approval",
        }
    }

    /// Encode as a log emitted by `contract`
    pub fn to_log(&self, contract: Address) -> Log {
        let topic0 = interface::event(self.name())
            .map(|def| def.topic)
            .unwrap_or_default();
        let (a, b, value) = match *self {
            Event::Transfer { from, to, value } => (from, to, value),
            Event::Approval { owner, spender, value } => (owner, spender, value),
        };
        Log {
            address: contract,
            topics: vec![topic0, H256::from(a), H256::from(b)],
            data: Bytes::from(encode(&[AbiToken::Uint(value)])),
        }
    }

    /// Decode a log back into a token event
    pub fn from_log(log: &Log) -> Option<Self> {
        let topic0 = log.topic0()?;
        let def = interface::events().iter().find(|def| def.topic == *topic0)?;
        if log.topics.len() != 3 {
            return None;
        }
        let a = log.topics[1].to_address();
        let b = log.topics[2].to_address();
        let value = decode(&def.data_types(), &log.data).ok()?.pop()?.into_uint()?;
        match def.name {
            "Transfer" => Some(Event::Transfer { from: a, to: b, value }),
            "Approval" => Some(Event::Approval { owner: a, spender: b, value }),
            _ => None,
        }
    }
}
