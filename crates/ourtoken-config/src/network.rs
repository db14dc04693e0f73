//! Network table

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use ourtoken_primitives::ChainId;

/// Sepolia testnet
pub const SEPOLIA_CHAIN_ID: ChainId = 11_155_111;

/// Local development node
pub const HARDHAT_CHAIN_ID: ChainId = 31_337;

/// Chains the token unit-test suite runs on, in order
pub const DEVELOPMENT_CHAINS: [ChainId; 1] = [HARDHAT_CHAIN_ID];

/// Whether `chain_id` is a local development chain
pub fn is_development_chain(chain_id: ChainId) -> bool {
    DEVELOPMENT_CHAINS.contains(&chain_id)
}

/// Per-network record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkInfo {
    /// Display name
    pub name: String,
}

impl NetworkInfo {
    /// Create a record with the given display name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Chain id → network record, iterated in ascending chain id order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    networks: BTreeMap<ChainId, NetworkInfo>,
}

impl NetworkConfig {
    /// The built-in table
    pub fn builtin() -> Self {
        let mut networks = BTreeMap::new();
        networks.insert(SEPOLIA_CHAIN_ID, NetworkInfo::new("sepolia"));
        networks.insert(HARDHAT_CHAIN_ID, NetworkInfo::new("hardhat"));
        Self { networks }
    }

    /// Look up a chain
    pub fn get(&self, chain_id: ChainId) -> Option<&NetworkInfo> {
        self.networks.get(&chain_id)
    }

    /// Display name of a chain
    pub fn name_of(&self, chain_id: ChainId) -> Option<&str> {
        self.get(chain_id).map(|info| info.name.as_str())
    }

    /// Reverse lookup by display name
    pub fn chain_id_of(&self, name: &str) -> Option<ChainId> {
        self.networks
            .iter()
            .find(|(_, info)| info.name == name)
            .map(|(id, _)| *id)
    }

    /// Add or replace an entry
    pub fn insert(&mut self, chain_id: ChainId, info: NetworkInfo) -> Option<NetworkInfo> {
        self.networks.insert(chain_id, info)
    }

    /// Iterate entries in chain id order
    pub fn iter(&self) -> impl Iterator<Item = (ChainId, &NetworkInfo)> {
        self.networks.iter().map(|(id, info)| (*id, info))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.networks.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::builtin()
    }
}
