//! Transaction receipts

use ourtoken_primitives::{Address, BlockNumber, H256};
use ourtoken_token::{Event, Log};

/// Transaction execution status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TxStatus {
    /// Executed without revert
    #[default]
    Success,
    /// Reverted; state changes were discarded
    Failure,
}

impl TxStatus {
    /// Check if successful
    pub fn is_success(&self) -> bool {
        matches!(self, TxStatus::Success)
    }
}

/// Result of a mined transaction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    /// Transaction hash
    pub tx_hash: H256,
    /// Block the transaction was mined in
    pub block_number: BlockNumber,
    /// Recovered sender
    pub from: Address,
    /// Call target, `None` for creation
    pub to: Option<Address>,
    /// Created contract, if any
    pub contract_address: Option<Address>,
    /// Execution status
    pub status: TxStatus,
    /// Emitted logs, empty on failure
    pub logs: Vec<Log>,
    /// Return data
    pub output: Vec<u8>,
    /// Revert payload, empty on success
    pub revert_data: Vec<u8>,
}

impl Receipt {
    /// Check if successful
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Logs decoded as token events, in emission order
    pub fn events(&self) -> Vec<Event> {
        self.logs.iter().filter_map(Event::from_log).collect()
    }

    /// Decoded events with the given name
    pub fn events_named(&self, name: &str) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|event| event.name() == name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ourtoken_primitives::U256;

    fn receipt_with(events: &[Event]) -> Receipt {
        let contract = Address::from_bytes([0xcc; 20]);
        Receipt {
            tx_hash: H256::ZERO,
            block_number: 1,
            from: Address::ZERO,
            to: Some(contract),
            contract_address: None,
            status: TxStatus::Success,
            logs: events.iter().map(|e| e.to_log(contract)).collect(),
            output: Vec::new(),
            revert_data: Vec::new(),
        }
    }

    #[test]
    fn test_events_are_decoded_in_order() {
        let transfer = Event::Transfer {
            from: Address::from_bytes([1; 20]),
            to: Address::from_bytes([2; 20]),
            value: U256::from(5),
        };
        let approval = Event::Approval {
            owner: Address::from_bytes([1; 20]),
            spender: Address::from_bytes([3; 20]),
            value: U256::from(7),
        };
        let receipt = receipt_with(&[transfer, approval]);
        assert_eq!(receipt.events(), vec![transfer, approval]);
        assert_eq!(receipt.events_named("Approval"), vec![approval]);
        assert!(receipt.events_named("Mint").is_empty());
    }

    #[test]
    fn test_status_default() {
        assert!(TxStatus::default().is_success());
        assert!(!TxStatus::Failure.is_success());
    }
}
