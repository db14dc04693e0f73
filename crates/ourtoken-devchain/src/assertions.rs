//! Assertion helpers for receipts and reverted results

use ourtoken_abi::Token as AbiToken;
use ourtoken_primitives::Address;
use ourtoken_token::{interface, Event};

use crate::{DevChainError, Receipt, TxStatus};

/// Name of the token custom error carried by a revert, if any
pub fn custom_error_name(err: &DevChainError) -> Option<&'static str> {
    let data = err.revert_data()?;
    interface::errors()
        .iter()
        .find(|def| def.matches(data))
        .map(|def| def.name)
}

/// Helper trait for asserting on receipts
pub trait ReceiptAssertions {
    /// Assert transaction succeeded
    fn assert_success(&self) -> &Self;

    /// Assert transaction failed
    fn assert_failure(&self) -> &Self;

    /// Assert at least one event named `name` was emitted
    fn assert_emitted(&self, name: &str) -> &Self;

    /// Assert `event` was emitted with exactly these arguments
    fn assert_event(&self, event: &Event) -> &Self;

    /// Assert contract was created
    fn assert_contract_created(&self) -> Address;
}

impl ReceiptAssertions for Receipt {
    fn assert_success(&self) -> &Self {
        assert_eq!(
            self.status,
            TxStatus::Success,
            "Expected transaction to succeed, reverted with 0x{}",
            hex::encode(&self.revert_data)
        );
        self
    }

    fn assert_failure(&self) -> &Self {
        assert_eq!(
            self.status,
            TxStatus::Failure,
            "Expected transaction to fail"
        );
        self
    }

    fn assert_emitted(&self, name: &str) -> &Self {
        let events = self.events();
        assert!(
            events.iter().any(|e| e.name() == name),
            "Expected event {} to be emitted, got {:?}",
            name,
            events
        );
        self
    }

    fn assert_event(&self, event: &Event) -> &Self {
        let events = self.events();
        assert!(
            events.contains(event),
            "Expected event {:?}, got {:?}",
            event,
            events
        );
        self
    }

    fn assert_contract_created(&self) -> Address {
        self.contract_address
            .expect("Expected contract to be created")
    }
}

/// Helper trait for asserting that an operation reverted
pub trait RevertAssertions {
    /// Assert the operation reverted and return the revert payload
    fn expect_reverted(&self) -> &[u8];

    /// Assert the operation reverted with the token custom error `name`
    ///
    /// Returns the decoded error arguments.
    fn expect_custom_error(&self, name: &str) -> Vec<AbiToken>;
}

impl<T: std::fmt::Debug> RevertAssertions for Result<T, DevChainError> {
    fn expect_reverted(&self) -> &[u8] {
        match self {
            Err(err) => err
                .revert_data()
                .unwrap_or_else(|| panic!("Expected a revert, got error: {}", err)),
            Ok(value) => panic!("Expected a revert, got success: {:?}", value),
        }
    }

    fn expect_custom_error(&self, name: &str) -> Vec<AbiToken> {
        let data = self.expect_reverted();
        let def = interface::error(name)
            .unwrap_or_else(|| panic!("{} is not a known custom error", name));
        let actual = self.as_ref().err().and_then(custom_error_name);
        assert_eq!(
            actual,
            Some(def.name),
            "Expected revert with custom error {}, got 0x{}",
            name,
            hex::encode(data)
        );
        def.decode(data)
            .unwrap_or_else(|e| panic!("Malformed {} payload: {}", name, e))
    }
}
