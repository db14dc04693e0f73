//! Token errors and their revert encoding

use thiserror::Error;

use ourtoken_abi::Token as AbiToken;
use ourtoken_primitives::{Address, U256};

use crate::interface::{self, PANIC_ARITHMETIC};

/// Standard token custom errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// `sender` holds `balance` but tried to move `needed`
    #[error("ERC20InsufficientBalance({sender}, {balance}, {needed})")]
    InsufficientBalance {
        /// Account being debited
        sender: Address,
        /// Its current balance
        balance: U256,
        /// Amount requested
        needed: U256,
    },

    /// Transfer from the zero address
    #[error("ERC20InvalidSender({sender})")]
    InvalidSender {
        /// Offending sender
        sender: Address,
    },

    /// Transfer to the zero address
    #[error("ERC20InvalidReceiver({receiver})")]
    InvalidReceiver {
        /// Offending receiver
        receiver: Address,
    },

    /// `spender` is approved for `allowance` but tried to move `needed`
    #[error("ERC20InsufficientAllowance({spender}, {allowance}, {needed})")]
    InsufficientAllowance {
        /// Spender
        spender: Address,
        /// Current allowance
        allowance: U256,
        /// Amount requested
        needed: U256,
    },

    /// Approval from the zero address
    #[error("ERC20InvalidApprover({approver})")]
    InvalidApprover {
        /// Offending approver
        approver: Address,
    },

    /// Approval for the zero address
    #[error("ERC20InvalidSpender({spender})")]
    InvalidSpender {
        /// Offending spender
        spender: Address,
    },

    /// Checked arithmetic failed (total supply overflow)
    #[error("Panic(0x11): arithmetic overflow")]
    ArithmeticOverflow,
}

impl TokenError {
    /// Solidity error name
    pub fn name(&self) -> &'static str {
        match self {
            TokenError::InsufficientBalance { .. } => "ERC20InsufficientBalance",
            TokenError::InvalidSender { .. } => "ERC20InvalidSender",
            TokenError::InvalidReceiver { .. } => "ERC20InvalidReceiver",
            TokenError::InsufficientAllowance { .. } => "ERC20InsufficientAllowance",
            TokenError::InvalidApprover { .. } => "ERC20InvalidApprover",
            TokenError::InvalidSpender { .. } => "ERC20InvalidSpender",
            TokenError::ArithmeticOverflow => "Panic",
        }
    }

    fn args(&self) -> Vec<AbiToken> {
        match self {
            TokenError::InsufficientBalance { sender, balance, needed } => vec![
                AbiToken::Address(*sender),
                AbiToken::Uint(*balance),
                AbiToken::Uint(*needed),
            ],
            TokenError::InsufficientAllowance { spender, allowance, needed } => vec![
                AbiToken::Address(*spender),
                AbiToken::Uint(*allowance),
                AbiToken::Uint(*needed),
            ],
            TokenError::InvalidSender { sender: a }
            | TokenError::InvalidReceiver { receiver: a }
            | TokenError::InvalidApprover { approver: a }
            | TokenError::InvalidSpender { spender: a } => vec![AbiToken::Address(*a)],
            TokenError::ArithmeticOverflow => vec![AbiToken::Uint(U256::from(PANIC_ARITHMETIC))],
        }
    }

    /// ABI-encoded revert data (selector + arguments)
    pub fn to_revert_data(&self) -> Vec<u8> {
        match interface::error(self.name()) {
            Some(def) => def.encode(&self.args()),
            None => Vec::new(),
        }
    }

    /// Decode revert data back into a token error
    pub fn from_revert_data(data: &[u8]) -> Option<Self> {
        let def = interface::errors().iter().find(|def| def.matches(data))?;
        let mut args = def.decode(data).ok()?.into_iter();
        let error = match def.name {
            "ERC20InsufficientBalance" => TokenError::InsufficientBalance {
                sender: args.next()?.into_address()?,
                balance: args.next()?.into_uint()?,
                needed: args.next()?.into_uint()?,
            },
            "ERC20InsufficientAllowance" => TokenError::InsufficientAllowance {
                spender: args.next()?.into_address()?,
                allowance: args.next()?.into_uint()?,
                needed: args.next()?.into_uint()?,
            },
            "ERC20InvalidSender" => TokenError::InvalidSender {
                sender: args.next()?.into_address()?,
            },
            "ERC20InvalidReceiver" => TokenError::InvalidReceiver {
                receiver: args.next()?.into_address()?,
            },
            "ERC20InvalidApprover" => TokenError::InvalidApprover {
                approver: args.next()?.into_address()?,
            },
            "ERC20InvalidSpender" => TokenError::InvalidSpender {
                spender: args.next()?.into_address()?,
            },
            "Panic" if args.next()?.into_uint()? == U256::from(PANIC_ARITHMETIC) => {
                TokenError::ArithmeticOverflow
            }
            _ => return None,
        };
        Some(error)
    }
}
