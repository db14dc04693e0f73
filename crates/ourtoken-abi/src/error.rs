//! ABI error types

use thiserror::Error;

/// ABI codec error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AbiError {
    /// Encoding failed
    #[error("ABI encoding error: {0}")]
    Encode(String),

    /// Decoding failed
    #[error("ABI decoding error: {0}")]
    Decode(String),

    /// Payload does not start with the expected selector
    #[error("selector mismatch: expected 0x{expected}, got 0x{got}")]
    SelectorMismatch {
        /// Expected selector (hex)
        expected: String,
        /// Actual selector (hex)
        got: String,
    },

    /// Function is not part of the interface
    #[error("unknown function: {0}")]
    UnknownFunction(String),

    /// Wrong number of arguments
    #[error("expected {expected} arguments, got {got}")]
    ArgumentCount {
        /// Declared input count
        expected: usize,
        /// Supplied argument count
        got: usize,
    },
}
