//! ABI surface of the token: functions, events and custom errors

use std::sync::OnceLock;

use ourtoken_abi::{ErrorDef, EventDef, FunctionDef, ParamType};

/// Selector of the compiler-generated `Panic(uint256)` error
pub const PANIC_SELECTOR: [u8; 4] = [0x4e, 0x48, 0x7b, 0x71];

/// Panic code for arithmetic overflow/underflow
pub const PANIC_ARITHMETIC: u64 = 0x11;

/// Token functions, in declaration order
pub fn functions() -> &'static [FunctionDef] {
    static FUNCTIONS: OnceLock<Vec<FunctionDef>> = OnceLock::new();
    FUNCTIONS.get_or_init(|| {
        use ParamType::*;
        vec![
            FunctionDef::new("name", vec![], vec![String]),
            FunctionDef::new("symbol", vec![], vec![String]),
            FunctionDef::new("decimals", vec![], vec![Uint(8)]),
            FunctionDef::new("totalSupply", vec![], vec![Uint(256)]),
            FunctionDef::new("balanceOf", vec![Address], vec![Uint(256)]),
            FunctionDef::new("transfer", vec![Address, Uint(256)], vec![Bool]),
            FunctionDef::new("allowance", vec![Address, Address], vec![Uint(256)]),
            FunctionDef::new("approve", vec![Address, Uint(256)], vec![Bool]),
            FunctionDef::new("transferFrom", vec![Address, Address, Uint(256)], vec![Bool]),
        ]
    })
}

/// Look up a function by name
pub fn function(name: &str) -> Option<&'static FunctionDef> {
    functions().iter().find(|f| f.name == name)
}

/// Look up a function by selector
pub fn function_by_selector(selector: &[u8]) -> Option<&'static FunctionDef> {
    functions().iter().find(|f| f.selector[..] == *selector)
}

/// `Transfer` and `Approval`
pub fn events() -> &'static [EventDef] {
    static EVENTS: OnceLock<Vec<EventDef>> = OnceLock::new();
    EVENTS.get_or_init(|| {
        use ParamType::*;
        vec![
            EventDef::new("Transfer", vec![(Address, true), (Address, true), (Uint(256), false)]),
            EventDef::new("Approval", vec![(Address, true), (Address, true), (Uint(256), false)]),
        ]
    })
}

/// Look up an event by name
pub fn event(name: &str) -> Option<&'static EventDef> {
    events().iter().find(|e| e.name == name)
}

/// Custom errors the token can revert with
pub fn errors() -> &'static [ErrorDef] {
    static ERRORS: OnceLock<Vec<ErrorDef>> = OnceLock::new();
    ERRORS.get_or_init(|| {
        use ParamType::*;
        vec![
            ErrorDef::new("ERC20InsufficientBalance", vec![Address, Uint(256), Uint(256)]),
            ErrorDef::new("ERC20InvalidSender", vec![Address]),
            ErrorDef::new("ERC20InvalidReceiver", vec![Address]),
            ErrorDef::new("ERC20InsufficientAllowance", vec![Address, Uint(256), Uint(256)]),
            ErrorDef::new("ERC20InvalidApprover", vec![Address]),
            ErrorDef::new("ERC20InvalidSpender", vec![Address]),
            ErrorDef::new("Panic", vec![Uint(256)]),
        ]
    })
}

/// Look up a custom error by name
pub fn error(name: &str) -> Option<&'static ErrorDef> {
    errors().iter().find(|e| e.name == name)
}
