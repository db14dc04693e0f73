//! Decimal amount conversion

use ourtoken_primitives::U256;

use crate::{DevChainError, DevChainResult};

/// Decimals of the native unit, used by [`parse_ether`]
const ETHER_DECIMALS: u8 = 18;

/// Parse a decimal string into base units with `decimals` fractional digits
///
/// `parse_units("1.5", 2) == 150`
pub fn parse_units(value: &str, decimals: u8) -> DevChainResult<U256> {
    let invalid = || DevChainError::InvalidAmount(value.to_string());
    let trimmed = value.trim();
    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    if fraction.len() > decimals as usize {
        return Err(invalid());
    }

    let padded = format!("{}{}{}", whole, fraction, "0".repeat(decimals as usize - fraction.len()));
    let digits = padded.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::zero());
    }
    U256::from_dec_str(digits).map_err(|_| invalid())
}

/// Parse a decimal string with 18 fractional digits
pub fn parse_ether(value: &str) -> DevChainResult<U256> {
    parse_units(value, ETHER_DECIMALS)
}

/// Render base units as a decimal string
///
/// At least one fractional digit is kept: `format_units(150, 2) == "1.5"`,
/// `format_units(100, 2) == "1.0"`.
pub fn format_units(value: U256, decimals: u8) -> String {
    let digits = value.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }
    let padded = format!("{:0>width$}", digits, width = decimals + 1);
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{}.0", whole)
    } else {
        format!("{}.{}", whole, fraction)
    }
}
