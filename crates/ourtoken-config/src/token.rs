//! Token constants

use ourtoken_primitives::U256;

use crate::{ConfigError, ConfigResult};

/// Token name
pub const TOKEN_NAME: &str = "OurToken";

/// Token symbol
pub const TOKEN_SYMBOL: &str = "OT";

/// Decimal precision
pub const DECIMALS: u8 = 8;

/// Amount minted to the deployer at construction, in base units
pub const INITIAL_SUPPLY: &str = "1000000000000000000000000";

/// [`INITIAL_SUPPLY`] as an integer
pub fn initial_supply() -> ConfigResult<U256> {
    U256::from_dec_str(INITIAL_SUPPLY)
        .map_err(|_| ConfigError::InvalidSupply(INITIAL_SUPPLY.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_supply_value() {
        assert_eq!(initial_supply().unwrap(), U256::exp10(24));
        assert_eq!(initial_supply().unwrap().to_string(), INITIAL_SUPPLY);
    }

    #[test]
    fn test_token_metadata() {
        assert_eq!(TOKEN_NAME, "OurToken");
        assert_eq!(TOKEN_SYMBOL, "OT");
        assert_eq!(DECIMALS, 8);
    }
}
