//! Calldata entry point

use ourtoken_abi::Token as AbiToken;
use ourtoken_primitives::{Address, U256};

use crate::interface::function_by_selector;
use crate::{Event, Token, TokenError};

/// Successful call result
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallOutput {
    /// ABI-encoded return values
    pub output: Vec<u8>,
    /// Events emitted by the call, in order
    pub events: Vec<Event>,
}

/// Failed call: revert payload, empty for an unknown selector or bad calldata
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Revert {
    /// ABI-encoded custom error, or empty
    pub data: Vec<u8>,
}

impl Revert {
    /// Decode the payload as a token error
    pub fn token_error(&self) -> Option<TokenError> {
        TokenError::from_revert_data(&self.data)
    }
}

impl From<TokenError> for Revert {
    fn from(err: TokenError) -> Self {
        Self {
            data: err.to_revert_data(),
        }
    }
}

fn address_at(args: &[AbiToken], index: usize) -> Result<Address, Revert> {
    args.get(index)
        .cloned()
        .and_then(AbiToken::into_address)
        .ok_or_default()
}

fn uint_at(args: &[AbiToken], index: usize) -> Result<U256, Revert> {
    args.get(index)
        .cloned()
        .and_then(AbiToken::into_uint)
        .ok_or_default()
}

trait OkOrDefault<T> {
    fn ok_or_default(self) -> Result<T, Revert>;
}

impl<T> OkOrDefault<T> for Option<T> {
    fn ok_or_default(self) -> Result<T, Revert> {
        self.ok_or_else(Revert::default)
    }
}

/// Execute `input` against `token` on behalf of `caller`
///
/// State is only modified when the call succeeds.
pub fn dispatch(token: &mut Token, caller: Address, input: &[u8]) -> Result<CallOutput, Revert> {
    if input.len() < 4 {
        return Err(Revert::default());
    }
    let function = function_by_selector(&input[..4]).ok_or_default()?;
    let args = function
        .decode_input(&input[4..])
        .map_err(|_| Revert::default())?;

    let (value, event): (AbiToken, Option<Event>) = match function.name {
        "name" => (AbiToken::String(token.name().to_string()), None),
        "symbol" => (AbiToken::String(token.symbol().to_string()), None),
        "decimals" => (AbiToken::Uint(U256::from(token.decimals())), None),
        "totalSupply" => (AbiToken::Uint(token.total_supply()), None),
        "balanceOf" => {
            let account = address_at(&args, 0)?;
            (AbiToken::Uint(token.balance_of(&account)), None)
        }
        "allowance" => {
            let owner = address_at(&args, 0)?;
            let spender = address_at(&args, 1)?;
            (AbiToken::Uint(token.allowance(&owner, &spender)), None)
        }
        "transfer" => {
            let event = token.transfer(caller, address_at(&args, 0)?, uint_at(&args, 1)?)?;
            (AbiToken::Bool(true), Some(event))
        }
        "approve" => {
            let event = token.approve(caller, address_at(&args, 0)?, uint_at(&args, 1)?)?;
            (AbiToken::Bool(true), Some(event))
        }
        "transferFrom" => {
            let event = token.transfer_from(
                caller,
                address_at(&args, 0)?,
                address_at(&args, 1)?,
                uint_at(&args, 2)?,
            )?;
            (AbiToken::Bool(true), Some(event))
        }
        _ => return Err(Revert::default()),
    };

    tracing::debug!(function = function.name, %caller, "token call");
    Ok(CallOutput {
        output: function.encode_output(&[value]),
        events: event.into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::function;
    use ourtoken_abi::decode;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 20])
    }

    fn token() -> Token {
        Token::deploy(addr(1), "OurToken", "OT", 8, U256::from(1_000u64))
            .unwrap()
            .0
    }

    fn call(
        token: &mut Token,
        caller: Address,
        name: &str,
        args: &[AbiToken],
    ) -> Result<CallOutput, Revert> {
        let data = function(name).unwrap().encode_call(args).unwrap();
        dispatch(token, caller, &data)
    }

    #[test]
    fn test_name_and_symbol() {
        let mut t = token();
        let out = call(&mut t, addr(9), "name", &[]).unwrap();
        assert_eq!(
            decode(&function("name").unwrap().outputs, &out.output).unwrap()[0],
            AbiToken::String("OurToken".to_string())
        );
        let out = call(&mut t, addr(9), "symbol", &[]).unwrap();
        assert_eq!(
            function("symbol").unwrap().decode_output(&out.output).unwrap()[0],
            AbiToken::String("OT".to_string())
        );
        assert!(out.events.is_empty());
    }

    #[test]
    fn test_decimals_output() {
        let mut t = token();
        let out = call(&mut t, addr(9), "decimals", &[]).unwrap();
        assert_eq!(out.output.len(), 32);
        assert_eq!(out.output[31], 8);
    }

    #[test]
    fn test_transfer_returns_true_and_event() {
        let mut t = token();
        let out = call(
            &mut t,
            addr(1),
            "transfer",
            &[AbiToken::Address(addr(2)), AbiToken::Uint(U256::from(10))],
        )
        .unwrap();
        assert_eq!(out.output[31], 1);
        assert_eq!(
            out.events,
            vec![Event::Transfer { from: addr(1), to: addr(2), value: U256::from(10) }]
        );
        assert_eq!(t.balance_of(&addr(2)), U256::from(10));
    }

    #[test]
    fn test_transfer_from_revert_payload() {
        let mut t = token();
        let revert = call(
            &mut t,
            addr(2),
            "transferFrom",
            &[
                AbiToken::Address(addr(1)),
                AbiToken::Address(addr(2)),
                AbiToken::Uint(U256::from(20)),
            ],
        )
        .unwrap_err();
        assert_eq!(
            revert.token_error(),
            Some(TokenError::InsufficientAllowance {
                spender: addr(2),
                allowance: U256::zero(),
                needed: U256::from(20)
            })
        );
    }

    #[test]
    fn test_unknown_selector_reverts_empty() {
        let mut t = token();
        let revert = dispatch(&mut t, addr(1), &[0xde, 0xad, 0xbe, 0xef]).unwrap_err();
        assert!(revert.data.is_empty());
        assert!(dispatch(&mut t, addr(1), &[0x01]).is_err());
    }

    #[test]
    fn test_truncated_arguments_revert() {
        let mut t = token();
        let mut data = function("balanceOf").unwrap().selector.to_vec();
        data.extend_from_slice(&[0u8; 10]);
        assert_eq!(dispatch(&mut t, addr(1), &data), Err(Revert::default()));
    }
}
