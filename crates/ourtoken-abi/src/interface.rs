//! Function, event and custom-error definitions

use ourtoken_primitives::H256;

use crate::{decode, encode, encode_function_call, event_topic, function_selector};
use crate::{AbiError, AbiResult, ParamType, Token};

fn signature_of(name: &str, inputs: &[ParamType]) -> String {
    let params: Vec<String> = inputs.iter().map(ParamType::canonical).collect();
    format!("{}({})", name, params.join(","))
}

fn split_selector(data: &[u8]) -> AbiResult<([u8; 4], &[u8])> {
    if data.len() < 4 {
        return Err(AbiError::Decode(format!(
            "payload too short for selector: {} bytes",
            data.len()
        )));
    }
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&data[..4]);
    Ok((selector, &data[4..]))
}

/// Function definition
#[derive(Debug, Clone)]
pub struct FunctionDef {
    /// Function name
    pub name: &'static str,
    /// Canonical signature, e.g. `transfer(address,uint256)`
    pub signature: String,
    /// Function selector (4 bytes)
    pub selector: [u8; 4],
    /// Input parameter types
    pub inputs: Vec<ParamType>,
    /// Output parameter types
    pub outputs: Vec<ParamType>,
}

impl FunctionDef {
    /// Create a new function definition
    pub fn new(name: &'static str, inputs: Vec<ParamType>, outputs: Vec<ParamType>) -> Self {
        let signature = signature_of(name, &inputs);
        let selector = function_selector(&signature);
        Self {
            name,
            signature,
            selector,
            inputs,
            outputs,
        }
    }

    /// Encode a call to this function
    pub fn encode_call(&self, args: &[Token]) -> AbiResult<Vec<u8>> {
        if args.len() != self.inputs.len() {
            return Err(AbiError::ArgumentCount {
                expected: self.inputs.len(),
                got: args.len(),
            });
        }
        Ok(encode_function_call(self.selector, args))
    }

    /// Decode the arguments of a call (selector already stripped)
    pub fn decode_input(&self, args: &[u8]) -> AbiResult<Vec<Token>> {
        decode(&self.inputs, args)
    }

    /// Encode return values
    pub fn encode_output(&self, values: &[Token]) -> Vec<u8> {
        encode(values)
    }

    /// Decode return data
    pub fn decode_output(&self, data: &[u8]) -> AbiResult<Vec<Token>> {
        decode(&self.outputs, data)
    }
}

/// Event definition
#[derive(Debug, Clone)]
pub struct EventDef {
    /// Event name
    pub name: &'static str,
    /// Canonical signature
    pub signature: String,
    /// topic0
    pub topic: H256,
    /// Parameter types paired with their `indexed` flag
    pub inputs: Vec<(ParamType, bool)>,
}

impl EventDef {
    /// Create a new event definition
    pub fn new(name: &'static str, inputs: Vec<(ParamType, bool)>) -> Self {
        let types: Vec<ParamType> = inputs.iter().map(|(t, _)| *t).collect();
        let signature = signature_of(name, &types);
        let topic = event_topic(&signature);
        Self {
            name,
            signature,
            topic,
            inputs,
        }
    }

    /// Types of the non-indexed parameters, in order
    pub fn data_types(&self) -> Vec<ParamType> {
        self.inputs
            .iter()
            .filter(|(_, indexed)| !indexed)
            .map(|(t, _)| *t)
            .collect()
    }
}

/// Custom error definition (Solidity `error Name(...)`)
#[derive(Debug, Clone)]
pub struct ErrorDef {
    /// Error name
    pub name: &'static str,
    /// Canonical signature
    pub signature: String,
    /// Error selector (4 bytes)
    pub selector: [u8; 4],
    /// Parameter types
    pub inputs: Vec<ParamType>,
}

impl ErrorDef {
    /// Create a new custom error definition
    pub fn new(name: &'static str, inputs: Vec<ParamType>) -> Self {
        let signature = signature_of(name, &inputs);
        let selector = function_selector(&signature);
        Self {
            name,
            signature,
            selector,
            inputs,
        }
    }

    /// Encode revert data for this error
    pub fn encode(&self, args: &[Token]) -> Vec<u8> {
        encode_function_call(self.selector, args)
    }

    /// Check whether revert data carries this error's selector
    pub fn matches(&self, data: &[u8]) -> bool {
        data.len() >= 4 && data[..4] == self.selector
    }

    /// Decode revert data produced by [`ErrorDef::encode`]
    pub fn decode(&self, data: &[u8]) -> AbiResult<Vec<Token>> {
        let (selector, args) = split_selector(data)?;
        if selector != self.selector {
            return Err(AbiError::SelectorMismatch {
                expected: hex::encode(self.selector),
                got: hex::encode(selector),
            });
        }
        decode(&self.inputs, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ourtoken_primitives::{Address, U256};

    fn insufficient_allowance() -> ErrorDef {
        ErrorDef::new(
            "ERC20InsufficientAllowance",
            vec![ParamType::Address, ParamType::Uint(256), ParamType::Uint(256)],
        )
    }

    #[test]
    fn test_function_def_signature() {
        let f = FunctionDef::new(
            "transferFrom",
            vec![ParamType::Address, ParamType::Address, ParamType::Uint(256)],
            vec![ParamType::Bool],
        );
        assert_eq!(f.signature, "transferFrom(address,address,uint256)");
        assert_eq!(f.selector, [0x23, 0xb8, 0x72, 0xdd]);
    }

    #[test]
    fn test_function_def_argument_count() {
        let f = FunctionDef::new("balanceOf", vec![ParamType::Address], vec![ParamType::Uint(256)]);
        assert_eq!(
            f.encode_call(&[]),
            Err(AbiError::ArgumentCount { expected: 1, got: 0 })
        );
    }

    #[test]
    fn test_error_def_selector() {
        // keccak256("ERC20InsufficientAllowance(address,uint256,uint256)")[:4]
        assert_eq!(insufficient_allowance().selector, [0xfb, 0x8f, 0x41, 0xb2]);
    }

    #[test]
    fn test_error_def_encode_decode() {
        let def = insufficient_allowance();
        let spender = Address::from_bytes([0x70; 20]);
        let data = def.encode(&[
            Token::Address(spender),
            Token::Uint(U256::zero()),
            Token::Uint(U256::from(20)),
        ]);
        assert!(def.matches(&data));
        let args = def.decode(&data).unwrap();
        assert_eq!(args[0], Token::Address(spender));
        assert_eq!(args[2], Token::Uint(U256::from(20)));
    }

    #[test]
    fn test_error_def_selector_mismatch() {
        let def = insufficient_allowance();
        let other = ErrorDef::new("ERC20InvalidSpender", vec![ParamType::Address]);
        let data = other.encode(&[Token::Address(Address::ZERO)]);
        assert!(!def.matches(&data));
        assert!(matches!(def.decode(&data), Err(AbiError::SelectorMismatch { .. })));
    }

    #[test]
    fn test_error_def_short_payload() {
        assert!(matches!(
            insufficient_allowance().decode(&[0xfb]),
            Err(AbiError::Decode(_))
        ));
    }

    #[test]
    fn test_event_def_data_types() {
        let transfer = EventDef::new(
            "Transfer",
            vec![
                (ParamType::Address, true),
                (ParamType::Address, true),
                (ParamType::Uint(256), false),
            ],
        );
        assert_eq!(transfer.signature, "Transfer(address,address,uint256)");
        assert_eq!(transfer.data_types(), vec![ParamType::Uint(256)]);
    }
}
