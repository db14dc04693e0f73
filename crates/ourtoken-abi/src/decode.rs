//! ABI decoding

use ourtoken_primitives::{Address, U256};

use crate::types::{ParamType, Token};
use crate::{AbiError, AbiResult};

/// Decode tokens from ABI-encoded data (no selector)
pub fn decode(types: &[ParamType], data: &[u8]) -> AbiResult<Vec<Token>> {
    types
        .iter()
        .enumerate()
        .map(|(i, param_type)| decode_token(*param_type, data, i * 32))
        .collect()
}

fn decode_token(param_type: ParamType, data: &[u8], offset: usize) -> AbiResult<Token> {
    let word = read_word(data, offset)?;
    match param_type {
        ParamType::Address => {
            if word[..12].iter().any(|b| *b != 0) {
                return Err(AbiError::Decode("dirty address padding".to_string()));
            }
            let mut addr = [0u8; 20];
            addr.copy_from_slice(&word[12..]);
            Ok(Token::Address(Address::from_bytes(addr)))
        }
        ParamType::Uint(bits) => {
            let value = U256::from_big_endian(word);
            if bits < 256 && value.bits() > bits {
                return Err(AbiError::Decode(format!("value overflows uint{}", bits)));
            }
            Ok(Token::Uint(value))
        }
        ParamType::Bool => match U256::from_big_endian(word) {
            v if v.is_zero() => Ok(Token::Bool(false)),
            v if v == U256::one() => Ok(Token::Bool(true)),
            _ => Err(AbiError::Decode("invalid bool".to_string())),
        },
        ParamType::FixedBytes(size) => {
            if size == 0 || size > 32 {
                return Err(AbiError::Decode(format!("invalid bytes{}", size)));
            }
            Ok(Token::FixedBytes(word[..size].to_vec()))
        }
        ParamType::Bytes => {
            let data_offset = to_usize(word)?;
            Ok(Token::Bytes(decode_bytes(data, data_offset)?))
        }
        ParamType::String => {
            let data_offset = to_usize(word)?;
            let bytes = decode_bytes(data, data_offset)?;
            String::from_utf8(bytes)
                .map(Token::String)
                .map_err(|e| AbiError::Decode(format!("invalid UTF-8: {}", e)))
        }
    }
}

fn decode_bytes(data: &[u8], offset: usize) -> AbiResult<Vec<u8>> {
    let len = to_usize(read_word(data, offset)?)?;
    let start = offset + 32;
    let end = start
        .checked_add(len)
        .ok_or_else(|| AbiError::Decode("length overflow".to_string()))?;
    check_length(data, end)?;
    Ok(data[start..end].to_vec())
}

fn read_word(data: &[u8], offset: usize) -> AbiResult<&[u8]> {
    check_length(data, offset + 32)?;
    Ok(&data[offset..offset + 32])
}

fn to_usize(word: &[u8]) -> AbiResult<usize> {
    let value = U256::from_big_endian(word);
    if value > U256::from(u32::MAX) {
        return Err(AbiError::Decode("offset out of range".to_string()));
    }
    Ok(value.as_usize())
}

fn check_length(data: &[u8], required: usize) -> AbiResult<()> {
    if data.len() < required {
        return Err(AbiError::Decode(format!(
            "insufficient data: need {} bytes, have {}",
            required,
            data.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode;

    #[test]
    fn test_decode_address_and_uint() {
        let addr = Address::from_hex("0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC").unwrap();
        let mut encoded = [0u8; 64];
        encoded[12..32].copy_from_slice(addr.as_bytes());
        encoded[63] = 100;

        let tokens = decode(&[ParamType::Address, ParamType::Uint(256)], &encoded).unwrap();
        assert_eq!(tokens, vec![Token::Address(addr), Token::Uint(U256::from(100))]);
    }

    #[test]
    fn test_decode_string_from_encoder() {
        let encoded = encode(&[Token::String("OurToken".to_string())]);
        let tokens = decode(&[ParamType::String], &encoded).unwrap();
        assert_eq!(tokens[0], Token::String("OurToken".to_string()));
    }

    #[test]
    fn test_decode_uint8_overflow() {
        let mut encoded = [0u8; 32];
        encoded[30] = 1;
        assert!(decode(&[ParamType::Uint(8)], &encoded).is_err());
        encoded[30] = 0;
        encoded[31] = 8;
        assert_eq!(
            decode(&[ParamType::Uint(8)], &encoded).unwrap()[0],
            Token::Uint(U256::from(8))
        );
    }

    #[test]
    fn test_decode_rejects_dirty_address() {
        let encoded = [0xffu8; 32];
        assert!(decode(&[ParamType::Address], &encoded).is_err());
    }

    #[test]
    fn test_decode_invalid_bool() {
        let mut encoded = [0u8; 32];
        encoded[31] = 2;
        assert!(decode(&[ParamType::Bool], &encoded).is_err());
    }

    #[test]
    fn test_decode_insufficient_data() {
        let data = [0u8; 16];
        match decode(&[ParamType::Uint(256)], &data) {
            Err(AbiError::Decode(msg)) => assert!(msg.contains("insufficient data")),
            other => panic!("Expected Decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_string_bad_offset() {
        let mut encoded = [0u8; 32];
        encoded[31] = 0xff;
        assert!(decode(&[ParamType::String], &encoded).is_err());
    }
}
