//! Minimal Solidity ABI codec for the contract methods the resolver reads.
//!
//! Covers `bytes32`, `address` and `string` arguments, and decodes
//! `address`, `bool`, `string`, `(address, address)` and `address[]`
//! return values. Everything else is out of scope.

use cfp_core::constants::{ABI_WORD_SIZE, ADDRESS_SIZE};
use cfp_core::error::{CfpError, Result};
use cfp_core::types::Address;
use cfp_crypto::function_selector;

/// A single call argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// `bytes32`
    FixedBytes([u8; 32]),
    /// `address`
    Address(Address),
    /// `string`
    String(String),
}

// ═══════════════════════════════════════════════════════════════════════════════
// ENCODING
// ═══════════════════════════════════════════════════════════════════════════════

/// Encodes calldata: the selector of `signature` followed by `args`.
pub fn encode_call(signature: &str, args: &[Token]) -> Vec<u8> {
    let mut out = function_selector(signature).to_vec();
    out.extend_from_slice(&encode_args(args));
    out
}

/// Encodes `args` as a tuple (head words, then dynamic tails).
pub fn encode_args(args: &[Token]) -> Vec<u8> {
    let mut head = Vec::with_capacity(args.len() * ABI_WORD_SIZE);
    let mut tail = Vec::new();
    let head_len = args.len() * ABI_WORD_SIZE;

    for arg in args {
        match arg {
            Token::FixedBytes(bytes) => head.extend_from_slice(bytes),
            Token::Address(addr) => {
                head.extend_from_slice(&[0u8; ABI_WORD_SIZE - ADDRESS_SIZE]);
                head.extend_from_slice(addr.as_bytes());
            }
            Token::String(s) => {
                head.extend_from_slice(&uint_word(head_len + tail.len()));
                tail.extend_from_slice(&uint_word(s.len()));
                tail.extend_from_slice(s.as_bytes());
                tail.resize(tail.len() + padding(s.len()), 0);
            }
        }
    }

    head.extend_from_slice(&tail);
    head
}

fn uint_word(value: usize) -> [u8; ABI_WORD_SIZE] {
    let mut word = [0u8; ABI_WORD_SIZE];
    word[ABI_WORD_SIZE - 8..].copy_from_slice(&(value as u64).to_be_bytes());
    word
}

fn padding(len: usize) -> usize {
    (ABI_WORD_SIZE - len % ABI_WORD_SIZE) % ABI_WORD_SIZE
}

// ═══════════════════════════════════════════════════════════════════════════════
// DECODING
// ═══════════════════════════════════════════════════════════════════════════════

fn word(data: &[u8], index: usize) -> Result<&[u8]> {
    index
        .checked_mul(ABI_WORD_SIZE)
        .and_then(|start| data.get(start..)?.get(..ABI_WORD_SIZE))
        .ok_or_else(|| {
            CfpError::AbiDecode(format!(
                "need word {} but payload is {} bytes",
                index,
                data.len()
            ))
        })
}

fn read_usize(word: &[u8]) -> Result<usize> {
    let (high, low) = word.split_at(ABI_WORD_SIZE - 8);
    if high.iter().any(|&b| b != 0) {
        return Err(CfpError::AbiDecode("integer does not fit in usize".into()));
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(low);
    usize::try_from(u64::from_be_bytes(buf))
        .map_err(|_| CfpError::AbiDecode("integer does not fit in usize".into()))
}

fn address_from_word(word: &[u8]) -> Result<Address> {
    Address::from_bytes(&word[ABI_WORD_SIZE - ADDRESS_SIZE..])
}

/// Decodes a single `address` return value.
pub fn decode_address(data: &[u8]) -> Result<Address> {
    address_from_word(word(data, 0)?)
}

/// Decodes a single `bool` return value.
pub fn decode_bool(data: &[u8]) -> Result<bool> {
    Ok(word(data, 0)?.iter().any(|&b| b != 0))
}

/// Decodes an `(address, address)` return value.
pub fn decode_address_pair(data: &[u8]) -> Result<(Address, Address)> {
    Ok((address_from_word(word(data, 0)?)?, address_from_word(word(data, 1)?)?))
}

/// Decodes a single `string` return value.
pub fn decode_string(data: &[u8]) -> Result<String> {
    let offset = read_usize(word(data, 0)?)?;
    let body = data
        .get(offset..)
        .ok_or_else(|| CfpError::AbiDecode(format!("string offset {} out of range", offset)))?;
    let len = read_usize(word(body, 0)?)?;
    let bytes = body
        .get(ABI_WORD_SIZE..)
        .and_then(|tail| tail.get(..len))
        .ok_or_else(|| CfpError::AbiDecode(format!("string length {} out of range", len)))?;

    String::from_utf8(bytes.to_vec()).map_err(|e| CfpError::AbiDecode(e.to_string()))
}

/// Decodes a single `address[]` return value.
pub fn decode_address_array(data: &[u8]) -> Result<Vec<Address>> {
    let offset = read_usize(word(data, 0)?)?;
    let body = data
        .get(offset..)
        .ok_or_else(|| CfpError::AbiDecode(format!("array offset {} out of range", offset)))?;
    let len = read_usize(word(body, 0)?)?;

    (1..=len)
        .map(|i| address_from_word(word(body, i)?))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::from_array([byte; 20])
    }

    #[test]
    fn test_encode_bytes32_call() {
        let data = encode_call("resolver(bytes32)", &[Token::FixedBytes([0xab; 32])]);
        assert_eq!(data.len(), 4 + 32);
        assert_eq!(hex::encode(&data[..4]), "0178b8bf");
        assert_eq!(&data[4..], &[0xab; 32]);
    }

    #[test]
    fn test_encode_address_is_left_padded() {
        let data = encode_call("authorize(address)", &[Token::Address(addr(0x11))]);
        assert_eq!(hex::encode(&data[..4]), "b6a5d7de");
        assert_eq!(&data[4..16], &[0u8; 12]);
        assert_eq!(&data[16..], &[0x11; 20]);
    }

    #[test]
    fn test_encode_text_call_layout() {
        let data = encode_call(
            "text(bytes32,string)",
            &[Token::FixedBytes([0; 32]), Token::String("description".into())],
        );
        let args = &data[4..];

        // node, offset, length, padded data
        assert_eq!(args.len(), 32 * 4);
        assert_eq!(read_usize(&args[32..64]).unwrap(), 64);
        assert_eq!(read_usize(&args[64..96]).unwrap(), 11);
        assert_eq!(&args[96..107], b"description");
        assert!(args[107..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_decode_string() {
        let encoded = encode_args(&[Token::String("alice.usuarios.cfp".into())]);
        assert_eq!(decode_string(&encoded).unwrap(), "alice.usuarios.cfp");

        let empty = encode_args(&[Token::String(String::new())]);
        assert_eq!(decode_string(&empty).unwrap(), "");
    }

    #[test]
    fn test_decode_address_and_pair() {
        let encoded = encode_args(&[Token::Address(addr(1)), Token::Address(addr(2))]);
        assert_eq!(decode_address(&encoded).unwrap(), addr(1));
        assert_eq!(decode_address_pair(&encoded).unwrap(), (addr(1), addr(2)));
    }

    #[test]
    fn test_decode_bool() {
        let mut word = [0u8; 32];
        assert!(!decode_bool(&word).unwrap());
        word[31] = 1;
        assert!(decode_bool(&word).unwrap());
    }

    #[test]
    fn test_decode_address_array() {
        let mut data = Vec::new();
        data.extend_from_slice(&uint_word(32));
        data.extend_from_slice(&uint_word(2));
        for a in [addr(3), addr(4)] {
            data.extend_from_slice(&[0u8; 12]);
            data.extend_from_slice(a.as_bytes());
        }
        assert_eq!(decode_address_array(&data).unwrap(), vec![addr(3), addr(4)]);

        let mut empty = Vec::new();
        empty.extend_from_slice(&uint_word(32));
        empty.extend_from_slice(&uint_word(0));
        assert!(decode_address_array(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_short_payloads() {
        assert!(matches!(decode_address(&[]), Err(CfpError::AbiDecode(_))));
        assert!(matches!(decode_string(&[0u8; 16]), Err(CfpError::AbiDecode(_))));
        assert!(matches!(decode_address_pair(&[0u8; 32]), Err(CfpError::AbiDecode(_))));

        // offset points past the end
        assert!(matches!(decode_string(&uint_word(96)), Err(CfpError::AbiDecode(_))));
    }

    #[test]
    fn test_decode_rejects_oversized_lengths() {
        let mut huge = [0u8; 32];
        huge[24..].copy_from_slice(&u64::MAX.to_be_bytes());

        let mut string = uint_word(32).to_vec();
        string.extend_from_slice(&huge);
        assert!(matches!(decode_string(&string), Err(CfpError::AbiDecode(_))));

        let mut array = uint_word(32).to_vec();
        array.extend_from_slice(&huge);
        assert!(matches!(decode_address_array(&array), Err(CfpError::AbiDecode(_))));

        assert!(matches!(word(&huge, usize::MAX), Err(CfpError::AbiDecode(_))));
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let mut data = Vec::new();
        data.extend_from_slice(&uint_word(32));
        data.extend_from_slice(&uint_word(2));
        let mut body = [0u8; 32];
        body[0] = 0xff;
        body[1] = 0xfe;
        data.extend_from_slice(&body);
        assert!(matches!(decode_string(&data), Err(CfpError::AbiDecode(_))));
    }
}
