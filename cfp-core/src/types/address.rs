//! Ethereum address type.
//!
//! Addresses arrive from wallets, the indexing backend and contract calls in
//! mixed case. Parsing accepts any case; every derived form (hex, reverse
//! label) is lowercase so the same account always maps to the same reverse node.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::ADDRESS_SIZE;
use crate::error::{CfpError, Result};

/// A 20-byte account or contract address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    bytes: [u8; ADDRESS_SIZE],
}

impl Address {
    /// Creates an address from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; ADDRESS_SIZE] = bytes.try_into().map_err(|_| {
            CfpError::InvalidAddress(format!(
                "expected {} bytes, got {}",
                ADDRESS_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Self { bytes })
    }

    /// Creates from a fixed-size array.
    pub const fn from_array(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self { bytes }
    }

    /// Parses from hex string (with or without 0x prefix, any case).
    pub fn from_hex(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.len() != ADDRESS_SIZE * 2 {
            return Err(CfpError::InvalidAddress(s.to_string()));
        }

        let bytes = hex::decode(digits).map_err(|_| CfpError::InvalidAddress(s.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.bytes
    }

    /// Returns the zero address.
    pub const fn zero() -> Self {
        Self {
            bytes: [0u8; ADDRESS_SIZE],
        }
    }

    /// Returns true if this is the zero address.
    pub fn is_zero(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }

    /// Returns `0x` + 40 lowercase hex digits.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.bytes))
    }

    /// Returns the label used under `addr.reverse`: lowercase hex, no prefix.
    pub fn reverse_label(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Returns the abbreviated display form, e.g. `0x5aa...aed`.
    pub fn short(&self) -> String {
        let full = self.to_hex();
        format!("{}...{}", &full[..5], &full[39..])
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Address {
    type Err = CfpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ZERO_ADDRESS_HEX;
    use test_case::test_case;

    const MIXED: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    #[test]
    fn test_parse_is_case_insensitive() {
        let mixed = Address::from_hex(MIXED).unwrap();
        let lower = Address::from_hex(&MIXED.to_lowercase()).unwrap();
        let bare = Address::from_hex(&MIXED[2..]).unwrap();
        assert_eq!(mixed, lower);
        assert_eq!(mixed, bare);
    }

    #[test]
    fn test_derived_forms_are_lowercase() {
        let addr = Address::from_hex(MIXED).unwrap();
        assert_eq!(addr.to_hex(), MIXED.to_lowercase());
        assert_eq!(addr.reverse_label(), MIXED[2..].to_lowercase());
    }

    #[test]
    fn test_zero_address() {
        let zero = Address::zero();
        assert!(zero.is_zero());
        assert_eq!(zero.to_hex(), ZERO_ADDRESS_HEX);
        assert_eq!(Address::from_hex(ZERO_ADDRESS_HEX).unwrap(), zero);
        assert!(!Address::from_array([1; ADDRESS_SIZE]).is_zero());
    }

    #[test]
    fn test_short_form() {
        let addr = Address::from_hex(MIXED).unwrap();
        assert_eq!(addr.short(), "0x5aa...aed");
    }

    #[test_case("" ; "empty")]
    #[test_case("0x" ; "prefix only")]
    #[test_case("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAe" ; "too short")]
    #[test_case("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAedd" ; "too long")]
    #[test_case("0xZZAeb6053F3E94C9b9A09f33669435E7Ef1BeAed" ; "not hex")]
    fn test_invalid_addresses(input: &str) {
        assert!(matches!(
            Address::from_hex(input),
            Err(CfpError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_serde_roundtrip_lowercases() {
        let json = format!("\"{}\"", MIXED);
        let addr: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(
            serde_json::to_string(&addr).unwrap(),
            format!("\"{}\"", MIXED.to_lowercase())
        );
    }
}
