//! EIP-55 mixed-case checksum encoding.

use cfp_core::types::Address;

use crate::hash::keccak256;

/// Encodes `address` with the EIP-55 checksum casing.
///
/// A hex letter is upper-cased when the matching nibble of
/// `keccak256(lowercase_hex)` is 8 or higher.
pub fn to_checksum_address(address: &Address) -> String {
    let lower = address.reverse_label();
    let hash = keccak256(lower.as_bytes());

    let mut out = String::with_capacity(2 + lower.len());
    out.push_str("0x");

    for (i, c) in lower.chars().enumerate() {
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed")]
    #[test_case("0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359")]
    #[test_case("0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB")]
    #[test_case("0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb")]
    fn test_eip55_vectors(expected: &str) {
        let addr = Address::from_hex(&expected.to_lowercase()).unwrap();
        assert_eq!(to_checksum_address(&addr), expected);
    }

    #[test]
    fn test_zero_address_has_no_letters() {
        assert_eq!(
            to_checksum_address(&Address::zero()),
            "0x0000000000000000000000000000000000000000"
        );
    }
}
