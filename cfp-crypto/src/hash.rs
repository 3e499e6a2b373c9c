//! Keccak256 and the digests derived from it.
//!
//! Keccak256 is NOT SHA3-256: the two differ in padding. Every hash in the
//! naming scheme (labels, nodes, selectors, checksums) uses Keccak256.

use sha3::{Digest, Keccak256};

use cfp_core::constants::{KECCAK256_SIZE, SELECTOR_SIZE};

/// Computes Keccak256 of `input`.
pub fn keccak256(input: &[u8]) -> [u8; KECCAK256_SIZE] {
    let mut hasher = Keccak256::new();
    Digest::update(&mut hasher, input);
    hasher.finalize().into()
}

/// Hashes a single label, as the FIFS registrars expect for `register(label, owner)`.
pub fn labelhash(label: &str) -> [u8; KECCAK256_SIZE] {
    keccak256(label.as_bytes())
}

/// Returns the 4-byte ABI selector for a canonical function signature,
/// e.g. `"resolver(bytes32)"`.
pub fn function_selector(signature: &str) -> [u8; SELECTOR_SIZE] {
    let hash = keccak256(signature.as_bytes());
    let mut selector = [0u8; SELECTOR_SIZE];
    selector.copy_from_slice(&hash[..SELECTOR_SIZE]);
    selector
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_keccak256_vectors() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
        assert_eq!(
            hex::encode(keccak256(b"hello")),
            "1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }

    #[test]
    fn test_labelhash_is_keccak_of_label() {
        assert_eq!(labelhash("alice"), keccak256(b"alice"));
        assert_eq!(
            hex::encode(labelhash("alice")),
            "9c0257114eb9399a2985f8e75dad7600c5d89fe3824ffa99ec1c3eb8bf3b0501"
        );
    }

    #[test_case("resolver(bytes32)", "0178b8bf")]
    #[test_case("owner(bytes32)", "02571be3")]
    #[test_case("addr(bytes32)", "3b3b57de")]
    #[test_case("name(bytes32)", "691f3431")]
    #[test_case("text(bytes32,string)", "59d1d43c")]
    #[test_case("calls(bytes32)", "cff10265")]
    #[test_case("authorize(address)", "b6a5d7de")]
    #[test_case("isAuthorized(address)", "fe9fbb80")]
    #[test_case("getAllPending()", "f112ba72")]
    fn test_function_selectors(signature: &str, expected: &str) {
        assert_eq!(hex::encode(function_selector(signature)), expected);
    }
}
