//! Hierarchical name hashing.
//!
//! ```text
//! namehash("")           = 0x00..00
//! namehash(label.rest)   = keccak256(namehash(rest) || keccak256(label))
//! ```
//!
//! Labels are hashed byte-exact. No case folding or validation happens here;
//! an empty label (as in `"a..b"`) is hashed as the empty string.

use cfp_core::constants::NODE_SIZE;
use cfp_core::types::Node;

use crate::hash::keccak256;

/// Computes the node for a dotted domain string.
///
/// Total over all inputs: the empty string maps to [`Node::ROOT`], and
/// labels are folded from the rightmost (top-level) one inwards.
pub fn namehash(domain: &str) -> Node {
    if domain.is_empty() {
        return Node::ROOT;
    }

    domain
        .rsplit('.')
        .fold(Node::ROOT, |node, label| child_node(node, label))
}

/// Computes the node for `label` directly under `parent`.
pub fn child_node(parent: Node, label: &str) -> Node {
    let label_hash = keccak256(label.as_bytes());

    let mut combined = [0u8; NODE_SIZE * 2];
    combined[..NODE_SIZE].copy_from_slice(parent.as_bytes());
    combined[NODE_SIZE..].copy_from_slice(&label_hash);

    Node::from_array(keccak256(&combined))
}

/// Computes the node and returns its `0x`-prefixed hex form.
pub fn namehash_hex(domain: &str) -> String {
    namehash(domain).to_hex()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfp_core::constants::ROOT_NODE_HEX;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use test_case::test_case;

    #[test]
    fn test_empty_domain_is_root() {
        assert_eq!(namehash(""), Node::ROOT);
        assert_eq!(namehash_hex(""), ROOT_NODE_HEX);
    }

    #[test_case("eth", "93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae" ; "eth")]
    #[test_case("foo.eth", "de9b09fd7c5f901e23a3f19fecc54828e9c848539801e86591bd9801b019f84f" ; "foo eth")]
    #[test_case("addr.reverse", "91d1777781884d03a6757a803996e38de2a42967fb37eeaca72729271025a9e2" ; "addr reverse")]
    #[test_case("cfp", "efcdb169907fa662ef6649dbb176c01181a21f69f5e3ff858c3cfd36a8ff8c3a" ; "cfp")]
    #[test_case("llamados.cfp", "81173b2ee12974a03e93eb05791f17002bcf595e405814aa94b44c78d3148926" ; "llamados")]
    #[test_case("usuarios.cfp", "7d79c6c11abb2ba4601bfd3a9815fc90f866e6d3f9d30de70802be177c255eca" ; "usuarios")]
    #[test_case("alice.usuarios.cfp", "2b15886f7f9e85945c35ea448fef26f9acb135f7be4b3044d7f8eda541e60389" ; "alice")]
    #[test_case("a..b", "b80d4b864be023e45d8251fec7a9ef634c7f57759854947cebd921296a84a1a0" ; "empty label")]
    fn test_golden_vectors(domain: &str, expected: &str) {
        assert_eq!(namehash_hex(domain), format!("0x{}", expected));
    }

    #[test]
    fn test_tld_is_hash_of_root_and_label() {
        let mut combined = [0u8; 64];
        combined[32..].copy_from_slice(&keccak256(b"cfp"));
        assert_eq!(namehash("cfp"), Node::from_array(keccak256(&combined)));
    }

    #[test]
    fn test_subdomain_extends_parent() {
        assert_eq!(
            namehash("llamados.cfp"),
            child_node(namehash("cfp"), "llamados")
        );
    }

    #[test]
    fn test_order_sensitive() {
        assert_ne!(namehash("a.b"), namehash("b.a"));
    }

    #[test]
    fn test_no_case_folding() {
        assert_ne!(namehash("Alice.usuarios.cfp"), namehash("alice.usuarios.cfp"));
    }

    #[test]
    fn test_corpus_is_collision_free() {
        let corpus = [
            "",
            "cfp",
            "usuarios.cfp",
            "llamados.cfp",
            "alice.usuarios.cfp",
            "alice.llamados.cfp",
            "bob.usuarios.cfp",
            "addr.reverse",
            "reverse",
            "a.b",
            "b.a",
            "a..b",
            ".",
            "..",
            "a.",
            ".a",
            "ñandú.usuarios.cfp",
            "5aaeb6053f3e94c9b9a09f33669435e7ef1beaed.addr.reverse",
        ];

        let nodes: HashSet<Node> = corpus.iter().map(|d| namehash(d)).collect();
        assert_eq!(nodes.len(), corpus.len());
    }

    proptest! {
        #[test]
        fn prop_deterministic(domain in ".*") {
            prop_assert_eq!(namehash(&domain), namehash(&domain));
        }

        #[test]
        fn prop_recursive_definition(label in "[^.]*", rest in "[^.]+(\\.[^.]+)*") {
            let domain = format!("{}.{}", label, rest);
            prop_assert_eq!(namehash(&domain), child_node(namehash(&rest), &label));
        }

        #[test]
        fn prop_swapping_labels_changes_node(a in "[a-z0-9]{1,12}", b in "[a-z0-9]{1,12}") {
            prop_assume!(a != b);
            prop_assert_ne!(
                namehash(&format!("{}.{}", a, b)),
                namehash(&format!("{}.{}", b, a))
            );
        }
    }
}
