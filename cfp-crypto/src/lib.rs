//! # CFP Cryptography
//!
//! Hash primitives behind every on-chain lookup key.
//!
//! - **Hash**: Keccak256, labelhash, ABI function selectors
//! - **Namehash**: dotted domain string to [`Node`](cfp_core::Node)
//! - **Checksum**: EIP-55 mixed-case address encoding
//!
//! ## Example
//!
//! ```rust
//! use cfp_crypto::namehash;
//!
//! let node = namehash("eth");
//! assert_eq!(
//!     node.to_hex(),
//!     "0x93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae"
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod checksum;
pub mod hash;
pub mod namehash;

// Re-export main functions at crate root
pub use checksum::to_checksum_address;
pub use hash::{function_selector, keccak256, labelhash};
pub use namehash::{child_node, namehash, namehash_hex};
