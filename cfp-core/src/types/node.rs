//! Namehash node type.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::NODE_SIZE;
use crate::error::{CfpError, Result};

/// A 256-bit node identifier derived from a domain string.
///
/// Nodes are transient: they are recomputed on every lookup and never stored.
/// The canonical text form is `0x` followed by 64 lowercase hex digits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Node {
    bytes: [u8; NODE_SIZE],
}

impl Node {
    /// The root node, denoting the empty domain.
    pub const ROOT: Node = Node {
        bytes: [0u8; NODE_SIZE],
    };

    /// Creates a node from a fixed-size array.
    pub const fn from_array(bytes: [u8; NODE_SIZE]) -> Self {
        Self { bytes }
    }

    /// Creates a node from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; NODE_SIZE] = bytes.try_into().map_err(|_| {
            CfpError::InvalidNode(format!("expected {} bytes, got {}", NODE_SIZE, bytes.len()))
        })?;
        Ok(Self { bytes })
    }

    /// Parses from hex string (with or without 0x prefix).
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)?;
        Self::from_bytes(&bytes)
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; NODE_SIZE] {
        &self.bytes
    }

    /// Returns `0x` + 64 lowercase hex digits.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.bytes))
    }

    /// Returns true for the root node.
    pub fn is_root(&self) -> bool {
        self.bytes == [0u8; NODE_SIZE]
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::ROOT
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Node({})", self.to_hex())
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Node {
    type Err = CfpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
