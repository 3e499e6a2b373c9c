//! Call-for-proposals records.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Address;
use crate::constants::CALL_ID_SIZE;
use crate::error::{CfpError, Result};

// ═══════════════════════════════════════════════════════════════════════════════
// CALL ID
// ═══════════════════════════════════════════════════════════════════════════════

/// A 32-byte call identifier, as stored by the factory.
///
/// The indexing backend reports ids without the `0x` prefix while contracts
/// expect it; both spellings parse to the same value.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallId {
    bytes: [u8; CALL_ID_SIZE],
}

impl CallId {
    /// Creates from a fixed-size array.
    pub const fn from_array(bytes: [u8; CALL_ID_SIZE]) -> Self {
        Self { bytes }
    }

    /// Parses from hex string (with or without 0x prefix).
    pub fn from_hex(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = hex::decode(digits).map_err(|_| CfpError::InvalidCallId(s.to_string()))?;
        let bytes: [u8; CALL_ID_SIZE] = bytes
            .try_into()
            .map_err(|_| CfpError::InvalidCallId(s.to_string()))?;
        Ok(Self { bytes })
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; CALL_ID_SIZE] {
        &self.bytes
    }

    /// Returns `0x` + 64 lowercase hex digits.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.bytes))
    }
}

impl std::fmt::Debug for CallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CallId({})", self.to_hex())
    }
}

impl std::fmt::Display for CallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for CallId {
    type Err = CfpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for CallId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for CallId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FACTORY RECORD
// ═══════════════════════════════════════════════════════════════════════════════

/// The factory's `calls(id)` entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Account that created the call
    pub creator: Address,
    /// Deployed call contract. Its reverse record carries the call name
    /// and the `description` text record.
    pub cfp: Address,
}

impl CallRecord {
    /// Returns true if the factory has no call under the queried id.
    pub fn is_unset(&self) -> bool {
        self.creator.is_zero() && self.cfp.is_zero()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LISTINGS
// ═══════════════════════════════════════════════════════════════════════════════

/// A call as reported by the indexing backend, before name resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallListing {
    /// Call identifier
    pub call_id: CallId,
    /// Account that created the call
    pub owner: Address,
    /// Creation time (Unix seconds)
    #[serde(default)]
    pub timestamp: u64,
}

/// A call ready for display, with names resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCall {
    /// Call identifier
    pub call_id: CallId,
    /// Name from the call contract's reverse record
    pub name: String,
    /// Owner's reverse name, or the owner address when unnamed
    pub owner_display: String,
    /// Owner account
    pub owner_address: Address,
    /// Creation time (Unix seconds)
    pub timestamp: u64,
}

// ═══════════════════════════════════════════════════════════════════════════════
// AUTHORIZATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of authorizing one address inside a batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationOutcome {
    /// Address that was authorized
    pub address: Address,
    /// Transaction hash on success, error message on failure
    pub result: std::result::Result<String, String>,
}

impl AuthorizationOutcome {
    /// Returns true if the authorization transaction was accepted.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}
