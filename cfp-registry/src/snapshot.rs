//! JSON chain fixtures.
//!
//! A snapshot lists registrations rather than raw records, so a fixture
//! file stays readable and every node is derived on load.
//!
//! ```json
//! {
//!   "users": [{ "label": "alice", "address": "0x5aAe...BeAed" }],
//!   "calls": [{ "label": "grant", "callId": "0x07..07", "creator": "0x5aAe...",
//!               "cfp": "0xcfcf...", "description": "Research grants" }],
//!   "pending": ["0x..."],
//!   "authorized": ["0x..."]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

use cfp_core::error::Result;
use cfp_core::types::{Address, CallId};

use crate::memory::MemoryChain;

/// A registered user name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntry {
    /// Label under `usuarios.cfp`
    pub label: String,
    /// Account the name points to
    pub address: Address,
}

/// A call created through the factory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallEntry {
    /// Label under `llamados.cfp`
    pub label: String,
    /// Factory call identifier
    pub call_id: CallId,
    /// Account that created the call
    pub creator: Address,
    /// Deployed call contract
    pub cfp: Address,
    /// Description text record
    #[serde(default)]
    pub description: String,
}

/// Registrations to seed a [`MemoryChain`] with.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainSnapshot {
    /// User registrations
    pub users: Vec<UserEntry>,
    /// Call registrations
    pub calls: Vec<CallEntry>,
    /// Accounts awaiting authorization
    pub pending: Vec<Address>,
    /// Accounts allowed to create calls
    pub authorized: Vec<Address>,
}

impl ChainSnapshot {
    /// Reads a snapshot from a JSON file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref()).await?;
        let snapshot: Self = serde_json::from_str(&data)?;
        info!(
            path = %path.as_ref().display(),
            users = snapshot.users.len(),
            calls = snapshot.calls.len(),
            "Loaded chain snapshot"
        );
        Ok(snapshot)
    }

    /// Applies every registration to `chain`.
    pub fn apply(&self, chain: &MemoryChain) {
        for user in &self.users {
            chain.register_user(&user.label, user.address);
        }
        for call in &self.calls {
            chain.register_call(&call.label, call.call_id, call.creator, call.cfp, &call.description);
        }
        for address in &self.pending {
            chain.register_pending(*address);
        }
        for address in &self.authorized {
            chain.set_authorized(*address);
        }
    }
}

impl MemoryChain {
    /// Creates a chain seeded from `snapshot`.
    pub fn from_snapshot(snapshot: &ChainSnapshot) -> Self {
        let chain = Self::new();
        snapshot.apply(&chain);
        chain
    }
}
