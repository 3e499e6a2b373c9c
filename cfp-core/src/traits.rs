//! Collaborator capabilities consumed by the name resolver.
//!
//! These mirror the contract methods the resolver reads. Implementations
//! might use:
//! - JSON-RPC `eth_call` against a chain node (production)
//! - In-memory maps (development and tests)
//!
//! Unset records are returned as values (zero address, empty string), never
//! as errors. Errors mean the query itself failed.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Address, CallId, CallRecord, Node};

// ═══════════════════════════════════════════════════════════════════════════════
// REGISTRY
// ═══════════════════════════════════════════════════════════════════════════════

/// The naming registry: who owns a node and which resolver governs it.
#[async_trait]
pub trait NameRegistry: Send + Sync {
    /// Returns the resolver contract for `node`, or the zero address.
    async fn resolver(&self, node: Node) -> Result<Address>;

    /// Returns the owner of `node`, or the zero address.
    async fn owner(&self, node: Node) -> Result<Address>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// RESOLVER
// ═══════════════════════════════════════════════════════════════════════════════

/// A public resolver holding forward, reverse and text records.
#[async_trait]
pub trait PublicResolver: Send + Sync {
    /// Forward lookup. Returns the zero address when unset.
    async fn addr(&self, node: Node) -> Result<Address>;

    /// Reverse lookup. Returns an empty string when unset.
    async fn name(&self, node: Node) -> Result<String>;

    /// Text record lookup. Returns an empty string when unset.
    async fn text(&self, node: Node, key: &str) -> Result<String>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// FACTORY
// ═══════════════════════════════════════════════════════════════════════════════

/// The call factory contract.
#[async_trait]
pub trait CallFactory: Send + Sync {
    /// Returns the factory entry for `call_id`. Unknown ids yield an unset record.
    async fn calls(&self, call_id: CallId) -> Result<CallRecord>;

    /// Returns true if `address` may create calls.
    async fn is_authorized(&self, address: Address) -> Result<bool>;

    /// Returns addresses that registered and await authorization.
    async fn pending_users(&self) -> Result<Vec<Address>>;
}

/// Sends factory authorization transactions.
///
/// Signing and broadcasting belong to the wallet or node behind this trait.
#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Authorizes `address` to create calls. Returns the transaction hash.
    async fn authorize(&self, address: Address) -> Result<String>;
}
