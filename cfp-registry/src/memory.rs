//! In-memory chain state.
//!
//! Fast, thread-safe storage suitable for development, testing,
//! and offline use of the CLI.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use parking_lot::RwLock;
use tracing::{debug, instrument};

use cfp_core::constants::{CALLS_ZONE, DESCRIPTION_TEXT_KEY, REVERSE_ZONE, USERS_ZONE};
use cfp_core::error::Result;
use cfp_core::traits::{Authorizer, CallFactory, NameRegistry, PublicResolver};
use cfp_core::types::{Address, CallId, CallRecord, Node};
use cfp_crypto::{keccak256, namehash};

/// Address the memory chain reports as the public resolver of registered names.
pub const MEMORY_RESOLVER_ADDRESS: Address = Address::from_array([0x5e; 20]);

/// In-memory registry, resolver and call factory.
///
/// Records are keyed by node exactly as the contracts key them, so every
/// lookup goes through the same namehash derivation as against a real chain.
/// Unset records read back as the zero address or an empty string.
///
/// # Thread Safety
///
/// All operations are thread-safe and can be called concurrently.
#[derive(Debug, Default)]
pub struct MemoryChain {
    /// Registry: node → owner
    owners: DashMap<Node, Address>,
    /// Registry: node → resolver contract
    resolvers: DashMap<Node, Address>,
    /// Resolver: node → forward address
    addrs: DashMap<Node, Address>,
    /// Resolver: node → reverse name
    names: DashMap<Node, String>,
    /// Resolver: (node, key) → text value
    texts: DashMap<(Node, String), String>,
    /// Factory: call id → (creator, call contract)
    calls: DashMap<CallId, CallRecord>,
    /// Factory: accounts allowed to create calls
    authorized: DashSet<Address>,
    /// Factory: accounts awaiting authorization, in registration order
    pending: RwLock<Vec<Address>>,
    /// Transactions accepted so far
    transactions: AtomicU64,
}

impl MemoryChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // RAW RECORDS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Sets the owner of `node`.
    pub fn set_owner(&self, node: Node, owner: Address) {
        self.owners.insert(node, owner);
    }

    /// Sets the resolver of `node`.
    pub fn set_resolver(&self, node: Node, resolver: Address) {
        self.resolvers.insert(node, resolver);
    }

    /// Sets the forward address of `node`.
    pub fn set_addr(&self, node: Node, address: Address) {
        self.addrs.insert(node, address);
    }

    /// Sets the name record of `node`.
    pub fn set_name(&self, node: Node, name: impl Into<String>) {
        self.names.insert(node, name.into());
    }

    /// Sets a text record of `node`.
    pub fn set_text(&self, node: Node, key: impl Into<String>, value: impl Into<String>) {
        self.texts.insert((node, key.into()), value.into());
    }

    /// Sets the reverse name of `address`.
    pub fn set_reverse_name(&self, address: Address, name: impl Into<String>) {
        self.set_name(reverse_node(&address), name);
    }

    /// Sets the `description` text record on the reverse node of `address`.
    pub fn set_description(&self, address: Address, description: impl Into<String>) {
        self.set_text(reverse_node(&address), DESCRIPTION_TEXT_KEY, description);
    }

    /// Records a call in the factory.
    pub fn create_call(&self, call_id: CallId, creator: Address, cfp: Address) {
        self.calls.insert(call_id, CallRecord { creator, cfp });
    }

    /// Marks `address` as authorized without recording a transaction.
    pub fn set_authorized(&self, address: Address) {
        self.authorized.insert(address);
        self.pending.write().retain(|pending| pending != &address);
    }

    /// Adds `address` to the pending authorization list.
    pub fn register_pending(&self, address: Address) {
        let mut pending = self.pending.write();
        if !pending.contains(&address) && !self.authorized.contains(&address) {
            pending.push(address);
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // REGISTRATION FLOWS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Registers `<label>.usuarios.cfp` to `account`.
    ///
    /// Applies the same records as the on-chain flow: ownership through the
    /// zone registrar, forward address, resolver assignment and the account's
    /// reverse name. Returns the name's node.
    #[instrument(skip(self))]
    pub fn register_user(&self, label: &str, account: Address) -> Node {
        let domain = format!("{}.{}", label, USERS_ZONE);
        let node = namehash(&domain);

        self.set_owner(node, account);
        self.set_addr(node, account);
        self.set_resolver(node, MEMORY_RESOLVER_ADDRESS);
        self.set_reverse_name(account, domain.as_str());

        debug!(%domain, %node, %account, "Registered user");
        node
    }

    /// Registers `<label>.llamados.cfp` for a call deployed at `cfp`.
    ///
    /// The call name and description land on the reverse node of the call
    /// contract, where the resolver reads them. Returns the name's node.
    #[instrument(skip(self, description))]
    pub fn register_call(
        &self,
        label: &str,
        call_id: CallId,
        creator: Address,
        cfp: Address,
        description: &str,
    ) -> Node {
        let domain = format!("{}.{}", label, CALLS_ZONE);
        let node = namehash(&domain);

        self.set_owner(node, creator);
        self.set_addr(node, cfp);
        self.set_resolver(node, MEMORY_RESOLVER_ADDRESS);
        self.create_call(call_id, creator, cfp);
        self.set_reverse_name(cfp, domain.as_str());
        if !description.is_empty() {
            self.set_description(cfp, description);
        }

        debug!(%domain, %call_id, "Registered call");
        node
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // INSPECTION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Returns the number of transactions accepted.
    pub fn transaction_count(&self) -> u64 {
        self.transactions.load(Ordering::SeqCst)
    }

    /// Returns the number of calls in the factory.
    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    /// Returns every factory entry.
    pub fn all_calls(&self) -> Vec<(CallId, CallRecord)> {
        self.calls
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect()
    }

    /// Removes every record.
    pub fn clear(&self) {
        self.owners.clear();
        self.resolvers.clear();
        self.addrs.clear();
        self.names.clear();
        self.texts.clear();
        self.calls.clear();
        self.authorized.clear();
        self.pending.write().clear();
        self.transactions.store(0, Ordering::SeqCst);
    }
}

fn reverse_node(address: &Address) -> Node {
    namehash(&format!("{}.{}", address.reverse_label(), REVERSE_ZONE))
}

fn read_address(map: &DashMap<Node, Address>, node: &Node) -> Address {
    map.get(node).map(|entry| *entry.value()).unwrap_or_default()
}

// ═══════════════════════════════════════════════════════════════════════════════
// CAPABILITIES
// ═══════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl NameRegistry for MemoryChain {
    async fn resolver(&self, node: Node) -> Result<Address> {
        Ok(read_address(&self.resolvers, &node))
    }

    async fn owner(&self, node: Node) -> Result<Address> {
        Ok(read_address(&self.owners, &node))
    }
}

#[async_trait]
impl PublicResolver for MemoryChain {
    async fn addr(&self, node: Node) -> Result<Address> {
        Ok(read_address(&self.addrs, &node))
    }

    async fn name(&self, node: Node) -> Result<String> {
        Ok(self
            .names
            .get(&node)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    async fn text(&self, node: Node, key: &str) -> Result<String> {
        Ok(self
            .texts
            .get(&(node, key.to_string()))
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }
}

#[async_trait]
impl CallFactory for MemoryChain {
    async fn calls(&self, call_id: CallId) -> Result<CallRecord> {
        Ok(self
            .calls
            .get(&call_id)
            .map(|entry| *entry.value())
            .unwrap_or(CallRecord {
                creator: Address::zero(),
                cfp: Address::zero(),
            }))
    }

    async fn is_authorized(&self, address: Address) -> Result<bool> {
        Ok(self.authorized.contains(&address))
    }

    async fn pending_users(&self) -> Result<Vec<Address>> {
        Ok(self.pending.read().clone())
    }
}

#[async_trait]
impl Authorizer for MemoryChain {
    #[instrument(skip(self))]
    async fn authorize(&self, address: Address) -> Result<String> {
        self.authorized.insert(address);
        self.pending.write().retain(|pending| pending != &address);

        let nonce = self.transactions.fetch_add(1, Ordering::SeqCst);
        let mut preimage = address.as_bytes().to_vec();
        preimage.extend_from_slice(&nonce.to_be_bytes());
        let tx_hash = format!("0x{}", hex::encode(keccak256(&preimage)));

        debug!(%address, %tx_hash, "Authorized");
        Ok(tx_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::from_array([byte; 20])
    }

    #[tokio::test]
    async fn test_unset_records() {
        let chain = MemoryChain::new();
        let node = namehash("nobody.usuarios.cfp");

        assert!(chain.owner(node).await.unwrap().is_zero());
        assert!(chain.resolver(node).await.unwrap().is_zero());
        assert!(chain.addr(node).await.unwrap().is_zero());
        assert_eq!(chain.name(node).await.unwrap(), "");
        assert_eq!(chain.text(node, "description").await.unwrap(), "");
        assert!(chain.calls(CallId::from_array([1; 32])).await.unwrap().is_unset());
    }

    #[tokio::test]
    async fn test_register_user_records() {
        let chain = MemoryChain::new();
        let alice = addr(0xa1);
        let node = chain.register_user("alice", alice);

        assert_eq!(node, namehash("alice.usuarios.cfp"));
        assert_eq!(chain.owner(node).await.unwrap(), alice);
        assert_eq!(chain.addr(node).await.unwrap(), alice);
        assert_eq!(chain.resolver(node).await.unwrap(), MEMORY_RESOLVER_ADDRESS);

        let reverse = namehash(&format!("{}.addr.reverse", alice.reverse_label()));
        assert_eq!(chain.name(reverse).await.unwrap(), "alice.usuarios.cfp");
    }

    #[tokio::test]
    async fn test_register_call_records() {
        let chain = MemoryChain::new();
        let creator = addr(0xa1);
        let cfp = addr(0xcf);
        let id = CallId::from_array([7; 32]);

        let node = chain.register_call("grant", id, creator, cfp, "Research grants");
        assert_eq!(chain.owner(node).await.unwrap(), creator);

        let record = chain.calls(id).await.unwrap();
        assert_eq!(record, CallRecord { creator, cfp });

        let reverse = reverse_node(&cfp);
        assert_eq!(chain.name(reverse).await.unwrap(), "grant.llamados.cfp");
        assert_eq!(
            chain.text(reverse, DESCRIPTION_TEXT_KEY).await.unwrap(),
            "Research grants"
        );
        assert_eq!(chain.call_count(), 1);
    }

    #[tokio::test]
    async fn test_authorize_moves_pending() {
        let chain = MemoryChain::new();
        chain.register_pending(addr(1));
        chain.register_pending(addr(2));
        chain.register_pending(addr(1));
        assert_eq!(chain.pending_users().await.unwrap(), vec![addr(1), addr(2)]);

        let tx = chain.authorize(addr(1)).await.unwrap();
        assert!(tx.starts_with("0x"));
        assert_eq!(tx.len(), 66);

        assert!(chain.is_authorized(addr(1)).await.unwrap());
        assert!(!chain.is_authorized(addr(2)).await.unwrap());
        assert_eq!(chain.pending_users().await.unwrap(), vec![addr(2)]);
        assert_eq!(chain.transaction_count(), 1);

        // authorized accounts do not go back to pending
        chain.register_pending(addr(1));
        assert_eq!(chain.pending_users().await.unwrap(), vec![addr(2)]);
    }

    #[tokio::test]
    async fn test_transaction_hashes_unique() {
        let chain = MemoryChain::new();
        let first = chain.authorize(addr(1)).await.unwrap();
        let second = chain.authorize(addr(1)).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_clear() {
        let chain = MemoryChain::new();
        chain.register_user("alice", addr(1));
        chain.authorize(addr(1)).await.unwrap();
        chain.clear();

        assert!(chain.owner(namehash("alice.usuarios.cfp")).await.unwrap().is_zero());
        assert!(!chain.is_authorized(addr(1)).await.unwrap());
        assert_eq!(chain.transaction_count(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_authorize() {
        use std::sync::Arc;
        use tokio::task::JoinSet;

        let chain = Arc::new(MemoryChain::new());
        for i in 0..100u8 {
            chain.register_pending(addr(i));
        }

        let mut tasks = JoinSet::new();
        for i in 0..100u8 {
            let chain = chain.clone();
            tasks.spawn(async move { chain.authorize(addr(i)).await.unwrap() });
        }

        let mut hashes = std::collections::HashSet::new();
        while let Some(result) = tasks.join_next().await {
            hashes.insert(result.unwrap());
        }

        assert_eq!(hashes.len(), 100);
        assert_eq!(chain.transaction_count(), 100);
        assert!(chain.pending_users().await.unwrap().is_empty());
    }
}
