//! Batch resolution of call listings.

use futures::future::join_all;
use tracing::{debug, instrument};

use cfp_core::types::{Address, CallListing, ResolvedCall};
use cfp_crypto::to_checksum_address;

use crate::resolver::NameService;

impl NameService {
    /// Resolves display names for a set of calls.
    ///
    /// Rows are filtered by `owner` first. Each remaining row resolves its
    /// owner's reverse name and its call name concurrently, and all rows are
    /// joined before returning. Rows whose call has no name are dropped.
    /// Output order follows input order.
    #[instrument(skip(self, listings), fields(rows = listings.len()))]
    pub async fn list_calls(
        &self,
        listings: &[CallListing],
        owner: Option<&Address>,
    ) -> Vec<ResolvedCall> {
        let rows = listings
            .iter()
            .filter(|listing| owner.map_or(true, |o| &listing.owner == o))
            .map(|listing| self.resolve_listing(listing));

        let resolved: Vec<ResolvedCall> = join_all(rows)
            .await
            .into_iter()
            .filter(|call| !call.name.is_empty())
            .collect();

        debug!(kept = resolved.len(), "Resolved call listings");
        resolved
    }

    async fn resolve_listing(&self, listing: &CallListing) -> ResolvedCall {
        let owner = listing.owner;
        let owner_hex = owner.to_hex();
        let (owner_display, name) = futures::join!(
            self.resolve_reverse_name_with(&owner_hex, |_| to_checksum_address(&owner)),
            self.resolve_call_display_name(listing.call_id),
        );

        ResolvedCall {
            call_id: listing.call_id,
            name,
            owner_display,
            owner_address: owner,
            timestamp: listing.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cfp_core::types::CallId;
    use cfp_registry::MemoryChain;

    use super::*;
    use crate::context::AppContext;

    fn listing(id: u8, owner: Address, timestamp: u64) -> CallListing {
        CallListing {
            call_id: CallId::from_array([id; 32]),
            owner,
            timestamp,
        }
    }

    fn chain_with_calls() -> (Arc<MemoryChain>, Address, Address) {
        let chain = Arc::new(MemoryChain::new());
        let alice = Address::from_array([0xa1; 20]);
        let bob = Address::from_array([0xb0; 20]);

        for (id, owner) in [(1u8, alice), (2, bob), (3, alice)] {
            let cfp = Address::from_array([id; 20]);
            chain.create_call(CallId::from_array([id; 32]), owner, cfp);
            chain.set_reverse_name(cfp, &format!("call-{}.llamados.cfp", id));
        }
        chain.set_reverse_name(alice, "alice.usuarios.cfp");

        (chain, alice, bob)
    }

    fn service(chain: &Arc<MemoryChain>) -> NameService {
        NameService::new(AppContext::new(chain.clone(), chain.clone(), chain.clone()))
    }

    #[tokio::test]
    async fn test_list_all_calls_in_order() {
        let (chain, alice, bob) = chain_with_calls();
        let listings = vec![listing(3, alice, 30), listing(1, alice, 10), listing(2, bob, 20)];

        let rows = service(&chain).list_calls(&listings, None).await;
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            ["call-3.llamados.cfp", "call-1.llamados.cfp", "call-2.llamados.cfp"]
        );

        assert_eq!(rows[0].owner_display, "alice.usuarios.cfp");
        assert_eq!(rows[0].timestamp, 30);
        assert_eq!(rows[2].owner_display, to_checksum_address(&bob));
        assert_eq!(rows[2].owner_address, bob);
    }

    #[tokio::test]
    async fn test_list_filters_by_owner() {
        let (chain, alice, bob) = chain_with_calls();
        let listings = vec![listing(1, alice, 10), listing(2, bob, 20), listing(3, alice, 30)];

        let rows = service(&chain).list_calls(&listings, Some(&alice)).await;
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.owner_address == alice));
    }

    #[tokio::test]
    async fn test_list_drops_unnamed_calls() {
        let (chain, alice, _) = chain_with_calls();
        chain.create_call(
            CallId::from_array([9; 32]),
            alice,
            Address::from_array([9; 20]),
        );
        let listings = vec![listing(9, alice, 90), listing(1, alice, 10), listing(42, alice, 0)];

        let rows = service(&chain).list_calls(&listings, None).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].call_id, CallId::from_array([1; 32]));
    }

    #[tokio::test]
    async fn test_list_empty() {
        let (chain, _, _) = chain_with_calls();
        assert!(service(&chain).list_calls(&[], None).await.is_empty());
    }
}
