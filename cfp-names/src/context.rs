//! Shared application context.

use std::sync::Arc;

use cfp_core::traits::{Authorizer, CallFactory, NameRegistry, PublicResolver};
use cfp_core::types::Address;

use crate::rpc::RpcClient;

/// Collaborators and session state shared by every naming operation.
///
/// Built once at startup and passed to [`crate::NameService`]. Nothing in
/// here is global; tests build their own context around in-memory fakes.
#[derive(Clone)]
pub struct AppContext {
    /// Naming registry
    pub registry: Arc<dyn NameRegistry>,
    /// Public resolver
    pub resolver: Arc<dyn PublicResolver>,
    /// Call factory
    pub factory: Arc<dyn CallFactory>,
    /// Transaction sender for authorization batches, if available
    pub authorizer: Option<Arc<dyn Authorizer>>,
    /// Connected account, if any
    pub account: Option<Address>,
}

impl AppContext {
    /// Creates a read-only context.
    pub fn new(
        registry: Arc<dyn NameRegistry>,
        resolver: Arc<dyn PublicResolver>,
        factory: Arc<dyn CallFactory>,
    ) -> Self {
        Self {
            registry,
            resolver,
            factory,
            authorizer: None,
            account: None,
        }
    }

    /// Creates a context backed entirely by one RPC client.
    ///
    /// The configured `from` account becomes the connected account.
    pub fn from_rpc(client: Arc<RpcClient>) -> Self {
        let account = client.config().from_account;
        Self {
            registry: client.clone(),
            resolver: client.clone(),
            factory: client.clone(),
            authorizer: Some(client),
            account,
        }
    }

    /// Sets the transaction sender.
    pub fn with_authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.authorizer = Some(authorizer);
        self
    }

    /// Sets the connected account.
    pub fn with_account(mut self, account: Address) -> Self {
        self.account = Some(account);
        self
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("authorizer", &self.authorizer.is_some())
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}
