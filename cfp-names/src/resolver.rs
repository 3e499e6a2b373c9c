//! Name resolution with fixed fallbacks.
//!
//! Every lookup here is a single read-through query. Collaborator failures
//! are logged and mapped to the operation's fallback value; nothing is
//! retried and nothing is cached.

use tracing::{debug, instrument, warn};

use cfp_core::constants::{DESCRIPTION_TEXT_KEY, NO_DESCRIPTION_FALLBACK};
use cfp_core::types::{Address, CallId, Node};
use cfp_crypto::namehash;

use crate::context::AppContext;
use crate::zone::{reverse_domain, RegistrationCheck, Zone};

/// Resolves registration status, forward records and reverse names.
#[derive(Clone, Debug)]
pub struct NameService {
    pub(crate) ctx: AppContext,
}

impl NameService {
    /// Creates a service over `ctx`.
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    /// Returns the injected context.
    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // REGISTRATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Returns true if `<label>.<zone>` is taken.
    ///
    /// A failed query reports the name as available (`false`). Callers that
    /// go on to register must expect the registrar to reject a name this
    /// check missed.
    #[instrument(skip(self))]
    pub async fn is_name_registered(&self, label: &str, zone: Zone) -> bool {
        let domain = zone.domain(label);
        let node = namehash(&domain);
        debug!(%domain, %node, "Checking registration");

        let result = match zone.registration_check() {
            RegistrationCheck::Resolver => self.ctx.registry.resolver(node).await,
            RegistrationCheck::Owner => self.ctx.registry.owner(node).await,
        };

        match result {
            Ok(address) => !address.is_zero(),
            Err(e) => {
                warn!(%domain, error = %e, "Registration check failed, reporting available");
                false
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // FORWARD RECORDS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Returns the address `<label>.<zone>` points to, if set.
    #[instrument(skip(self))]
    pub async fn resolve_address(&self, label: &str, zone: Zone) -> Option<Address> {
        let domain = zone.domain(label);
        match self.ctx.resolver.addr(namehash(&domain)).await {
            Ok(address) if !address.is_zero() => Some(address),
            Ok(_) => {
                debug!(%domain, "No forward record");
                None
            }
            Err(e) => {
                warn!(%domain, error = %e, "Forward lookup failed");
                None
            }
        }
    }

    /// Returns true if `<label>.<zone>` points to `expected`.
    ///
    /// Used after registration to confirm the forward record landed.
    pub async fn verify_forward_record(&self, label: &str, zone: Zone, expected: &Address) -> bool {
        self.resolve_address(label, zone).await.as_ref() == Some(expected)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // REVERSE RECORDS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Returns the reverse name for `address`, or `address` unchanged.
    pub async fn resolve_reverse_name(&self, address: &str) -> String {
        self.resolve_reverse_name_with(address, str::to_string).await
    }

    /// Returns the reverse name for `address`, or `fallback(address)`.
    pub async fn resolve_reverse_name_with<F>(&self, address: &str, fallback: F) -> String
    where
        F: FnOnce(&str) -> String,
    {
        match self.reverse_name(address).await {
            Some(name) => name,
            None => fallback(address),
        }
    }

    /// Returns the display name of a call, or an empty string.
    ///
    /// The name lives in the reverse record of the call contract the factory
    /// deployed for `call_id`.
    #[instrument(skip(self))]
    pub async fn resolve_call_display_name(&self, call_id: CallId) -> String {
        let Some(cfp) = self.call_contract(call_id).await else {
            return String::new();
        };

        self.reverse_name(&cfp.to_hex()).await.unwrap_or_default()
    }

    /// Returns the `description` text record for `address`, or a fixed fallback.
    #[instrument(skip(self))]
    pub async fn resolve_call_description(&self, address: &str) -> String {
        let domain = reverse_domain(address);
        let node = namehash(&domain);

        match self.ctx.resolver.text(node, DESCRIPTION_TEXT_KEY).await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => {
                debug!(%domain, "No description record");
                NO_DESCRIPTION_FALLBACK.to_string()
            }
            Err(e) => {
                warn!(%domain, error = %e, "Description lookup failed");
                NO_DESCRIPTION_FALLBACK.to_string()
            }
        }
    }

    /// Returns the description of the call deployed for `call_id`.
    pub async fn resolve_call_description_by_id(&self, call_id: CallId) -> String {
        match self.call_contract(call_id).await {
            Some(cfp) => self.resolve_call_description(&cfp.to_hex()).await,
            None => NO_DESCRIPTION_FALLBACK.to_string(),
        }
    }

    /// Returns the connected account's reverse name, or its short form.
    pub async fn account_display_name(&self) -> Option<String> {
        let account = self.ctx.account?;
        Some(
            self.resolve_reverse_name_with(&account.to_hex(), |_| account.short())
                .await,
        )
    }

    async fn reverse_name(&self, address: &str) -> Option<String> {
        let domain = reverse_domain(address);
        let node: Node = namehash(&domain);
        debug!(%domain, %node, "Reverse lookup");

        match self.ctx.resolver.name(node).await {
            Ok(name) if !name.is_empty() => Some(name),
            Ok(_) => None,
            Err(e) => {
                warn!(%domain, error = %e, "Reverse lookup failed");
                None
            }
        }
    }

    async fn call_contract(&self, call_id: CallId) -> Option<Address> {
        match self.ctx.factory.calls(call_id).await {
            Ok(record) if !record.cfp.is_zero() => Some(record.cfp),
            Ok(_) => {
                debug!(%call_id, "Factory has no call contract");
                None
            }
            Err(e) => {
                warn!(%call_id, error = %e, "Factory lookup failed");
                None
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // FACTORY
    // ═══════════════════════════════════════════════════════════════════════════

    /// Returns true if `address` may create calls. Failures report `false`.
    #[instrument(skip(self))]
    pub async fn is_authorized(&self, address: Address) -> bool {
        self.ctx.factory.is_authorized(address).await.unwrap_or_else(|e| {
            warn!(%address, error = %e, "Authorization check failed");
            false
        })
    }

    /// Returns addresses awaiting authorization. Failures report none.
    #[instrument(skip(self))]
    pub async fn pending_users(&self) -> Vec<Address> {
        self.ctx.factory.pending_users().await.unwrap_or_else(|e| {
            warn!(error = %e, "Pending users lookup failed");
            Vec::new()
        })
    }
}
