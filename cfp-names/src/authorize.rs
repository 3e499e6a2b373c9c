//! Batch authorization of call creators.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, instrument, warn};

use cfp_core::error::{CfpError, Result};
use cfp_core::traits::Authorizer;
use cfp_core::types::{Address, AuthorizationOutcome};

use crate::resolver::NameService;

impl NameService {
    /// Authorizes every address in `addresses` as a call creator.
    ///
    /// Each address is sent as an independent transaction; all of them are
    /// awaited before returning one outcome per distinct address, in input
    /// order. Addresses the factory already authorizes are reported as
    /// failures without sending a transaction.
    ///
    /// # Errors
    ///
    /// [`CfpError::MissingSender`] if the context has no authorizer.
    #[instrument(skip(self, addresses), fields(batch = addresses.len()))]
    pub async fn authorize_all(&self, addresses: &[Address]) -> Result<Vec<AuthorizationOutcome>> {
        let authorizer = self.ctx.authorizer.clone().ok_or(CfpError::MissingSender)?;

        let mut seen = HashSet::new();
        let batch: Vec<Address> = addresses
            .iter()
            .copied()
            .filter(|address| seen.insert(*address))
            .collect();

        let outcomes = join_all(
            batch
                .into_iter()
                .map(|address| self.authorize_one(authorizer.clone(), address)),
        )
        .await;

        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        info!(
            succeeded,
            failed = outcomes.len() - succeeded,
            "Authorization batch complete"
        );

        Ok(outcomes)
    }

    async fn authorize_one(&self, authorizer: Arc<dyn Authorizer>, address: Address) -> AuthorizationOutcome {
        match self.ctx.factory.is_authorized(address).await {
            Ok(true) => {
                return AuthorizationOutcome {
                    address,
                    result: Err(CfpError::AlreadyAuthorized(address.to_hex()).to_string()),
                };
            }
            Ok(false) => {}
            Err(e) => warn!(%address, error = %e, "Authorization pre-check failed, sending anyway"),
        }

        let result = authorizer.authorize(address).await.map_err(|e| {
            warn!(%address, error = %e, "Authorization failed");
            e.to_string()
        });

        AuthorizationOutcome { address, result }
    }
}
