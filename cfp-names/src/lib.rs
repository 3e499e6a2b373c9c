//! # CFP Names
//!
//! Registration checks, forward lookups and reverse resolution for the CFP
//! naming zones.
//!
//! Every operation follows the same path:
//! 1. Build a canonical domain (`alice.usuarios.cfp`, `<hex>.addr.reverse`)
//! 2. Derive its node with [`cfp_crypto::namehash`]
//! 3. Query the injected registry/resolver/factory capabilities
//! 4. Map unset records and failed queries to a fixed fallback
//!
//! ## Example
//!
//! ```rust,ignore
//! let client = Arc::new(RpcClient::new(ChainConfig::from_env()?)?);
//! let names = NameService::new(AppContext::from_rpc(client));
//!
//! if !names.is_name_registered("alice", Zone::Users).await {
//!     println!("alice.usuarios.cfp is available");
//! }
//! let display = names.resolve_reverse_name("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").await;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod abi;
mod authorize;
mod config;
mod context;
mod listing;
mod resolver;
mod rpc;
mod zone;

pub use config::ChainConfig;
pub use context::AppContext;
pub use resolver::NameService;
pub use rpc::RpcClient;
pub use zone::{reverse_domain, RegistrationCheck, Zone};
