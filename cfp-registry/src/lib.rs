//! # CFP Registry
//!
//! An in-memory chain that implements every capability the name resolver
//! consumes: registry, public resolver, call factory and authorizer.
//!
//! - **Memory**: concurrent maps, for development and tests
//! - **Snapshot**: JSON fixtures that seed a memory chain, for offline use
//!
//! ## Example
//!
//! ```rust,ignore
//! use cfp_registry::MemoryChain;
//!
//! let chain = Arc::new(MemoryChain::new());
//! chain.register_user("alice", alice_address);
//!
//! let ctx = AppContext::new(chain.clone(), chain.clone(), chain.clone());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod memory;
mod snapshot;

pub use memory::{MemoryChain, MEMORY_RESOLVER_ADDRESS};
pub use snapshot::{CallEntry, ChainSnapshot, UserEntry};
