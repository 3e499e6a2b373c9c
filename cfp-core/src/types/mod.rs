//! Domain types for CFP name resolution.
//!
//! - [`Node`]: 256-bit namehash output, the lookup key for every record
//! - [`Address`]: 20-byte account or contract address
//! - [`CallId`]: 32-byte identifier of a call for proposals
//! - [`CallRecord`], [`CallListing`], [`ResolvedCall`]: factory data and display rows
//! - [`AuthorizationOutcome`]: per-address result of a batch authorization

mod address;
mod call;
mod node;

pub use address::*;
pub use call::*;
pub use node::*;
