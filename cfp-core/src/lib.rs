//! # CFP Core
//!
//! Core types, errors, and traits shared by every crate of the CFP naming stack.
//!
//! - **Types**: [`Node`], [`Address`], [`CallId`] and the call listing records
//! - **Errors**: [`CfpError`] with classification helpers
//! - **Constants**: zone suffixes, sentinel values, fallback strings
//! - **Traits**: the registry/resolver/factory capabilities the resolver consumes
//!
//! ## Example
//!
//! ```rust
//! use cfp_core::{Address, Node};
//!
//! assert!(Node::ROOT.is_root());
//! assert!(Address::zero().is_zero());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{CfpError, Result};
pub use traits::*;
pub use types::*;
