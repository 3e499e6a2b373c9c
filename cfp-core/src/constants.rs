//! Naming constants for the CFP zones.
//!
//! The zone layout mirrors what the contract migration deploys: a `cfp` TLD
//! with `usuarios` and `llamados` subzones, plus the standard `addr.reverse`
//! zone owned by the reverse registrar.

// ═══════════════════════════════════════════════════════════════════════════════
// SIZES
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of a namehash node in bytes.
pub const NODE_SIZE: usize = 32;

/// Size of an Ethereum address in bytes.
pub const ADDRESS_SIZE: usize = 20;

/// Size of a call identifier in bytes.
pub const CALL_ID_SIZE: usize = 32;

/// Size of keccak256 hash output.
pub const KECCAK256_SIZE: usize = 32;

/// Size of an ABI function selector.
pub const SELECTOR_SIZE: usize = 4;

/// Size of one ABI word.
pub const ABI_WORD_SIZE: usize = 32;

// ═══════════════════════════════════════════════════════════════════════════════
// SENTINELS
// ═══════════════════════════════════════════════════════════════════════════════

/// Hex encoding of the root node (empty domain).
pub const ROOT_NODE_HEX: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000000";

/// Hex encoding of the zero address, meaning "unset".
pub const ZERO_ADDRESS_HEX: &str = "0x0000000000000000000000000000000000000000";

// ═══════════════════════════════════════════════════════════════════════════════
// ZONES
// ═══════════════════════════════════════════════════════════════════════════════

/// Top-level label of the naming scheme.
pub const CFP_TLD: &str = "cfp";

/// Zone for user identities.
pub const USERS_ZONE: &str = "usuarios.cfp";

/// Zone for call identities.
pub const CALLS_ZONE: &str = "llamados.cfp";

/// Zone for reverse records, keyed by lowercase hex address without `0x`.
pub const REVERSE_ZONE: &str = "addr.reverse";

// ═══════════════════════════════════════════════════════════════════════════════
// TEXT RECORDS
// ═══════════════════════════════════════════════════════════════════════════════

/// Text record key holding a call description.
pub const DESCRIPTION_TEXT_KEY: &str = "description";

/// Returned when a call has no description record.
pub const NO_DESCRIPTION_FALLBACK: &str = "no description registered";

// ═══════════════════════════════════════════════════════════════════════════════
// CHAIN DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Local development chain.
pub const DEFAULT_RPC_URL: &str = "http://localhost:7545";

/// Default JSON-RPC request timeout.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Wallet error codes meaning the user declined the request.
pub const USER_REJECTED_CODES: [i64; 2] = [4001, 100];
