//! Error types for the CFP naming stack.
//!
//! One `thiserror` enum covers every crate. The resolver maps collaborator
//! errors to fallback values, so most of these only surface from the RPC
//! client, configuration loading, and input parsing.

use thiserror::Error;

use crate::constants::USER_REJECTED_CODES;

/// Result type alias using `CfpError`.
pub type Result<T> = std::result::Result<T, CfpError>;

/// Main error type for all CFP operations.
#[derive(Debug, Error)]
pub enum CfpError {
    // ═══════════════════════════════════════════════════════════════════════════
    // NAMING ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Malformed address string.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Malformed node string.
    #[error("Invalid node: {0}")]
    InvalidNode(String),

    /// Unknown zone name.
    #[error("Unknown zone: {0}")]
    UnknownZone(String),

    /// A record required by the caller is not set.
    #[error("Record not found for '{domain}'")]
    RecordNotFound { domain: String },

    // ═══════════════════════════════════════════════════════════════════════════
    // CALL ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Malformed call identifier.
    #[error("Invalid call id: {0}")]
    InvalidCallId(String),

    /// The factory has no call with this identifier.
    #[error("Call not found: {0}")]
    CallNotFound(String),

    /// The address is already authorized to create calls.
    #[error("Already authorized: {0}")]
    AlreadyAuthorized(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // ENCODING ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// ABI payload could not be decoded.
    #[error("ABI decode error: {0}")]
    AbiDecode(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid hex encoding.
    #[error("Invalid hex encoding: {0}")]
    HexError(#[from] hex::FromHexError),

    // ═══════════════════════════════════════════════════════════════════════════
    // NETWORK ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Connection timeout.
    #[error("Connection timeout: {0}")]
    ConnectionTimeout(String),

    /// The node answered with a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Contract call reverted.
    #[error("Contract reverted: {0}")]
    Reverted(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // TRANSACTION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The wallet owner declined the request.
    #[error("User rejected the request")]
    UserRejected,

    /// No sender account configured for a transaction.
    #[error("No sender account configured")]
    MissingSender,

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// File I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // INTERNAL ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Internal invariant violation (should never happen).
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl CfpError {
    /// Builds the error for a JSON-RPC error object, recognising wallet rejections.
    pub fn from_rpc(code: i64, message: impl Into<String>) -> Self {
        if USER_REJECTED_CODES.contains(&code) {
            CfpError::UserRejected
        } else {
            CfpError::Rpc {
                code,
                message: message.into(),
            }
        }
    }

    /// Returns true if this error is transient (a retry could succeed).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CfpError::HttpError(_) | CfpError::ConnectionTimeout(_) | CfpError::Rpc { .. }
        )
    }

    /// Returns true if the user declined the wallet prompt.
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, CfpError::UserRejected)
    }

    /// Returns true if this is an input validation error.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            CfpError::InvalidAddress(_)
                | CfpError::InvalidNode(_)
                | CfpError::InvalidCallId(_)
                | CfpError::UnknownZone(_)
        )
    }
}
