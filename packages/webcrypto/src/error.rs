//! Error taxonomy for Web Crypto key and algorithm operations

use thiserror::Error;

/// Errors surfaced by the key-material engine.
///
/// Each variant corresponds to one of the DOMException names the
/// runtime binding layer raises at the JavaScript boundary. No other
/// error type crosses out of this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Key material is structurally invalid or internally inconsistent
    #[error("DataError: {0}")]
    Data(String),

    /// Requested usages are incompatible with the key type
    #[error("SyntaxError: {0}")]
    Syntax(String),

    /// Unknown algorithm, or the algorithm does not support the operation
    #[error("NotSupportedError: {0}")]
    NotSupported(String),

    /// The underlying cryptographic primitive failed
    #[error("OperationError: {0}")]
    Operation(String),

    /// Operation attempted against the wrong key type
    #[error("InvalidAccessError: {0}")]
    InvalidAccess(String),
}

impl CryptoError {
    /// Create a data error
    #[must_use]
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Create a syntax error
    #[must_use]
    pub fn syntax(msg: impl Into<String>) -> Self {
        Self::Syntax(msg.into())
    }

    /// Create a not-supported error
    #[must_use]
    pub fn not_supported(msg: impl Into<String>) -> Self {
        Self::NotSupported(msg.into())
    }

    /// Create an operation error
    #[must_use]
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }

    /// Create an invalid-access error
    #[must_use]
    pub fn invalid_access(msg: impl Into<String>) -> Self {
        Self::InvalidAccess(msg.into())
    }
}

/// Result type for Web Crypto operations
pub type Result<T> = std::result::Result<T, CryptoError>;
