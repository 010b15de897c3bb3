//! Signature error types.

use thiserror::Error;

/// Errors that abort a signature computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// The secret key was empty.
    #[error("secret key cannot be empty")]
    EmptySecret,

    /// The requested signature version is not 1, 2 or 3.
    #[error("unsupported signature version: {0}")]
    UnsupportedVersion(i64),
}
