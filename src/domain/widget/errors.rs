//! Widget error types.

use thiserror::Error;

use crate::domain::signing::SignatureError;

/// Errors that abort building a widget request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    /// The digital goods API accepts at most one product.
    #[error("invalid product count: {0}")]
    InvalidProductCount(usize),

    /// The parameter set could not be signed.
    #[error("signature failed: {0}")]
    Signature(#[from] SignatureError),
}
