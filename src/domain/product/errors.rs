//! Product construction errors.

use thiserror::Error;

/// Errors raised while constructing a product.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductError {
    #[error("invalid product type: {0}")]
    InvalidProductType(String),

    #[error("invalid period type: {0}")]
    InvalidPeriodType(String),

    #[error("subscription with period length {0} requires a period type")]
    MissingPeriodType(u32),
}
