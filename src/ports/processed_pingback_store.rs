//! ProcessedPingbackStore port - Tracks which pingbacks have been acted on.
//!
//! The gateway redelivers a pingback until it receives a success response,
//! so the same notification can arrive several times, possibly at once.
//! Handlers claim a pingback with `mark_processed` before delivering goods;
//! the claim is atomic, so only one concurrent delivery wins. If delivery
//! then fails the claim is released, so the next redelivery is retried.
//!
//! Keys are pingback unique ids (`<ref>_<type>`), which makes a review
//! pingback (type 200) and its later outcome (201 or 202) distinct entries.

use thiserror::Error;

/// Errors raised by pingback store implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PingbackStoreError {
    #[error("pingback store unavailable: {0}")]
    Unavailable(String),
}

/// Port for pingback de-duplication.
///
/// # Example
///
/// ```ignore
/// if !store.mark_processed(&unique_id)? {
///     return Ok(Duplicate); // claimed by an earlier delivery
/// }
///
/// if let Err(e) = deliver_goods() {
///     store.release(&unique_id)?;
///     return Err(e);
/// }
/// ```
pub trait ProcessedPingbackStore: Send + Sync {
    /// Returns true if the pingback was already processed.
    fn contains(&self, unique_id: &str) -> Result<bool, PingbackStoreError>;

    /// Atomically records the pingback as processed.
    ///
    /// Returns false if it was already recorded.
    fn mark_processed(&self, unique_id: &str) -> Result<bool, PingbackStoreError>;

    /// Removes a record so the pingback can be processed again.
    ///
    /// Releasing an unknown id is not an error.
    fn release(&self, unique_id: &str) -> Result<(), PingbackStoreError>;
}
