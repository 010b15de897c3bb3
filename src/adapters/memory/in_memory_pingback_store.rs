//! In-memory pingback store.
//!
//! Suitable for tests and single-process deployments. Entries are lost on
//! restart.

use std::collections::HashSet;
use std::sync::RwLock;

use crate::ports::{PingbackStoreError, ProcessedPingbackStore};

/// `ProcessedPingbackStore` backed by a `HashSet`.
#[derive(Debug, Default)]
pub struct InMemoryPingbackStore {
    processed: RwLock<HashSet<String>>,
}

impl InMemoryPingbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of processed pingbacks.
    pub fn len(&self) -> usize {
        self.processed.read().map(|set| set.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> PingbackStoreError {
    PingbackStoreError::Unavailable("lock poisoned".to_string())
}

impl ProcessedPingbackStore for InMemoryPingbackStore {
    fn contains(&self, unique_id: &str) -> Result<bool, PingbackStoreError> {
        Ok(self.processed.read().map_err(poisoned)?.contains(unique_id))
    }

    fn mark_processed(&self, unique_id: &str) -> Result<bool, PingbackStoreError> {
        Ok(self
            .processed
            .write()
            .map_err(poisoned)?
            .insert(unique_id.to_string()))
    }

    fn release(&self, unique_id: &str) -> Result<(), PingbackStoreError> {
        self.processed.write().map_err(poisoned)?.remove(unique_id);
        Ok(())
    }
}
