//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ProcessedPingbackStore` - Idempotency tracking for pingback delivery

mod processed_pingback_store;

pub use processed_pingback_store::{PingbackStoreError, ProcessedPingbackStore};
