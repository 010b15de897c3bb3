//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-memory pingback store

pub mod memory;

pub use memory::InMemoryPingbackStore;
