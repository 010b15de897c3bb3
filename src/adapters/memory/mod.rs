//! In-memory adapters.

mod in_memory_pingback_store;

pub use in_memory_pingback_store::InMemoryPingbackStore;
