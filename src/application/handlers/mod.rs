//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod pingback;

pub use pingback::{
    HandlePingbackCommand, HandlePingbackError, HandlePingbackHandler, HandlePingbackResult,
};
