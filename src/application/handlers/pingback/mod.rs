//! Pingback handlers.

mod handle_pingback;

pub use handle_pingback::{
    HandlePingbackCommand, HandlePingbackError, HandlePingbackHandler, HandlePingbackResult,
};
