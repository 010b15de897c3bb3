//! Pingback module.
//!
//! Validation and interpretation of inbound gateway notifications.
//!
//! - `validator` - The gated validation pipeline and accessors
//! - `state` - Validation state machine
//! - `pingback_type` - Type code classification
//! - `ip_whitelist` - Gateway source addresses

mod ip_whitelist;
mod pingback_type;
mod state;
mod validator;

pub use ip_whitelist::is_whitelisted;
pub use pingback_type::PingbackType;
pub use state::PingbackState;
pub use validator::{Pingback, IP_NOT_WHITELISTED, SIG_PARAM, WRONG_SIGNATURE};
