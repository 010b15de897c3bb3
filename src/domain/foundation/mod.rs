//! Foundation module - Shared domain primitives.
//!
//! Contains the API mode, the diagnostics log, the state machine trait
//! and the error types that the signing, widget and pingback modules share.

mod api_mode;
mod diagnostics;
mod errors;
mod state_machine;

pub use api_mode::{
    ApiMode, CART_CONTROLLER, DIGITAL_GOODS_CONTROLLER, VIRTUAL_CURRENCY_CONTROLLER,
};
pub use diagnostics::Diagnostics;
pub use errors::ValidationError;
pub use state_machine::StateMachine;
