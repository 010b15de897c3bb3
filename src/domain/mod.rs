//! Domain layer containing the gateway protocol logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (API mode, diagnostics, errors, state machine)
//! - `signing` - Parameter sets, field tables and signature computation
//! - `product` - Product value object
//! - `client` - Client context holding credentials and diagnostics
//! - `widget` - Outbound widget requests
//! - `pingback` - Inbound pingback validation

pub mod client;
pub mod foundation;
pub mod pingback;
pub mod product;
pub mod signing;
pub mod widget;
