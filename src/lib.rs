//! Paymentwall - Client library for the Paymentwall payment gateway
//!
//! This crate builds signed checkout-widget requests and validates inbound
//! pingback notifications. Both directions share one signature engine with
//! three canonicalization versions.
//!
//! # Example
//!
//! ```
//! use paymentwall::domain::client::Client;
//! use paymentwall::domain::foundation::ApiMode;
//! use paymentwall::domain::widget::Widget;
//!
//! let mut client = Client::new("app-key", "secret", ApiMode::VirtualCurrency);
//! let widget = Widget::new("user-1", "p1_1", vec![]);
//!
//! let url = widget.url(&mut client).unwrap();
//! assert!(url.starts_with("https://api.paymentwall.com/api/ps?"));
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use domain::client::Client;
pub use domain::foundation::ApiMode;
