//! Signing domain module.
//!
//! The canonicalization and hashing engine shared by outbound widget
//! signing and inbound pingback verification.
//!
//! # Module Structure
//!
//! - `params` - Ordered parameter sets and their values
//! - `version` - Signature versions
//! - `signer` - Canonicalization and hashing
//! - `field_table` - Mode-dependent field sets and version defaults
//! - `errors` - Signing failures

mod errors;
mod field_table;
mod params;
mod signer;
mod version;

pub use errors::SignatureError;
pub use field_table::FieldTable;
pub use params::{ParamValue, ParameterSet};
pub use signer::{canonicalize, sign, sign_with_version_number, signatures_match};
pub use version::{SignatureVersion, SIGN_VERSION_PARAM};
