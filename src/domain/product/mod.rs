//! Product domain module.
//!
//! - `descriptor` - Product value object and builder
//! - `kinds` - Product type and period unit enums
//! - `errors` - Construction errors

mod descriptor;
mod errors;
mod kinds;

pub use descriptor::{Product, ProductBuilder};
pub use errors::ProductError;
pub use kinds::{PeriodType, ProductType};
