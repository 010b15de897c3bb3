//! Widget module.
//!
//! Outbound checkout widgets: signed parameter assembly, URL building and
//! iframe embed code.
//!
//! - `builder` - Parameter assembly and signing
//! - `request` - Widget URL and controller selection
//! - `html` - Iframe rendering and attribute escaping
//! - `errors` - Widget errors

mod builder;
mod errors;
mod html;
mod request;

pub use builder::{build_params, SignedParams, DIGITAL_GOODS_PRODUCT_LIMIT, SIGN_PARAM};
pub use errors::WidgetError;
pub use html::{escape_html, render_iframe, DEFAULT_FRAME_ATTRIBUTES};
pub use request::{Widget, SINGLE_PAGE_WIDGET_PREFIXES};
