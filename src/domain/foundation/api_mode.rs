//! API mode definitions.
//!
//! Paymentwall exposes three API personalities that decide which product
//! fields a widget carries and which fields a pingback must contain.

use serde::{Deserialize, Serialize};

/// Widget controller for virtual currency widgets.
pub const VIRTUAL_CURRENCY_CONTROLLER: &str = "ps";

/// Widget controller for digital goods and subscription widgets.
pub const DIGITAL_GOODS_CONTROLLER: &str = "subscription";

/// Widget controller for cart widgets and the newer single-page widgets.
pub const CART_CONTROLLER: &str = "cart";

/// Paymentwall API mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiMode {
    /// Virtual currency: the user buys an amount of in-app currency.
    VirtualCurrency,

    /// Digital goods: a single fixed-price or subscription product.
    DigitalGoods,

    /// Cart: several products checked out together.
    Cart,
}

impl ApiMode {
    /// Returns the numeric API type used by the vendor.
    pub fn code(&self) -> u8 {
        match self {
            ApiMode::VirtualCurrency => 1,
            ApiMode::DigitalGoods => 2,
            ApiMode::Cart => 3,
        }
    }

    /// Returns the display name for this mode.
    pub fn display_name(&self) -> &'static str {
        match self {
            ApiMode::VirtualCurrency => "Virtual Currency",
            ApiMode::DigitalGoods => "Digital Goods",
            ApiMode::Cart => "Cart",
        }
    }

    /// Returns the widget controller path segment for this mode.
    pub fn controller(&self) -> &'static str {
        match self {
            ApiMode::VirtualCurrency => VIRTUAL_CURRENCY_CONTROLLER,
            ApiMode::DigitalGoods => DIGITAL_GOODS_CONTROLLER,
            ApiMode::Cart => CART_CONTROLLER,
        }
    }
}

impl std::fmt::Display for ApiMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
