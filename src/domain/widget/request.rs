//! Widget request: URL and embed code for a checkout widget.

use crate::domain::client::Client;
use crate::domain::foundation::{ApiMode, CART_CONTROLLER};
use crate::domain::product::Product;
use crate::domain::signing::ParameterSet;

use super::builder::{build_params, SignedParams};
use super::errors::WidgetError;
use super::html::render_iframe;

/// Widget code prefixes served by the single-page widgets.
pub const SINGLE_PAGE_WIDGET_PREFIXES: [&str; 3] = ["w", "s", "mw"];

/// A checkout widget for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    user_id: String,
    widget_code: String,
    products: Vec<Product>,
    extras: ParameterSet,
}

impl Widget {
    pub fn new(
        user_id: impl Into<String>,
        widget_code: impl Into<String>,
        products: Vec<Product>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            widget_code: widget_code.into(),
            products,
            extras: ParameterSet::new(),
        }
    }

    /// Adds caller parameters merged over the generated ones.
    pub fn with_extras(mut self, extras: ParameterSet) -> Self {
        self.extras = extras;
        self
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn widget_code(&self) -> &str {
        &self.widget_code
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn extras(&self) -> &ParameterSet {
        &self.extras
    }

    /// Builds and signs the widget parameters.
    ///
    /// # Errors
    ///
    /// See [`build_params`].
    pub fn params(&self, client: &mut Client) -> Result<SignedParams, WidgetError> {
        build_params(
            client,
            &self.user_id,
            &self.widget_code,
            &self.products,
            &self.extras,
        )
    }

    /// Returns the controller path segment for this widget.
    ///
    /// Single-page widget codes always go to the cart controller, as does
    /// every widget in cart mode.
    pub fn controller(&self, mode: ApiMode) -> &'static str {
        let single_page = SINGLE_PAGE_WIDGET_PREFIXES
            .iter()
            .any(|prefix| self.widget_code.starts_with(prefix));

        match mode {
            ApiMode::VirtualCurrency | ApiMode::DigitalGoods if !single_page => mode.controller(),
            _ => CART_CONTROLLER,
        }
    }

    /// Builds the full widget URL.
    ///
    /// # Errors
    ///
    /// See [`build_params`].
    pub fn url(&self, client: &mut Client) -> Result<String, WidgetError> {
        let signed = self.params(client)?;
        Ok(format!(
            "{}/{}?{}",
            client.base_url(),
            self.controller(client.api_mode()),
            signed.params.to_query()
        ))
    }

    /// Renders the iframe embed code.
    ///
    /// # Errors
    ///
    /// See [`build_params`].
    pub fn html(
        &self,
        client: &mut Client,
        attributes: &[(&str, &str)],
    ) -> Result<String, WidgetError> {
        let url = self.url(client)?;
        Ok(render_iframe(&url, attributes))
    }
}
