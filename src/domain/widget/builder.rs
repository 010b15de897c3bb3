//! Widget parameter assembly.
//!
//! Builds the outbound parameter set for a checkout widget and signs it.
//! Field order: identity, mode-specific product fields, caller extras,
//! `sign_version`, then `sign`.

use crate::domain::client::Client;
use crate::domain::foundation::ApiMode;
use crate::domain::product::Product;
use crate::domain::signing::{
    sign_with_version_number, ParamValue, ParameterSet, SIGN_VERSION_PARAM,
};

use super::errors::WidgetError;

/// Parameter name carrying the computed widget signature.
pub const SIGN_PARAM: &str = "sign";

/// Maximum number of products for the digital goods API.
pub const DIGITAL_GOODS_PRODUCT_LIMIT: usize = 1;

/// A fully assembled and signed widget parameter set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedParams {
    /// Every parameter, including `sign_version` and `sign`.
    pub params: ParameterSet,
    /// The signature stored under `sign`.
    pub signature: String,
}

/// Assembles and signs the widget parameters.
///
/// # Errors
///
/// - `InvalidProductCount` - more than one product in digital goods mode
/// - `Signature` - empty secret or unsupported `sign_version` override
///
/// Both are also recorded in the client's diagnostics log.
pub fn build_params(
    client: &mut Client,
    user_id: &str,
    widget_code: &str,
    products: &[Product],
    extras: &ParameterSet,
) -> Result<SignedParams, WidgetError> {
    let mode = client.api_mode();
    let mut params = ParameterSet::new()
        .with("key", client.app_key())
        .with("uid", user_id)
        .with("widget", widget_code);

    match mode {
        ApiMode::DigitalGoods => {
            if products.len() > DIGITAL_GOODS_PRODUCT_LIMIT {
                tracing::warn!(
                    product_count = products.len(),
                    "Digital goods widget accepts a single product"
                );
                client.record_error(
                    "only one product allowed for the digital goods API",
                );
                return Err(WidgetError::InvalidProductCount(products.len()));
            }
            if let Some(product) = products.first() {
                push_goods_fields(&mut params, product);
            }
        }
        ApiMode::Cart => push_cart_fields(&mut params, products),
        ApiMode::VirtualCurrency => {}
    }

    params.merge(extras);
    params.remove(SIGN_PARAM);

    let version = extras
        .get(SIGN_VERSION_PARAM)
        .and_then(ParamValue::parse_int)
        .unwrap_or_else(|| client.field_table().default_widget_version.number());
    params.insert(SIGN_VERSION_PARAM, version);

    let signature = match sign_with_version_number(&params, client.secret_key(), version) {
        Ok(signature) => signature,
        Err(e) => {
            tracing::warn!(mode = %mode, version, "Widget signing failed: {}", e);
            client.record_error(e.to_string());
            return Err(e.into());
        }
    };
    params.insert(SIGN_PARAM, signature.as_str());

    tracing::debug!(
        mode = %mode,
        version,
        param_count = params.len(),
        "Built widget parameters"
    );

    Ok(SignedParams { params, signature })
}

/// Single-product fields. A trial product takes the primary slots and the
/// product itself moves to the post-trial slots. Post-trial fields are only
/// sent when the trial is itself a subscription.
fn push_goods_fields(params: &mut ParameterSet, product: &Product) {
    let (primary, post_trial) = match product.trial() {
        Some(trial) => (trial, Some(product)),
        None => (product, None),
    };

    params.insert("amount", primary.amount());
    params.insert("currencyCode", primary.currency_code());
    params.insert("ag_name", primary.name());
    params.insert("ag_external_id", primary.id());
    params.insert("ag_type", primary.product_type().as_str());

    if primary.is_subscription() {
        params.insert("ag_period_length", primary.period_length());
        params.insert("ag_period_type", primary.period_type().map(|p| p.as_str()));
        params.insert("ag_recurring", u8::from(primary.is_recurring()));

        if let Some(original) = post_trial {
            params.insert("ag_trial", 1u8);
            params.insert("ag_post_trial_external_id", original.id());
            params.insert("ag_post_trial_period_length", original.period_length());
            params.insert(
                "ag_post_trial_period_type",
                original.period_type().map(|p| p.as_str()),
            );
            params.insert("ag_post_trial_name", original.name());
            params.insert("post_trial_amount", original.amount());
            params.insert("post_trial_currencyCode", original.currency_code());
        }
    }
}

/// Cart fields: every product gets an id slot, prices and currencies are
/// sparse.
fn push_cart_fields(params: &mut ParameterSet, products: &[Product]) {
    for (index, product) in products.iter().enumerate() {
        params.insert(format!("external_ids[{}]", index), product.id());
        if !product.amount().is_zero() {
            params.insert(format!("prices[{}]", index), product.amount());
        }
        if !product.currency_code().is_empty() {
            params.insert(format!("currencies[{}]", index), product.currency_code());
        }
    }
}
