//! Inbound pingback validation.
//!
//! Three gates run in order: required parameters, source address, then
//! signature. The structural gate reports every missing key; the other gates
//! stop at their first failure. Failures accumulate as messages on the
//! pingback rather than as errors.

use crate::domain::client::Client;
use crate::domain::foundation::{Diagnostics, StateMachine};
use crate::domain::product::{PeriodType, Product, ProductError, ProductType};
use crate::domain::signing::{
    sign_with_version_number, signatures_match, ParamValue, ParameterSet, SignatureVersion,
    SIGN_VERSION_PARAM,
};

use super::ip_whitelist::is_whitelisted;
use super::pingback_type::PingbackType;
use super::state::PingbackState;

/// Parameter carrying the inbound signature.
pub const SIG_PARAM: &str = "sig";

/// Recorded when the source address is not a gateway address.
pub const IP_NOT_WHITELISTED: &str = "IP address is not whitelisted";

/// Recorded when the signature does not verify.
pub const WRONG_SIGNATURE: &str = "Wrong signature";

/// An inbound pingback bound to the client that receives it.
#[derive(Debug, Clone)]
pub struct Pingback<'c> {
    client: &'c Client,
    params: ParameterSet,
    ip_address: String,
    required_fields: Option<Vec<String>>,
    errors: Diagnostics,
    state: PingbackState,
}

impl<'c> Pingback<'c> {
    pub fn new(client: &'c Client, params: ParameterSet, ip_address: impl Into<String>) -> Self {
        Self {
            client,
            params,
            ip_address: ip_address.into(),
            required_fields: None,
            errors: Diagnostics::new(),
            state: PingbackState::Start,
        }
    }

    /// Replaces the mode's required parameter list, e.g. to also demand
    /// `slength` and `speriod` for subscription pingbacks.
    pub fn with_required_fields<S: AsRef<str>>(mut self, fields: &[S]) -> Self {
        self.required_fields = Some(fields.iter().map(|f| f.as_ref().to_string()).collect());
        self
    }

    /// Runs every gate. Returns true only if all of them pass.
    ///
    /// `skip_ip_whitelist` bypasses the address gate for local testing.
    /// Calling this again restarts the gates; earlier messages are kept.
    pub fn validate(&mut self, skip_ip_whitelist: bool) -> bool {
        self.state = PingbackState::Start;

        self.advance(PingbackState::StructuralCheck);
        if !self.check_required_params() {
            return self.reject();
        }

        self.advance(PingbackState::IpCheck);
        if !skip_ip_whitelist && !is_whitelisted(&self.ip_address) {
            self.errors.record(IP_NOT_WHITELISTED);
            return self.reject();
        }

        self.advance(PingbackState::SignatureCheck);
        if !self.is_signature_valid() {
            self.errors.record(WRONG_SIGNATURE);
            return self.reject();
        }

        self.advance(PingbackState::Valid);
        tracing::info!(
            reference_id = self.reference_id().unwrap_or_default(),
            type_code = ?self.type_code(),
            mode = %self.client.api_mode(),
            "Pingback validated"
        );
        true
    }

    fn advance(&mut self, next: PingbackState) {
        match self.state.transition_to(next) {
            Ok(state) => self.state = state,
            Err(e) => {
                tracing::error!(error = %e, "Pingback state machine out of order");
                self.state = PingbackState::Invalid;
            }
        }
    }

    fn reject(&mut self) -> bool {
        let gate = self.state;
        self.advance(PingbackState::Invalid);
        tracing::warn!(
            gate = ?gate,
            ip_address = %self.ip_address,
            mode = %self.client.api_mode(),
            errors = %self.errors.summary(),
            "Pingback rejected"
        );
        false
    }

    fn check_required_params(&mut self) -> bool {
        let missing: Vec<String> = match &self.required_fields {
            Some(fields) => fields
                .iter()
                .filter(|field| !self.params.contains_key(field))
                .cloned()
                .collect(),
            None => self
                .client
                .field_table()
                .required_pingback_fields
                .iter()
                .filter(|field| !self.params.contains_key(field))
                .map(|field| field.to_string())
                .collect(),
        };

        for key in &missing {
            self.errors.record(format!("Parameter {} is missing", key));
        }
        missing.is_empty()
    }

    /// Resolves the verification version: explicit `sign_version`, else the
    /// mode default.
    fn signature_version(&self) -> i64 {
        self.params
            .get(SIGN_VERSION_PARAM)
            .and_then(ParamValue::parse_int)
            .unwrap_or_else(|| self.client.field_table().default_pingback_version.number())
    }

    /// Returns the parameters the signature covers for `version`.
    fn signed_params(&self, version: i64) -> ParameterSet {
        let unsigned = self.params.without(SIG_PARAM);
        let fields = SignatureVersion::try_from(version)
            .ok()
            .and_then(|v| self.client.field_table().pingback_signed_fields(v));

        match fields {
            Some(fields) => unsigned.select(fields),
            None => unsigned,
        }
    }

    fn is_signature_valid(&self) -> bool {
        let Some(provided) = self.params.get_scalar(SIG_PARAM) else {
            return false;
        };

        let version = self.signature_version();
        let signed = self.signed_params(version);

        match sign_with_version_number(&signed, self.client.secret_key(), version) {
            Ok(expected) => signatures_match(&expected, provided),
            Err(e) => {
                tracing::debug!(version, "Pingback signature could not be computed: {}", e);
                false
            }
        }
    }

    pub fn client(&self) -> &'c Client {
        self.client
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn ip_address(&self) -> &str {
        &self.ip_address
    }

    pub fn state(&self) -> PingbackState {
        self.state
    }

    pub fn is_valid(&self) -> bool {
        self.state.is_valid()
    }

    pub fn errors(&self) -> &Diagnostics {
        &self.errors
    }

    /// Returns all validation messages joined by newlines.
    pub fn error_summary(&self) -> String {
        self.errors.summary()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.params.get_scalar("uid")
    }

    /// Returns the numeric `type` field, if present and numeric.
    pub fn type_code(&self) -> Option<i64> {
        self.params.get("type").and_then(ParamValue::parse_int)
    }

    pub fn pingback_type(&self) -> Option<PingbackType> {
        self.type_code().map(PingbackType::from_code)
    }

    pub fn reference_id(&self) -> Option<&str> {
        self.params.get_scalar("ref")
    }

    /// Virtual currency amount credited by the pingback.
    pub fn vc_amount(&self) -> Option<&str> {
        self.params.get_scalar("currency")
    }

    pub fn product_id(&self) -> Option<&str> {
        self.params.get_scalar("goodsid")
    }

    /// Rebuilds the digital goods product.
    ///
    /// A positive `slength` makes it a subscription of `slength` `speriod`s.
    /// Amount, currency and name are not carried by pingbacks.
    ///
    /// # Errors
    ///
    /// - `InvalidPeriodType` - `speriod` is not day, week, month or year
    /// - `MissingPeriodType` - positive `slength` without `speriod`
    pub fn product(&self) -> Result<Product, ProductError> {
        let length = self
            .params
            .get("slength")
            .and_then(ParamValue::parse_int)
            .and_then(|length| u32::try_from(length).ok())
            .unwrap_or(0);

        let builder = Product::builder(self.product_id().unwrap_or_default());
        if length == 0 {
            return builder.build();
        }

        let period_type = self
            .params
            .get_scalar("speriod")
            .filter(|unit| !unit.is_empty())
            .map(str::parse::<PeriodType>)
            .transpose()?;

        builder
            .product_type(ProductType::Subscription)
            .period_length(length)
            .period_type(period_type)
            .build()
    }

    /// Rebuilds the cart products, one zero-priced product per `goodsid`
    /// element. A scalar `goodsid` yields no products.
    pub fn products(&self) -> Vec<Product> {
        let Some(ids) = self.params.get("goodsid").and_then(ParamValue::as_sequence) else {
            return Vec::new();
        };

        ids.iter()
            .filter_map(|id| Product::builder(id.as_str()).build().ok())
            .collect()
    }

    pub fn is_deliverable(&self) -> bool {
        self.pingback_type().is_some_and(|t| t.is_deliverable())
    }

    pub fn is_cancelable(&self) -> bool {
        self.pingback_type().is_some_and(|t| t.is_cancelable())
    }

    pub fn is_under_review(&self) -> bool {
        self.pingback_type().is_some_and(|t| t.is_under_review())
    }

    /// Identifier for de-duplicating deliveries: `<ref>_<type>`, or just
    /// `<ref>` when the type is not numeric.
    pub fn unique_id(&self) -> Option<String> {
        let reference = self.reference_id()?;
        Some(match self.type_code() {
            Some(code) => format!("{}_{}", reference, code),
            None => reference.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ApiMode;
    use crate::domain::signing::sign;

    const GATEWAY_IP: &str = "174.36.92.186";

    fn signed_vc_params(client: &Client) -> ParameterSet {
        let params = ParameterSet::new()
            .with("uid", "u1")
            .with("currency", "100")
            .with("type", "0")
            .with("ref", "r1");
        let sig = sign(&params, client.secret_key(), SignatureVersion::V1).unwrap();
        params.with("sig", sig)
    }

    fn signed_goods_params(client: &Client) -> ParameterSet {
        let params = ParameterSet::new()
            .with("uid", "u1")
            .with("goodsid", "g1")
            .with("slength", "1")
            .with("speriod", "month")
            .with("type", "0")
            .with("ref", "r1");
        let sig = sign(&params, client.secret_key(), SignatureVersion::V1).unwrap();
        params.with("sig", sig).with("is_test", "1")
    }

    // ══════════════════════════════════════════════════════════════
    // Structural gate
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn every_missing_key_is_reported() {
        let client = Client::new("k", "s", ApiMode::DigitalGoods);
        let mut pingback = Pingback::new(&client, ParameterSet::new(), "1.2.3.4");

        assert!(!pingback.validate(true));
        assert_eq!(
            pingback.errors().entries(),
            &[
                "Parameter uid is missing",
                "Parameter goodsid is missing",
                "Parameter type is missing",
                "Parameter ref is missing",
                "Parameter sig is missing",
            ]
        );
        assert_eq!(pingback.state(), PingbackState::Invalid);
    }

    #[test]
    fn virtual_currency_requires_currency() {
        let client = Client::new("k", "s", ApiMode::VirtualCurrency);
        let params = ParameterSet::new()
            .with("uid", "u")
            .with("type", "0")
            .with("ref", "r")
            .with("sig", "x");
        let mut pingback = Pingback::new(&client, params, GATEWAY_IP);

        assert!(!pingback.validate(false));
        assert_eq!(pingback.error_summary(), "Parameter currency is missing");
    }

    #[test]
    fn required_fields_can_be_overridden() {
        let client = Client::new("k", "s", ApiMode::DigitalGoods);
        let params = signed_goods_params(&client).without("slength");
        let mut pingback = Pingback::new(&client, params, GATEWAY_IP).with_required_fields(&[
            "uid", "goodsid", "slength", "speriod", "type", "ref", "sig",
        ]);

        assert!(!pingback.validate(false));
        assert_eq!(pingback.error_summary(), "Parameter slength is missing");
    }

    // ══════════════════════════════════════════════════════════════
    // IP gate
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn unknown_address_stops_before_signature() {
        let client = Client::new("k", "s", ApiMode::VirtualCurrency);
        let mut pingback = Pingback::new(&client, signed_vc_params(&client), "8.8.8.8");

        assert!(!pingback.validate(false));
        assert_eq!(pingback.error_summary(), IP_NOT_WHITELISTED);
    }

    #[test]
    fn skipping_whitelist_accepts_any_address() {
        let client = Client::new("k", "s", ApiMode::VirtualCurrency);
        let mut pingback = Pingback::new(&client, signed_vc_params(&client), "8.8.8.8");

        assert!(pingback.validate(true));
        assert!(pingback.errors().is_empty());
    }

    // ══════════════════════════════════════════════════════════════
    // Signature gate
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn v1_signature_covers_only_mode_fields() {
        let client = Client::new("k", "s", ApiMode::DigitalGoods);
        let mut pingback = Pingback::new(&client, signed_goods_params(&client), GATEWAY_IP);

        assert!(pingback.validate(false), "{}", pingback.error_summary());
        assert_eq!(pingback.state(), PingbackState::Valid);
        assert!(pingback.is_valid());
    }

    #[test]
    fn tampered_field_fails_signature() {
        let client = Client::new("k", "s", ApiMode::VirtualCurrency);
        let params = signed_vc_params(&client).with("currency", "1000");
        let mut pingback = Pingback::new(&client, params, GATEWAY_IP);

        assert!(!pingback.validate(false));
        assert_eq!(pingback.error_summary(), WRONG_SIGNATURE);
    }

    #[test]
    fn other_secret_fails_signature() {
        let signer = Client::new("k", "s", ApiMode::VirtualCurrency);
        let receiver = Client::new("k", "other", ApiMode::VirtualCurrency);
        let mut pingback = Pingback::new(&receiver, signed_vc_params(&signer), GATEWAY_IP);

        assert!(!pingback.validate(false));
    }

    #[test]
    fn explicit_v3_signs_all_but_sig() {
        let client = Client::new("k", "s", ApiMode::VirtualCurrency);
        let params = ParameterSet::new()
            .with("uid", "u1")
            .with("currency", "5")
            .with("type", "1")
            .with("ref", "r")
            .with("sign_version", "3")
            .with("extra", "x");
        let sig = sign(&params, client.secret_key(), SignatureVersion::V3).unwrap();
        let mut pingback = Pingback::new(&client, params.with("sig", sig), GATEWAY_IP);

        assert!(pingback.validate(false), "{}", pingback.error_summary());
    }

    #[test]
    fn unsupported_version_is_wrong_signature() {
        let client = Client::new("k", "s", ApiMode::VirtualCurrency);
        let params = signed_vc_params(&client).with("sign_version", "9");
        let mut pingback = Pingback::new(&client, params, GATEWAY_IP);

        assert!(!pingback.validate(false));
        assert_eq!(pingback.error_summary(), WRONG_SIGNATURE);
    }

    #[test]
    fn empty_secret_is_wrong_signature() {
        let client = Client::new("k", "", ApiMode::VirtualCurrency);
        let params = ParameterSet::new()
            .with("uid", "u")
            .with("currency", "1")
            .with("type", "0")
            .with("ref", "r")
            .with("sig", "x");
        let mut pingback = Pingback::new(&client, params, GATEWAY_IP);

        assert!(!pingback.validate(false));
        assert_eq!(pingback.error_summary(), WRONG_SIGNATURE);
    }

    #[test]
    fn revalidation_appends_messages() {
        let client = Client::new("k", "s", ApiMode::VirtualCurrency);
        let params = signed_vc_params(&client).with("sig", "bad");
        let mut pingback = Pingback::new(&client, params, "8.8.8.8");

        assert!(!pingback.validate(true));
        assert!(!pingback.validate(false));
        assert_eq!(
            pingback.errors().entries(),
            &[WRONG_SIGNATURE, IP_NOT_WHITELISTED]
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Accessors
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn accessors_read_params() {
        let client = Client::new("k", "s", ApiMode::VirtualCurrency);
        let pingback = Pingback::new(&client, signed_vc_params(&client), GATEWAY_IP);

        assert_eq!(pingback.user_id(), Some("u1"));
        assert_eq!(pingback.vc_amount(), Some("100"));
        assert_eq!(pingback.reference_id(), Some("r1"));
        assert_eq!(pingback.type_code(), Some(0));
        assert!(pingback.is_deliverable());
        assert_eq!(pingback.unique_id(), Some("r1_0".to_string()));
    }

    #[test]
    fn unique_id_without_numeric_type_is_reference() {
        let client = Client::new("k", "s", ApiMode::VirtualCurrency);
        let params = ParameterSet::new().with("ref", "r9").with("type", "x");
        let pingback = Pingback::new(&client, params, GATEWAY_IP);

        assert_eq!(pingback.unique_id(), Some("r9".to_string()));
        assert!(!pingback.is_deliverable());
        assert!(!pingback.is_cancelable());
        assert!(!pingback.is_under_review());
    }

    #[test]
    fn classification_follows_type_code() {
        let client = Client::new("k", "s", ApiMode::VirtualCurrency);
        let with_type =
            |code: &str| Pingback::new(&client, ParameterSet::new().with("type", code), GATEWAY_IP);

        assert!(with_type("202").is_cancelable());
        assert!(with_type("200").is_under_review());
        assert!(with_type("201").is_deliverable());
        let other = with_type("203");
        assert!(!other.is_deliverable() && !other.is_cancelable() && !other.is_under_review());
    }

    #[test]
    fn product_is_subscription_when_length_positive() {
        let client = Client::new("k", "s", ApiMode::DigitalGoods);
        let pingback = Pingback::new(&client, signed_goods_params(&client), GATEWAY_IP);

        let product = pingback.product().unwrap();

        assert_eq!(product.id(), "g1");
        assert_eq!(product.product_type(), ProductType::Subscription);
        assert_eq!(product.period_length(), 1);
        assert_eq!(product.period_type(), Some(PeriodType::Month));
        assert!(product.amount().is_zero());
    }

    #[test]
    fn product_is_fixed_without_length() {
        let client = Client::new("k", "s", ApiMode::DigitalGoods);
        let params = ParameterSet::new().with("goodsid", "g2").with("slength", "0");
        let pingback = Pingback::new(&client, params, GATEWAY_IP);

        let product = pingback.product().unwrap();

        assert_eq!(product.product_type(), ProductType::Fixed);
        assert_eq!(product.period_type(), None);
    }

    #[test]
    fn product_with_unknown_period_fails() {
        let client = Client::new("k", "s", ApiMode::DigitalGoods);
        let params = ParameterSet::new()
            .with("goodsid", "g")
            .with("slength", "2")
            .with("speriod", "fortnight");
        let pingback = Pingback::new(&client, params, GATEWAY_IP);

        assert_eq!(
            pingback.product(),
            Err(ProductError::InvalidPeriodType("fortnight".to_string()))
        );
    }

    #[test]
    fn product_with_missing_period_fails() {
        let client = Client::new("k", "s", ApiMode::DigitalGoods);
        let params = ParameterSet::new().with("goodsid", "g").with("slength", "2");
        let pingback = Pingback::new(&client, params, GATEWAY_IP);

        assert_eq!(pingback.product(), Err(ProductError::MissingPeriodType(2)));
    }

    #[test]
    fn cart_products_follow_goodsid_sequence() {
        let client = Client::new("k", "s", ApiMode::Cart);
        let params = ParameterSet::new().with("goodsid", vec!["p1", "p2"]);
        let pingback = Pingback::new(&client, params, GATEWAY_IP);

        let products = pingback.products();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id(), "p1");
        assert_eq!(products[1].id(), "p2");
        assert!(products.iter().all(|p| p.amount().is_zero()));
    }

    #[test]
    fn scalar_goodsid_yields_no_cart_products() {
        let client = Client::new("k", "s", ApiMode::Cart);
        let params = ParameterSet::new().with("goodsid", "p1");
        let pingback = Pingback::new(&client, params, GATEWAY_IP);

        assert!(pingback.products().is_empty());
    }
}
