//! End-to-end widget tests.
//!
//! Builds widget URLs and embed code through a client and checks the
//! resulting query against an independently computed signature.

use rust_decimal_macros::dec;

use paymentwall::domain::client::Client;
use paymentwall::domain::foundation::ApiMode;
use paymentwall::domain::product::{PeriodType, Product};
use paymentwall::domain::signing::{sign, ParameterSet, SignatureVersion};
use paymentwall::domain::widget::{Widget, WidgetError};

// =============================================================================
// Helpers
// =============================================================================

fn query_of(url: &str) -> ParameterSet {
    let (_, query) = url.split_once('?').unwrap();
    ParameterSet::from_query(query).unwrap()
}

fn fixed_product() -> Product {
    Product::builder("p")
        .amount(dec!(5.0))
        .currency_code("USD")
        .name("N")
        .build()
        .unwrap()
}

// =============================================================================
// URLs
// =============================================================================

#[test]
fn goods_widget_url_round_trips_its_signature() {
    let mut client = Client::new("k", "s", ApiMode::DigitalGoods);
    let widget = Widget::new("u2", "pw", vec![fixed_product()])
        .with_extras(ParameterSet::new().with("email", "user@hostname.com"));

    let url = widget.url(&mut client).unwrap();

    assert!(url.starts_with("https://api.paymentwall.com/api/subscription?"));
    let params = query_of(&url);
    assert_eq!(params.get_scalar("email"), Some("user@hostname.com"));
    assert_eq!(params.get_scalar("amount"), Some("5"));
    let expected = sign(&params.without("sign"), client.secret_key(), SignatureVersion::V3).unwrap();
    assert_eq!(params.get_scalar("sign"), Some(expected.as_str()));
}

#[test]
fn single_page_widget_codes_use_cart_controller() {
    let mut client = Client::new("k", "s", ApiMode::VirtualCurrency);

    let url = Widget::new("u", "w1", vec![]).url(&mut client).unwrap();

    assert!(url.starts_with("https://api.paymentwall.com/api/cart?"));
}

#[test]
fn virtual_currency_widget_uses_ps_controller() {
    let mut client = Client::new("k", "s", ApiMode::VirtualCurrency);

    let url = Widget::new("u", "p1_1", vec![]).url(&mut client).unwrap();

    assert!(url.starts_with("https://api.paymentwall.com/api/ps?"));
}

#[test]
fn cart_widget_lists_every_product() {
    let mut client = Client::new("k", "s", ApiMode::Cart);
    let second = Product::builder("q").amount(dec!(1.5)).build().unwrap();

    let url = Widget::new("u", "p1", vec![fixed_product(), second])
        .url(&mut client)
        .unwrap();
    let params = query_of(&url);

    assert_eq!(params.get_scalar("external_ids[0]"), None);
    let ids = params.get("external_ids").and_then(|v| v.as_sequence()).unwrap();
    assert_eq!(ids, &["p".to_string(), "q".to_string()][..]);
    assert_eq!(params.get_scalar("sign_version"), Some("2"));
}

#[test]
fn trial_subscription_fills_post_trial_fields() {
    let mut client = Client::new("k", "s", ApiMode::DigitalGoods);
    let trial = Product::builder("trial")
        .amount(dec!(1))
        .currency_code("USD")
        .subscription(3, PeriodType::Day)
        .build()
        .unwrap();
    let product = Product::builder("monthly")
        .amount(dec!(9.99))
        .currency_code("USD")
        .name("Monthly")
        .subscription(1, PeriodType::Month)
        .recurring(true)
        .trial(trial)
        .build()
        .unwrap();

    let params = query_of(&Widget::new("u", "p1", vec![product]).url(&mut client).unwrap());

    assert_eq!(params.get_scalar("ag_external_id"), Some("trial"));
    assert_eq!(params.get_scalar("ag_trial"), Some("1"));
    assert_eq!(params.get_scalar("ag_post_trial_external_id"), Some("monthly"));
    assert_eq!(params.get_scalar("post_trial_amount"), Some("9.99"));
}

// =============================================================================
// Errors and embed code
// =============================================================================

#[test]
fn two_goods_products_fail_and_are_recorded() {
    let mut client = Client::new("k", "s", ApiMode::DigitalGoods);
    let widget = Widget::new("u", "p1", vec![fixed_product(), fixed_product()]);

    assert_eq!(
        widget.html(&mut client, &[]),
        Err(WidgetError::InvalidProductCount(2))
    );
    assert_eq!(client.diagnostics().len(), 1);

    widget.url(&mut client).unwrap_err();
    assert_eq!(client.diagnostics().len(), 2);
}

#[test]
fn html_escapes_caller_attributes() {
    let mut client = Client::new("k", "s", ApiMode::DigitalGoods);
    let widget = Widget::new("u2", "pw", vec![fixed_product()]);

    let html = widget
        .html(&mut client, &[("onload", r#"alert("X")"#), ("width", "100%")])
        .unwrap();

    assert!(html.contains(r#"onload="alert(&#34;X&#34;)""#));
    assert!(html.contains(r#"width="100%""#));
    assert!(html.contains(r#"height="800""#));
    assert!(html.ends_with("></iframe>"));
}
