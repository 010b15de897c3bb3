//! Product value object.
//!
//! Describes a priced item sold through a widget or reported by a pingback.
//! Products are immutable once built.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::errors::ProductError;
use super::kinds::{PeriodType, ProductType};

/// A one-off or subscription product.
///
/// # Invariants
///
/// - `amount` has at most two decimal places (rounded half away from zero)
/// - `trial` is only present on recurring subscriptions
/// - subscriptions with a nonzero period length carry a period type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: String,
    amount: Decimal,
    currency_code: String,
    name: String,
    product_type: ProductType,
    period_length: u32,
    period_type: Option<PeriodType>,
    recurring: bool,
    trial: Option<Box<Product>>,
}

impl Product {
    /// Starts building a fixed-price product with the given external id.
    pub fn builder(id: impl Into<String>) -> ProductBuilder {
        ProductBuilder::new(id)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn product_type(&self) -> ProductType {
        self.product_type
    }

    pub fn is_subscription(&self) -> bool {
        self.product_type == ProductType::Subscription
    }

    pub fn period_length(&self) -> u32 {
        self.period_length
    }

    pub fn period_type(&self) -> Option<PeriodType> {
        self.period_type
    }

    pub fn is_recurring(&self) -> bool {
        self.recurring
    }

    /// Returns the trial product, present only on recurring subscriptions.
    pub fn trial(&self) -> Option<&Product> {
        self.trial.as_deref()
    }
}

/// Builder for [`Product`].
#[derive(Debug, Clone)]
pub struct ProductBuilder {
    id: String,
    amount: Decimal,
    currency_code: String,
    name: String,
    product_type: ProductType,
    period_length: u32,
    period_type: Option<PeriodType>,
    recurring: bool,
    trial: Option<Product>,
}

impl ProductBuilder {
    fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            amount: Decimal::ZERO,
            currency_code: String::new(),
            name: String::new(),
            product_type: ProductType::Fixed,
            period_length: 0,
            period_type: None,
            recurring: false,
            trial: None,
        }
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    pub fn currency_code(mut self, code: impl Into<String>) -> Self {
        self.currency_code = code.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn product_type(mut self, product_type: ProductType) -> Self {
        self.product_type = product_type;
        self
    }

    /// Marks the product as a subscription billed every `length` `unit`s.
    pub fn subscription(mut self, length: u32, unit: PeriodType) -> Self {
        self.product_type = ProductType::Subscription;
        self.period_length = length;
        self.period_type = Some(unit);
        self
    }

    pub fn period_length(mut self, length: u32) -> Self {
        self.period_length = length;
        self
    }

    pub fn period_type(mut self, unit: Option<PeriodType>) -> Self {
        self.period_type = unit;
        self
    }

    pub fn recurring(mut self, recurring: bool) -> Self {
        self.recurring = recurring;
        self
    }

    /// Attaches a trial product. Dropped at build time unless the product
    /// is a recurring subscription.
    pub fn trial(mut self, trial: Product) -> Self {
        self.trial = Some(trial);
        self
    }

    /// Validates and builds the product.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::MissingPeriodType` for a subscription with a
    /// nonzero period length and no period type.
    pub fn build(self) -> Result<Product, ProductError> {
        let is_subscription = self.product_type == ProductType::Subscription;

        if is_subscription && self.period_length > 0 && self.period_type.is_none() {
            return Err(ProductError::MissingPeriodType(self.period_length));
        }

        let trial = if is_subscription && self.recurring {
            self.trial.map(Box::new)
        } else {
            None
        };

        Ok(Product {
            id: self.id,
            amount: self
                .amount
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            currency_code: self.currency_code,
            name: self.name,
            product_type: self.product_type,
            period_length: self.period_length,
            period_type: self.period_type,
            recurring: self.recurring,
            trial,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn trial_product() -> Product {
        Product::builder("trial")
            .amount(dec!(0.5))
            .currency_code("USD")
            .name("Trial")
            .build()
            .unwrap()
    }

    // ══════════════════════════════════════════════════════════════
    // Construction
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn fixed_product_keeps_fields() {
        let product = Product::builder("p1")
            .amount(dec!(1.239))
            .currency_code("USD")
            .name("Name")
            .build()
            .unwrap();

        assert_eq!(product.id(), "p1");
        assert_eq!(product.amount(), dec!(1.24));
        assert_eq!(product.currency_code(), "USD");
        assert_eq!(product.name(), "Name");
        assert_eq!(product.product_type(), ProductType::Fixed);
        assert!(!product.is_recurring());
        assert!(product.trial().is_none());
    }

    #[test]
    fn amount_rounds_half_away_from_zero() {
        let rounded = |amount: Decimal| {
            Product::builder("p")
                .amount(amount)
                .build()
                .unwrap()
                .amount()
        };

        assert_eq!(rounded(dec!(9.999)), dec!(10.00));
        assert_eq!(rounded(dec!(12.345)), dec!(12.35));
        assert_eq!(rounded(dec!(12.344)), dec!(12.34));
        assert_eq!(rounded(dec!(0.005)), dec!(0.01));
    }

    #[test]
    fn subscription_without_period_type_fails() {
        let result = Product::builder("s")
            .product_type(ProductType::Subscription)
            .period_length(1)
            .build();

        assert_eq!(result, Err(ProductError::MissingPeriodType(1)));
    }

    #[test]
    fn subscription_with_zero_length_needs_no_period_type() {
        let product = Product::builder("s")
            .product_type(ProductType::Subscription)
            .build()
            .unwrap();

        assert!(product.is_subscription());
        assert_eq!(product.period_type(), None);
    }

    #[test]
    fn fixed_product_ignores_missing_period_type() {
        let result = Product::builder("f").period_length(3).build();
        assert!(result.is_ok());
    }

    // ══════════════════════════════════════════════════════════════
    // Trial retention
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn recurring_subscription_keeps_trial() {
        let product = Product::builder("s")
            .amount(dec!(2.0))
            .currency_code("EUR")
            .subscription(1, PeriodType::Month)
            .recurring(true)
            .trial(trial_product())
            .build()
            .unwrap();

        assert!(product.is_recurring());
        assert_eq!(product.trial(), Some(&trial_product()));
    }

    #[test]
    fn non_recurring_subscription_drops_trial() {
        let product = Product::builder("s")
            .subscription(1, PeriodType::Week)
            .recurring(false)
            .trial(trial_product())
            .build()
            .unwrap();

        assert!(product.trial().is_none());
    }

    #[test]
    fn fixed_product_drops_trial_even_when_recurring() {
        let product = Product::builder("f")
            .recurring(true)
            .trial(trial_product())
            .build()
            .unwrap();

        assert!(product.trial().is_none());
    }
}
