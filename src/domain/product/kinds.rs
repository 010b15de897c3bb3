//! Product type and subscription period enums.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::errors::ProductError;

/// Whether a product is a one-off purchase or a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Fixed,
    Subscription,
}

impl ProductType {
    /// Returns the wire name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Fixed => "fixed",
            ProductType::Subscription => "subscription",
        }
    }
}

impl FromStr for ProductType {
    type Err = ProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(ProductType::Fixed),
            "subscription" => Ok(ProductType::Subscription),
            other => Err(ProductError::InvalidProductType(other.to_string())),
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unit of a subscription period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Day,
    Week,
    Month,
    Year,
}

impl PeriodType {
    /// Returns the wire name of this period unit.
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodType::Day => "day",
            PeriodType::Week => "week",
            PeriodType::Month => "month",
            PeriodType::Year => "year",
        }
    }
}

impl FromStr for PeriodType {
    type Err = ProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(PeriodType::Day),
            "week" => Ok(PeriodType::Week),
            "month" => Ok(PeriodType::Month),
            "year" => Ok(PeriodType::Year),
            other => Err(ProductError::InvalidPeriodType(other.to_string())),
        }
    }
}

impl std::fmt::Display for PeriodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
