//! Value Objects for sales analytics

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Money value object
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money { amount: Decimal, currency: String }

impl Money {
    pub fn new(amount: Decimal, currency: &str) -> Self { Self { amount, currency: currency.to_string() } }
    pub fn usd(amount: Decimal) -> Self { Self::new(amount, "USD") }
    pub fn zero(currency: &str) -> Self { Self::new(Decimal::ZERO, currency) }
    pub fn amount(&self) -> Decimal { self.amount }
    pub fn currency(&self) -> &str { &self.currency }
}

impl Default for Money { fn default() -> Self { Self::zero("USD") } }

/// Reporting category.
///
/// Everything outside the catalog's fixed set lands in [`Category::Other`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category { Men, Women, Kids, Accessories, Gvng, Other }

impl Category {
    pub const ALLOWED: [Category; 5] = [Self::Men, Self::Women, Self::Kids, Self::Accessories, Self::Gvng];

    /// Case-sensitive match against the allowed set. `"other"` is a bucket, not a member.
    pub fn parse_allowed(value: &str) -> Option<Self> {
        Self::ALLOWED.into_iter().find(|c| c.as_str() == value)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Men => "men",
            Self::Women => "women",
            Self::Kids => "kids",
            Self::Accessories => "accessories",
            Self::Gvng => "gvng",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}
