//! Order Aggregate
//!
//! Read-only snapshot of an order as the analytics engine sees it.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use crate::domain::value_objects::Money;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub items: Vec<LineItem>,
    pub total: Money,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: Option<Uuid>,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub category: Option<String>,
    pub is_featured: Option<bool>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus { #[default] Pending, Paid, Completed, Cancelled }

impl OrderStatus {
    pub const QUALIFYING: [OrderStatus; 2] = [Self::Paid, Self::Completed];

    pub fn is_qualifying(&self) -> bool { Self::QUALIFYING.contains(self) }

    pub fn as_str(&self) -> &'static str {
        match self { Self::Pending => "pending", Self::Paid => "paid", Self::Completed => "completed", Self::Cancelled => "cancelled" }
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)] pub struct UnknownStatus(pub String);
impl std::error::Error for UnknownStatus {}
impl std::fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "Unknown order status '{}'", self.0) }
}

impl Order {
    pub fn is_qualifying(&self) -> bool { self.status.is_qualifying() }

    /// UTC calendar day the order is bucketed into.
    pub fn created_date(&self) -> NaiveDate { self.created_at.date_naive() }
}

impl LineItem {
    pub fn revenue(&self) -> Decimal { self.unit_price * Decimal::from(self.quantity) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    #[test]
    fn test_qualifying_statuses() {
        assert!(OrderStatus::Paid.is_qualifying());
        assert!(OrderStatus::Completed.is_qualifying());
        assert!(!OrderStatus::Pending.is_qualifying());
        assert!(!OrderStatus::Cancelled.is_qualifying());
    }
    #[test]
    fn test_status_round_trips_through_str() {
        for s in ["pending", "paid", "completed", "cancelled"] { assert_eq!(s.parse::<OrderStatus>().unwrap().as_str(), s); }
        assert!("refunded".parse::<OrderStatus>().is_err());
    }
    #[test]
    fn test_line_revenue_and_bucket_day() {
        let item = LineItem { product_id: None, name: "Widget".into(), unit_price: Decimal::new(1999, 2), quantity: 3, category: None, is_featured: None };
        assert_eq!(item.revenue(), Decimal::new(5997, 2));
        let order = Order { id: Uuid::new_v4(), items: vec![item], total: Money::default(), status: OrderStatus::Paid, created_at: Utc.with_ymd_and_hms(2024, 3, 9, 23, 59, 59).unwrap() };
        assert_eq!(order.created_date(), NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    }
}
