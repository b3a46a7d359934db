//! Per-day order aggregation
//!
//! Item and revenue totals expand each order into its line items, while the
//! order count maps each order to exactly one day. The two are computed in
//! separate passes over the same order set and merged by day.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use super::window::Window;
use crate::domain::Order;
use crate::store::OrderStore;
use crate::Result;

/// Raw totals for one calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyTotals {
    pub orders: u64,
    pub items: u64,
    pub revenue: Decimal,
}

/// Line-item totals for one calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemTotals {
    pub items: u64,
    pub revenue: Decimal,
}

/// Loads the qualifying orders for `window` and aggregates them per day.
///
/// Only days with at least one qualifying order are present in the result.
pub async fn daily_totals(
    store: &dyn OrderStore,
    window: &Window,
) -> Result<BTreeMap<NaiveDate, DailyTotals>> {
    let orders = qualifying_orders(store, window).await?;

    let items = item_totals_by_day(&orders);
    let counts = order_counts_by_day(&orders);
    debug!(orders = orders.len(), days = counts.len(), "aggregated daily totals");

    Ok(merge_by_day(items, counts))
}

/// Qualifying orders created inside `window`.
///
/// The store query already narrows by status and time; the filter here keeps
/// the aggregates correct for any store implementation.
pub async fn qualifying_orders(store: &dyn OrderStore, window: &Window) -> Result<Vec<Order>> {
    let mut orders = store.find_qualifying(window).await?;
    orders.retain(|o| o.is_qualifying() && window.contains(o.created_at));
    Ok(orders)
}

/// Item-expanded pass: quantity and revenue per day.
pub fn item_totals_by_day(orders: &[Order]) -> BTreeMap<NaiveDate, ItemTotals> {
    let mut by_day: BTreeMap<NaiveDate, ItemTotals> = BTreeMap::new();
    for order in orders {
        let day = by_day.entry(order.created_date()).or_default();
        for item in &order.items {
            day.items += u64::from(item.quantity);
            day.revenue += item.revenue();
        }
    }
    by_day
}

/// Order-level pass: distinct orders per day.
pub fn order_counts_by_day(orders: &[Order]) -> BTreeMap<NaiveDate, u64> {
    let mut by_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for order in orders {
        *by_day.entry(order.created_date()).or_default() += 1;
    }
    by_day
}

pub fn merge_by_day(
    items: BTreeMap<NaiveDate, ItemTotals>,
    counts: BTreeMap<NaiveDate, u64>,
) -> BTreeMap<NaiveDate, DailyTotals> {
    let mut merged: BTreeMap<NaiveDate, DailyTotals> = items
        .into_iter()
        .map(|(day, t)| (day, DailyTotals { orders: 0, items: t.items, revenue: t.revenue }))
        .collect();

    for (day, orders) in counts {
        merged.entry(day).or_default().orders = orders;
    }
    merged
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::{LineItem, Money, OrderStatus};
    use crate::store::MemoryStore;
    use chrono::{DateTime, TimeZone, Utc};
    use uuid::Uuid;

    pub(crate) fn item(price: i64, qty: u32) -> LineItem {
        LineItem {
            product_id: None,
            name: "Widget".into(),
            unit_price: Decimal::new(price, 0),
            quantity: qty,
            category: None,
            is_featured: None,
        }
    }

    pub(crate) fn order(status: OrderStatus, at: DateTime<Utc>, items: Vec<LineItem>) -> Order {
        let total = items.iter().map(LineItem::revenue).sum();
        Order { id: Uuid::new_v4(), items, total: Money::usd(total), status, created_at: at }
    }

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, d, h, 0, 0).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn window(from: &str, to: &str) -> Window {
        Window::resolve(&crate::WindowParams::new(None, Some(from), Some(to)), Utc::now())
    }

    #[test]
    fn test_multi_item_order_counts_once() {
        let orders = vec![order(OrderStatus::Paid, at(3, 9), vec![item(4, 1), item(6, 2), item(1, 5)])];
        let merged = merge_by_day(item_totals_by_day(&orders), order_counts_by_day(&orders));
        assert_eq!(
            merged[&day(3)],
            DailyTotals { orders: 1, items: 8, revenue: Decimal::new(21, 0) }
        );
    }

    #[test]
    fn test_order_without_items_still_counted() {
        let orders = vec![order(OrderStatus::Completed, at(4, 1), vec![])];
        let merged = merge_by_day(item_totals_by_day(&orders), order_counts_by_day(&orders));
        assert_eq!(merged[&day(4)], DailyTotals { orders: 1, items: 0, revenue: Decimal::ZERO });
    }

    #[tokio::test]
    async fn test_single_day_scenario() {
        let store = MemoryStore::new(
            vec![
                order(OrderStatus::Paid, at(7, 8), vec![item(10, 2)]),
                order(OrderStatus::Completed, at(7, 20), vec![item(5, 1)]),
            ],
            vec![],
        );
        let totals = daily_totals(&store, &window("2024-05-07", "2024-05-07")).await.unwrap();
        assert_eq!(totals.len(), 1);
        assert_eq!(
            totals[&day(7)],
            DailyTotals { orders: 2, items: 3, revenue: Decimal::new(25, 0) }
        );
    }

    #[tokio::test]
    async fn test_non_qualifying_and_out_of_window_excluded() {
        let store = MemoryStore::new(
            vec![
                order(OrderStatus::Pending, at(7, 8), vec![item(100, 1)]),
                order(OrderStatus::Cancelled, at(7, 9), vec![item(100, 1)]),
                order(OrderStatus::Paid, at(8, 0), vec![item(100, 1)]),
                order(OrderStatus::Paid, at(7, 10), vec![item(3, 1)]),
            ],
            vec![],
        );
        let totals = daily_totals(&store, &window("2024-05-06", "2024-05-07")).await.unwrap();
        assert_eq!(totals.len(), 1);
        assert_eq!(
            totals[&day(7)],
            DailyTotals { orders: 1, items: 1, revenue: Decimal::new(3, 0) }
        );
    }
}
