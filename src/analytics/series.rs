//! Dense daily sales series

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use super::aggregate::{daily_totals, DailyTotals};
use super::window::Window;
use crate::store::OrderStore;
use crate::Result;

/// One day of the sales series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub orders: u64,
    pub items: u64,
    pub revenue: Decimal,
}

/// Response of the trend endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TrendReport {
    /// The clamped `days` parameter, echoed even when an explicit range won
    pub days: u32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub series: Vec<SeriesPoint>,
}

/// Fills every day of `window` from the sparse per-day totals.
///
/// Days without data become zero entries, so the result always has exactly
/// `window.days()` points in chronological order.
pub fn compact(window: &Window, totals: &BTreeMap<NaiveDate, DailyTotals>) -> Vec<SeriesPoint> {
    window
        .dates()
        .map(|date| {
            let t = totals.get(&date).copied().unwrap_or_default();
            SeriesPoint { date, orders: t.orders, items: t.items, revenue: t.revenue }
        })
        .collect()
}

pub async fn sales_trend(store: &dyn OrderStore, window: &Window, days: u32) -> Result<TrendReport> {
    let totals = daily_totals(store, window).await?;
    let series = compact(window, &totals);

    info!(
        start = %window.start_date(),
        end = %window.end_date(),
        active_days = totals.len(),
        "built sales trend"
    );

    Ok(TrendReport { days, start: window.start, end: window.end, series })
}
