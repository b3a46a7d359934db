//! All-time sales summary for the dashboard header cards.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::store::OrderStore;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub total_orders: u64,
    pub items_sold: u64,
    /// Revenue (unit price × quantity); no cost data is tracked
    pub total_profit: Decimal,
    pub currency: String,
}

pub async fn sales_summary(store: &dyn OrderStore) -> Result<SalesSummary> {
    let totals = store.summarize_qualifying().await?;

    Ok(SalesSummary {
        total_orders: totals.orders,
        items_sold: totals.items,
        total_profit: totals.revenue,
        currency: totals.currency.unwrap_or_else(|| "USD".to_string()),
    })
}
