//! Read interfaces to the order and catalog collaborators.

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::analytics::Window;
use crate::domain::{Order, Product};
use crate::Result;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Paid or completed orders created within `window`, oldest first.
    async fn find_qualifying(&self, window: &Window) -> Result<Vec<Order>>;

    /// All-time totals over paid or completed orders.
    async fn summarize_qualifying(&self) -> Result<SummaryTotals>;
}

/// Totals computed by the store, not by loading every order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryTotals {
    pub orders: u64,
    pub items: u64,
    pub revenue: Decimal,
    /// Currency of the oldest qualifying order, if any
    pub currency: Option<String>,
}

/// Lookups return `Ok(None)` when nothing matches.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>>;

    /// Exact name match ignoring case.
    async fn find_by_name_case_insensitive(&self, name: &str) -> Result<Option<Product>>;
}
