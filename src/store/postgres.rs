//! Postgres-backed order and catalog reads.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::{OrderStore, ProductCatalog, SummaryTotals};
use crate::analytics::Window;
use crate::domain::{LineItem, Money, Order, OrderStatus, Product};
use crate::{AnalyticsError, Result};

#[derive(Debug, sqlx::FromRow)]
struct OrderRow { id: Uuid, total: Decimal, currency: String, status: String, created_at: DateTime<Utc> }

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow { order_id: Uuid, product_id: Option<Uuid>, name: String, unit_price: Decimal, quantity: i32, category: Option<String>, is_featured: Option<bool> }

#[derive(Debug, sqlx::FromRow)]
struct SummaryRow { orders: i64, items: i64, revenue: Decimal, currency: Option<String> }

#[derive(Debug, sqlx::FromRow)]
struct ProductRow { id: Uuid, name: String, category: Option<String>, is_featured: bool }

impl From<ProductRow> for Product {
    fn from(r: ProductRow) -> Self { Product { id: r.id, name: r.name, category: r.category, is_featured: r.is_featured } }
}

const ORDER_COLUMNS: &str = "SELECT id, total, currency, status, created_at FROM orders WHERE status IN ('paid', 'completed')";

const SUMMARY_SQL: &str = "WITH qualifying AS (SELECT id, currency, created_at FROM orders WHERE status IN ('paid', 'completed')), \
    sold AS (SELECT COALESCE(SUM(i.quantity), 0)::BIGINT AS items, COALESCE(SUM(i.unit_price * i.quantity), 0)::NUMERIC AS revenue \
             FROM order_items i JOIN qualifying q ON q.id = i.order_id) \
    SELECT (SELECT COUNT(*) FROM qualifying) AS orders, sold.items, sold.revenue, \
           (SELECT currency FROM qualifying ORDER BY created_at LIMIT 1) AS currency \
    FROM sold";

#[derive(Clone)]
pub struct PgStore { pool: PgPool }

impl PgStore {
    pub fn new(pool: PgPool) -> Self { Self { pool } }

    /// Attaches line items to `rows`, one query for the whole batch.
    async fn with_items(&self, rows: Vec<OrderRow>) -> Result<Vec<Order>> {
        if rows.is_empty() { return Ok(vec![]); }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let item_rows = sqlx::query_as::<_, OrderItemRow>("SELECT order_id, product_id, name, unit_price, quantity, category, is_featured FROM order_items WHERE order_id = ANY($1) ORDER BY order_id, position")
            .bind(&ids[..]).fetch_all(&self.pool).await?;

        let mut items: HashMap<Uuid, Vec<LineItem>> = HashMap::new();
        for r in item_rows {
            let quantity = u32::try_from(r.quantity).map_err(|_| AnalyticsError::CorruptRecord { order_id: r.order_id, reason: format!("negative quantity {}", r.quantity) })?;
            items.entry(r.order_id).or_default().push(LineItem {
                product_id: r.product_id, name: r.name, unit_price: r.unit_price, quantity, category: r.category, is_featured: r.is_featured,
            });
        }

        rows.into_iter().map(|r| -> Result<Order> {
            let status: OrderStatus = r.status.parse().map_err(|e: crate::domain::UnknownStatus| AnalyticsError::CorruptRecord { order_id: r.id, reason: e.to_string() })?;
            Ok(Order { id: r.id, items: items.remove(&r.id).unwrap_or_default(), total: Money::new(r.total, &r.currency), status, created_at: r.created_at })
        }).collect()
    }
}

#[async_trait]
impl OrderStore for PgStore {
    async fn find_qualifying(&self, window: &Window) -> Result<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!("{ORDER_COLUMNS} AND created_at >= $1 AND created_at <= $2 ORDER BY created_at"))
            .bind(window.start).bind(window.end).fetch_all(&self.pool).await?;
        self.with_items(rows).await
    }

    async fn summarize_qualifying(&self) -> Result<SummaryTotals> {
        let row = sqlx::query_as::<_, SummaryRow>(SUMMARY_SQL).fetch_one(&self.pool).await?;
        Ok(SummaryTotals { orders: row.orders.max(0) as u64, items: row.items.max(0) as u64, revenue: row.revenue, currency: row.currency })
    }
}

#[async_trait]
impl ProductCatalog for PgStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>("SELECT id, name, category, is_featured FROM products WHERE id = $1")
            .bind(id).fetch_optional(&self.pool).await?;
        Ok(row.map(Product::from))
    }

    async fn find_by_name_case_insensitive(&self, name: &str) -> Result<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>("SELECT id, name, category, is_featured FROM products WHERE lower(name) = lower($1) ORDER BY created_at LIMIT 1")
            .bind(name).fetch_optional(&self.pool).await?;
        Ok(row.map(Product::from))
    }
}
