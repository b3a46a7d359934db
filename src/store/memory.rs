//! In-process store, used when no database is configured and in tests.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{OrderStore, ProductCatalog, SummaryTotals};
use crate::analytics::Window;
use crate::domain::{LineItem, Money, Order, OrderStatus, Product};
use crate::Result;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    orders: Vec<Order>,
    products: Vec<Product>,
}

impl MemoryStore {
    pub fn new(mut orders: Vec<Order>, products: Vec<Product>) -> Self {
        orders.sort_by_key(|o| o.created_at);
        Self { orders, products }
    }

    /// Demo catalog plus four orders placed 10, 6, 3 and 1 days before `now`.
    pub fn demo(now: DateTime<Utc>) -> Self {
        let products = vec![
            Product::new("Classic Black T-Shirt", Some("men"), true),
            Product::new("Women's White Blouse", Some("women"), false),
            Product::new("Kids' Colorful Hoodie", Some("kids"), true),
            Product::new("Sports Socks Pack", Some("accessories"), false),
        ];

        let line = |name: &str, cents: i64, quantity: u32, category: &str, featured: bool| LineItem {
            product_id: None,
            name: name.to_string(),
            unit_price: Decimal::new(cents, 2),
            quantity,
            category: Some(category.to_string()),
            is_featured: Some(featured),
        };
        let placed = |days_ago: i64, status: OrderStatus, items: Vec<LineItem>| {
            let total = items.iter().map(LineItem::revenue).sum();
            Order {
                id: Uuid::now_v7(),
                items,
                total: Money::usd(total),
                status,
                created_at: now - Duration::days(days_ago),
            }
        };

        let orders = vec![
            placed(10, OrderStatus::Paid, vec![
                line("Classic Black T-Shirt", 2499, 2, "men", true),
                line("Women's White Blouse", 3999, 1, "women", false),
            ]),
            placed(6, OrderStatus::Completed, vec![
                line("Kids' Colorful Hoodie", 3499, 1, "kids", true),
                line("Sports Socks Pack", 1999, 3, "accessories", false),
            ]),
            placed(3, OrderStatus::Paid, vec![line("Classic Black T-Shirt", 2499, 1, "men", false)]),
            placed(1, OrderStatus::Completed, vec![line("Sports Socks Pack", 1999, 2, "accessories", false)]),
        ];

        Self::new(orders, products)
    }

    pub fn order_count(&self) -> usize { self.orders.len() }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn find_qualifying(&self, window: &Window) -> Result<Vec<Order>> {
        Ok(self
            .orders
            .iter()
            .filter(|o| o.is_qualifying() && window.contains(o.created_at))
            .cloned()
            .collect())
    }

    async fn summarize_qualifying(&self) -> Result<SummaryTotals> {
        let qualifying: Vec<&Order> = self.orders.iter().filter(|o| o.is_qualifying()).collect();
        let items = qualifying.iter().flat_map(|o| &o.items);

        Ok(SummaryTotals {
            orders: qualifying.len() as u64,
            items: items.clone().map(|i| u64::from(i.quantity)).sum(),
            revenue: items.map(LineItem::revenue).sum(),
            currency: qualifying.first().map(|o| o.total.currency().to_string()),
        })
    }
}

#[async_trait]
impl ProductCatalog for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>> {
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_name_case_insensitive(&self, name: &str) -> Result<Option<Product>> {
        Ok(self.products.iter().find(|p| p.name_matches(name)).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WindowParams;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_demo_orders_inside_default_window() {
        let now = Utc.with_ymd_and_hms(2024, 8, 1, 9, 0, 0).unwrap();
        let store = MemoryStore::demo(now);
        let window = Window::resolve(&WindowParams::default(), now);

        assert_eq!(store.order_count(), 4);
        assert_eq!(store.find_qualifying(&window).await.unwrap().len(), 4);

        let narrow = Window::resolve(&WindowParams::new(Some("2"), None, None), now);
        assert_eq!(store.find_qualifying(&narrow).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_catalog_lookups() {
        let store = MemoryStore::demo(Utc::now());
        let shirt = store.find_by_name_case_insensitive("CLASSIC black t-shirt").await.unwrap().unwrap();
        assert_eq!(shirt.category(), Some("men"));
        assert_eq!(store.find_by_id(shirt.id).await.unwrap(), Some(shirt));
        assert_eq!(store.find_by_id(Uuid::new_v4()).await.unwrap(), None);
        assert_eq!(store.find_by_name_case_insensitive("Classic").await.unwrap(), None);
    }
}
