//! Category and featured-flag breakdowns

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::aggregate::qualifying_orders;
use super::resolve::{resolve_category, resolve_featured, CatalogLookup};
use super::window::Window;
use crate::domain::{Category, LineItem};
use crate::store::{OrderStore, ProductCatalog};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdown {
    pub category: Category,
    pub items: u64,
    pub revenue: Decimal,
    pub orders: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedBreakdown {
    pub is_featured: bool,
    pub items: u64,
    pub revenue: Decimal,
    pub orders: u64,
}

/// Response of the breakdown endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownReport {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub by_category: Vec<CategoryBreakdown>,
    pub by_featured: Vec<FeaturedBreakdown>,
}

/// Running totals for one group. Orders are a set: one order may put several
/// items into the same group.
#[derive(Debug, Default)]
struct Group {
    items: u64,
    revenue: Decimal,
    orders: HashSet<Uuid>,
}

impl Group {
    fn add(&mut self, order_id: Uuid, item: &LineItem) {
        self.items += u64::from(item.quantity);
        self.revenue += item.revenue();
        self.orders.insert(order_id);
    }
}

struct Grouping<K>(HashMap<K, Group>);

impl<K: Eq + Hash + Ord + Copy> Grouping<K> {
    fn new() -> Self {
        Self(HashMap::new())
    }

    fn add(&mut self, key: K, order_id: Uuid, item: &LineItem) {
        self.0.entry(key).or_default().add(order_id, item);
    }

    /// Counts the order in `key` without adding items or revenue.
    fn touch(&mut self, key: K, order_id: Uuid) {
        self.0.entry(key).or_default().orders.insert(order_id);
    }

    /// Groups by revenue, highest first; ties ordered by key.
    fn into_sorted<T>(self, build: impl Fn(K, Group) -> T) -> Vec<T> {
        let mut groups: Vec<(K, Group)> = self.0.into_iter().collect();
        groups.sort_by(|(ka, a), (kb, b)| b.revenue.cmp(&a.revenue).then_with(|| ka.cmp(kb)));
        groups.into_iter().map(|(k, g)| build(k, g)).collect()
    }
}

pub async fn sales_breakdown(
    orders: &dyn OrderStore,
    catalog: &dyn ProductCatalog,
    window: &Window,
) -> Result<BreakdownReport> {
    let orders = qualifying_orders(orders, window).await?;
    let mut lookup = CatalogLookup::new(catalog);

    let mut by_category = Grouping::<Category>::new();
    let mut by_featured = Grouping::<bool>::new();

    for order in &orders {
        // An order with no line items still counts as one order of an unknown product
        if order.items.is_empty() {
            by_category.touch(Category::Other, order.id);
            by_featured.touch(false, order.id);
        }
        for item in &order.items {
            let product = lookup.find(item).await?;
            by_category.add(resolve_category(item, &product), order.id, item);
            by_featured.add(resolve_featured(item, &product), order.id, item);
        }
    }

    let by_category = by_category.into_sorted(|category, g| CategoryBreakdown {
        category,
        items: g.items,
        revenue: g.revenue,
        orders: g.orders.len() as u64,
    });
    let by_featured = by_featured.into_sorted(|is_featured, g| FeaturedBreakdown {
        is_featured,
        items: g.items,
        revenue: g.revenue,
        orders: g.orders.len() as u64,
    });

    info!(
        start = %window.start_date(),
        end = %window.end_date(),
        orders = orders.len(),
        categories = by_category.len(),
        "built sales breakdown"
    );

    Ok(BreakdownReport { start: window.start, end: window.end, by_category, by_featured })
}
