//! Effective category and featured flag for a line item
//!
//! Stored line-item metadata may be missing or stale. Each resolver walks a
//! fixed chain (item value, product by id, product by name, default) and the
//! first step that yields a value wins.

use std::collections::HashMap;

use tracing::trace;
use uuid::Uuid;

use crate::domain::{Category, LineItem, Product};
use crate::store::ProductCatalog;
use crate::Result;

/// Catalog entries found for one line item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductMatch {
    /// Found through the item's product reference
    pub by_id: Option<Product>,
    /// Found through a case-insensitive exact match on the item name
    pub by_name: Option<Product>,
}

impl ProductMatch {
    pub fn none() -> Self {
        Self::default()
    }
}

pub fn resolve_category(item: &LineItem, product: &ProductMatch) -> Category {
    if let Some(category) = item.category.as_deref().and_then(Category::parse_allowed) {
        return category;
    }

    product
        .by_id
        .as_ref()
        .and_then(Product::category)
        .or_else(|| product.by_name.as_ref().and_then(Product::category))
        .and_then(Category::parse_allowed)
        .unwrap_or(Category::Other)
}

pub fn resolve_featured(item: &LineItem, product: &ProductMatch) -> bool {
    item.is_featured
        .or_else(|| product.by_id.as_ref().map(|p| p.is_featured))
        .or_else(|| product.by_name.as_ref().map(|p| p.is_featured))
        .unwrap_or(false)
}

/// Per-call memo over a [`ProductCatalog`].
///
/// Misses are cached too. A lookup is dropped at the end of the call that
/// created it, so catalog edits are seen by the next request.
pub struct CatalogLookup<'a> {
    catalog: &'a dyn ProductCatalog,
    by_id: HashMap<Uuid, Option<Product>>,
    by_name: HashMap<String, Option<Product>>,
}

impl<'a> CatalogLookup<'a> {
    pub fn new(catalog: &'a dyn ProductCatalog) -> Self {
        Self { catalog, by_id: HashMap::new(), by_name: HashMap::new() }
    }

    /// Looks up only what the resolvers still need for `item`.
    pub async fn find(&mut self, item: &LineItem) -> Result<ProductMatch> {
        let needs_category = item
            .category
            .as_deref()
            .and_then(Category::parse_allowed)
            .is_none();
        let needs_featured = item.is_featured.is_none();

        if !needs_category && !needs_featured {
            return Ok(ProductMatch::none());
        }

        let by_id = match item.product_id {
            Some(id) => self.product_by_id(id).await?,
            None => None,
        };

        let name_needed = match &by_id {
            None => true,
            Some(p) => needs_category && p.category().is_none(),
        };
        let by_name = if name_needed && !item.name.trim().is_empty() {
            self.product_by_name(&item.name).await?
        } else {
            None
        };

        trace!(
            name = %item.name,
            by_id = by_id.is_some(),
            by_name = by_name.is_some(),
            "resolved catalog entries"
        );
        Ok(ProductMatch { by_id, by_name })
    }

    async fn product_by_id(&mut self, id: Uuid) -> Result<Option<Product>> {
        if let Some(hit) = self.by_id.get(&id) {
            return Ok(hit.clone());
        }
        let found = self.catalog.find_by_id(id).await?;
        self.by_id.insert(id, found.clone());
        Ok(found)
    }

    async fn product_by_name(&mut self, name: &str) -> Result<Option<Product>> {
        let key = name.to_lowercase();
        if let Some(hit) = self.by_name.get(&key) {
            return Ok(hit.clone());
        }
        let found = self.catalog.find_by_name_case_insensitive(name).await?;
        self.by_name.insert(key, found.clone());
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use rust_decimal::Decimal;

    fn line(category: Option<&str>, featured: Option<bool>) -> LineItem {
        LineItem {
            product_id: None,
            name: "Hoodie".into(),
            unit_price: Decimal::new(30, 0),
            quantity: 1,
            category: category.map(str::to_string),
            is_featured: featured,
        }
    }

    fn by_id(category: Option<&str>, featured: bool) -> ProductMatch {
        ProductMatch { by_id: Some(Product::new("Hoodie", category, featured)), by_name: None }
    }

    fn by_name(category: Option<&str>, featured: bool) -> ProductMatch {
        ProductMatch { by_id: None, by_name: Some(Product::new("hoodie", category, featured)) }
    }

    #[test]
    fn test_item_category_wins() {
        assert_eq!(resolve_category(&line(Some("women"), None), &by_id(Some("kids"), false)), Category::Women);
        assert_eq!(resolve_category(&line(Some("women"), None), &ProductMatch::none()), Category::Women);
    }

    #[test]
    fn test_category_from_product_by_id() {
        assert_eq!(resolve_category(&line(None, None), &by_id(Some("kids"), false)), Category::Kids);
    }

    #[test]
    fn test_category_from_product_by_name() {
        assert_eq!(resolve_category(&line(None, None), &by_name(Some("men"), false)), Category::Men);
    }

    #[test]
    fn test_category_defaults_to_other() {
        assert_eq!(resolve_category(&line(None, None), &ProductMatch::none()), Category::Other);
    }

    #[test]
    fn test_disallowed_item_category_falls_through() {
        assert_eq!(resolve_category(&line(Some("Women"), None), &by_id(Some("kids"), false)), Category::Kids);
        assert_eq!(resolve_category(&line(Some("shoes"), None), &ProductMatch::none()), Category::Other);
    }

    #[test]
    fn test_empty_id_category_uses_name_match() {
        let product = ProductMatch {
            by_id: Some(Product::new("Hoodie", Some(""), false)),
            by_name: Some(Product::new("hoodie", Some("accessories"), false)),
        };
        assert_eq!(resolve_category(&line(None, None), &product), Category::Accessories);
    }

    #[test]
    fn test_stale_product_category_coerced_to_other() {
        let product = ProductMatch {
            by_id: Some(Product::new("Hoodie", Some("outerwear"), false)),
            by_name: Some(Product::new("hoodie", Some("men"), false)),
        };
        assert_eq!(resolve_category(&line(None, None), &product), Category::Other);
    }

    #[test]
    fn test_explicit_false_featured_wins() {
        assert!(!resolve_featured(&line(None, Some(false)), &by_id(None, true)));
        assert!(resolve_featured(&line(None, Some(true)), &ProductMatch::none()));
    }

    #[test]
    fn test_featured_fallback_chain() {
        assert!(resolve_featured(&line(None, None), &by_id(None, true)));
        assert!(resolve_featured(&line(None, None), &by_name(None, true)));
        let both = ProductMatch {
            by_id: Some(Product::new("Hoodie", None, false)),
            by_name: Some(Product::new("hoodie", None, true)),
        };
        assert!(!resolve_featured(&line(None, None), &both));
        assert!(!resolve_featured(&line(None, None), &ProductMatch::none()));
    }

    #[tokio::test]
    async fn test_lookup_prefers_id_and_skips_name_when_complete() {
        let by_ref = Product::new("Renamed Hoodie", Some("kids"), true);
        let by_title = Product::new("Hoodie", Some("men"), false);
        let store = MemoryStore::new(vec![], vec![by_ref.clone(), by_title.clone()]);
        let mut lookup = CatalogLookup::new(&store);

        let mut item = line(None, None);
        item.product_id = Some(by_ref.id);
        let found = lookup.find(&item).await.unwrap();
        assert_eq!(found.by_id, Some(by_ref));
        assert_eq!(found.by_name, None);

        item.product_id = Some(Uuid::new_v4());
        let found = lookup.find(&item).await.unwrap();
        assert_eq!(found.by_id, None);
        assert_eq!(found.by_name, Some(by_title));
    }

    #[tokio::test]
    async fn test_lookup_skipped_when_item_is_complete() {
        let store = MemoryStore::new(vec![], vec![Product::new("Hoodie", Some("men"), true)]);
        let mut lookup = CatalogLookup::new(&store);
        let found = lookup.find(&line(Some("women"), Some(false))).await.unwrap();
        assert_eq!(found, ProductMatch::none());
    }
}
