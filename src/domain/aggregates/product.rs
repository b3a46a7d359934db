//! Product Aggregate

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog snapshot used to fill in missing line-item metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    /// Raw catalog value; may be unset or outside the allowed set.
    pub category: Option<String>,
    pub is_featured: bool,
}

impl Product {
    pub fn new(name: impl Into<String>, category: Option<&str>, is_featured: bool) -> Self {
        Self { id: Uuid::now_v7(), name: name.into(), category: category.map(str::to_string), is_featured }
    }

    /// Category text when one is actually set.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    pub fn name_matches(&self, name: &str) -> bool { self.name.to_lowercase() == name.to_lowercase() }
}
