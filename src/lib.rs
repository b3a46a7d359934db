//! Storefront Sales Analytics
//!
//! Revenue analytics behind the storefront admin dashboard.
//!
//! ## Features
//! - Reporting window resolution (explicit range or trailing days)
//! - Gap-free daily sales series
//! - Category and featured-flag breakdowns
//! - All-time sales summary

use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

pub mod analytics;
pub mod config;
pub mod domain;
pub mod routes;
pub mod store;

pub use analytics::{Window, WindowParams, WindowRequest, MAX_DAYS};
pub use domain::{Category, LineItem, Money, Order, OrderStatus, Product};
pub use store::{MemoryStore, OrderStore, PgStore, ProductCatalog, SummaryTotals};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Corrupt order record {order_id}: {reason}")]
    CorruptRecord { order_id: Uuid, reason: String },

    #[error("Metrics query timed out after {0:?}")]
    Timeout(Duration),
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
