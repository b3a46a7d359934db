//! Sales analytics engine
//!
//! Every call resolves its own [`Window`], reads orders through the store
//! traits and returns a freshly computed report. Nothing is cached between
//! calls.

pub mod aggregate;
pub mod breakdown;
pub mod resolve;
pub mod series;
pub mod summary;
pub mod window;

pub use aggregate::{daily_totals, DailyTotals};
pub use breakdown::{sales_breakdown, BreakdownReport, CategoryBreakdown, FeaturedBreakdown};
pub use resolve::{resolve_category, resolve_featured, CatalogLookup, ProductMatch};
pub use series::{compact, sales_trend, SeriesPoint, TrendReport};
pub use summary::{sales_summary, SalesSummary};
pub use window::{Window, WindowParams, WindowRequest, DEFAULT_DAYS, MAX_DAYS};
