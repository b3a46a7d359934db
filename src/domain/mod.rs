//! Domain model: read-only order and catalog snapshots.
pub mod aggregates;
pub mod value_objects;

pub use aggregates::{LineItem, Order, OrderStatus, Product, UnknownStatus};
pub use value_objects::{Category, Money};
