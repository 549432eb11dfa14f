//! Order item records for a commerce store
//!
//! Fee line items, their tax breakdown, and how they map onto generic
//! per-item metadata storage.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::order_items;
pub use modules::taxes;
