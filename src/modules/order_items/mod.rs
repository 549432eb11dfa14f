// Order items module

pub mod context;
pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use context::ItemContext;
pub use models::{FeeItem, FeeLineItem, FeeTaxes, ItemData, ItemType, OrderItem, TaxStatus};
pub use repositories::{InMemoryOrderItemStore, ItemStore, MetaStore, MySqlOrderItemStore};
pub use services::OrderItemService;
