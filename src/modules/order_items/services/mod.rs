pub mod order_item_service;

pub use order_item_service::OrderItemService;
