pub mod order_items;
pub mod taxes;
