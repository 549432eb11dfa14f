mod memory_store;
mod mysql_store;
mod store;

pub use memory_store::InMemoryOrderItemStore;
pub use mysql_store::MySqlOrderItemStore;
pub use store::{ItemRecord, ItemStore, MetaStore};
