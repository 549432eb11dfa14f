use async_trait::async_trait;

use crate::core::Result;
use crate::modules::order_items::models::{ItemType, MetaEntry, MetaValue};

/// Row shared by every order item type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    pub id: i64,
    pub order_id: i64,
    pub name: String,
    pub item_type: String,
}

/// Storage for order item rows
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn find_item(&self, id: i64) -> Result<Option<ItemRecord>>;

    /// Insert a row and return its new id; `record.id` is ignored
    async fn insert_item(&self, record: &ItemRecord) -> Result<i64>;

    async fn update_item(&self, record: &ItemRecord) -> Result<()>;

    async fn delete_item(&self, id: i64) -> Result<()>;

    /// Items of an order in id order, optionally of one type only
    async fn list_order_items(
        &self,
        order_id: i64,
        item_type: Option<ItemType>,
    ) -> Result<Vec<ItemRecord>>;
}

/// Key/value metadata keyed by order item id.
///
/// A key may hold several rows; each row has its own meta id. Writes by key
/// are last-write-wins on the first row.
#[async_trait]
pub trait MetaStore: Send + Sync {
    /// First value stored under `key`
    async fn get_meta(&self, item_id: i64, key: &str) -> Result<Option<MetaValue>>;

    /// Every row of an item, in meta id order
    async fn list_meta(&self, item_id: i64) -> Result<Vec<MetaEntry>>;

    /// Insert a new row, even if `key` already has one. Returns its meta id.
    async fn add_meta(&self, item_id: i64, key: &str, value: &MetaValue) -> Result<i64>;

    /// Overwrite the value under `key`, adding it if absent
    async fn update_meta(&self, item_id: i64, key: &str, value: &MetaValue) -> Result<()>;

    async fn update_meta_by_id(&self, meta_id: i64, value: &MetaValue) -> Result<()>;

    async fn delete_meta_by_id(&self, meta_id: i64) -> Result<()>;

    async fn delete_all_meta(&self, item_id: i64) -> Result<()>;
}
