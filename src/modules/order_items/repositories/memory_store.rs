use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::store::{ItemRecord, ItemStore, MetaStore};
use crate::core::{AppError, Result};
use crate::modules::order_items::models::{ItemType, MetaEntry, MetaValue};

#[derive(Debug, Default)]
struct MemoryState {
    items: BTreeMap<i64, ItemRecord>,
    meta: Vec<StoredMeta>,
    last_item_id: i64,
    last_meta_id: i64,
}

impl MemoryState {
    fn push_meta(&mut self, item_id: i64, key: &str, value: &MetaValue) -> i64 {
        self.last_meta_id += 1;
        let meta_id = self.last_meta_id;
        self.meta.push(StoredMeta {
            meta_id,
            item_id,
            key: key.to_string(),
            value: value.clone(),
        });
        meta_id
    }
}

#[derive(Debug, Clone)]
struct StoredMeta {
    meta_id: i64,
    item_id: i64,
    key: String,
    value: MetaValue,
}

/// Process-local order item storage.
///
/// Values are kept as given rather than flattened to text.
#[derive(Debug, Default)]
pub struct InMemoryOrderItemStore {
    state: RwLock<MemoryState>,
}

impl InMemoryOrderItemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStore for InMemoryOrderItemStore {
    async fn find_item(&self, id: i64) -> Result<Option<ItemRecord>> {
        Ok(self.state.read().await.items.get(&id).cloned())
    }

    async fn insert_item(&self, record: &ItemRecord) -> Result<i64> {
        let mut state = self.state.write().await;
        state.last_item_id += 1;
        let id = state.last_item_id;
        state.items.insert(
            id,
            ItemRecord {
                id,
                ..record.clone()
            },
        );
        Ok(id)
    }

    async fn update_item(&self, record: &ItemRecord) -> Result<()> {
        let mut state = self.state.write().await;
        match state.items.get_mut(&record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(())
            }
            None => Err(AppError::not_found(format!("Order item {}", record.id))),
        }
    }

    async fn delete_item(&self, id: i64) -> Result<()> {
        self.state.write().await.items.remove(&id);
        Ok(())
    }

    async fn list_order_items(
        &self,
        order_id: i64,
        item_type: Option<ItemType>,
    ) -> Result<Vec<ItemRecord>> {
        let state = self.state.read().await;
        Ok(state
            .items
            .values()
            .filter(|record| record.order_id == order_id)
            .filter(|record| item_type.map_or(true, |t| record.item_type == t.as_str()))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MetaStore for InMemoryOrderItemStore {
    async fn get_meta(&self, item_id: i64, key: &str) -> Result<Option<MetaValue>> {
        let state = self.state.read().await;
        Ok(state
            .meta
            .iter()
            .find(|meta| meta.item_id == item_id && meta.key == key)
            .map(|meta| meta.value.clone()))
    }

    async fn list_meta(&self, item_id: i64) -> Result<Vec<MetaEntry>> {
        let state = self.state.read().await;
        Ok(state
            .meta
            .iter()
            .filter(|meta| meta.item_id == item_id)
            .map(|meta| MetaEntry {
                id: Some(meta.meta_id),
                key: meta.key.clone(),
                value: meta.value.clone(),
            })
            .collect())
    }

    async fn add_meta(&self, item_id: i64, key: &str, value: &MetaValue) -> Result<i64> {
        Ok(self.state.write().await.push_meta(item_id, key, value))
    }

    async fn update_meta(&self, item_id: i64, key: &str, value: &MetaValue) -> Result<()> {
        let mut state = self.state.write().await;
        if let Some(meta) = state
            .meta
            .iter_mut()
            .find(|meta| meta.item_id == item_id && meta.key == key)
        {
            meta.value = value.clone();
            return Ok(());
        }

        state.push_meta(item_id, key, value);
        Ok(())
    }

    async fn update_meta_by_id(&self, meta_id: i64, value: &MetaValue) -> Result<()> {
        let mut state = self.state.write().await;
        match state.meta.iter_mut().find(|meta| meta.meta_id == meta_id) {
            Some(meta) => {
                meta.value = value.clone();
                Ok(())
            }
            None => Err(AppError::not_found(format!("Order item meta {}", meta_id))),
        }
    }

    async fn delete_meta_by_id(&self, meta_id: i64) -> Result<()> {
        self.state
            .write()
            .await
            .meta
            .retain(|meta| meta.meta_id != meta_id);
        Ok(())
    }

    async fn delete_all_meta(&self, item_id: i64) -> Result<()> {
        self.state
            .write()
            .await
            .meta
            .retain(|meta| meta.item_id != item_id);
        Ok(())
    }
}
