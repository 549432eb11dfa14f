use std::sync::Arc;

use serde_json::Map;

use crate::core::{AppError, Result};
use crate::modules::order_items::context::ItemContext;
use crate::modules::order_items::models::{
    CreateFeeRequest, FeeLineItem, FeeResponse, ItemData, ItemType, MetaMap, MetaValue, OrderItem,
};
use crate::modules::order_items::repositories::{ItemRecord, ItemStore, MetaStore};

/// Loads and persists order items against the item and meta stores
pub struct OrderItemService {
    items: Arc<dyn ItemStore>,
    meta: Arc<dyn MetaStore>,
    ctx: Arc<ItemContext>,
}

impl OrderItemService {
    pub fn new(items: Arc<dyn ItemStore>, meta: Arc<dyn MetaStore>, ctx: Arc<ItemContext>) -> Self {
        Self { items, meta, ctx }
    }

    /// Use one backend for both rows and metadata
    pub fn with_store<S>(store: Arc<S>, ctx: Arc<ItemContext>) -> Self
    where
        S: ItemStore + MetaStore + 'static,
    {
        Self::new(store.clone(), store, ctx)
    }

    pub fn new_fee(&self) -> FeeLineItem {
        FeeLineItem::new_fee(self.ctx.clone())
    }

    /// Populate `item` from storage.
    ///
    /// Whatever `item` held before is discarded; an unknown id leaves it empty
    /// and unsaved (id 0). Variant props are only loaded once a row was found.
    pub async fn read<D: ItemData>(&self, item: &mut OrderItem<D>, id: i64) -> Result<()> {
        item.reset();

        let Some(record) = self.items.find_item(id).await? else {
            tracing::debug!(item_id = id, "Order item not found");
            return Ok(());
        };

        let stored_type: ItemType = record.item_type.parse().map_err(AppError::validation)?;
        if stored_type != item.get_type() {
            return Err(AppError::validation(format!(
                "Order item {} is a '{}' item, not '{}'",
                id,
                stored_type,
                item.get_type()
            )));
        }

        item.set_id(record.id);
        item.set_order_id(record.order_id);
        item.set_name(record.name);
        item.set_meta_data(self.meta.list_meta(record.id).await?);

        if item.get_id() == 0 {
            return Ok(());
        }

        let mut props = MetaMap::new();
        for key in item.data().prop_meta_keys() {
            if let Some(value) = self.meta.get_meta(item.get_id(), key).await? {
                props.insert(*key, value);
            }
        }
        item.data_mut().read_props(&props);

        tracing::debug!(
            item_id = item.get_id(),
            item_type = %item.get_type(),
            "Order item loaded"
        );

        Ok(())
    }

    /// Persist `item`, inserting it first if it has no id. Returns the id.
    pub async fn save<D: ItemData>(&self, item: &mut OrderItem<D>) -> Result<i64> {
        let record = ItemRecord {
            id: item.get_id(),
            order_id: item.get_order_id(),
            name: item.get_name(),
            item_type: item.get_type().as_str().to_string(),
        };

        if record.id == 0 {
            let id = self.items.insert_item(&record).await?;
            item.set_id(id);
        } else {
            self.items.update_item(&record).await?;
        }
        let id = item.get_id();

        for meta_id in item.take_removed_meta_ids() {
            self.meta.delete_meta_by_id(meta_id).await?;
        }
        for entry in item.meta_data_mut() {
            match entry.id {
                Some(meta_id) => self.meta.update_meta_by_id(meta_id, &entry.value).await?,
                None => entry.id = Some(self.meta.add_meta(id, &entry.key, &entry.value).await?),
            }
        }

        if id != 0 {
            for (key, value) in item.data().props_to_meta() {
                self.meta.update_meta(id, key, &value).await?;
            }
        }

        tracing::info!(
            item_id = id,
            order_id = item.get_order_id(),
            item_type = %item.get_type(),
            "Order item saved"
        );

        Ok(id)
    }

    /// Remove `item` and all of its metadata. Returns false for unsaved items.
    pub async fn delete<D: ItemData>(&self, item: &mut OrderItem<D>) -> Result<bool> {
        let id = item.get_id();
        if id == 0 {
            return Ok(false);
        }

        self.meta.delete_all_meta(id).await?;
        self.items.delete_item(id).await?;
        item.set_id(0);
        for entry in item.meta_data_mut() {
            entry.id = None;
        }

        tracing::info!(item_id = id, item_type = %item.get_type(), "Order item deleted");

        Ok(true)
    }

    /// Add a fee to an order
    pub async fn create_fee(&self, order_id: i64, request: CreateFeeRequest) -> Result<FeeResponse> {
        let mut fee = self.new_fee();
        fee.set_order_id(order_id);

        if let Some(name) = request.name {
            fee.set_name(name);
        }
        if let Some(tax_class) = request.tax_class {
            fee.data_mut().set_tax_class(&tax_class)?;
        }
        if let Some(tax_status) = request.tax_status {
            fee.data_mut().set_tax_status(&tax_status);
        }
        if let Some(total) = request.total {
            fee.set_field("total", &total)?;
        }
        if let Some(taxes) = request.taxes {
            fee.data_mut().set_taxes(&taxes);
        }
        for entry in request.meta_data {
            fee.add_meta_data(&entry.key, entry.value)?;
        }

        self.save(&mut fee).await?;
        Ok(FeeResponse::from(&fee))
    }

    pub async fn get_fee(&self, id: i64) -> Result<FeeResponse> {
        let fee = self.load_fee(id).await?;
        Ok(FeeResponse::from(&fee))
    }

    /// Apply named fields to a fee and save it.
    ///
    /// Fields are applied in order and the first rejected value aborts the
    /// update before anything is written.
    pub async fn update_fee(&self, id: i64, fields: Map<String, MetaValue>) -> Result<FeeResponse> {
        let mut fee = self.load_fee(id).await?;

        for (key, value) in &fields {
            fee.set_field(key, value)?;
        }

        self.save(&mut fee).await?;
        Ok(FeeResponse::from(&fee))
    }

    pub async fn list_order_fees(&self, order_id: i64) -> Result<Vec<FeeResponse>> {
        let records = self
            .items
            .list_order_items(order_id, Some(ItemType::Fee))
            .await?;

        let mut fees = Vec::with_capacity(records.len());
        for record in records {
            let fee = self.load_fee(record.id).await?;
            fees.push(FeeResponse::from(&fee));
        }
        Ok(fees)
    }

    pub async fn delete_fee(&self, id: i64) -> Result<()> {
        let mut fee = self.load_fee(id).await?;
        self.delete(&mut fee).await?;
        Ok(())
    }

    async fn load_fee(&self, id: i64) -> Result<FeeLineItem> {
        let mut fee = self.new_fee();
        self.read(&mut fee, id).await?;
        if fee.get_id() == 0 {
            return Err(AppError::not_found(format!("Fee {}", id)));
        }
        Ok(fee)
    }
}
