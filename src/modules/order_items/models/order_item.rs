// Generic order item record.
//
// Holds the fields every item type shares (id, owning order, name, generic
// metadata) and delegates everything else to the variant payload `D`.

use std::sync::Arc;

use super::fee::FeeItem;
use super::item_data::ItemData;
use super::item_type::ItemType;
use super::meta::{value_to_text, MetaEntry, MetaValue};
use crate::core::{AppError, Result};
use crate::modules::order_items::context::ItemContext;

/// An order item of variant `D`
#[derive(Debug, Clone)]
pub struct OrderItem<D> {
    id: i64,
    order_id: i64,
    name: String,
    meta_data: Vec<MetaEntry>,
    removed_meta_ids: Vec<i64>,
    data: D,
}

pub type FeeLineItem = OrderItem<FeeItem>;

impl FeeLineItem {
    pub fn new_fee(ctx: Arc<ItemContext>) -> Self {
        Self::new(FeeItem::new(ctx))
    }
}

impl<D: ItemData> OrderItem<D> {
    pub fn new(data: D) -> Self {
        Self {
            id: 0,
            order_id: 0,
            name: String::new(),
            meta_data: Vec::new(),
            removed_meta_ids: Vec::new(),
            data,
        }
    }

    /// Storage id; 0 until the item has been saved or read
    pub fn get_id(&self) -> i64 {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    pub fn get_order_id(&self) -> i64 {
        self.order_id
    }

    pub fn set_order_id(&mut self, order_id: i64) {
        self.order_id = order_id;
    }

    /// Stored name, or the variant's fallback label when none is set
    pub fn get_name(&self) -> String {
        if self.name.is_empty() {
            self.data.fallback_name().unwrap_or_default()
        } else {
            self.name.clone()
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn get_type(&self) -> ItemType {
        self.data.item_type()
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }

    pub fn get_internal_meta_keys(&self) -> &'static [&'static str] {
        self.data.internal_meta_keys()
    }

    pub fn is_internal_meta_key(&self, key: &str) -> bool {
        self.get_internal_meta_keys().contains(&key)
    }

    /// Generic metadata, internal keys excluded
    pub fn meta_data(&self) -> &[MetaEntry] {
        &self.meta_data
    }

    pub fn get_meta(&self, key: &str) -> Option<&MetaValue> {
        self.meta_data
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }

    /// Append a meta entry, allowing duplicate keys
    pub fn add_meta_data(&mut self, key: &str, value: MetaValue) -> Result<()> {
        self.ensure_generic_meta_key(key)?;
        self.meta_data.push(MetaEntry::new(key, value));
        Ok(())
    }

    /// Replace the first entry under `key`, or add one
    pub fn update_meta_data(&mut self, key: &str, value: MetaValue) -> Result<()> {
        self.ensure_generic_meta_key(key)?;
        match self.meta_data.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => entry.value = value,
            None => self.meta_data.push(MetaEntry::new(key, value)),
        }
        Ok(())
    }

    /// Remove every entry under `key`; the rows go on the next save
    pub fn delete_meta_data(&mut self, key: &str) {
        let removed = &mut self.removed_meta_ids;
        self.meta_data.retain(|entry| {
            if entry.key != key {
                return true;
            }
            removed.extend(entry.id);
            false
        });
    }

    pub(crate) fn set_meta_data(&mut self, entries: Vec<MetaEntry>) {
        let internal = self.get_internal_meta_keys();
        self.meta_data = entries
            .into_iter()
            .filter(|entry| !internal.contains(&entry.key.as_str()))
            .collect();
        self.removed_meta_ids.clear();
    }

    pub(crate) fn meta_data_mut(&mut self) -> &mut [MetaEntry] {
        &mut self.meta_data
    }

    /// Stored meta rows deleted since the last save
    pub(crate) fn take_removed_meta_ids(&mut self) -> Vec<i64> {
        std::mem::take(&mut self.removed_meta_ids)
    }

    /// Back to a freshly built, unsaved item
    pub(crate) fn reset(&mut self) {
        self.id = 0;
        self.order_id = 0;
        self.name.clear();
        self.meta_data.clear();
        self.removed_meta_ids.clear();
        self.data.reset_props();
    }

    fn ensure_generic_meta_key(&self, key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(AppError::validation("Meta key cannot be empty"));
        }
        if self.is_internal_meta_key(key) {
            return Err(AppError::validation(format!(
                "Meta key '{}' is reserved for {} items",
                key,
                self.get_type()
            )));
        }
        Ok(())
    }

    fn resolve_field<'a>(&self, key: &'a str) -> &'a str {
        self.data.legacy_field(key).unwrap_or(key)
    }

    /// Whether a field is readable by name
    pub fn field_exists(&self, key: &str) -> bool {
        if self.data.legacy_field(key).is_some() {
            return true;
        }
        match key {
            "id" | "order_id" | "name" | "type" => true,
            _ if self.data.has_prop(key) => true,
            _ => self.get_meta(&format!("_{}", key)).is_some(),
        }
    }

    /// Read a field by name: shared fields, then variant props, then `_<key>` meta
    pub fn get_field(&self, key: &str) -> Option<MetaValue> {
        let key = self.resolve_field(key);
        match key {
            "id" => Some(MetaValue::from(self.id)),
            "order_id" => Some(MetaValue::from(self.order_id)),
            "name" => Some(MetaValue::from(self.get_name())),
            "type" => Some(MetaValue::from(self.get_type().as_str())),
            _ => self
                .data
                .get_prop(key)
                .or_else(|| self.get_meta(&format!("_{}", key)).cloned()),
        }
    }

    /// Write a field by name; names that are not fields land in `_<key>` meta.
    ///
    /// Derived props only accept writes through their legacy names.
    pub fn set_field(&mut self, key: &str, value: &MetaValue) -> Result<()> {
        let legacy = self.data.legacy_field(key);
        let key = legacy.unwrap_or(key);
        match key {
            "id" | "type" => Err(AppError::validation(format!(
                "Field '{}' is read-only",
                key
            ))),
            _ if legacy.is_none() && self.data.derived_props().contains(&key) => Err(
                AppError::validation(format!("Field '{}' is derived and read-only", key)),
            ),
            "order_id" => {
                let order_id = value
                    .as_i64()
                    .or_else(|| value_to_text(value).trim().parse().ok())
                    .ok_or_else(|| AppError::validation("order_id must be an integer"))?;
                self.set_order_id(order_id);
                Ok(())
            }
            "name" => {
                self.set_name(value_to_text(value));
                Ok(())
            }
            _ => {
                if self.data.set_prop(key, value)? {
                    return Ok(());
                }
                self.update_meta_data(&format!("_{}", key), value.clone())
            }
        }
    }
}
