use super::item_type::ItemType;
use super::meta::{MetaMap, MetaValue};
use crate::core::Result;

/// Variant-specific payload of an order item.
///
/// `OrderItem` owns the fields every variant shares and reaches the rest
/// through this interface: the variant's own props, the meta keys it
/// persists them under, and any legacy field names it still answers to.
pub trait ItemData: Send + Sync {
    /// Discriminator stored with the item row
    fn item_type(&self) -> ItemType;

    /// Display name used while the stored name is empty
    fn fallback_name(&self) -> Option<String> {
        None
    }

    /// Meta keys owned by the variant, hidden from the generic meta collection
    fn internal_meta_keys(&self) -> &'static [&'static str] {
        &[]
    }

    /// Meta keys loaded into props after the base read
    fn prop_meta_keys(&self) -> &'static [&'static str] {
        &[]
    }

    fn read_props(&mut self, _meta: &MetaMap) {}

    /// Meta rows written after the base save
    fn props_to_meta(&self) -> Vec<(&'static str, MetaValue)> {
        Vec::new()
    }

    /// Canonical prop name for a deprecated field name
    fn legacy_field(&self, _key: &str) -> Option<&'static str> {
        None
    }

    /// Props computed from other props; not writable under their own names
    fn derived_props(&self) -> &'static [&'static str] {
        &[]
    }

    /// Drop every prop back to its default
    fn reset_props(&mut self);

    fn has_prop(&self, key: &str) -> bool;

    fn get_prop(&self, key: &str) -> Option<MetaValue>;

    /// Returns `Ok(false)` when `key` is not one of the variant's props
    fn set_prop(&mut self, key: &str, value: &MetaValue) -> Result<bool>;
}
