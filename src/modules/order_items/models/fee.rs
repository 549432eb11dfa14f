// Fee line item: an extra charge on an order that isn't tied to a product.
//
// total_tax is never set on its own; it is re-derived from the per-rate
// breakdown every time the breakdown is assigned, including on load.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::fee_taxes::FeeTaxes;
use super::item_data::ItemData;
use super::item_type::ItemType;
use super::legacy;
use super::meta::{value_to_text, MetaMap, MetaValue};
use crate::core::{AppError, Result};
use crate::modules::order_items::context::ItemContext;

pub const META_TAX_CLASS: &str = "_tax_class";
pub const META_TAX_STATUS: &str = "_tax_status";
pub const META_LINE_SUBTOTAL: &str = "_line_subtotal";
pub const META_LINE_SUBTOTAL_TAX: &str = "_line_subtotal_tax";
pub const META_LINE_TOTAL: &str = "_line_total";
pub const META_LINE_TAX: &str = "_line_tax";
pub const META_LINE_TAX_DATA: &str = "_line_tax_data";

/// Error code returned when a tax class isn't registered
pub const INVALID_TAX_CLASS: &str = "order_item_fee_invalid_tax_class";

// The subtotal keys are reserved for fees but never written.
const INTERNAL_META_KEYS: [&str; 7] = [
    META_TAX_CLASS,
    META_TAX_STATUS,
    META_LINE_SUBTOTAL,
    META_LINE_SUBTOTAL_TAX,
    META_LINE_TOTAL,
    META_LINE_TAX,
    META_LINE_TAX_DATA,
];

// _line_tax is written on save but never loaded.
const PROP_META_KEYS: [&str; 4] = [
    META_TAX_CLASS,
    META_TAX_STATUS,
    META_LINE_TOTAL,
    META_LINE_TAX_DATA,
];

const PROPS: [&str; 5] = ["tax_class", "tax_status", "total", "total_tax", "taxes"];

/// Whether a fee is subject to tax
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxStatus {
    #[default]
    Taxable,
    None,
}

impl TaxStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxStatus::Taxable => "taxable",
            TaxStatus::None => "none",
        }
    }

    /// Anything but `"none"` is taxable
    pub fn from_lossy(value: &str) -> Self {
        match value {
            "none" => TaxStatus::None,
            _ => TaxStatus::Taxable,
        }
    }
}

impl fmt::Display for TaxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fee-specific props of an order item
#[derive(Debug, Clone)]
pub struct FeeItem {
    ctx: Arc<ItemContext>,
    tax_class: String,
    tax_status: TaxStatus,
    total: String,
    total_tax: String,
    taxes: FeeTaxes,
}

impl FeeItem {
    pub fn new(ctx: Arc<ItemContext>) -> Self {
        Self {
            ctx,
            tax_class: String::new(),
            tax_status: TaxStatus::Taxable,
            total: String::new(),
            total_tax: String::new(),
            taxes: FeeTaxes::default(),
        }
    }

    /// Set the tax class; "" is the standard class.
    ///
    /// Unregistered classes are rejected and the current value is kept.
    pub fn set_tax_class(&mut self, value: &str) -> Result<()> {
        if !self.ctx.tax_classes.is_valid(value) {
            return Err(AppError::invalid_data(
                INVALID_TAX_CLASS,
                self.ctx.translator.translate("Invalid tax class"),
            ));
        }
        self.tax_class = value.to_string();
        Ok(())
    }

    pub fn set_tax_status(&mut self, value: &str) {
        self.tax_status = TaxStatus::from_lossy(value);
    }

    pub fn set_total(&mut self, value: &str) {
        self.total = self.ctx.decimal_format.format(value);
    }

    pub(crate) fn set_total_tax(&mut self, value: &str) {
        self.total_tax = self.ctx.decimal_format.format(value);
    }

    /// Replace the per-rate breakdown and re-derive the total tax from it
    pub fn set_taxes(&mut self, raw: &MetaValue) {
        self.taxes = FeeTaxes::from_raw(raw, &self.ctx.decimal_format);
        let total_tax = self.taxes.sum(&self.ctx.decimal_format);
        self.set_total_tax(&total_tax);
    }

    pub fn get_tax_class(&self) -> &str {
        &self.tax_class
    }

    pub fn get_tax_status(&self) -> TaxStatus {
        self.tax_status
    }

    pub fn get_total(&self) -> String {
        self.ctx.decimal_format.format(&self.total)
    }

    pub fn get_total_tax(&self) -> String {
        self.ctx.decimal_format.format(&self.total_tax)
    }

    pub fn get_taxes(&self) -> &FeeTaxes {
        &self.taxes
    }
}

impl ItemData for FeeItem {
    fn item_type(&self) -> ItemType {
        ItemType::Fee
    }

    fn fallback_name(&self) -> Option<String> {
        Some(self.ctx.translator.translate("Fee"))
    }

    fn internal_meta_keys(&self) -> &'static [&'static str] {
        &INTERNAL_META_KEYS
    }

    fn prop_meta_keys(&self) -> &'static [&'static str] {
        &PROP_META_KEYS
    }

    fn read_props(&mut self, meta: &MetaMap) {
        let tax_class = meta.text(META_TAX_CLASS);
        if let Err(err) = self.set_tax_class(&tax_class) {
            tracing::warn!(
                tax_class = %tax_class,
                error = %err,
                "Stored fee tax class is no longer registered; keeping standard class"
            );
        }
        self.set_tax_status(&meta.text(META_TAX_STATUS));
        self.set_total(&meta.text(META_LINE_TOTAL));
        self.set_taxes(meta.get(META_LINE_TAX_DATA).unwrap_or(&MetaValue::Null));
    }

    fn props_to_meta(&self) -> Vec<(&'static str, MetaValue)> {
        vec![
            (META_TAX_CLASS, MetaValue::from(self.get_tax_class())),
            (META_TAX_STATUS, MetaValue::from(self.tax_status.as_str())),
            (META_LINE_TOTAL, MetaValue::from(self.get_total())),
            (META_LINE_TAX, MetaValue::from(self.get_total_tax())),
            (META_LINE_TAX_DATA, self.taxes.to_value()),
        ]
    }

    fn legacy_field(&self, key: &str) -> Option<&'static str> {
        legacy::canonical_fee_field(key)
    }

    fn derived_props(&self) -> &'static [&'static str] {
        &["total_tax"]
    }

    fn reset_props(&mut self) {
        *self = FeeItem::new(self.ctx.clone());
    }

    fn has_prop(&self, key: &str) -> bool {
        PROPS.contains(&key)
    }

    fn get_prop(&self, key: &str) -> Option<MetaValue> {
        let value = match key {
            "tax_class" => MetaValue::from(self.get_tax_class()),
            "tax_status" => MetaValue::from(self.tax_status.as_str()),
            "total" => MetaValue::from(self.get_total()),
            "total_tax" => MetaValue::from(self.get_total_tax()),
            "taxes" => self.taxes.to_value(),
            _ => return None,
        };
        Some(value)
    }

    fn set_prop(&mut self, key: &str, value: &MetaValue) -> Result<bool> {
        match key {
            "tax_class" => self.set_tax_class(&value_to_text(value))?,
            "tax_status" => self.set_tax_status(&value_to_text(value)),
            "total" => self.set_total(&value_to_text(value)),
            "total_tax" => self.set_total_tax(&value_to_text(value)),
            "taxes" => self.set_taxes(value),
            _ => return Ok(false),
        }
        Ok(true)
    }
}
