use serde::{Deserialize, Serialize};

use super::fee::TaxStatus;
use super::fee_taxes::FeeTaxes;
use super::item_type::ItemType;
use super::meta::{MetaEntry, MetaValue};
use super::order_item::FeeLineItem;

/// Request body for adding a fee to an order
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateFeeRequest {
    pub name: Option<String>,
    pub tax_class: Option<String>,
    pub tax_status: Option<String>,
    /// Number or decimal string
    pub total: Option<MetaValue>,
    /// `{"total": {"<rate id>": "<amount>"}}`
    pub taxes: Option<MetaValue>,
    #[serde(default)]
    pub meta_data: Vec<MetaEntry>,
}

/// Fee as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeResponse {
    pub id: i64,
    pub order_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub tax_class: String,
    pub tax_status: TaxStatus,
    pub total: String,
    pub total_tax: String,
    pub taxes: FeeTaxes,
    pub meta_data: Vec<MetaEntry>,
}

impl From<&FeeLineItem> for FeeResponse {
    fn from(item: &FeeLineItem) -> Self {
        let fee = item.data();
        Self {
            id: item.get_id(),
            order_id: item.get_order_id(),
            name: item.get_name(),
            item_type: item.get_type(),
            tax_class: fee.get_tax_class().to_string(),
            tax_status: fee.get_tax_status(),
            total: fee.get_total(),
            total_tax: fee.get_total_tax(),
            taxes: fee.get_taxes().clone(),
            meta_data: item.meta_data().to_vec(),
        }
    }
}
