use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::meta::{value_to_text, MetaValue};
use crate::core::DecimalFormat;

/// Per-rate tax breakdown of a fee: tax rate id -> amount
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTaxes {
    #[serde(default)]
    pub total: BTreeMap<String, String>,
}

impl FeeTaxes {
    /// Build a canonical breakdown from loosely shaped input.
    ///
    /// Accepts the structure itself or its JSON text (as it comes back from a
    /// SQL meta column). A missing or empty `total` gives an empty breakdown;
    /// `total` given as a list is keyed by position. Every amount goes through
    /// `format`, so non-numeric amounts become zero.
    pub fn from_raw(raw: &MetaValue, format: &DecimalFormat) -> Self {
        let decoded;
        let raw = match raw {
            MetaValue::String(text) => {
                decoded = serde_json::from_str::<MetaValue>(text).unwrap_or(MetaValue::Null);
                &decoded
            }
            other => other,
        };

        let mut taxes = FeeTaxes::default();
        match raw.get("total") {
            Some(MetaValue::Object(rates)) => {
                for (rate_id, amount) in rates {
                    taxes
                        .total
                        .insert(rate_id.clone(), format.format(&value_to_text(amount)));
                }
            }
            Some(MetaValue::Array(amounts)) => {
                for (index, amount) in amounts.iter().enumerate() {
                    taxes
                        .total
                        .insert(index.to_string(), format.format(&value_to_text(amount)));
                }
            }
            _ => {}
        }
        taxes
    }

    /// Sum of every rate's amount, in canonical form
    pub fn sum(&self, format: &DecimalFormat) -> String {
        format.sum(self.total.values())
    }

    pub fn is_empty(&self) -> bool {
        self.total.is_empty()
    }

    pub fn to_value(&self) -> MetaValue {
        serde_json::json!({ "total": self.total })
    }
}
