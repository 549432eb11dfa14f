//! Generic per-item metadata

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Values are loosely typed: whatever the caller stored, or raw text
/// when it comes back from a SQL store.
pub type MetaValue = serde_json::Value;

/// One metadata row attached to an order item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaEntry {
    /// Storage row id; `None` until persisted
    pub id: Option<i64>,
    pub key: String,
    pub value: MetaValue,
}

impl MetaEntry {
    pub fn new(key: impl Into<String>, value: MetaValue) -> Self {
        Self {
            id: None,
            key: key.into(),
            value,
        }
    }
}

/// Metadata fetched for one item, keyed by meta key
#[derive(Debug, Clone, Default)]
pub struct MetaMap(HashMap<String, MetaValue>);

impl MetaMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: MetaValue) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.0.get(key)
    }

    /// Text form of a value; a missing key reads as ""
    pub fn text(&self, key: &str) -> String {
        self.get(key).map(value_to_text).unwrap_or_default()
    }
}

/// Flatten a value to the text a scalar field or a SQL `meta_value` column holds
pub fn value_to_text(value: &MetaValue) -> String {
    match value {
        MetaValue::Null => String::new(),
        MetaValue::Bool(true) => "1".to_string(),
        MetaValue::Bool(false) => String::new(),
        MetaValue::Number(n) => n.to_string(),
        MetaValue::String(s) => s.clone(),
        MetaValue::Array(_) | MetaValue::Object(_) => value.to_string(),
    }
}
