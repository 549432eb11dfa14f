use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of line an order can hold; stored as `order_item_type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    LineItem,
    Shipping,
    Coupon,
    Tax,
    Fee,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::LineItem => "line_item",
            ItemType::Shipping => "shipping",
            ItemType::Coupon => "coupon",
            ItemType::Tax => "tax",
            ItemType::Fee => "fee",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line_item" => Ok(ItemType::LineItem),
            "shipping" => Ok(ItemType::Shipping),
            "coupon" => Ok(ItemType::Coupon),
            "tax" => Ok(ItemType::Tax),
            "fee" => Ok(ItemType::Fee),
            _ => Err(format!("Invalid order item type: {}", s)),
        }
    }
}
