mod dto;
mod fee;
mod fee_taxes;
mod item_data;
mod item_type;
pub mod legacy;
pub mod meta;
mod order_item;

pub use dto::{CreateFeeRequest, FeeResponse};
pub use fee::{FeeItem, TaxStatus, INVALID_TAX_CLASS};
pub use fee_taxes::FeeTaxes;
pub use item_data::ItemData;
pub use item_type::ItemType;
pub use meta::{MetaEntry, MetaMap, MetaValue};
pub use order_item::{FeeLineItem, OrderItem};
