// Property-based tests for the fee tax derivation
//
// After any set_taxes call, total_tax equals the normalized numeric sum of
// the per-rate amounts, whatever the mix of numbers and decimal strings.

use std::collections::BTreeMap;
use std::sync::Arc;

use orderitems::order_items::{FeeItem, ItemContext};
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};

fn fee() -> FeeItem {
    FeeItem::new(Arc::new(ItemContext::default()))
}

proptest! {
    #[test]
    fn test_total_tax_is_sum_of_rates(
        amounts in prop::collection::btree_map(1u32..500, 0i64..10_000_000i64, 0..8),
        as_numbers in any::<bool>()
    ) {
        let mut rates = Map::new();
        let mut expected = Decimal::ZERO;
        for (rate_id, cents) in &amounts {
            let amount = Decimal::new(*cents, 2);
            expected += amount;
            let value = if as_numbers {
                json!(amount.to_string().parse::<f64>().unwrap())
            } else {
                Value::from(amount.to_string())
            };
            rates.insert(rate_id.to_string(), value);
        }

        let mut fee = fee();
        fee.set_taxes(&json!({ "total": rates }));

        expected.rescale(2);
        prop_assert_eq!(fee.get_total_tax(), expected.to_string());
        prop_assert_eq!(fee.get_taxes().total.len(), amounts.len());
    }

    #[test]
    fn test_breakdown_keys_are_preserved(
        rate_ids in prop::collection::btree_set("[a-z0-9]{1,6}", 1..6)
    ) {
        let rates: BTreeMap<String, String> =
            rate_ids.iter().map(|id| (id.clone(), "1".to_string())).collect();

        let mut fee = fee();
        fee.set_taxes(&json!({ "total": rates }));

        let keys: Vec<_> = fee.get_taxes().total.keys().cloned().collect();
        let expected: Vec<_> = rate_ids.iter().cloned().collect();
        prop_assert_eq!(keys, expected);
        prop_assert_eq!(fee.get_total_tax(), format!("{}.00", rate_ids.len()));
    }
}

#[test]
fn test_example_breakdown() {
    let mut fee = fee();
    fee.set_taxes(&json!({"total": {"1": "0.50", "2": "0.25"}}));

    assert_eq!(fee.get_total_tax(), "0.75");
}

#[test]
fn test_non_numeric_entries_count_as_zero() {
    let mut fee = fee();
    fee.set_taxes(&json!({"total": {"1": "n/a", "2": "1.10", "3": null}}));

    assert_eq!(fee.get_total_tax(), "1.10");
    assert_eq!(fee.get_taxes().total.get("1").map(String::as_str), Some("0.00"));
}

#[test]
fn test_oversized_amounts_saturate() {
    let mut fee = fee();
    fee.set_taxes(&json!({"total": {
        "1": "79228162514264337593543950335",
        "2": "79228162514264337593543950335"
    }}));

    assert_eq!(fee.get_total_tax(), "792281625142643375935439503.35");

    fee.set_total("79228162514264337593543950335");
    assert_eq!(fee.get_total(), "792281625142643375935439503.35");
}
