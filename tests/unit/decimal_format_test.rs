// Property-based tests for the canonical decimal-string format
//
// Properties tested:
// 1. output always has exactly `decimals` fraction digits
// 2. formatting is idempotent (get re-normalizes what set stored)
// 3. thousands-separated input formats like the plain number
// 4. the formatted value is the input rounded to `decimals` places

use orderitems::core::DecimalFormat;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

fn fraction_digits(formatted: &str) -> usize {
    formatted.split('.').nth(1).map_or(0, str::len)
}

fn with_thousands(whole: u64) -> String {
    let digits = whole.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

proptest! {
    #[test]
    fn test_output_has_fixed_precision(
        cents in -1_000_000_000i64..1_000_000_000i64,
        decimals in 0u32..=4
    ) {
        let format = DecimalFormat::new(decimals, ".", ",");
        let formatted = format.format_amount(Decimal::new(cents, 2));

        prop_assert_eq!(fraction_digits(&formatted), decimals as usize);
    }

    #[test]
    fn test_format_is_idempotent(
        units in -1_000_000_000_000i64..1_000_000_000_000i64,
        scale in 0u32..=6
    ) {
        let format = DecimalFormat::default();
        let once = format.format(&Decimal::new(units, scale).to_string());
        let twice = format.format(&once);

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_thousand_separators_do_not_change_value(
        whole in 0u64..10_000_000_000u64,
        cents in 0u32..100
    ) {
        let format = DecimalFormat::default();
        let plain = format!("{}.{:02}", whole, cents);
        let grouped = format!("{}.{:02}", with_thousands(whole), cents);

        prop_assert_eq!(format.format(&grouped), format.format(&plain));
    }

    #[test]
    fn test_formatted_value_is_rounded_input(
        units in -1_000_000_000i64..1_000_000_000i64
    ) {
        let format = DecimalFormat::default();
        let input = Decimal::new(units, 4);
        let formatted = Decimal::from_str(&format.format(&input.to_string())).unwrap();

        prop_assert!((formatted - input).abs() <= Decimal::new(5, 3));
    }
}

#[test]
fn test_with_thousands_helper() {
    assert_eq!(with_thousands(1234567), "1,234,567");
    assert_eq!(with_thousands(999), "999");
}
