use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

// rust_decimal's largest supported scale
const MAX_DECIMALS: u32 = 28;

/// Canonical fixed-precision rendering for every monetary value an order item stores.
///
/// Output always uses `.` as the decimal separator and exactly `decimals`
/// fraction digits, whatever separators the store displays prices with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalFormat {
    decimals: u32,
    decimal_separator: String,
    thousand_separator: String,
}

impl DecimalFormat {
    pub fn new(
        decimals: u32,
        decimal_separator: impl Into<String>,
        thousand_separator: impl Into<String>,
    ) -> Self {
        Self {
            decimals: decimals.min(MAX_DECIMALS),
            decimal_separator: decimal_separator.into(),
            thousand_separator: thousand_separator.into(),
        }
    }

    /// Number of fraction digits in the canonical form
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Parse a price as entered or stored.
    ///
    /// Returns `None` for blank input. Anything non-blank that still doesn't
    /// parse after locale cleanup is treated as zero.
    pub fn parse(&self, raw: &str) -> Option<Decimal> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(value) = Decimal::from_str(raw) {
            return Some(value);
        }

        let mut cleaned = raw.to_string();
        if !self.thousand_separator.is_empty() {
            cleaned = cleaned.replace(self.thousand_separator.as_str(), "");
        }
        if !self.decimal_separator.is_empty() && self.decimal_separator != "." {
            cleaned = cleaned.replace(self.decimal_separator.as_str(), ".");
        }
        cleaned.retain(|c| c.is_ascii_digit() || c == '.' || c == '-');

        Some(parse_plain(&cleaned).unwrap_or(Decimal::ZERO))
    }

    /// Normalize a decimal string. Blank input stays blank.
    pub fn format(&self, raw: &str) -> String {
        match self.parse(raw) {
            Some(value) => self.format_amount(value),
            None => String::new(),
        }
    }

    /// Render an amount in canonical form.
    ///
    /// Amounts too large to carry `decimals` fraction digits are clamped to
    /// the largest value that can.
    pub fn format_amount(&self, amount: Decimal) -> String {
        let mut rounded =
            amount.round_dp_with_strategy(self.decimals, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(self.decimals);
        if rounded.scale() != self.decimals {
            tracing::warn!(amount = %amount, decimals = self.decimals, "Amount out of range, clamped");
            rounded = self.limit(amount.is_sign_negative());
        }
        if rounded.is_zero() {
            rounded.set_sign_positive(true);
        }
        rounded.to_string()
    }

    /// Numeric sum of a list of decimal strings, in canonical form.
    ///
    /// A sum that overflows saturates at the representable limit.
    pub fn sum<'a, I>(&self, values: I) -> String
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut total = Decimal::ZERO;
        for value in values.into_iter().filter_map(|value| self.parse(value)) {
            total = match total.checked_add(value) {
                Some(sum) => sum,
                None => {
                    tracing::warn!(total = %total, value = %value, "Decimal sum overflowed, saturating");
                    if value.is_sign_negative() {
                        Decimal::MIN
                    } else {
                        Decimal::MAX
                    }
                }
            };
        }
        self.format_amount(total)
    }

    // Largest magnitude that still has `decimals` fraction digits
    fn limit(&self, negative: bool) -> Decimal {
        let mantissa = Decimal::MAX.mantissa();
        let mantissa = if negative { -mantissa } else { mantissa };
        Decimal::from_i128_with_scale(mantissa, self.decimals)
    }
}

impl Default for DecimalFormat {
    fn default() -> Self {
        Self::new(2, ".", ",")
    }
}

// `.5`, `-.5` and `5.` are accepted the way people type them.
fn parse_plain(cleaned: &str) -> Option<Decimal> {
    let (sign, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", cleaned),
    };
    let digits = digits.strip_suffix('.').unwrap_or(digits);
    if digits.is_empty() {
        return None;
    }
    let digits = if digits.starts_with('.') {
        format!("0{}", digits)
    } else {
        digits.to_string()
    };
    Decimal::from_str(&format!("{}{}", sign, digits)).ok()
}
