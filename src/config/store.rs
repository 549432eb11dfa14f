use crate::core::{AppError, DecimalFormat, Result};
use std::env;
use std::path::PathBuf;

/// Shop settings order items depend on
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Fraction digits of every stored amount
    pub price_decimals: u32,
    pub decimal_separator: String,
    pub thousand_separator: String,
    /// Non-standard tax classes; the standard class ("") is implicit
    pub tax_classes: Vec<String>,
    /// JSON catalog for user-facing labels
    pub translations_path: Option<PathBuf>,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(StoreConfig {
            price_decimals: env::var("PRICE_DECIMALS")
                .unwrap_or_else(|_| defaults.price_decimals.to_string())
                .parse()
                .map_err(|_| AppError::Configuration("Invalid PRICE_DECIMALS".to_string()))?,
            decimal_separator: env::var("PRICE_DECIMAL_SEPARATOR")
                .unwrap_or(defaults.decimal_separator),
            thousand_separator: env::var("PRICE_THOUSAND_SEPARATOR")
                .unwrap_or(defaults.thousand_separator),
            tax_classes: env::var("TAX_CLASSES")
                .map(|v| parse_tax_classes(&v))
                .unwrap_or(defaults.tax_classes),
            translations_path: env::var("TRANSLATIONS_PATH").ok().map(PathBuf::from),
        })
    }

    pub fn decimal_format(&self) -> DecimalFormat {
        DecimalFormat::new(
            self.price_decimals,
            self.decimal_separator.clone(),
            self.thousand_separator.clone(),
        )
    }

    pub fn validate(&self) -> Result<()> {
        if self.price_decimals > 10 {
            return Err(AppError::Configuration(
                "PRICE_DECIMALS cannot exceed 10".to_string(),
            ));
        }

        if self.decimal_separator.is_empty() {
            return Err(AppError::Configuration(
                "Price decimal separator cannot be empty".to_string(),
            ));
        }

        if self.decimal_separator == self.thousand_separator {
            return Err(AppError::Configuration(
                "Price decimal and thousand separators must differ".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            price_decimals: 2,
            decimal_separator: ".".to_string(),
            thousand_separator: ",".to_string(),
            tax_classes: vec!["Reduced rate".to_string(), "Zero rate".to_string()],
            translations_path: None,
        }
    }
}

/// `TAX_CLASSES` is a comma-separated list of class names
fn parse_tax_classes(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|class| !class.is_empty())
        .map(str::to_string)
        .collect()
}
