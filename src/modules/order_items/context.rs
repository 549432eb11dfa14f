use std::fmt;
use std::sync::Arc;

use crate::config::StoreConfig;
use crate::core::{DecimalFormat, Result, Translator};
use crate::modules::taxes::{ConfiguredTaxClasses, TaxClassRegistry};

/// Store-wide collaborators every order item consults: the price format,
/// the tax-class registry and the label translations.
#[derive(Clone)]
pub struct ItemContext {
    pub decimal_format: DecimalFormat,
    pub tax_classes: Arc<dyn TaxClassRegistry>,
    pub translator: Translator,
}

impl ItemContext {
    pub fn new(
        decimal_format: DecimalFormat,
        tax_classes: Arc<dyn TaxClassRegistry>,
        translator: Translator,
    ) -> Self {
        Self {
            decimal_format,
            tax_classes,
            translator,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let translator = match &config.translations_path {
            Some(path) => Translator::from_file(path)?,
            None => Translator::default(),
        };

        Ok(Self::new(
            config.decimal_format(),
            Arc::new(ConfiguredTaxClasses::new(config.tax_classes.clone())),
            translator,
        ))
    }
}

impl Default for ItemContext {
    fn default() -> Self {
        Self::new(
            DecimalFormat::default(),
            Arc::new(ConfiguredTaxClasses::default()),
            Translator::default(),
        )
    }
}

impl fmt::Debug for ItemContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemContext")
            .field("decimal_format", &self.decimal_format)
            .field("tax_classes", &self.tax_classes.tax_classes())
            .field("translator", &self.translator)
            .finish()
    }
}
