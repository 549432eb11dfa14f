/// Source of the store's currently valid tax classes.
///
/// The standard class is the empty string and is never listed here.
pub trait TaxClassRegistry: Send + Sync {
    fn tax_classes(&self) -> Vec<String>;

    fn is_valid(&self, tax_class: &str) -> bool {
        tax_class.is_empty() || self.tax_classes().iter().any(|c| c == tax_class)
    }
}

/// Tax classes fixed at startup from configuration
#[derive(Debug, Clone)]
pub struct ConfiguredTaxClasses {
    classes: Vec<String>,
}

impl ConfiguredTaxClasses {
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = Vec::new();
        for class in classes {
            let class = class.into().trim().to_string();
            if !class.is_empty() && !seen.contains(&class) {
                seen.push(class);
            }
        }
        Self { classes: seen }
    }
}

impl Default for ConfiguredTaxClasses {
    fn default() -> Self {
        Self::new(["Reduced rate", "Zero rate"])
    }
}

impl TaxClassRegistry for ConfiguredTaxClasses {
    fn tax_classes(&self) -> Vec<String> {
        self.classes.clone()
    }
}
