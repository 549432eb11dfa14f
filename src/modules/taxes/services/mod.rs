pub mod tax_class_registry;

pub use tax_class_registry::{ConfiguredTaxClasses, TaxClassRegistry};
