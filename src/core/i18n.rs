use std::collections::HashMap;
use std::path::Path;

use crate::core::{AppError, Result};

/// Message catalog for user-facing labels.
///
/// Lookups fall back to the source text, so an empty catalog is a valid
/// English-only setup.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    catalog: HashMap<String, String>,
}

impl Translator {
    pub fn new(catalog: HashMap<String, String>) -> Self {
        Self { catalog }
    }

    /// Load a flat JSON object of `"source": "translation"` pairs
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Configuration(format!(
                "Failed to read translations from {}: {}",
                path.display(),
                e
            ))
        })?;
        let catalog: HashMap<String, String> = serde_json::from_str(&contents)?;

        tracing::debug!(
            path = %path.display(),
            entries = catalog.len(),
            "Loaded translation catalog"
        );

        Ok(Self { catalog })
    }

    pub fn translate(&self, text: &str) -> String {
        self.catalog
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.to_string())
    }
}
