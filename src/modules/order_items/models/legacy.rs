//! Deprecated fee field names.
//!
//! Fees once exposed `line_total`, `line_tax` and `line_tax_data`. They still
//! resolve to `total`, `total_tax` and `taxes`, and always report as present.
//! New code should use the canonical names; this module is slated for removal.

/// (legacy name, canonical name)
pub const FEE_FIELD_ALIASES: [(&str, &str); 3] = [
    ("line_total", "total"),
    ("line_tax", "total_tax"),
    ("line_tax_data", "taxes"),
];

/// Canonical name for a legacy fee field, `None` for any other name
pub fn canonical_fee_field(key: &str) -> Option<&'static str> {
    let canonical = FEE_FIELD_ALIASES
        .iter()
        .find(|(legacy, _)| *legacy == key)
        .map(|(_, canonical)| *canonical)?;

    tracing::debug!(
        legacy = key,
        canonical = canonical,
        "Deprecated fee field name used"
    );
    Some(canonical)
}
