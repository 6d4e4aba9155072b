//! Property classification driving template and mapping-table selection

use serde::{Deserialize, Serialize};

/// Contract family for a listing
///
/// Exactly two buckets: condominium resales get the condo contract,
/// everything else (including an absent property type) gets the
/// single-family resale contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyCategory {
    SingleFamily,
    Condo,
}

impl PropertyCategory {
    /// Classify a free-text property type from a listing
    pub fn classify(property_type: Option<&str>) -> Self {
        match property_type {
            Some(raw) => {
                let lower = raw.to_lowercase();
                if lower.contains("condo") || lower.contains("condominium") {
                    PropertyCategory::Condo
                } else {
                    PropertyCategory::SingleFamily
                }
            }
            None => PropertyCategory::SingleFamily,
        }
    }

    /// Template filename under the per-state directory
    pub fn template_filename(&self) -> &'static str {
        match self {
            PropertyCategory::SingleFamily => "singlefamily-resale.pdf",
            PropertyCategory::Condo => "condo-resale.pdf",
        }
    }
}

impl std::fmt::Display for PropertyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyCategory::SingleFamily => write!(f, "single_family"),
            PropertyCategory::Condo => write!(f, "condo"),
        }
    }
}

/// Normalize a state code for registry lookup, e.g. " tx " -> "TX"
pub fn normalize_state(state: &str) -> String {
    state.trim().to_ascii_uppercase()
}
