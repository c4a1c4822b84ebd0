//! Canonical model catalog entry type.

use serde::{Deserialize, Serialize};

/// One entry in the canonical model catalog.
///
/// `short_id` is the canonical identifier the editor configuration uses;
/// `model_id` is the raw identifier produced by the generating subsystem
/// (e.g. `"model/a1"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelVariant {
    pub short_id: String,
    pub model_id: String,
}

impl ModelVariant {
    pub fn new(short_id: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            short_id: short_id.into(),
            model_id: model_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_variant_serde_roundtrip() {
        let variant = ModelVariant::new("a1", "model/a1");
        let json = serde_json::to_string(&variant).unwrap();
        assert!(json.contains("\"short_id\":\"a1\""));
        let parsed: ModelVariant = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, variant);
    }
}
