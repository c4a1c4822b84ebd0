//! Canonical model identifier resolution.
//!
//! Assets arrive from other surfaces tagged with whatever identifier the
//! generating pipeline used: a short id, a raw provider id, sometimes with
//! stray casing or whitespace. `ModelCatalog` maps any of those spellings
//! onto the canonical short id the entity configuration expects. Resolution
//! is a pure lookup with no I/O.

use keepsake_types::catalog::ModelVariant;

/// Collapse case and surrounding whitespace for comparison.
fn normalize(id: &str) -> String {
    id.trim().to_ascii_lowercase()
}

/// The set of known model variants plus a fallback short id.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    entries: Vec<ModelVariant>,
    default_id: String,
}

impl ModelCatalog {
    pub fn new(entries: Vec<ModelVariant>, default_id: impl Into<String>) -> Self {
        Self {
            entries,
            default_id: default_id.into(),
        }
    }

    pub fn entries(&self) -> &[ModelVariant] {
        &self.entries
    }

    /// Short id used when an identifier matches nothing in the catalog.
    pub fn default_id(&self) -> &str {
        &self.default_id
    }

    /// Resolve a raw identifier to a canonical short id.
    ///
    /// Candidates are tried in priority order: normalized short id,
    /// exact raw model id, normalized model id. An identifier that matches
    /// none of them resolves to [`Self::default_id`]. Same input, same
    /// output: there is no fallback chain beyond the default.
    pub fn resolve(&self, raw: &str) -> &str {
        let needle = normalize(raw);
        if let Some(entry) = self.entries.iter().find(|e| normalize(&e.short_id) == needle) {
            return &entry.short_id;
        }
        if let Some(entry) = self.entries.iter().find(|e| e.model_id == raw) {
            return &entry.short_id;
        }
        if let Some(entry) = self.entries.iter().find(|e| normalize(&e.model_id) == needle) {
            return &entry.short_id;
        }
        &self.default_id
    }

    /// Resolve an optional identifier, falling back to the default when
    /// none was carried at all.
    pub fn resolve_or_default(&self, raw: Option<&str>) -> &str {
        match raw {
            Some(id) => self.resolve(id),
            None => &self.default_id,
        }
    }
}
