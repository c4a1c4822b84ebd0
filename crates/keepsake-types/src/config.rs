//! Global configuration types for Keepsake.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls
//! draft retention and history bounds.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Keepsake engine.
///
/// Loaded from `{data_dir}/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// How long a draft snapshot survives after its last write before the
    /// expiry sweeper may evict it on navigation teardown, in seconds.
    #[serde(default = "default_draft_retention_secs")]
    pub draft_retention_secs: u64,

    /// Maximum number of history entries kept per user. `None` (the
    /// default) keeps the list unbounded, matching append-only semantics.
    #[serde(default)]
    pub history_limit: Option<u32>,
}

fn default_draft_retention_secs() -> u64 {
    60
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            draft_retention_secs: default_draft_retention_secs(),
            history_limit: None,
        }
    }
}

impl GlobalConfig {
    /// The retention threshold as a `Duration`.
    pub fn draft_retention(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.draft_retention_secs)
    }
}
