//! Global configuration loader for Keepsake.
//!
//! Reads `config.toml` from the data directory (`~/.keepsake/` in
//! production) and deserializes it into [`GlobalConfig`]. Falls back to
//! defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use keepsake_types::config::GlobalConfig;

/// Minimum snapshot retention (safety floor). A shorter window would evict
/// drafts the moment the user navigated anywhere.
const MIN_RETENTION_SECS: u64 = 5;

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Resolve the snapshot retention window.
///
/// Priority:
/// 1. Per-surface override (e.g. a `--retention-secs` flag)
/// 2. Global default from `config.toml` (`draft_retention_secs`)
///
/// A floor of 5 seconds is enforced regardless of source.
pub fn resolve_retention(global_config: &GlobalConfig, surface_override: Option<u64>) -> Duration {
    let secs = surface_override.unwrap_or(global_config.draft_retention_secs);
    Duration::from_secs(secs.max(MIN_RETENTION_SECS))
}

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `KEEPSAKE_DATA_DIR` environment variable
/// 2. Home directory fallback: `~/.keepsake`
/// 3. Last resort: `./.keepsake`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("KEEPSAKE_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".keepsake");
    }

    PathBuf::from(".keepsake")
}
