//! Application state wiring storage and configuration together.
//!
//! The core services are generic over the key-value store trait, but AppState
//! pins them to the concrete SQLite implementation used by the CLI.

use std::path::PathBuf;

use keepsake_infra::config::{load_global_config, resolve_data_dir};
use keepsake_infra::sqlite::kv::SqliteKvStore;
use keepsake_infra::sqlite::pool::DatabasePool;
use keepsake_types::config::GlobalConfig;

/// Shared application state used by CLI command handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: SqliteKvStore,
    pub config: GlobalConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: resolve the data directory, open the
    /// database, load global configuration.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("keepsake.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;
        let store = SqliteKvStore::new(db_pool);

        let config = load_global_config(&data_dir).await;

        Ok(Self {
            store,
            config,
            data_dir,
        })
    }
}
