//! Split reader/writer SQLite pools in WAL mode.
//!
//! SQLite serializes writers, so `DatabasePool` pairs a single-connection
//! writer pool with a wider reader pool instead of letting writes queue
//! behind reads in one shared pool. Both halves run WAL journaling with
//! foreign keys enforced and a 5 second busy timeout.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

/// Reader connections kept alongside the single writer.
const READER_CONNECTIONS: u32 = 8;

/// Paired pools over one SQLite file.
///
/// `reader` serves concurrent SELECTs; `writer` serializes every mutation
/// through its single connection.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
}

impl DatabasePool {
    /// Open both pools and bring the schema up to date.
    ///
    /// Migrations run on the writer before the reader opens, so a reader
    /// never observes a half-migrated schema.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let opts = SqliteConnectOptions::from_str(database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .create_if_missing(true);

        let writer = open_pool(opts.clone(), 1).await?;
        sqlx::migrate!("../../migrations").run(&writer).await?;

        let reader = open_pool(opts.read_only(true), READER_CONNECTIONS).await?;

        Ok(Self { reader, writer })
    }
}

async fn open_pool(
    opts: SqliteConnectOptions,
    connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(connections)
        .connect_with(opts)
        .await
}

/// Database URL for the resolved data directory (`KEEPSAKE_DATA_DIR` or
/// `~/.keepsake`).
pub fn default_database_url() -> String {
    let data_dir = crate::config::resolve_data_dir();
    format!("sqlite://{}/keepsake.db", data_dir.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn open_test_pool(file: &str) -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join(file).display());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    #[tokio::test]
    async fn test_pool_runs_migrations() {
        let pool = open_test_pool("migrate.db").await;

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '_sqlx_migrations' ORDER BY name",
        )
        .fetch_all(&pool.reader)
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|t| t.0.as_str()).collect();
        assert!(names.contains(&"kv_entries"), "kv_entries table missing");
    }

    #[tokio::test]
    async fn test_pool_wal_mode() {
        let pool = open_test_pool("wal.db").await;

        let mode: (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&pool.writer)
            .await
            .unwrap();

        assert_eq!(mode.0.to_lowercase(), "wal");
    }

    #[tokio::test]
    async fn test_reader_pool_rejects_writes() {
        let pool = open_test_pool("readonly.db").await;

        let result = sqlx::query("INSERT INTO kv_entries (key, value, created_at, updated_at) VALUES ('k', '1', '', '')")
            .execute(&pool.reader)
            .await;

        assert!(result.is_err(), "reader pool must be read-only");
    }

    #[tokio::test]
    async fn test_default_database_url() {
        let url = default_database_url();
        assert!(url.starts_with("sqlite://"));
        assert!(url.ends_with("keepsake.db"));
    }
}
