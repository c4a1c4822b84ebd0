//! SQLite key-value store implementation.
//!
//! Implements `KeyValueStore` from `keepsake-core` using sqlx with split
//! read/write pools. Values are stored as JSON text in the `kv_entries`
//! table and deserialized on read; a row whose text is not valid JSON
//! surfaces as [`StoreError::Malformed`] so the layer above can treat it
//! as absent.

use chrono::Utc;
use sqlx::Row;

use keepsake_core::storage::kv_store::KeyValueStore;
use keepsake_types::error::StoreError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `KeyValueStore`.
#[derive(Debug, Clone)]
pub struct SqliteKvStore {
    pool: DatabasePool,
}

impl SqliteKvStore {
    /// Create a new KV store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// LIKE pattern matching every key that starts with `prefix`, with LIKE
/// metacharacters escaped.
fn prefix_pattern(prefix: &str) -> String {
    let escaped = prefix
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("{escaped}%")
}

fn query_error(err: sqlx::Error) -> StoreError {
    StoreError::Operation(err.to_string())
}

// ---------------------------------------------------------------------------
// KeyValueStore implementation
// ---------------------------------------------------------------------------

impl KeyValueStore for SqliteKvStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        let row = sqlx::query("SELECT value FROM kv_entries WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        match row {
            Some(row) => {
                let value_str: String = row.try_get("value").map_err(query_error)?;
                let value: serde_json::Value = serde_json::from_str(&value_str)
                    .map_err(|e| StoreError::Malformed(format!("key {key}: {e}")))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339();
        let value_str = serde_json::to_string(value)
            .map_err(|e| StoreError::Operation(format!("failed to serialize value: {e}")))?;

        sqlx::query(
            r#"INSERT INTO kv_entries (key, value, created_at, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(key)
        .bind(&value_str)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM kv_entries WHERE key = ?")
            .bind(key)
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;

        Ok(())
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let rows =
            sqlx::query("SELECT key FROM kv_entries WHERE key LIKE ? ESCAPE '\\' ORDER BY key")
                .bind(prefix_pattern(prefix))
                .fetch_all(&self.pool.reader)
                .await
                .map_err(query_error)?;

        let mut keys = Vec::with_capacity(rows.len());
        for row in &rows {
            let key: String = row.try_get("key").map_err(query_error)?;
            keys.push(key);
        }

        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::sqlite::pool::DatabasePool;

    async fn test_store() -> (SqliteKvStore, DatabasePool) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        let pool = DatabasePool::new(&url).await.unwrap();
        (SqliteKvStore::new(pool.clone()), pool)
    }

    #[tokio::test]
    async fn test_set_get_roundtrip() {
        let (store, _pool) = test_store().await;

        let value = json!({"name": "Birthday Booth", "prompt": "confetti"});
        store.set("template-draft-new", &value).await.unwrap();

        let got = store.get("template-draft-new").await.unwrap();
        assert_eq!(got, Some(value));
    }

    #[tokio::test]
    async fn test_get_nonexistent_returns_none() {
        let (store, _pool) = test_store().await;
        let got = store.get("template-draft-missing").await.unwrap();
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn test_set_upserts() {
        let (store, _pool) = test_store().await;

        store.set("counter", &json!(1)).await.unwrap();
        store.set("counter", &json!(2)).await.unwrap();

        let got = store.get("counter").await.unwrap();
        assert_eq!(got, Some(json!(2)));
    }

    #[tokio::test]
    async fn test_delete_and_delete_nonexistent() {
        let (store, _pool) = test_store().await;

        store.set("temp", &json!("value")).await.unwrap();
        store.delete("temp").await.unwrap();
        assert!(store.get("temp").await.unwrap().is_none());

        // Deleting again should not error
        store.delete("temp").await.unwrap();
    }

    #[tokio::test]
    async fn test_list_keys_filters_by_prefix() {
        let (store, _pool) = test_store().await;

        store.set("template-draft-new", &json!(1)).await.unwrap();
        store.set("template-draft-tpl_1", &json!(2)).await.unwrap();
        store.set("history-user_1", &json!(3)).await.unwrap();

        let keys = store.list_keys("template-").await.unwrap();
        assert_eq!(keys, vec!["template-draft-new", "template-draft-tpl_1"]);

        let all = store.list_keys("").await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_list_keys_treats_prefix_literally() {
        let (store, _pool) = test_store().await;

        store.set("a_c", &json!(1)).await.unwrap();
        store.set("abc", &json!(2)).await.unwrap();

        // "_" must not act as a single-character wildcard.
        let keys = store.list_keys("a_").await.unwrap();
        assert_eq!(keys, vec!["a_c"]);
    }

    #[tokio::test]
    async fn test_corrupt_row_reports_malformed() {
        let (store, pool) = test_store().await;

        sqlx::query(
            "INSERT INTO kv_entries (key, value, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind("template-draft-new")
        .bind("{not json at all")
        .bind(Utc::now().to_rfc3339())
        .bind(Utc::now().to_rfc3339())
        .execute(&pool.writer)
        .await
        .unwrap();

        let err = store.get("template-draft-new").await.unwrap_err();
        assert!(matches!(err, StoreError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_json_value_types_roundtrip() {
        let (store, _pool) = test_store().await;

        for (key, value) in [
            ("string", json!("hello")),
            ("number", json!(42)),
            ("bool", json!(true)),
            ("null", json!(null)),
            ("array", json!([1, "two", 3])),
            ("nested", json!({"a": {"b": {"c": true}}})),
        ] {
            store.set(key, &value).await.unwrap();
            assert_eq!(store.get(key).await.unwrap(), Some(value), "key: {key}");
        }
    }
}
