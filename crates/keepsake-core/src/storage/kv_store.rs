//! Key-value store trait.
//!
//! Defines the interface for durable local key-value storage.
//! Implementations live in keepsake-infra.

use keepsake_types::error::StoreError;

/// Trait for durable local key-value storage.
///
/// Stores arbitrary JSON values under flat string keys. Namespacing is
/// layered on top by [`crate::storage::keyspace::Keyspace`], so adapters
/// never interpret key contents.
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// Implementations live in keepsake-infra.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key. Returns None if the key does not exist.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<serde_json::Value>, StoreError>> + Send;

    /// Set a value for a key (upsert).
    fn set(
        &self,
        key: &str,
        value: &serde_json::Value,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Delete a key. No-op if the key does not exist.
    fn delete(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// List all keys starting with the given prefix.
    fn list_keys(
        &self,
        prefix: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>, StoreError>> + Send;
}
