//! Namespaced, fault-absorbing view over a key-value store.
//!
//! All draft and history state flows through a [`Keyspace`]. Full storage
//! keys are derived as `"{namespace}-{suffix}"`, and every adapter error is
//! swallowed at this boundary: reads degrade to absent, writes and deletes
//! to no-ops. Layers above never observe a storage fault, only missing
//! data, so a broken local store can not take the editing flow down.

use serde_json::Value;

use crate::storage::kv_store::KeyValueStore;

/// A namespaced view over a [`KeyValueStore`] that absorbs storage faults.
#[derive(Debug, Clone)]
pub struct Keyspace<S: KeyValueStore> {
    store: S,
    namespace: String,
}

impl<S: KeyValueStore> Keyspace<S> {
    pub fn new(store: S, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Full storage key for a suffix within this namespace.
    pub fn key(&self, suffix: &str) -> String {
        format!("{}-{}", self.namespace, suffix)
    }

    /// Read a value. Storage faults and missing keys both come back as
    /// `None`.
    pub async fn get(&self, suffix: &str) -> Option<Value> {
        let key = self.key(suffix);
        match self.store.get(&key).await {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "keyspace read failed, treating as absent");
                None
            }
        }
    }

    /// Write a value. Storage faults are logged and dropped; callers must
    /// not assume durability.
    pub async fn put(&self, suffix: &str, value: &Value) {
        let key = self.key(suffix);
        if let Err(err) = self.store.set(&key, value).await {
            tracing::warn!(key = %key, error = %err, "keyspace write failed, dropping value");
        }
    }

    /// Delete a value. Absent keys and storage faults are both no-ops.
    pub async fn remove(&self, suffix: &str) {
        let key = self.key(suffix);
        if let Err(err) = self.store.delete(&key).await {
            tracing::warn!(key = %key, error = %err, "keyspace delete failed, skipping");
        }
    }

    /// List the suffixes present in this namespace, with the namespace
    /// prefix stripped. Storage faults degrade to an empty list.
    pub async fn suffixes(&self) -> Vec<String> {
        let prefix = format!("{}-", self.namespace);
        match self.store.list_keys(&prefix).await {
            Ok(keys) => keys
                .into_iter()
                .filter_map(|key| key.strip_prefix(&prefix).map(str::to_string))
                .collect(),
            Err(err) => {
                tracing::warn!(namespace = %self.namespace, error = %err, "keyspace listing failed, treating as empty");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::storage::testing::{BrokenStore, MemStore};

    #[test]
    fn key_derivation_joins_namespace_and_suffix() {
        let ks = Keyspace::new(MemStore::new(), "template");
        assert_eq!(ks.key("draft-new"), "template-draft-new");
        assert_eq!(ks.key("draft-tpl_1"), "template-draft-tpl_1");
    }

    #[tokio::test]
    async fn put_then_get_roundtrip() {
        let ks = Keyspace::new(MemStore::new(), "template");
        ks.put("draft-new", &json!({"name": "Birthday"})).await;
        assert_eq!(ks.get("draft-new").await, Some(json!({"name": "Birthday"})));
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let ks = Keyspace::new(MemStore::new(), "template");
        assert_eq!(ks.get("draft-nope").await, None);
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let ks = Keyspace::new(MemStore::new(), "template");
        ks.put("draft-new", &json!(1)).await;
        ks.remove("draft-new").await;
        ks.remove("draft-new").await;
        assert_eq!(ks.get("draft-new").await, None);
    }

    #[tokio::test]
    async fn suffixes_lists_only_own_namespace() {
        let store = MemStore::new();
        let templates = Keyspace::new(store.clone(), "template");
        let events = Keyspace::new(store, "event");
        templates.put("draft-new", &json!(1)).await;
        templates.put("draft-tpl_1", &json!(2)).await;
        events.put("draft-new", &json!(3)).await;

        let mut suffixes = templates.suffixes().await;
        suffixes.sort();
        assert_eq!(suffixes, vec!["draft-new", "draft-tpl_1"]);
    }

    #[tokio::test]
    async fn broken_store_reads_degrade_to_absent() {
        let ks = Keyspace::new(BrokenStore, "template");
        assert_eq!(ks.get("draft-new").await, None);
        assert!(ks.suffixes().await.is_empty());
    }

    #[tokio::test]
    async fn broken_store_writes_are_absorbed() {
        let ks = Keyspace::new(BrokenStore, "template");
        // Neither call may panic or surface an error.
        ks.put("draft-new", &json!({"name": "x"})).await;
        ks.remove("draft-new").await;
    }
}
