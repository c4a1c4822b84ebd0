//! In-memory store doubles shared by the unit tests in this crate.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use keepsake_types::error::StoreError;
use serde_json::Value;

use crate::storage::kv_store::KeyValueStore;

/// Working in-memory store. Cloning produces a shared view.
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    entries: Arc<Mutex<HashMap<String, Value>>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("mem store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read a value under a full key, bypassing the trait.
    pub fn raw(&self, key: &str) -> Option<Value> {
        self.entries
            .lock()
            .expect("mem store lock poisoned")
            .get(key)
            .cloned()
    }

    /// Insert a value under a full key, bypassing the trait.
    pub fn insert_raw(&self, key: &str, value: Value) {
        self.entries
            .lock()
            .expect("mem store lock poisoned")
            .insert(key.to_string(), value);
    }
}

impl KeyValueStore for MemStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self
            .entries
            .lock()
            .expect("mem store lock poisoned")
            .get(key)
            .cloned())
    }

    async fn set(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.entries
            .lock()
            .expect("mem store lock poisoned")
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .expect("mem store lock poisoned")
            .remove(key);
        Ok(())
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut keys: Vec<String> = self
            .entries
            .lock()
            .expect("mem store lock poisoned")
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }
}

/// Store whose every operation fails with [`StoreError::Unavailable`].
#[derive(Debug, Clone, Default)]
pub struct BrokenStore;

impl KeyValueStore for BrokenStore {
    async fn get(&self, _key: &str) -> Result<Option<Value>, StoreError> {
        Err(StoreError::Unavailable)
    }

    async fn set(&self, _key: &str, _value: &Value) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }

    async fn delete(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }

    async fn list_keys(&self, _prefix: &str) -> Result<Vec<String>, StoreError> {
        Err(StoreError::Unavailable)
    }
}

/// Store that records the order of mutating operations while delegating
/// reads and writes to an inner [`MemStore`].
#[derive(Debug, Clone, Default)]
pub struct RecordingStore {
    inner: MemStore,
    ops: Arc<Mutex<Vec<String>>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutating operations seen so far, oldest first, as `"set <key>"` or
    /// `"delete <key>"`.
    pub fn ops(&self) -> Vec<String> {
        self.ops.lock().expect("recording store lock poisoned").clone()
    }
}

impl KeyValueStore for RecordingStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.ops
            .lock()
            .expect("recording store lock poisoned")
            .push(format!("set {key}"));
        self.inner.set(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.ops
            .lock()
            .expect("recording store lock poisoned")
            .push(format!("delete {key}"));
        self.inner.delete(key).await
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        self.inner.list_keys(prefix).await
    }
}
