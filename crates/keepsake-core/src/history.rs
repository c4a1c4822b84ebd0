//! Per-user generation history cache.
//!
//! Keeps a small, newest-first list of a user's recent generation results
//! so the picker surfaces can offer them for reuse. The list lives in the
//! local key-value store under a per-user key; switching the active user
//! swaps the whole list, so one account's history never bleeds into
//! another's. The cache is advisory: a broken store degrades to an empty
//! history, never to an error.

use chrono::{DateTime, Utc};
use keepsake_types::history::GenerationRecord;

use crate::storage::keyspace::Keyspace;
use crate::storage::kv_store::KeyValueStore;

/// Namespace under which per-user history lists are stored.
pub const HISTORY_NAMESPACE: &str = "history";

/// Newest-first cache of one user's generation results.
pub struct GenerationHistory<S: KeyValueStore> {
    keyspace: Keyspace<S>,
    user_id: String,
    records: Vec<GenerationRecord>,
    limit: Option<usize>,
}

impl<S: KeyValueStore> GenerationHistory<S> {
    /// Open the history for a user, loading whatever the store holds.
    ///
    /// A missing or malformed stored list comes back as empty. `limit`
    /// caps the number of retained records; `None` keeps everything.
    pub async fn open(store: S, user_id: impl Into<String>, limit: Option<usize>) -> Self {
        let mut history = Self {
            keyspace: Keyspace::new(store, HISTORY_NAMESPACE),
            user_id: user_id.into(),
            records: Vec::new(),
            limit,
        };
        history.reload().await;
        history
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Records for the active user, in stored display order. `append`
    /// places the newest first.
    pub fn records(&self) -> &[GenerationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Prepend a freshly generated result and persist the list.
    pub async fn append(&mut self, record: GenerationRecord) {
        self.records.insert(0, record);
        if let Some(limit) = self.limit {
            self.records.truncate(limit);
        }
        self.persist().await;
    }

    /// Drop the record with the matching creation timestamp. Timestamps act
    /// as the removal key; callers keep them unique within one user's list.
    /// Returns how many records were removed.
    pub async fn remove(&mut self, created_at: DateTime<Utc>) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.created_at != created_at);
        let removed = before - self.records.len();
        if removed > 0 {
            self.persist().await;
        }
        removed
    }

    /// Forget the active user's entire history.
    pub async fn clear(&mut self) {
        self.records.clear();
        self.persist().await;
    }

    /// Swap to another user's history, reloading from the store. The
    /// previous user's records stay persisted under their own key.
    pub async fn switch_user(&mut self, user_id: impl Into<String>) {
        self.user_id = user_id.into();
        self.reload().await;
    }

    async fn reload(&mut self) {
        self.records = match self.keyspace.get(&self.user_id).await {
            Some(value) => match serde_json::from_value::<Vec<GenerationRecord>>(value) {
                Ok(records) => records,
                Err(err) => {
                    tracing::warn!(
                        user_id = %self.user_id,
                        error = %err,
                        "stored history is malformed, starting empty"
                    );
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        // Stored order is the display order; only the cap is enforced here.
        if let Some(limit) = self.limit {
            self.records.truncate(limit);
        }
    }

    async fn persist(&self) {
        if self.records.is_empty() {
            self.keyspace.remove(&self.user_id).await;
            return;
        }
        match serde_json::to_value(&self.records) {
            Ok(value) => self.keyspace.put(&self.user_id, &value).await,
            Err(err) => {
                tracing::warn!(user_id = %self.user_id, error = %err, "could not serialize history");
            }
        }
    }
}
