//! Draft snapshot persistence.
//!
//! Every edit an editor surface makes is mirrored into the local store as a
//! snapshot, so an interrupted session can pick up where it left off. When
//! a user abandons a session (closes the app, loses the tab), the draft is
//! recovered from here on the next open.
//!
//! Writes are gated on the draft having a usable label: a payload whose
//! identifying field is missing, not a string, or blank after trimming is
//! not worth recovering and is never persisted.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use keepsake_types::draft::{DraftIdentity, DraftSnapshot};

use crate::draft::DraftPolicy;
use crate::storage::keyspace::Keyspace;
use crate::storage::kv_store::KeyValueStore;

/// Key segment that marks draft entries within a namespace.
pub const DRAFT_KEY_PREFIX: &str = "draft";

/// Identity for a stored draft id (`"new"` maps to provisional).
pub fn identity_for(draft_id: &str) -> DraftIdentity {
    if draft_id == keepsake_types::draft::PROVISIONAL_KEY_SUFFIX {
        DraftIdentity::Provisional
    } else {
        DraftIdentity::Confirmed(draft_id.to_string())
    }
}

// ---------------------------------------------------------------------------
// Domain types
// ---------------------------------------------------------------------------

/// Result of a snapshot attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOutcome {
    /// The payload was wrapped in an envelope and handed to the store.
    Written,
    /// The payload had no usable label yet, so nothing was persisted.
    SkippedUnnamed,
}

/// Lightweight summary of a stored snapshot for listing.
///
/// Avoids handing full payloads around when only metadata is needed
/// (e.g. "Resume draft: 'Birthday Booth' -- 2 min ago").
#[derive(Debug, Clone, Serialize)]
pub struct DraftSummary {
    /// Identity portion of the storage key (`"new"` or a confirmed id).
    pub draft_id: String,
    /// Label extracted from the payload, when present.
    pub label: Option<String>,
    /// Local time of the last write, when known.
    pub written_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Snapshot persistence for one entity namespace.
///
/// Wraps a [`Keyspace`] and handles envelope wrapping, the unnamed-draft
/// write guard, and summary listings. Storage faults are absorbed below
/// this layer; none of these methods can fail.
#[derive(Debug, Clone)]
pub struct SnapshotStore<S: KeyValueStore> {
    keyspace: Keyspace<S>,
    label_field: String,
}

impl<S: KeyValueStore> SnapshotStore<S> {
    pub fn new(store: S, policy: &DraftPolicy) -> Self {
        Self {
            keyspace: Keyspace::new(store, policy.namespace.clone()),
            label_field: policy.label_field.clone(),
        }
    }

    fn suffix(identity: &DraftIdentity) -> String {
        format!("{DRAFT_KEY_PREFIX}-{}", identity.key_suffix())
    }

    /// Full storage key for an identity, for logs and events.
    pub fn key_for(&self, identity: &DraftIdentity) -> String {
        self.keyspace.key(&Self::suffix(identity))
    }

    /// The trimmed label of a payload, when its identifying field holds a
    /// non-blank string.
    pub fn label_of(&self, payload: &Value) -> Option<String> {
        payload
            .get(&self.label_field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(str::to_string)
    }

    /// Persist a payload under the identity's key, replacing any previous
    /// snapshot wholesale. Unnamed payloads are skipped, leaving whatever
    /// was stored before untouched.
    pub async fn save(&self, identity: &DraftIdentity, payload: &Value) -> SnapshotOutcome {
        if self.label_of(payload).is_none() {
            tracing::debug!(key = %self.key_for(identity), "draft has no label yet, skipping snapshot");
            return SnapshotOutcome::SkippedUnnamed;
        }
        self.put_envelope(identity, payload).await;
        SnapshotOutcome::Written
    }

    /// Wrap and store a payload without the unnamed-draft guard.
    /// Reconciliation uses this to re-key a server-accepted draft.
    pub(crate) async fn put_envelope(&self, identity: &DraftIdentity, payload: &Value) {
        let snapshot = DraftSnapshot::new(payload.clone());
        self.keyspace
            .put(&Self::suffix(identity), &snapshot.to_value())
            .await;
    }

    /// Load the snapshot stored for an identity, if any. Both envelope and
    /// legacy bare-payload formats are accepted.
    pub async fn load(&self, identity: &DraftIdentity) -> Option<DraftSnapshot> {
        self.keyspace
            .get(&Self::suffix(identity))
            .await
            .map(DraftSnapshot::parse)
    }

    /// Drop the snapshot stored for an identity. No-op when absent.
    pub async fn delete(&self, identity: &DraftIdentity) {
        self.keyspace.remove(&Self::suffix(identity)).await;
    }

    /// Raw stored value for an identity, without envelope interpretation.
    pub async fn load_raw(&self, identity: &DraftIdentity) -> Option<Value> {
        self.keyspace.get(&Self::suffix(identity)).await
    }

    /// All draft ids present in this namespace.
    pub async fn draft_ids(&self) -> Vec<String> {
        let marker = format!("{DRAFT_KEY_PREFIX}-");
        self.keyspace
            .suffixes()
            .await
            .into_iter()
            .filter_map(|suffix| suffix.strip_prefix(&marker).map(str::to_string))
            .collect()
    }

    /// Summaries of every stored snapshot, most recently written first.
    /// Snapshots without a timestamp sort last.
    pub async fn list(&self) -> Vec<DraftSummary> {
        let mut summaries = Vec::new();
        for draft_id in self.draft_ids().await {
            let identity = identity_for(&draft_id);
            if let Some(snapshot) = self.load(&identity).await {
                summaries.push(DraftSummary {
                    draft_id,
                    label: self.label_of(&snapshot.payload),
                    written_at: snapshot.written_at,
                });
            }
        }
        summaries.sort_by(|a, b| b.written_at.cmp(&a.written_at));
        summaries
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::storage::testing::MemStore;

    fn policy() -> DraftPolicy {
        DraftPolicy::new("template", json!({"name": ""}))
    }

    #[tokio::test]
    async fn save_writes_envelope_under_identity_key() {
        let store = MemStore::new();
        let snapshots = SnapshotStore::new(store.clone(), &policy());

        let outcome = snapshots
            .save(&DraftIdentity::Provisional, &json!({"name": "Birthday Booth"}))
            .await;
        assert_eq!(outcome, SnapshotOutcome::Written);

        let stored = store.raw("template-draft-new").expect("envelope should be stored");
        assert_eq!(stored["payload"]["name"], "Birthday Booth");
        assert_eq!(stored["schema_version"], 1);
        assert!(stored["written_at"].is_string());
    }

    #[tokio::test]
    async fn confirmed_identity_uses_id_in_key() {
        let store = MemStore::new();
        let snapshots = SnapshotStore::new(store.clone(), &policy());

        snapshots
            .save(
                &DraftIdentity::Confirmed("tpl_1".to_string()),
                &json!({"name": "Retro Pop"}),
            )
            .await;
        assert!(store.raw("template-draft-tpl_1").is_some());
        assert!(store.raw("template-draft-new").is_none());
    }

    #[tokio::test]
    async fn unnamed_draft_is_never_snapshotted() {
        let store = MemStore::new();
        let snapshots = SnapshotStore::new(store.clone(), &policy());
        let identity = DraftIdentity::Provisional;

        for payload in [
            json!({}),
            json!({"name": ""}),
            json!({"name": "   "}),
            json!({"name": 7}),
            json!({"name": null}),
        ] {
            let outcome = snapshots.save(&identity, &payload).await;
            assert_eq!(outcome, SnapshotOutcome::SkippedUnnamed, "payload: {payload}");
        }
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn skipped_save_leaves_previous_snapshot_untouched() {
        let snapshots = SnapshotStore::new(MemStore::new(), &policy());
        let identity = DraftIdentity::Provisional;

        snapshots.save(&identity, &json!({"name": "Keep me"})).await;
        snapshots.save(&identity, &json!({"name": "  "})).await;

        let snapshot = snapshots.load(&identity).await.expect("snapshot should remain");
        assert_eq!(snapshot.payload["name"], "Keep me");
    }

    #[tokio::test]
    async fn save_replaces_previous_snapshot_wholesale() {
        let snapshots = SnapshotStore::new(MemStore::new(), &policy());
        let identity = DraftIdentity::Provisional;

        snapshots
            .save(&identity, &json!({"name": "First", "prompt": "neon"}))
            .await;
        snapshots.save(&identity, &json!({"name": "Second"})).await;

        let snapshot = snapshots.load(&identity).await.unwrap();
        assert_eq!(snapshot.payload, json!({"name": "Second"}));
    }

    #[tokio::test]
    async fn load_accepts_legacy_bare_payloads() {
        let store = MemStore::new();
        store.insert_raw(
            "template-draft-new",
            json!({"name": "Old Format", "updated_at": "2025-06-01T12:00:00Z"}),
        );
        let snapshots = SnapshotStore::new(store, &policy());

        let snapshot = snapshots.load(&DraftIdentity::Provisional).await.unwrap();
        assert_eq!(snapshot.payload["name"], "Old Format");
        assert_eq!(snapshot.schema_version, 0);
        assert!(snapshot.written_at.is_some());
    }

    #[tokio::test]
    async fn load_missing_returns_none() {
        let snapshots = SnapshotStore::new(MemStore::new(), &policy());
        assert!(snapshots.load(&DraftIdentity::Provisional).await.is_none());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemStore::new();
        let snapshots = SnapshotStore::new(store.clone(), &policy());
        let identity = DraftIdentity::Provisional;

        snapshots.save(&identity, &json!({"name": "x"})).await;
        snapshots.delete(&identity).await;
        snapshots.delete(&identity).await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn list_orders_newest_first_and_skips_foreign_keys() {
        let store = MemStore::new();
        store.insert_raw(
            "template-draft-tpl_old",
            json!({
                "payload": {"name": "Older"},
                "written_at": "2025-06-01T10:00:00Z",
                "schema_version": 1,
            }),
        );
        store.insert_raw(
            "template-draft-new",
            json!({
                "payload": {"name": "Newer"},
                "written_at": "2025-06-01T12:00:00Z",
                "schema_version": 1,
            }),
        );
        // Same namespace, not a draft entry.
        store.insert_raw("template-settings", json!({"theme": "dark"}));

        let snapshots = SnapshotStore::new(store, &policy());
        let listed = snapshots.list().await;

        let ids: Vec<&str> = listed.iter().map(|s| s.draft_id.as_str()).collect();
        assert_eq!(ids, vec!["new", "tpl_old"]);
        assert_eq!(listed[0].label.as_deref(), Some("Newer"));
    }

    #[tokio::test]
    async fn list_puts_untimestamped_snapshots_last() {
        let store = MemStore::new();
        store.insert_raw("template-draft-a", json!({"name": "Legacy"}));
        store.insert_raw(
            "template-draft-b",
            json!({
                "payload": {"name": "Stamped"},
                "written_at": "2025-06-01T12:00:00Z",
                "schema_version": 1,
            }),
        );

        let snapshots = SnapshotStore::new(store, &policy());
        let listed = snapshots.list().await;
        assert_eq!(listed[0].draft_id, "b");
        assert_eq!(listed[1].draft_id, "a");
        assert!(listed[1].written_at.is_none());
    }

    #[tokio::test]
    async fn custom_label_field_gates_writes() {
        let store = MemStore::new();
        let policy = DraftPolicy::new("event", json!({"title": ""})).with_label_field("title");
        let snapshots = SnapshotStore::new(store.clone(), &policy);
        let identity = DraftIdentity::Provisional;

        let skipped = snapshots.save(&identity, &json!({"name": "wrong field"})).await;
        assert_eq!(skipped, SnapshotOutcome::SkippedUnnamed);

        let written = snapshots.save(&identity, &json!({"title": "Launch Party"})).await;
        assert_eq!(written, SnapshotOutcome::Written);
        assert!(store.raw("event-draft-new").is_some());
    }
}
