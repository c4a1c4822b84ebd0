//! Stale snapshot expiry.
//!
//! Snapshots must survive reloads and crashes, which is the whole point of
//! keeping them, but a draft the user deliberately walked away from should
//! not resurface days later. Eviction therefore only happens on a teardown
//! the hosting shell positively identifies as navigation, and only once the
//! snapshot has outlived the retention window. A reload, an ambiguous
//! teardown, or a snapshot with no timestamp always preserves.

use std::time::Duration;

use chrono::Utc;

use keepsake_types::draft::{DraftIdentity, TeardownReason};

use crate::draft::snapshot::{SnapshotStore, identity_for};
use crate::storage::kv_store::KeyValueStore;

/// Decide whether a snapshot of the given age should be evicted.
///
/// `age` is `None` for snapshots without a usable write timestamp; those
/// are never age-evicted. Ages exactly at the retention boundary preserve.
pub fn should_evict(reason: TeardownReason, age: Option<Duration>, retention: Duration) -> bool {
    match reason {
        TeardownReason::Reload | TeardownReason::Unknown => false,
        TeardownReason::Navigation => age.is_some_and(|age| age > retention),
    }
}

/// Apply the eviction policy to one draft at editor teardown.
///
/// Returns the snapshot's age when it was evicted, `None` when it was
/// preserved or absent.
pub async fn sweep_on_close<S: KeyValueStore>(
    snapshots: &SnapshotStore<S>,
    identity: &DraftIdentity,
    reason: TeardownReason,
    retention: Duration,
) -> Option<Duration> {
    if matches!(reason, TeardownReason::Reload | TeardownReason::Unknown) {
        return None;
    }
    let snapshot = snapshots.load(identity).await?;
    let age = snapshot.age_at(Utc::now());
    if should_evict(reason, age, retention) {
        snapshots.delete(identity).await;
        let age = age.unwrap_or_default();
        tracing::debug!(
            key = %snapshots.key_for(identity),
            age_secs = age.as_secs(),
            "evicted stale draft snapshot"
        );
        return Some(age);
    }
    None
}

/// Evict every snapshot in the namespace older than `retention`, regardless
/// of how the last session ended. Returns the evicted draft ids.
///
/// This is the maintenance entry point (`draft sweep` in the CLI); editor
/// teardowns go through [`sweep_on_close`].
pub async fn sweep_namespace<S: KeyValueStore>(
    snapshots: &SnapshotStore<S>,
    retention: Duration,
) -> Vec<String> {
    let now = Utc::now();
    let mut evicted = Vec::new();
    for draft_id in snapshots.draft_ids().await {
        let identity = identity_for(&draft_id);
        if let Some(snapshot) = snapshots.load(&identity).await
            && snapshot.age_at(now).is_some_and(|age| age > retention)
        {
            snapshots.delete(&identity).await;
            evicted.push(draft_id);
        }
    }
    evicted
}
