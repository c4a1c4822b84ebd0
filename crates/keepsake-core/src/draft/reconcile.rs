//! Draft re-keying after a successful creation.
//!
//! While an entity has never been saved, its draft lives under the
//! provisional `"new"` key. The first successful create assigns a server
//! id, and the snapshot must follow: it is written under the confirmed key
//! before the provisional key is deleted, so an interruption between the
//! two steps leaves the draft reachable under at least one key. From the
//! caller's single-threaded point of view the move is atomic.

use keepsake_types::draft::DraftIdentity;
use keepsake_types::remote::EntityRecord;

use crate::draft::snapshot::SnapshotStore;
use crate::storage::kv_store::KeyValueStore;

/// Re-key a provisional draft onto its server-assigned id.
///
/// `record` is the created entity as the server returned it; its payload
/// is what lands under the confirmed key, including any fields the service
/// filled in. It is stored even when unnamed, since a created entity is
/// always worth recovering. Returns the confirmed identity the session
/// should carry from now on.
pub async fn confirm_creation<S: KeyValueStore>(
    snapshots: &SnapshotStore<S>,
    record: &EntityRecord,
) -> DraftIdentity {
    let confirmed = DraftIdentity::Confirmed(record.id.clone());
    snapshots.put_envelope(&confirmed, &record.payload).await;
    snapshots.delete(&DraftIdentity::Provisional).await;
    tracing::debug!(key = %snapshots.key_for(&confirmed), "draft re-keyed after creation");
    confirmed
}
