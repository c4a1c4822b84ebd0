//! Editor state recovery.
//!
//! When an editing surface opens, something has to decide what state it
//! shows: a snapshot left behind by an interrupted session, a creation seed
//! handed off from a generation surface, the server's canonical record, or
//! the blank default. Exactly one source wins, in that order, and the
//! decision is observable on the event bus.

use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use keepsake_types::draft::{CreationSeed, DraftIdentity};
use keepsake_types::error::DraftError;
use keepsake_types::event::DraftEvent;

use crate::catalog::ModelCatalog;
use crate::draft::DraftPolicy;
use crate::draft::snapshot::SnapshotStore;
use crate::event::EventBus;
use crate::handoff::SeedSlot;
use crate::remote::EntityClient;
use crate::storage::kv_store::KeyValueStore;

/// Where the recovered editor state came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftSource {
    /// A local snapshot from an interrupted session.
    Snapshot,
    /// A creation seed handed off by a generation surface.
    Seed,
    /// The server's canonical record.
    Remote,
    /// The hard default blank state.
    Blank,
}

/// The state an editor should open with.
#[derive(Debug, Clone)]
pub struct RecoveredDraft {
    pub payload: Value,
    pub source: DraftSource,
    /// Label of the restored snapshot, for the recovery notice.
    pub label: Option<String>,
}

/// Resolve the state an editor should open with.
///
/// Precedence: local snapshot, then (for a new draft) a pending creation
/// seed, then (for a confirmed id) the server record, then the blank
/// default. Lifecycle events are published on `bus` as the source is
/// chosen.
///
/// Opening the creation surface always drains the seed slot, even when a
/// snapshot outranks the seed, so a stale seed can never leak into a later
/// session. A failed server fetch is the one visible error here: callers
/// are expected to surface it and leave the editor.
#[allow(clippy::too_many_arguments)]
pub async fn recover<S: KeyValueStore, C: EntityClient>(
    snapshots: &SnapshotStore<S>,
    client: &C,
    seeds: &SeedSlot,
    catalog: &ModelCatalog,
    policy: &DraftPolicy,
    identity: &DraftIdentity,
    bus: &EventBus,
    cancel: &CancellationToken,
) -> Result<RecoveredDraft, DraftError> {
    match identity {
        DraftIdentity::Provisional => {
            let pending = seeds.consume();
            if let Some(snapshot) = snapshots.load(identity).await {
                if pending.is_some() {
                    tracing::debug!("snapshot outranks pending seed, dropping seed");
                }
                let label = snapshots.label_of(&snapshot.payload);
                bus.publish(DraftEvent::SnapshotRestored { label: label.clone() });
                return Ok(RecoveredDraft {
                    payload: snapshot.payload,
                    source: DraftSource::Snapshot,
                    label,
                });
            }
            if let Some(seed) = pending {
                bus.publish(DraftEvent::SeedApplied {
                    asset_url: seed.asset_url.clone(),
                });
                return Ok(RecoveredDraft {
                    payload: seeded_payload(policy, catalog, &seed),
                    source: DraftSource::Seed,
                    label: None,
                });
            }
            Ok(RecoveredDraft {
                payload: policy.blank_state.clone(),
                source: DraftSource::Blank,
                label: None,
            })
        }
        DraftIdentity::Confirmed(id) => {
            if let Some(snapshot) = snapshots.load(identity).await {
                let label = snapshots.label_of(&snapshot.payload);
                bus.publish(DraftEvent::SnapshotRestored { label: label.clone() });
                return Ok(RecoveredDraft {
                    payload: snapshot.payload,
                    source: DraftSource::Snapshot,
                    label,
                });
            }
            let fetched = tokio::select! {
                _ = cancel.cancelled() => return Err(DraftError::Cancelled),
                result = client.fetch(id) => result,
            };
            match fetched {
                Ok(record) => {
                    bus.publish(DraftEvent::EntityLoaded {
                        id: record.id.clone(),
                    });
                    Ok(RecoveredDraft {
                        payload: record.payload,
                        source: DraftSource::Remote,
                        label: None,
                    })
                }
                Err(err) => {
                    bus.publish(DraftEvent::LoadFailed {
                        id: id.clone(),
                        error: err.to_string(),
                    });
                    Err(DraftError::Load(err))
                }
            }
        }
    }
}

/// Blank state overlaid with the seed's asset, kind, prompt, and
/// catalog-resolved model id. The label field stays blank, so a freshly
/// seeded draft is not snapshotted until the user names it.
fn seeded_payload(policy: &DraftPolicy, catalog: &ModelCatalog, seed: &CreationSeed) -> Value {
    let mut payload = policy.blank_state.clone();
    if let Some(fields) = payload.as_object_mut() {
        fields.insert("source_image_url".to_string(), json!(seed.asset_url));
        fields.insert("kind".to_string(), json!(seed.kind.as_str()));
        fields.insert(
            "model_id".to_string(),
            json!(catalog.resolve_or_default(seed.model_id.as_deref())),
        );
        if let Some(prompt) = &seed.prompt {
            fields.insert("prompt".to_string(), json!(prompt));
        }
    }
    payload
}
