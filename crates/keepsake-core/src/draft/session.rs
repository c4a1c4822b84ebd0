//! Draft session orchestration.
//!
//! A `DraftSession` is the lifetime of one editor surface: it recovers the
//! opening state, mirrors edits into the local snapshot, drives saves and
//! submissions against the entity service, re-keys the draft once the
//! server assigns an id, and applies the expiry policy at teardown. The
//! hosting surface owns the working payload; the session owns identity and
//! persistence.

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use keepsake_types::draft::{DraftIdentity, TeardownReason};
use keepsake_types::error::DraftError;
use keepsake_types::event::DraftEvent;
use keepsake_types::remote::EntityRecord;

use crate::catalog::ModelCatalog;
use crate::draft::snapshot::{SnapshotOutcome, SnapshotStore};
use crate::draft::{DraftPolicy, reconcile, recovery, sweep};
use crate::event::EventBus;
use crate::handoff::SeedSlot;
use crate::remote::EntityClient;
use crate::storage::kv_store::KeyValueStore;

/// One editing surface's draft lifecycle.
pub struct DraftSession<S: KeyValueStore, C: EntityClient> {
    snapshots: SnapshotStore<S>,
    client: C,
    catalog: ModelCatalog,
    policy: DraftPolicy,
    seeds: SeedSlot,
    bus: EventBus,
    identity: DraftIdentity,
    session_id: Uuid,
}

impl<S: KeyValueStore, C: EntityClient> DraftSession<S, C> {
    pub fn new(
        store: S,
        client: C,
        catalog: ModelCatalog,
        policy: DraftPolicy,
        seeds: SeedSlot,
        bus: EventBus,
        identity: DraftIdentity,
    ) -> Self {
        Self {
            snapshots: SnapshotStore::new(store, &policy),
            client,
            catalog,
            policy,
            seeds,
            bus,
            identity,
            session_id: Uuid::now_v7(),
        }
    }

    pub fn identity(&self) -> &DraftIdentity {
        &self.identity
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Bus carrying this session's lifecycle events.
    pub fn event_bus(&self) -> &EventBus {
        &self.bus
    }

    /// Resolve the state this editor should open with. See
    /// [`recovery::recover`] for the precedence rules.
    pub async fn open(&self, cancel: &CancellationToken) -> Result<recovery::RecoveredDraft, DraftError> {
        tracing::debug!(
            session_id = %self.session_id,
            identity = %self.identity,
            "opening draft session"
        );
        recovery::recover(
            &self.snapshots,
            &self.client,
            &self.seeds,
            &self.catalog,
            &self.policy,
            &self.identity,
            &self.bus,
            cancel,
        )
        .await
    }

    /// Mirror the current editor payload into the local snapshot. Unnamed
    /// payloads are skipped.
    pub async fn record_edit(&self, payload: &Value) -> SnapshotOutcome {
        self.snapshots.save(&self.identity, payload).await
    }

    /// Save the payload to the entity service: create on first save, update
    /// afterwards. A successful create re-keys the local snapshot onto the
    /// server-assigned id, storing the payload as the server returned it.
    /// On failure the snapshot is left untouched so the draft stays
    /// recoverable.
    pub async fn save(&mut self, payload: &Value) -> Result<EntityRecord, DraftError> {
        match self.identity.clone() {
            DraftIdentity::Provisional => match self.client.create(payload).await {
                Ok(record) => {
                    self.identity = reconcile::confirm_creation(&self.snapshots, &record).await;
                    self.bus.publish(DraftEvent::Confirmed {
                        id: record.id.clone(),
                    });
                    Ok(record)
                }
                Err(err) => {
                    self.bus.publish(DraftEvent::SaveFailed {
                        error: err.to_string(),
                    });
                    Err(DraftError::Save(err))
                }
            },
            DraftIdentity::Confirmed(id) => match self.client.update(&id, payload).await {
                Ok(record) => Ok(record),
                Err(err) => {
                    self.bus.publish(DraftEvent::SaveFailed {
                        error: err.to_string(),
                    });
                    Err(DraftError::Save(err))
                }
            },
        }
    }

    /// Save the payload, then submit the entity for processing. The local
    /// snapshot is cleared only after the submission is acknowledged; a
    /// failed submission keeps it so nothing is lost.
    pub async fn submit(&mut self, payload: &Value) -> Result<String, DraftError> {
        let record = self.save(payload).await?;
        match self.client.submit(&record.id).await {
            Ok(()) => {
                self.snapshots.delete(&self.identity).await;
                self.bus.publish(DraftEvent::Submitted {
                    id: record.id.clone(),
                });
                Ok(record.id)
            }
            Err(err) => {
                self.bus.publish(DraftEvent::SubmitFailed {
                    id: record.id.clone(),
                    error: err.to_string(),
                });
                Err(DraftError::Submit(err))
            }
        }
    }

    /// Throw the local snapshot away without touching the server.
    pub async fn discard(&self) {
        self.snapshots.delete(&self.identity).await;
    }

    /// Tear the session down, applying the expiry policy for the given
    /// reason. Returns whether the snapshot was evicted.
    pub async fn close(&self, reason: TeardownReason) -> bool {
        match sweep::sweep_on_close(&self.snapshots, &self.identity, reason, self.policy.retention)
            .await
        {
            Some(age) => {
                self.bus.publish(DraftEvent::SnapshotEvicted {
                    key: self.snapshots.key_for(&self.identity),
                    age_secs: age.as_secs(),
                });
                true
            }
            None => false,
        }
    }
}
