//! Draft lifecycle events.
//!
//! `DraftEvent` is the unified event type broadcast by a draft session.
//! Hosts subscribe to render notifications (restoration toasts, save
//! failures) and to react to navigation-relevant transitions (`LoadFailed`
//! means "return to a safe listing view", `Confirmed` means "update the
//! address to the confirmed id"). All variants are Clone + Send + Sync for
//! use with tokio broadcast channels.

use serde::{Deserialize, Serialize};

/// Events emitted during a draft session's lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DraftEvent {
    /// Unsaved local work was recovered instead of server/default state.
    SnapshotRestored { label: Option<String> },

    /// A one-shot creation seed was consumed and applied.
    SeedApplied { asset_url: String },

    /// The entity was hydrated from the remote service.
    EntityLoaded { id: String },

    /// The remote fetch failed and no local snapshot existed; the host
    /// should surface the error and navigate back.
    LoadFailed { id: String, error: String },

    /// A provisional draft was created remotely and its local persistence
    /// migrated to the server-assigned id.
    Confirmed { id: String },

    /// A remote create/update failed; the local snapshot is preserved.
    SaveFailed { error: String },

    /// The entity was submitted for review and its snapshot cleared.
    Submitted { id: String },

    /// Submit-for-review failed; the local snapshot is kept.
    SubmitFailed { id: String, error: String },

    /// A stale snapshot was evicted on teardown.
    SnapshotEvicted { key: String, age_secs: u64 },
}

impl DraftEvent {
    /// Returns the confirmed entity id from variants that carry one.
    pub fn entity_id(&self) -> Option<&str> {
        match self {
            DraftEvent::EntityLoaded { id }
            | DraftEvent::LoadFailed { id, .. }
            | DraftEvent::Confirmed { id }
            | DraftEvent::Submitted { id }
            | DraftEvent::SubmitFailed { id, .. } => Some(id),

            DraftEvent::SnapshotRestored { .. }
            | DraftEvent::SeedApplied { .. }
            | DraftEvent::SaveFailed { .. }
            | DraftEvent::SnapshotEvicted { .. } => None,
        }
    }
}
