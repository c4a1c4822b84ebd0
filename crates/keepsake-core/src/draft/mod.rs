//! Draft persistence and recovery.
//!
//! An editing surface keeps its working state in a [`DraftSession`]: every
//! edit is snapshotted into the local store, an interrupted session is
//! recovered on the next open, a provisional draft is reconciled onto its
//! server-assigned id after the first successful save, and stale snapshots
//! are expired when the surface closes for good. The submodules can also be
//! used individually; the session just wires them together.

use std::time::Duration;

use serde_json::Value;

pub mod reconcile;
pub mod recovery;
pub mod session;
pub mod snapshot;
pub mod sweep;

pub use recovery::{DraftSource, RecoveredDraft};
pub use session::DraftSession;
pub use snapshot::{DraftSummary, SnapshotOutcome};

/// How long a snapshot may outlive a deliberate navigation away before the
/// sweeper reclaims it.
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(60);

/// Per-entity-family policy for draft handling.
///
/// One policy describes one kind of editable entity: where its snapshots
/// live, which payload field names the draft, how long abandoned snapshots
/// linger, and what a brand-new draft looks like.
#[derive(Debug, Clone)]
pub struct DraftPolicy {
    /// Storage namespace, e.g. `"template"` or `"event"`.
    pub namespace: String,
    /// Payload field whose non-blank value gates snapshot writes.
    pub label_field: String,
    /// Maximum age of a snapshot after a navigation teardown.
    pub retention: Duration,
    /// Payload a brand-new editor starts from.
    pub blank_state: Value,
}

impl DraftPolicy {
    pub fn new(namespace: impl Into<String>, blank_state: Value) -> Self {
        Self {
            namespace: namespace.into(),
            label_field: "name".to_string(),
            retention: DEFAULT_RETENTION,
            blank_state,
        }
    }

    pub fn with_label_field(mut self, field: impl Into<String>) -> Self {
        self.label_field = field.into();
        self
    }

    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }
}
