//! Draft identity and snapshot types.
//!
//! A draft is the locally persisted, not-yet-confirmed-saved state of an
//! editable entity. Before the server has assigned an id the draft lives
//! under a provisional sentinel key; after the first successful create it
//! migrates to the confirmed id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;

/// Key suffix used for drafts that have no server-assigned id yet.
pub const PROVISIONAL_KEY_SUFFIX: &str = "new";

/// Schema version written into every new snapshot envelope.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// The identity of an editable entity, which determines its storage key.
///
/// - `Provisional`: the entity has never been created remotely; its draft
///   lives under the sentinel suffix `"new"`.
/// - `Confirmed(id)`: the server has assigned an id; the draft lives under
///   that id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftIdentity {
    Provisional,
    Confirmed(String),
}

impl DraftIdentity {
    /// The key suffix this identity maps to (`"new"` or the confirmed id).
    pub fn key_suffix(&self) -> &str {
        match self {
            DraftIdentity::Provisional => PROVISIONAL_KEY_SUFFIX,
            DraftIdentity::Confirmed(id) => id,
        }
    }

    /// Whether this identity is still provisional.
    pub fn is_provisional(&self) -> bool {
        matches!(self, DraftIdentity::Provisional)
    }

    /// The confirmed id, if any.
    pub fn confirmed_id(&self) -> Option<&str> {
        match self {
            DraftIdentity::Provisional => None,
            DraftIdentity::Confirmed(id) => Some(id),
        }
    }
}

impl fmt::Display for DraftIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key_suffix())
    }
}

// ---------------------------------------------------------------------------
// Snapshot envelope
// ---------------------------------------------------------------------------

/// The persisted form of a draft: an opaque payload plus write metadata.
///
/// `payload` is caller-owned JSON; the persistence layer never enforces a
/// schema on it. `written_at` is the local wall-clock time of the last
/// successful snapshot write, stamped on every write and kept distinct from
/// any server `updated_at` the payload may carry. It is `None` only for
/// legacy values read back without a usable timestamp; such snapshots are
/// never evicted by age.
///
/// `schema_version` enables forward-compatible deserialization: if the
/// envelope shape changes in a future release, migration logic can inspect
/// the version and transform the JSON before deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftSnapshot {
    /// Opaque editor state.
    pub payload: serde_json::Value,
    /// Local time of the last successful write.
    #[serde(default)]
    pub written_at: Option<DateTime<Utc>>,
    /// Envelope schema version (0 for legacy bare payloads).
    pub schema_version: u32,
}

impl DraftSnapshot {
    /// Wrap a payload in a fresh envelope stamped with the current time.
    pub fn new(payload: serde_json::Value) -> Self {
        Self {
            payload,
            written_at: Some(Utc::now()),
            schema_version: SNAPSHOT_SCHEMA_VERSION,
        }
    }

    /// Interpret a stored value as a snapshot.
    ///
    /// Values carrying both `payload` and `schema_version` keys are parsed
    /// as envelopes. Anything else is treated as a legacy bare payload whose
    /// `written_at` is taken from a top-level `updated_at` RFC 3339 string
    /// when present. This function is total: any JSON value yields a
    /// snapshot.
    pub fn parse(value: serde_json::Value) -> Self {
        if value.get("payload").is_some() && value.get("schema_version").is_some() {
            if let Ok(snapshot) = serde_json::from_value::<DraftSnapshot>(value.clone()) {
                return snapshot;
            }
        }

        let written_at = value
            .get("updated_at")
            .and_then(|v| v.as_str())
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Self {
            payload: value,
            written_at,
            schema_version: 0,
        }
    }

    /// The storable envelope form of this snapshot.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "payload": self.payload,
            "written_at": self.written_at,
            "schema_version": self.schema_version,
        })
    }

    /// Age of the snapshot relative to `now`, or `None` when un-timestamped.
    ///
    /// A write stamped in the future (clock skew) counts as age zero.
    pub fn age_at(&self, now: DateTime<Utc>) -> Option<std::time::Duration> {
        self.written_at
            .map(|written| (now - written).to_std().unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// One-shot creation seed
// ---------------------------------------------------------------------------

/// Metadata handed off when an editor is opened to wrap a freshly generated
/// asset (e.g. "create a template from this image").
///
/// Delivered through a one-shot slot that clears on first read, so a seed is
/// applied at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreationSeed {
    /// Locator of the generated asset.
    pub asset_url: String,
    /// Prompt that produced the asset, if known.
    pub prompt: Option<String>,
    /// Raw model identifier from the generating subsystem, if known.
    pub model_id: Option<String>,
    /// Asset kind.
    pub kind: crate::history::MediaKind,
}

// ---------------------------------------------------------------------------
// Teardown
// ---------------------------------------------------------------------------

/// Why an editor is being torn down, as reported by the hosting shell.
///
/// Reload must preserve the snapshot for recovery; only genuine navigation
/// is allowed to evict. Ambiguous teardowns are treated conservatively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownReason {
    Navigation,
    Reload,
    Unknown,
}

impl TeardownReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeardownReason::Navigation => "navigation",
            TeardownReason::Reload => "reload",
            TeardownReason::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TeardownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
