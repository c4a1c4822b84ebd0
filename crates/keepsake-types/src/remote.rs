//! Types exchanged with the remote entity service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An entity as returned by the remote service.
///
/// `payload` is the server's view of the editable state, in the same opaque
/// shape the editor works with. `updated_at` is the server's own timestamp
/// and is unrelated to local snapshot write times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: String,
    pub payload: serde_json::Value,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_record_serde_roundtrip() {
        let record = EntityRecord {
            id: "tpl-42".to_string(),
            payload: serde_json::json!({"name": "Retro Pop", "prompt": "neon"}),
            updated_at: Some(Utc::now()),
        };
        let json = serde_json::to_string(&record).unwrap();
        let parsed: EntityRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
