//! Generation history types.
//!
//! The history cache is a user-scoped, newest-first list of generation
//! results, independent of the draft subsystem.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Kind of generated asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            other => Err(format!("invalid media kind: '{other}'")),
        }
    }
}

/// One generation result in a user's history.
///
/// `created_at` doubles as the removal key; callers must keep timestamps
/// unique within a user's list (monotonic clock or counter tiebreaker).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Locator of the generated asset.
    pub asset_url: String,
    /// Asset kind.
    pub kind: MediaKind,
    /// When the generation completed. Also the removal key.
    pub created_at: DateTime<Utc>,
    /// Prompt that produced the asset, if known.
    pub prompt: Option<String>,
    /// Model identifier that produced the asset, if known.
    pub model_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_display_and_parse() {
        assert_eq!(MediaKind::Image.to_string(), "image");
        assert_eq!(MediaKind::Video.to_string(), "video");
        assert_eq!("image".parse::<MediaKind>().unwrap(), MediaKind::Image);
        assert_eq!("VIDEO".parse::<MediaKind>().unwrap(), MediaKind::Video);
        assert!("gif".parse::<MediaKind>().is_err());
    }

    #[test]
    fn test_generation_record_serialize() {
        let record = GenerationRecord {
            asset_url: "https://cdn.example/gen/1.png".to_string(),
            kind: MediaKind::Image,
            created_at: Utc::now(),
            prompt: Some("neon skyline".to_string()),
            model_id: Some("a1".to_string()),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"kind\":\"image\""));
        assert!(json.contains("\"asset_url\":\"https://cdn.example/gen/1.png\""));
    }

    #[test]
    fn test_generation_record_roundtrip() {
        let record = GenerationRecord {
            asset_url: "https://cdn.example/gen/2.mp4".to_string(),
            kind: MediaKind::Video,
            created_at: Utc::now(),
            prompt: None,
            model_id: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        let parsed: GenerationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
