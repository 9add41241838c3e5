use serde::{Deserialize, Serialize};
use serde_with::formats::Flexible;
use serde_with::serde_as;
use serde_with::TimestampMilliSeconds;
use std::time::{Duration, SystemTime};

use super::DifficultyTier;
use crate::game::scoring::compute_score;

pub const DEFAULT_NICKNAME: &str = "Anonymous";
pub const DEFAULT_COUNTRY: &str = "🌍";

/// What the player typed into the save form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDraft {
    pub comment: String,
    pub nickname: Option<String>,
    pub country: Option<String>,
}

/// A saved finish on the leaderboard. Written once, never edited; the score
/// is recomputed from `time`, the tier and the daily flag whenever a record is
/// loaded.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredRecord")]
pub struct LeaderboardRecord {
    pub time: f64,
    pub score: u64,
    pub comment: String,
    pub difficulty: String,
    #[serde(rename = "difficultyVal")]
    pub tier: DifficultyTier,
    pub is_today: bool,
    #[serde_as(serialize_as = "TimestampMilliSeconds<i64>")]
    pub timestamp: SystemTime,
    pub nickname: String,
    pub country: String,
}

impl LeaderboardRecord {
    pub fn new(
        time: f64,
        tier: DifficultyTier,
        is_today: bool,
        draft: RecordDraft,
        timestamp: SystemTime,
    ) -> Self {
        let nickname = draft
            .nickname
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NICKNAME.to_string());
        let country = draft
            .country
            .filter(|country| !country.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COUNTRY.to_string());
        Self {
            time,
            score: compute_score(time, tier, is_today),
            comment: draft.comment,
            difficulty: tier.label(),
            tier,
            is_today,
            timestamp,
            nickname,
            country,
        }
    }

    /// How long ago the record was written. Records from the future are
    /// treated as brand new.
    pub fn age(&self, now: SystemTime) -> Duration {
        now.duration_since(self.timestamp).unwrap_or(Duration::ZERO)
    }

    pub fn is_expired(&self, now: SystemTime) -> bool {
        self.age(now) >= self.tier.expiration_window()
    }
}

fn default_nickname() -> String {
    DEFAULT_NICKNAME.to_string()
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

/// Loose on-disk shape. Older records carry no `score` and sometimes only the
/// difficulty label.
#[serde_as]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    time: f64,
    #[serde(default)]
    comment: String,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    difficulty_val: Option<u8>,
    #[serde(default)]
    is_today: bool,
    #[serde_as(as = "TimestampMilliSeconds<i64, Flexible>")]
    timestamp: SystemTime,
    #[serde(default = "default_nickname")]
    nickname: String,
    #[serde(default = "default_country")]
    country: String,
}

impl TryFrom<StoredRecord> for LeaderboardRecord {
    type Error = String;

    fn try_from(stored: StoredRecord) -> Result<Self, Self::Error> {
        if !stored.time.is_finite() || stored.time <= 0.0 {
            return Err(format!("invalid time: {}", stored.time));
        }
        let tier = stored
            .difficulty_val
            .and_then(DifficultyTier::from_value)
            .or_else(|| {
                stored
                    .difficulty
                    .as_deref()
                    .and_then(DifficultyTier::from_label)
            })
            .ok_or_else(|| "missing difficulty".to_string())?;

        Ok(Self {
            time: stored.time,
            score: compute_score(stored.time, tier, stored.is_today),
            comment: stored.comment,
            difficulty: tier.label(),
            tier,
            is_today: stored.is_today,
            timestamp: stored.timestamp,
            nickname: stored.nickname,
            country: stored.country,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::UNIX_EPOCH;

    fn at_millis(ms: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_millis(ms)
    }

    #[test]
    fn test_new_applies_defaults() {
        let record = LeaderboardRecord::new(
            10.0,
            DifficultyTier::Easy,
            false,
            RecordDraft {
                comment: "nice".to_string(),
                nickname: Some("  ".to_string()),
                country: None,
            },
            at_millis(1_700_000_000_000),
        );
        assert_eq!(record.nickname, DEFAULT_NICKNAME);
        assert_eq!(record.country, DEFAULT_COUNTRY);
        assert_eq!(record.score, 1000);
        assert_eq!(record.difficulty, "Easy (4x4 - 16pcs)");
    }

    #[test]
    fn test_persisted_shape() {
        let record = LeaderboardRecord::new(
            12.5,
            DifficultyTier::Hard,
            true,
            RecordDraft {
                comment: "gg".to_string(),
                nickname: Some("kim".to_string()),
                country: Some("🇰🇷".to_string()),
            },
            at_millis(1_700_000_000_123),
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["time"], 12.5);
        assert_eq!(value["score"], 18000);
        assert_eq!(value["difficulty"], "Hard (8x8 - 64pcs)");
        assert_eq!(value["difficultyVal"], 3);
        assert_eq!(value["isToday"], true);
        assert_eq!(value["timestamp"], 1_700_000_000_123i64);
        assert_eq!(value["nickname"], "kim");

        let back: LeaderboardRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_legacy_record_without_score_or_value() {
        let json = r#"{
            "time": 20.0,
            "comment": "",
            "difficulty": "Normal (6x6 - 36pcs)",
            "isToday": false,
            "timestamp": 1700000000000
        }"#;
        let record: LeaderboardRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.tier, DifficultyTier::Normal);
        assert_eq!(record.score, 2500);
        assert_eq!(record.nickname, DEFAULT_NICKNAME);
    }

    #[test]
    fn test_stored_score_is_recomputed() {
        let json = r#"{"time": 10.0, "score": 999999, "difficultyVal": 1, "timestamp": 1}"#;
        let record: LeaderboardRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.score, 1000);
    }

    #[test]
    fn test_malformed_records_are_rejected() {
        let missing_time = r#"{"difficultyVal": 1, "timestamp": 1}"#;
        assert!(serde_json::from_str::<LeaderboardRecord>(missing_time).is_err());

        let missing_tier = r#"{"time": 3.0, "timestamp": 1}"#;
        assert!(serde_json::from_str::<LeaderboardRecord>(missing_tier).is_err());

        let zero_time = r#"{"time": 0.0, "difficultyVal": 2, "timestamp": 1}"#;
        assert!(serde_json::from_str::<LeaderboardRecord>(zero_time).is_err());
    }

    #[test]
    fn test_age_and_expiry() {
        let record = LeaderboardRecord::new(
            5.0,
            DifficultyTier::Easy,
            false,
            RecordDraft::default(),
            at_millis(0),
        );
        assert_eq!(record.age(at_millis(1000)), Duration::from_secs(1));
        assert!(!record.is_expired(at_millis(1000)));
        assert!(record.is_expired(at_millis(24 * 60 * 60 * 1000)));
    }
}
