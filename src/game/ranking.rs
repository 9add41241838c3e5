use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::time::SystemTime;

use crate::model::LeaderboardRecord;

/// Records kept by the bounded local leaderboard.
pub const LOCAL_LEADERBOARD_CAPACITY: usize = 5;
/// Rows shown from an unbounded leaderboard.
pub const DISPLAY_TOP: usize = 3;

/// Ordering used to sort the leaderboard and place new finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RankingPolicy {
    /// Highest score first; equal scores keep the earlier record ahead.
    #[default]
    ScoreThenTimestamp,
    /// Daily challenges first, then harder tiers, then faster times. A new
    /// finish goes behind existing records it ties with.
    LegacyDailyTierTime,
}

impl RankingPolicy {
    /// `Less` when `a` belongs above `b`.
    pub fn compare(&self, a: &LeaderboardRecord, b: &LeaderboardRecord) -> Ordering {
        match self {
            RankingPolicy::ScoreThenTimestamp => b
                .score
                .cmp(&a.score)
                .then_with(|| a.timestamp.cmp(&b.timestamp)),
            RankingPolicy::LegacyDailyTierTime => b
                .is_today
                .cmp(&a.is_today)
                .then_with(|| b.tier.value().cmp(&a.tier.value()))
                .then_with(|| a.time.total_cmp(&b.time)),
        }
    }

    pub fn sort(&self, records: &mut [LeaderboardRecord]) {
        records.sort_by(|a, b| self.compare(a, b));
    }

    /// 1-based position `candidate` would take among `records`, which must
    /// already be free of expired entries.
    pub fn rank_of(&self, candidate: &LeaderboardRecord, records: &[LeaderboardRecord]) -> usize {
        match self {
            RankingPolicy::ScoreThenTimestamp => compute_rank(candidate.score, records),
            RankingPolicy::LegacyDailyTierTime => {
                1 + records
                    .iter()
                    .filter(|record| self.compare(record, candidate) != Ordering::Greater)
                    .count()
            }
        }
    }
}

/// 1-based rank of a score: one more than the number of strictly better
/// scores. Equal scores share a position.
pub fn compute_rank(candidate_score: u64, records: &[LeaderboardRecord]) -> usize {
    1 + records
        .iter()
        .filter(|record| record.score > candidate_score)
        .count()
}

/// Drop every record older than its tier's expiration window.
pub fn filter_expired(records: Vec<LeaderboardRecord>, now: SystemTime) -> Vec<LeaderboardRecord> {
    let before = records.len();
    let kept: Vec<_> = records
        .into_iter()
        .filter(|record| !record.is_expired(now))
        .collect();
    if kept.len() != before {
        debug!(target: "leaderboard", "Expired {} records", before - kept.len());
    }
    kept
}

/// Add `record` to the board: prune expired entries, insert, sort, and cut
/// down to `capacity` when the board is bounded.
pub fn save_record(
    record: LeaderboardRecord,
    records: Vec<LeaderboardRecord>,
    capacity: Option<usize>,
    now: SystemTime,
    policy: RankingPolicy,
) -> Vec<LeaderboardRecord> {
    let mut records = filter_expired(records, now);
    records.push(record);
    policy.sort(&mut records);
    if let Some(capacity) = capacity {
        records.truncate(capacity);
    }
    records
}

/// Unexpired records in board order, at most `limit` of them.
pub fn top_records(
    records: Vec<LeaderboardRecord>,
    limit: usize,
    now: SystemTime,
    policy: RankingPolicy,
) -> Vec<LeaderboardRecord> {
    let mut records = filter_expired(records, now);
    policy.sort(&mut records);
    records.truncate(limit);
    records
}
