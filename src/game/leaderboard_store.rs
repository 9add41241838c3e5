use log::{debug, info, warn};
use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::SystemTime;

use super::ranking::{self, RankingPolicy, LOCAL_LEADERBOARD_CAPACITY};
use crate::model::LeaderboardRecord;

#[derive(Debug, thiserror::Error)]
pub enum LeaderboardError {
    #[error("leaderboard storage failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("leaderboard data could not be encoded: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("leaderboard unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreCapacity {
    Bounded(usize),
    Unbounded,
}

/// Where finished games are kept. Implementations prune expired records on
/// every read and write.
pub trait LeaderboardStore {
    /// Unexpired records in board order.
    fn load_records(&mut self, now: SystemTime) -> Result<Vec<LeaderboardRecord>, LeaderboardError>;

    fn save_record(
        &mut self,
        record: LeaderboardRecord,
        now: SystemTime,
    ) -> Result<(), LeaderboardError>;

    fn capacity(&self) -> StoreCapacity;

    fn policy(&self) -> RankingPolicy {
        RankingPolicy::default()
    }

    /// How many rows to show. A bounded board shows everything it keeps.
    fn display_limit(&self, display_top: usize) -> usize {
        match self.capacity() {
            StoreCapacity::Bounded(capacity) => capacity,
            StoreCapacity::Unbounded => display_top,
        }
    }
}

/// Parse a stored leaderboard, skipping entries that do not decode. A file
/// that is not a JSON array counts as empty.
pub fn decode_records(contents: &str) -> Vec<LeaderboardRecord> {
    let entries: Vec<serde_json::Value> = match serde_json::from_str(contents) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(target: "leaderboard", "Discarding unreadable leaderboard: {}", err);
            return Vec::new();
        }
    };
    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<LeaderboardRecord>(entry) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(target: "leaderboard", "Skipping malformed record: {}", err);
                None
            }
        })
        .collect()
}

/// Small leaderboard in a JSON file on this machine, capped at a handful of
/// records.
#[derive(Debug)]
pub struct LocalFileStore {
    path: PathBuf,
    capacity: usize,
    policy: RankingPolicy,
}

impl LocalFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self::with_capacity(path, LOCAL_LEADERBOARD_CAPACITY)
    }

    pub fn with_capacity(path: PathBuf, capacity: usize) -> Self {
        Self {
            path,
            capacity,
            policy: RankingPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RankingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_raw(&self) -> Result<Option<String>, LeaderboardError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, records: &[LeaderboardRecord]) -> Result<(), LeaderboardError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl LeaderboardStore for LocalFileStore {
    fn load_records(&mut self, now: SystemTime) -> Result<Vec<LeaderboardRecord>, LeaderboardError> {
        let Some(contents) = self.read_raw()? else {
            return Ok(Vec::new());
        };
        let decoded = decode_records(&contents);
        let decoded_count = decoded.len();
        let mut records = ranking::filter_expired(decoded, now);
        self.policy.sort(&mut records);
        records.truncate(self.capacity);

        if records.len() != decoded_count {
            debug!(target: "leaderboard", "Rewriting {:?} after pruning", self.path);
            self.write(&records)?;
        }
        Ok(records)
    }

    fn save_record(
        &mut self,
        record: LeaderboardRecord,
        now: SystemTime,
    ) -> Result<(), LeaderboardError> {
        let existing = self.load_records(now)?;
        let records = ranking::save_record(record, existing, Some(self.capacity), now, self.policy);
        self.write(&records)?;
        info!(target: "leaderboard", "Saved leaderboard with {} records", records.len());
        Ok(())
    }

    fn capacity(&self) -> StoreCapacity {
        StoreCapacity::Bounded(self.capacity)
    }

    fn policy(&self) -> RankingPolicy {
        self.policy
    }
}

/// Shared, uncapped board held in memory. Clones see the same records, the
/// way several players see one document store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Rc<RefCell<Vec<LeaderboardRecord>>>,
    policy: RankingPolicy,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: RankingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl LeaderboardStore for MemoryStore {
    fn load_records(&mut self, now: SystemTime) -> Result<Vec<LeaderboardRecord>, LeaderboardError> {
        let mut records = self.records.borrow_mut();
        let pruned = ranking::filter_expired(std::mem::take(&mut *records), now);
        *records = pruned;
        let mut sorted = records.clone();
        self.policy.sort(&mut sorted);
        Ok(sorted)
    }

    fn save_record(
        &mut self,
        record: LeaderboardRecord,
        now: SystemTime,
    ) -> Result<(), LeaderboardError> {
        let mut records = self.records.borrow_mut();
        let existing = std::mem::take(&mut *records);
        *records = ranking::save_record(record, existing, None, now, self.policy);
        Ok(())
    }

    fn capacity(&self) -> StoreCapacity {
        StoreCapacity::Unbounded
    }

    fn policy(&self) -> RankingPolicy {
        self.policy
    }
}
