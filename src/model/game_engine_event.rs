use uuid::Uuid;

use super::{CompletionSummary, DifficultyTier, Grid, LeaderboardRecord, RankStatus, TimerState};

#[derive(Debug, Clone)]
pub enum GameEngineEvent {
    NewGameStarted {
        session_id: Uuid,
        tier: DifficultyTier,
        is_daily: bool,
        seed: u64,
    },
    GridUpdated(Grid),
    ScrambleProgress {
        remaining: usize,
        total: usize,
    },
    ScrambleFinished,
    SelectionChanged(Option<usize>),
    TilesSwapped(usize, usize),
    TimerStateChanged(TimerState),
    /// Display refresh only; never used for scoring.
    ElapsedChanged(f64),
    PuzzleCompleted(CompletionSummary),
    RankResolved(RankStatus),
    RecordSaved(LeaderboardRecord),
    LeaderboardUpdated(Vec<LeaderboardRecord>),
    PersistenceFailed(String),
}
