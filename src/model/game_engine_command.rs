use super::{DifficultyTier, RecordDraft};

#[derive(Debug, Clone)]
pub enum GameEngineCommand {
    NewGame(DifficultyTier, bool), // tier, daily challenge
    NewGameWithSeed(DifficultyTier, bool, u64),
    ScrambleTick,
    FinishScramble,
    SelectTile(usize),
    TimerTick,
    SaveRecord(RecordDraft),
    RefreshLeaderboard,
}
