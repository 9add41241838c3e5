pub mod clock;
pub mod daily;
pub mod game_engine;
pub mod game_session;
pub mod leaderboard_store;
pub mod ranking;
pub mod scoring;
pub mod scramble;
pub mod selection;
pub mod settings;

pub use clock::{Clock, ManualClock, SystemClock};
pub use game_engine::{GameEngine, SaveRecordError};
pub use game_session::{GameSession, SessionPhase, TurnResult};
pub use leaderboard_store::{LeaderboardError, LeaderboardStore, LocalFileStore, MemoryStore, StoreCapacity};
pub use ranking::{compute_rank, filter_expired, RankingPolicy};
pub use scoring::compute_score;
pub use scramble::{scramble, Scrambler};
pub use selection::{SelectionOutcome, SelectionState};
pub use settings::Settings;

#[cfg(test)]
pub mod tests {
    use crate::model::Grid;

    /// Swap the first misplaced tile with whatever sits on its home cell.
    pub fn next_correcting_swap(grid: &Grid) -> Option<(usize, usize)> {
        let (index, tile) = grid
            .tiles()
            .iter()
            .enumerate()
            .find(|(_, tile)| !tile.is_home())?;
        let occupant = grid.tile_at(tile.correct)?;
        Some((index, occupant))
    }
}
