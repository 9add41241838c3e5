mod board_geometry;
mod completion;
mod coordinate;
mod difficulty;
mod game_engine_command;
mod game_engine_event;
mod grid;
mod leaderboard_record;
mod tile;
mod timer_state;

pub use board_geometry::{BoardGeometry, MAX_BOARD_EDGE};
pub use completion::{CompletionSummary, Medal, RankStatus};
pub use coordinate::Coordinate;
pub use difficulty::DifficultyTier;
pub use game_engine_command::GameEngineCommand;
pub use game_engine_event::GameEngineEvent;
pub use grid::Grid;
pub use leaderboard_record::{LeaderboardRecord, RecordDraft, DEFAULT_COUNTRY, DEFAULT_NICKNAME};
pub use tile::Tile;
pub use timer_state::TimerState;
