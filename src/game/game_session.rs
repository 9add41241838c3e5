use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use uuid::Uuid;

use super::scramble::Scrambler;
use super::selection::{SelectionOutcome, SelectionState};
use crate::model::{DifficultyTier, Grid, TimerState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Scrambling(Scrambler),
    Playing,
    Completed,
}

/// Effect of one tile pick on the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnResult {
    Ignored,
    Selected(usize),
    Deselected(usize),
    Swapped(usize, usize),
    /// The swap put every tile back home.
    Solved(usize, usize),
}

/// One play-through: the board, its scramble, the pick state and the timer.
/// Replaced wholesale when a new game starts.
#[derive(Debug)]
pub struct GameSession {
    id: Uuid,
    tier: DifficultyTier,
    is_daily: bool,
    seed: u64,
    grid: Grid,
    phase: SessionPhase,
    selection: SelectionState,
    timer: TimerState,
    rng: StdRng,
    moves: u32,
}

impl GameSession {
    pub fn new(tier: DifficultyTier, is_daily: bool, seed: u64) -> Self {
        let size = tier.grid_size();
        Self {
            id: Uuid::new_v4(),
            tier,
            is_daily,
            seed,
            grid: Grid::new(size),
            phase: SessionPhase::Scrambling(Scrambler::new(size)),
            selection: SelectionState::default(),
            timer: TimerState::default(),
            rng: StdRng::seed_from_u64(seed),
            moves: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn tier(&self) -> DifficultyTier {
        self.tier
    }

    pub fn is_daily(&self) -> bool {
        self.is_daily
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn timer(&self) -> TimerState {
        self.timer
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn selected(&self) -> Option<usize> {
        self.selection.selected()
    }

    pub fn is_scrambling(&self) -> bool {
        matches!(self.phase, SessionPhase::Scrambling(_))
    }

    pub fn is_completed(&self) -> bool {
        self.phase == SessionPhase::Completed
    }

    /// `(remaining, total)` swaps while scrambling.
    pub fn scramble_progress(&self) -> Option<(usize, usize)> {
        match &self.phase {
            SessionPhase::Scrambling(scrambler) => Some((scrambler.remaining(), scrambler.total())),
            _ => None,
        }
    }

    /// Perform the next scramble swap. The timer starts as soon as the last
    /// swap lands.
    pub fn scramble_step(&mut self, now: Instant) -> Option<(usize, usize)> {
        let SessionPhase::Scrambling(scrambler) = &mut self.phase else {
            return None;
        };
        let swapped = scrambler.step(&mut self.grid, &mut self.rng);
        let finished = scrambler.is_finished();
        if finished {
            self.start_playing(now);
        }
        swapped
    }

    /// Skip the rest of the scramble animation.
    pub fn finish_scramble(&mut self, now: Instant) {
        if let SessionPhase::Scrambling(scrambler) = &mut self.phase {
            scrambler.finish(&mut self.grid, &mut self.rng);
            self.start_playing(now);
        }
    }

    fn start_playing(&mut self, now: Instant) {
        self.phase = SessionPhase::Playing;
        self.timer = self.timer.started(now);
        info!(
            target: "game_session",
            "Session {} scrambled; {} tiles out of place", self.id, self.grid.misplaced_count()
        );
    }

    pub fn select_tile(&mut self, index: usize, now: Instant) -> TurnResult {
        if self.phase != SessionPhase::Playing {
            return TurnResult::Ignored;
        }
        if index >= self.grid.len() {
            warn!(target: "game_session", "Ignoring pick of missing tile {}", index);
            return TurnResult::Ignored;
        }
        match self.selection.select(index) {
            SelectionOutcome::Selected(index) => TurnResult::Selected(index),
            SelectionOutcome::Deselected(index) => TurnResult::Deselected(index),
            SelectionOutcome::Swap(a, b) => {
                self.grid.swap(a, b);
                self.moves += 1;
                if self.grid.is_complete() {
                    self.timer = self.timer.ended(now);
                    self.phase = SessionPhase::Completed;
                    info!(
                        target: "game_session",
                        "Session {} solved in {:.3}s after {} moves",
                        self.id,
                        self.timer.elapsed_secs(now),
                        self.moves
                    );
                    TurnResult::Solved(a, b)
                } else {
                    TurnResult::Swapped(a, b)
                }
            }
        }
    }

    pub fn elapsed_secs(&self, now: Instant) -> f64 {
        self.timer.elapsed_secs(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tests::next_correcting_swap;
    use crate::model::Coordinate;
    use std::time::Duration;

    #[test]
    fn test_input_ignored_while_scrambling() {
        let now = Instant::now();
        let mut session = GameSession::new(DifficultyTier::Easy, false, 11);
        assert!(session.is_scrambling());
        assert_eq!(session.select_tile(0, now), TurnResult::Ignored);
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_timer_starts_when_scramble_ends() {
        let now = Instant::now();
        let mut session = GameSession::new(DifficultyTier::Easy, false, 11);
        assert_eq!(session.scramble_progress(), Some((32, 32)));

        for step in 0..31 {
            assert!(session.scramble_step(now).is_some(), "step {step}");
            assert!(session.is_scrambling());
        }
        assert!(!session.timer().is_running());

        assert!(session.scramble_step(now).is_some());
        assert_eq!(session.phase(), &SessionPhase::Playing);
        assert!(session.timer().is_running());
        assert_eq!(session.scramble_step(now), None);
    }

    #[test]
    fn test_select_deselect_and_out_of_range() {
        let now = Instant::now();
        let mut session = GameSession::new(DifficultyTier::Easy, false, 5);
        session.finish_scramble(now);

        assert_eq!(session.select_tile(3, now), TurnResult::Selected(3));
        assert_eq!(session.select_tile(3, now), TurnResult::Deselected(3));
        assert_eq!(session.select_tile(16, now), TurnResult::Ignored);
        assert_eq!(session.moves(), 0);
    }

    #[test]
    fn test_solving_freezes_timer() {
        let start = Instant::now();
        let mut session = GameSession::new(DifficultyTier::Easy, false, 99);
        session.finish_scramble(start);
        assert!(session.grid().has_valid_arrangement());

        let mut now = start;
        let mut last = TurnResult::Ignored;
        while let Some((a, b)) = next_correcting_swap(session.grid()) {
            now += Duration::from_secs(1);
            session.select_tile(a, now);
            last = session.select_tile(b, now);
            assert!(session.grid().has_valid_arrangement());
        }

        assert!(matches!(last, TurnResult::Solved(_, _)));
        assert!(session.is_completed());
        let frozen = session.elapsed_secs(now);
        assert_eq!(frozen, (now - start).as_secs_f64());
        assert_eq!(session.elapsed_secs(now + Duration::from_secs(30)), frozen);
        assert_eq!(session.select_tile(0, now), TurnResult::Ignored);
    }

    #[test]
    fn test_same_seed_same_board() {
        let now = Instant::now();
        let mut a = GameSession::new(DifficultyTier::Normal, true, 20261019);
        let mut b = GameSession::new(DifficultyTier::Normal, true, 20261019);
        a.finish_scramble(now);
        b.finish_scramble(now);
        assert_eq!(a.grid(), b.grid());
        assert_ne!(a.id(), b.id());
        assert_eq!(a.grid().tile(0).unwrap().correct, Coordinate::new(0, 0));
    }
}
