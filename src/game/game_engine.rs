use log::{debug, info, trace, warn};
use rand::Rng;

use super::clock::Clock;
use super::daily::today_seed;
use super::game_session::{GameSession, TurnResult};
use super::leaderboard_store::{LeaderboardError, LeaderboardStore};
use super::ranking::{filter_expired, top_records};
use super::scoring::compute_score;
use super::settings::Settings;
use crate::events::EventEmitter;
use crate::model::{
    CompletionSummary, DifficultyTier, GameEngineCommand, GameEngineEvent, LeaderboardRecord,
    RankStatus, RecordDraft,
};

#[derive(Debug, thiserror::Error)]
pub enum SaveRecordError {
    #[error("there is no finished game to save")]
    NoCompletedGame,
    #[error("this game was already saved")]
    AlreadySaved,
    #[error(transparent)]
    Store(#[from] LeaderboardError),
}

/// Drives one player's games: owns the current session, talks to the
/// leaderboard and reports everything that happens as [`GameEngineEvent`]s.
pub struct GameEngine {
    session: Option<GameSession>,
    store: Box<dyn LeaderboardStore>,
    clock: Box<dyn Clock>,
    settings: Settings,
    game_engine_event_emitter: EventEmitter<GameEngineEvent>,
    last_completion: Option<CompletionSummary>,
    record_saved: bool,
}

impl GameEngine {
    pub fn new(
        game_engine_event_emitter: EventEmitter<GameEngineEvent>,
        store: Box<dyn LeaderboardStore>,
        clock: Box<dyn Clock>,
        settings: Settings,
    ) -> Self {
        Self {
            session: None,
            store,
            clock,
            settings,
            game_engine_event_emitter,
            last_completion: None,
            record_saved: false,
        }
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn last_completion(&self) -> Option<&CompletionSummary> {
        self.last_completion.as_ref()
    }

    pub fn is_scrambling(&self) -> bool {
        self.session.as_ref().is_some_and(GameSession::is_scrambling)
    }

    pub fn handle_command(&mut self, command: GameEngineCommand) {
        trace!(target: "game_engine", "Handling command: {:?}", command);
        match command {
            GameEngineCommand::NewGame(tier, is_daily) => self.new_game(tier, is_daily),
            GameEngineCommand::NewGameWithSeed(tier, is_daily, seed) => {
                self.new_game_with_seed(tier, is_daily, seed)
            }
            GameEngineCommand::ScrambleTick => {
                self.tick_scramble();
            }
            GameEngineCommand::FinishScramble => self.finish_scramble(),
            GameEngineCommand::SelectTile(index) => {
                self.select_tile(index);
            }
            GameEngineCommand::TimerTick => self.timer_tick(),
            GameEngineCommand::SaveRecord(draft) => {
                if let Err(err) = self.save_record(draft) {
                    warn!(target: "game_engine", "Record not saved: {}", err);
                }
            }
            GameEngineCommand::RefreshLeaderboard => self.refresh_leaderboard(),
        }
    }

    /// Start a new game. Daily challenges use the shared seed of the day;
    /// otherwise `SEED` from the environment or a random one.
    pub fn new_game(&mut self, tier: DifficultyTier, is_daily: bool) {
        let seed = if is_daily {
            today_seed()
        } else {
            Settings::seed_from_env().unwrap_or_else(|| rand::rng().random())
        };
        self.new_game_with_seed(tier, is_daily, seed);
    }

    /// Replaces any running session, cancelling an unfinished scramble.
    pub fn new_game_with_seed(&mut self, tier: DifficultyTier, is_daily: bool, seed: u64) {
        let session = GameSession::new(tier, is_daily, seed);
        info!(
            target: "game_engine",
            "New game {}; difficulty: {}; daily: {}; seed: {}",
            session.id(),
            tier,
            is_daily,
            seed
        );
        self.game_engine_event_emitter
            .emit(&GameEngineEvent::NewGameStarted {
                session_id: session.id(),
                tier,
                is_daily,
                seed,
            });
        self.game_engine_event_emitter
            .emit(&GameEngineEvent::GridUpdated(session.grid().clone()));
        if let Some((remaining, total)) = session.scramble_progress() {
            self.game_engine_event_emitter
                .emit(&GameEngineEvent::ScrambleProgress { remaining, total });
        }
        self.session = Some(session);
        self.last_completion = None;
        self.record_saved = false;
    }

    /// One tick of the scramble animation. Returns true while more swaps
    /// remain.
    pub fn tick_scramble(&mut self) -> bool {
        let now = self.clock.now();
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if !session.is_scrambling() {
            return false;
        }
        if let Some((a, b)) = session.scramble_step(now) {
            self.game_engine_event_emitter
                .emit(&GameEngineEvent::TilesSwapped(a, b));
        }
        match session.scramble_progress() {
            Some((remaining, total)) => {
                self.game_engine_event_emitter
                    .emit(&GameEngineEvent::ScrambleProgress { remaining, total });
                true
            }
            None => {
                self.announce_scramble_finished();
                false
            }
        }
    }

    pub fn finish_scramble(&mut self) {
        let now = self.clock.now();
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.is_scrambling() {
            session.finish_scramble(now);
            self.announce_scramble_finished();
        }
    }

    fn announce_scramble_finished(&self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        self.game_engine_event_emitter
            .emit(&GameEngineEvent::GridUpdated(session.grid().clone()));
        self.game_engine_event_emitter
            .emit(&GameEngineEvent::ScrambleFinished);
        self.game_engine_event_emitter
            .emit(&GameEngineEvent::TimerStateChanged(session.timer()));
    }

    /// Handle a pick on tile `index`. Input is ignored while scrambling and
    /// after the puzzle is solved.
    pub fn select_tile(&mut self, index: usize) -> TurnResult {
        let now = self.clock.now();
        let Some(session) = self.session.as_mut() else {
            return TurnResult::Ignored;
        };
        let result = session.select_tile(index, now);
        debug!(target: "game_engine", "Pick {} -> {:?}", index, result);
        match result {
            TurnResult::Ignored => {}
            TurnResult::Selected(index) => {
                self.game_engine_event_emitter
                    .emit(&GameEngineEvent::SelectionChanged(Some(index)));
            }
            TurnResult::Deselected(_) => {
                self.game_engine_event_emitter
                    .emit(&GameEngineEvent::SelectionChanged(None));
            }
            TurnResult::Swapped(a, b) | TurnResult::Solved(a, b) => {
                self.game_engine_event_emitter
                    .emit(&GameEngineEvent::SelectionChanged(None));
                self.game_engine_event_emitter
                    .emit(&GameEngineEvent::TilesSwapped(a, b));
                self.game_engine_event_emitter
                    .emit(&GameEngineEvent::GridUpdated(session.grid().clone()));
                if matches!(result, TurnResult::Solved(_, _)) {
                    self.complete_puzzle();
                }
            }
        }
        result
    }

    /// Seconds on the play clock; frozen once the puzzle is solved.
    pub fn current_elapsed(&self) -> f64 {
        self.session
            .as_ref()
            .map(|session| session.elapsed_secs(self.clock.now()))
            .unwrap_or(0.0)
    }

    fn timer_tick(&self) {
        if self
            .session
            .as_ref()
            .is_some_and(|session| session.timer().is_running())
        {
            self.game_engine_event_emitter
                .emit(&GameEngineEvent::ElapsedChanged(self.current_elapsed()));
        }
    }

    fn complete_puzzle(&mut self) {
        let now = self.clock.now();
        let Some(session) = self.session.as_ref() else {
            return;
        };
        // Read once, as a number, from the frozen timer.
        let elapsed_secs = session.elapsed_secs(now);
        let tier = session.tier();
        let is_daily = session.is_daily();
        let mut summary = CompletionSummary {
            elapsed_secs,
            score: compute_score(elapsed_secs, tier, is_daily),
            tier,
            is_daily,
            moves: session.moves(),
            rank: RankStatus::Pending,
        };
        self.game_engine_event_emitter
            .emit(&GameEngineEvent::TimerStateChanged(session.timer()));
        self.game_engine_event_emitter
            .emit(&GameEngineEvent::PuzzleCompleted(summary.clone()));

        summary.rank = self.resolve_rank(elapsed_secs, tier, is_daily);
        info!(
            target: "game_engine",
            "Puzzle solved in {:.3}s; score: {}; rank: {:?}", elapsed_secs, summary.score, summary.rank
        );
        self.game_engine_event_emitter
            .emit(&GameEngineEvent::RankResolved(summary.rank));
        self.last_completion = Some(summary);
    }

    /// Place a finish against the current board. An unreachable board gives
    /// `Unranked` instead of failing the game.
    fn resolve_rank(&mut self, elapsed_secs: f64, tier: DifficultyTier, is_daily: bool) -> RankStatus {
        let wall_now = self.clock.wall_time();
        match self.store.load_records(wall_now) {
            Ok(records) => {
                let records = filter_expired(records, wall_now);
                let candidate = LeaderboardRecord::new(
                    elapsed_secs,
                    tier,
                    is_daily,
                    RecordDraft::default(),
                    wall_now,
                );
                RankStatus::Ranked(self.store.policy().rank_of(&candidate, &records))
            }
            Err(err) => {
                warn!(target: "game_engine", "Could not rank finish: {}", err);
                self.game_engine_event_emitter
                    .emit(&GameEngineEvent::PersistenceFailed(err.to_string()));
                RankStatus::Unranked
            }
        }
    }

    /// Store the last finished game. Empty nickname and country fall back to
    /// the configured ones, then to the defaults.
    pub fn save_record(&mut self, draft: RecordDraft) -> Result<LeaderboardRecord, SaveRecordError> {
        let Some(summary) = self.last_completion.as_ref() else {
            return Err(SaveRecordError::NoCompletedGame);
        };
        if self.record_saved {
            return Err(SaveRecordError::AlreadySaved);
        }
        let draft = RecordDraft {
            nickname: draft.nickname.or_else(|| self.settings.nickname.clone()),
            country: draft.country.or_else(|| self.settings.country.clone()),
            ..draft
        };
        let wall_now = self.clock.wall_time();
        let record = LeaderboardRecord::new(
            summary.elapsed_secs,
            summary.tier,
            summary.is_daily,
            draft,
            wall_now,
        );

        if let Err(err) = self.store.save_record(record.clone(), wall_now) {
            warn!(target: "game_engine", "Saving record failed: {}", err);
            self.game_engine_event_emitter
                .emit(&GameEngineEvent::PersistenceFailed(err.to_string()));
            return Err(err.into());
        }
        self.record_saved = true;
        info!(target: "game_engine", "Saved record for {} ({})", record.nickname, record.score);
        self.game_engine_event_emitter
            .emit(&GameEngineEvent::RecordSaved(record.clone()));
        self.refresh_leaderboard();
        Ok(record)
    }

    /// Rows to display: unexpired, sorted, cut to the store's display limit.
    pub fn leaderboard(&mut self) -> Result<Vec<LeaderboardRecord>, LeaderboardError> {
        let wall_now = self.clock.wall_time();
        let records = self.store.load_records(wall_now)?;
        let limit = self.store.display_limit(self.settings.display_top);
        Ok(top_records(records, limit, wall_now, self.store.policy()))
    }

    pub fn refresh_leaderboard(&mut self) {
        match self.leaderboard() {
            Ok(records) => self
                .game_engine_event_emitter
                .emit(&GameEngineEvent::LeaderboardUpdated(records)),
            Err(err) => {
                warn!(target: "game_engine", "Could not load leaderboard: {}", err);
                self.game_engine_event_emitter
                    .emit(&GameEngineEvent::PersistenceFailed(err.to_string()));
            }
        }
    }
}
