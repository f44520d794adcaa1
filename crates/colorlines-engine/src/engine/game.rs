use log::trace;

use crate::{
    ConfigError, IllegalMoveError,
    core::{Board, Pos},
    engine::{GameConfig, GameRng, GameSeed, GameStats, TurnSummary, resolve_turn},
};

/// A single game: the authoritative board, its spawn stream and statistics.
///
/// The board is only changed through [`Game::try_move`], [`Game::pass`] and
/// [`Game::void_turn`], each of which completes exactly one turn.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    seed: GameSeed,
    board: Board,
    rng: GameRng,
    stats: GameStats,
}

impl Game {
    /// Starts a game and spawns the initial balls.
    ///
    /// Lines formed by the initial spawn are left on the board; they are cleared
    /// at the end of the first turn.
    pub fn new(config: GameConfig, seed: &GameSeed) -> Result<Self, ConfigError> {
        let mut board = config.empty_board()?;
        let mut rng = GameRng::new(seed);
        board.spawn_balls(&mut rng, config.initial_spawn);
        Ok(Self {
            config,
            seed: seed.clone(),
            board,
            rng,
            stats: GameStats::new(),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn seed(&self) -> &GameSeed {
        &self.seed
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub const fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Returns `true` once the board has no empty cell or the turn cap is reached.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.board.is_full() || self.stats.turns() >= self.config.max_turns
    }

    /// Moves a ball and completes the turn.
    ///
    /// An illegal move leaves the game untouched and does not count as a turn.
    pub fn try_move(&mut self, from: Pos, to: Pos) -> Result<TurnSummary, IllegalMoveError> {
        if !self.board.is_legal_move(from, to) {
            return Err(IllegalMoveError { from, to });
        }
        self.board.apply_move(from, to);
        Ok(self.finish_turn(true, true))
    }

    /// Completes a turn without moving, spawning if nothing is cleared.
    ///
    /// This is the outcome when a player has no move to offer.
    pub fn pass(&mut self) -> TurnSummary {
        self.finish_turn(false, true)
    }

    /// Completes a turn without moving and without spawning.
    ///
    /// This is the outcome of a rejected move.
    pub fn void_turn(&mut self) -> TurnSummary {
        self.finish_turn(false, false)
    }

    fn finish_turn(&mut self, moved: bool, spawn: bool) -> TurnSummary {
        let summary = resolve_turn(&mut self.board, &mut self.rng, &self.config, spawn);
        self.stats.complete_turn(moved, summary);
        trace!(
            "{} turn {}: moved={moved} cleared={} spawned={}",
            self.seed,
            self.stats.turns(),
            summary.cleared,
            summary.spawned
        );
        summary
    }
}
