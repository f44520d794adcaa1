//! Monte Carlo refinement of the quick heuristic.
//!
//! 1. Every legal move is scored with [`QuickEvaluator`]
//! 2. The `top_k` best-ranked moves are kept as candidates
//! 3. Each candidate is played out `playouts` times on a private board: the move is
//!    applied and the turn resolved, then up to `depth` further turns are played with
//!    a uniformly random legal move each. A playout scores the balls it cleared
//! 4. The mean playout score, times `weight`, is added to the candidate's quick score
//!
//! Moves outside the candidates keep their quick score. All randomness comes from
//! the caller's [`GameRng`], so the selected move is reproducible for a given seed.

use colorlines_engine::{Board, GameConfig, GameRng, Move, resolve_turn};
use log::trace;
use rand::seq::IndexedRandom as _;
use serde::{Deserialize, Serialize};

use crate::{
    move_evaluator::{MoveEvaluator, ScoredMove},
    quick::QuickEvaluator,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RolloutConfig {
    /// Candidates kept from the first pass.
    pub top_k: usize,
    /// Playouts per candidate.
    pub playouts: usize,
    /// Random turns played after the candidate move.
    pub depth: usize,
    /// Multiplier of the mean playout score.
    pub weight: f64,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            playouts: 5,
            depth: 8,
            weight: 50.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MonteCarloEvaluator {
    first_pass: QuickEvaluator,
    config: RolloutConfig,
    rules: GameConfig,
}

impl Default for MonteCarloEvaluator {
    fn default() -> Self {
        Self::new(QuickEvaluator::default(), RolloutConfig::default(), GameConfig::default())
    }
}

impl MonteCarloEvaluator {
    /// Creates an evaluator whose playouts follow `rules` (line length and
    /// spawn count).
    #[must_use]
    pub const fn new(first_pass: QuickEvaluator, config: RolloutConfig, rules: GameConfig) -> Self {
        Self {
            first_pass,
            config,
            rules,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &RolloutConfig {
        &self.config
    }

    /// Mean balls cleared over the configured number of playouts of `mv`.
    #[expect(clippy::cast_precision_loss)]
    fn mean_playout_score(&self, board: &Board, mv: Move, rng: &mut GameRng) -> f64 {
        if self.config.playouts == 0 {
            return 0.0;
        }
        let total: usize = (0..self.config.playouts)
            .map(|_| self.playout(board, mv, rng))
            .sum();
        total as f64 / self.config.playouts as f64
    }

    /// Plays `mv` and then random moves on a copy of `board`, returning the balls
    /// cleared.
    fn playout(&self, board: &Board, mv: Move, rng: &mut GameRng) -> usize {
        let mut board = board.clone();
        board.apply_move(mv.from, mv.to);
        let mut cleared = resolve_turn(&mut board, rng, &self.rules, true).cleared;
        for _ in 0..self.config.depth {
            let moves = board.legal_moves();
            let Some(next) = moves.choose(rng) else {
                break;
            };
            board.apply_move(next.from, next.to);
            cleared += resolve_turn(&mut board, rng, &self.rules, true).cleared;
        }
        cleared
    }
}

impl MoveEvaluator for MonteCarloEvaluator {
    fn name(&self) -> &str {
        "monte-carlo"
    }

    fn score_moves(&self, board: &Board, rng: &mut GameRng) -> Vec<ScoredMove> {
        let mut scored = self.first_pass.score_moves(board, rng);

        let mut ranked: Vec<usize> = (0..scored.len()).collect();
        ranked.sort_by(|&a, &b| scored[b].cmp_rank(&scored[a]));
        for &index in ranked.iter().take(self.config.top_k) {
            let candidate = &mut scored[index];
            let future = self.mean_playout_score(board, candidate.mv, rng);
            trace!(
                "candidate {} -> {}: quick {:.1}, playout mean {future:.2}",
                candidate.mv.from, candidate.mv.to, candidate.score
            );
            candidate.score += future * self.config.weight;
        }
        scored
    }
}
