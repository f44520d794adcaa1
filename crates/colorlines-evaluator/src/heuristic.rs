//! Single-ply heuristic evaluation.
//!
//! Every legal move is applied to a scratch board and scored from its
//! [`MoveAnalysis`]:
//!
//! - **Clearing moves** score `clear_base + cleared * clear_per_ball`
//! - **Other moves** add up these terms:
//!   - line extension: `(len - 1)^run_exponent * run_scale` per axis with a run of
//!     at least 2, plus a flat bonus when the longest run reaches 4 (or exactly 3)
//!   - open ends: a bonus per axis whose run of at least 3 ends in an empty cell on
//!     both sides
//!   - centrality: `(center_zone - distance²) * center_scale`
//!   - adjacency and mobility: per same-colored and per empty cell among the eight
//!     around the destination
//!   - supply: per ball of the moved color on the board
//!   - board potential: [`board_potential`] of the whole board, weighted
//!
//! Finally the score is scaled up as the board fills: once fewer than
//! `end_game_empties` cells are empty and the moved color has at least
//! `end_game_min_supply` balls, and again once fewer than `late_game_empties` cells
//! are empty. The scaling applies to clearing moves too; the ranking keeps them on
//! top either way.

use colorlines_engine::{Board, GameRng};
use serde::{Deserialize, Serialize};

use crate::{
    move_analysis::{MoveAnalysis, board_potential},
    move_evaluator::{MoveEvaluator, ScoredMove},
};

/// Tunable constants of [`HeuristicEvaluator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeuristicWeights {
    pub clear_base: f64,
    pub clear_per_ball: f64,
    pub run_exponent: f64,
    pub run_scale: f64,
    pub four_run_bonus: f64,
    pub three_run_bonus: f64,
    pub open_ends_bonus: f64,
    pub center_zone: f64,
    pub center_scale: f64,
    pub adjacency: f64,
    pub mobility: f64,
    pub supply: f64,
    pub potential_exponent: f64,
    pub potential_scale: f64,
    pub potential_weight: f64,
    pub end_game_empties: usize,
    pub end_game_min_supply: usize,
    pub end_game_multiplier: f64,
    pub late_game_empties: usize,
    pub late_game_multiplier: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            clear_base: 10_000.0,
            clear_per_ball: 100.0,
            run_exponent: 2.5,
            run_scale: 50.0,
            four_run_bonus: 800.0,
            three_run_bonus: 150.0,
            open_ends_bonus: 100.0,
            center_zone: 16.0,
            center_scale: 2.0,
            adjacency: 15.0,
            mobility: 8.0,
            supply: 10.0,
            potential_exponent: 1.5,
            potential_scale: 15.0,
            potential_weight: 1.2,
            end_game_empties: 15,
            end_game_min_supply: 4,
            end_game_multiplier: 1.5,
            late_game_empties: 10,
            late_game_multiplier: 2.0,
        }
    }
}

/// Scores moves with the weighted single-ply heuristic described in the module docs.
#[derive(Debug, Clone)]
pub struct HeuristicEvaluator {
    weights: HeuristicWeights,
    line_length: usize,
}

impl Default for HeuristicEvaluator {
    fn default() -> Self {
        Self::new(HeuristicWeights::default(), 5)
    }
}

impl HeuristicEvaluator {
    #[must_use]
    pub const fn new(weights: HeuristicWeights, line_length: usize) -> Self {
        Self {
            weights,
            line_length,
        }
    }

    /// Score of a move before end-game scaling.
    #[expect(clippy::cast_precision_loss)]
    fn base_score(&self, analysis: &MoveAnalysis, after: &Board, supply: usize) -> f64 {
        let w = &self.weights;
        if analysis.cleared() > 0 {
            return w.clear_base + analysis.cleared() as f64 * w.clear_per_ball;
        }

        let mut score = 0.0;
        for run in analysis.runs().iter().filter(|run| run.len >= 2) {
            score += ((run.len - 1) as f64).powf(w.run_exponent) * w.run_scale;
        }
        match analysis.longest_run() {
            len if len >= 4 => score += w.four_run_bonus,
            3 => score += w.three_run_bonus,
            _ => {}
        }
        let open_runs = analysis
            .runs()
            .iter()
            .filter(|run| run.len >= 3 && run.is_open_both_ends())
            .count();
        score += open_runs as f64 * w.open_ends_bonus;
        score += (w.center_zone - analysis.center_distance_sq(after)) * w.center_scale;
        score += analysis.same_color_neighbors() as f64 * w.adjacency;
        score += analysis.empty_neighbors() as f64 * w.mobility;
        score += supply as f64 * w.supply;
        score +=
            board_potential(after, w.potential_exponent, w.potential_scale) * w.potential_weight;
        score
    }

    fn end_game_scale(&self, empties: usize, supply: usize) -> f64 {
        let w = &self.weights;
        let mut scale = 1.0;
        if empties < w.end_game_empties && supply >= w.end_game_min_supply {
            scale *= w.end_game_multiplier;
        }
        if empties < w.late_game_empties {
            scale *= w.late_game_multiplier;
        }
        scale
    }
}

impl MoveEvaluator for HeuristicEvaluator {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn score_moves(&self, board: &Board, _rng: &mut GameRng) -> Vec<ScoredMove> {
        let moves = board.legal_moves();
        if moves.is_empty() {
            return Vec::new();
        }
        // Moving a ball changes neither of these.
        let supplies = board.color_counts();
        let empties = board.empty_count();

        let mut scratch = board.clone();
        moves
            .into_iter()
            .map(|mv| {
                let supply = supplies[usize::from(mv.color.index())];
                scratch.with_move_applied(mv, |after| {
                    let analysis = MoveAnalysis::from_board(after, mv, self.line_length);
                    let score = self.base_score(&analysis, after, supply)
                        * self.end_game_scale(empties, supply);
                    ScoredMove {
                        mv,
                        score,
                        cleared: analysis.cleared(),
                    }
                })
            })
            .collect()
    }
}
