//! Reduced heuristic used as the cheap first pass of the rollout evaluator.
//!
//! Only the runs through the destination are looked at: clearing moves score as in
//! the full heuristic, other moves score `(len - 1)^run_exponent * run_scale` per axis
//! with a run of at least `min_run`, the longest-run bonuses and the open-ends bonus.
//! There are no board-wide terms and no end-game scaling.

use colorlines_engine::{Board, GameRng};
use serde::{Deserialize, Serialize};

use crate::{
    move_analysis::MoveAnalysis,
    move_evaluator::{MoveEvaluator, ScoredMove},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuickWeights {
    pub clear_base: f64,
    pub clear_per_ball: f64,
    pub min_run: usize,
    pub run_exponent: f64,
    pub run_scale: f64,
    pub four_run_bonus: f64,
    pub three_run_bonus: f64,
    pub open_ends_bonus: f64,
}

impl Default for QuickWeights {
    fn default() -> Self {
        Self {
            clear_base: 10_000.0,
            clear_per_ball: 100.0,
            min_run: 3,
            run_exponent: 2.0,
            run_scale: 20.0,
            four_run_bonus: 800.0,
            three_run_bonus: 150.0,
            open_ends_bonus: 100.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QuickEvaluator {
    weights: QuickWeights,
    line_length: usize,
}

impl Default for QuickEvaluator {
    fn default() -> Self {
        Self::new(QuickWeights::default(), 5)
    }
}

impl QuickEvaluator {
    #[must_use]
    pub const fn new(weights: QuickWeights, line_length: usize) -> Self {
        Self {
            weights,
            line_length,
        }
    }

    #[expect(clippy::cast_precision_loss)]
    fn score(&self, analysis: &MoveAnalysis) -> f64 {
        let w = &self.weights;
        if analysis.cleared() > 0 {
            return w.clear_base + analysis.cleared() as f64 * w.clear_per_ball;
        }
        let mut score = 0.0;
        for run in analysis.runs().iter().filter(|run| run.len >= w.min_run) {
            score += ((run.len - 1) as f64).powf(w.run_exponent) * w.run_scale;
            if run.is_open_both_ends() {
                score += w.open_ends_bonus;
            }
        }
        match analysis.longest_run() {
            len if len >= 4 => score += w.four_run_bonus,
            3 => score += w.three_run_bonus,
            _ => {}
        }
        score
    }
}

impl MoveEvaluator for QuickEvaluator {
    fn name(&self) -> &str {
        "quick"
    }

    fn score_moves(&self, board: &Board, _rng: &mut GameRng) -> Vec<ScoredMove> {
        let mut scratch = board.clone();
        board
            .legal_moves()
            .into_iter()
            .map(|mv| {
                scratch.with_move_applied(mv, |after| {
                    let analysis = MoveAnalysis::from_board(after, mv, self.line_length);
                    ScoredMove {
                        mv,
                        score: self.score(&analysis),
                        cleared: analysis.cleared(),
                    }
                })
            })
            .collect()
    }
}
