//! Move evaluation: scoring every legal move and picking the best.
//!
//! # Ranking
//!
//! Scored moves are ranked by three keys, in order:
//!
//! 1. Moves that clear balls outrank moves that do not, whatever their scores
//! 2. Higher score
//! 3. More balls cleared
//!
//! When all three keys tie, the move enumerated first by
//! [`Board::legal_moves`] wins. Selection is therefore a pure function of the board
//! (and, for stochastic evaluators, of the random stream).

use std::{cmp::Ordering, fmt};

use colorlines_engine::{Board, GameRng, Move};

/// A legal move with its evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMove {
    pub mv: Move,
    /// Evaluation score (higher is better).
    pub score: f64,
    /// Balls the move clears immediately.
    pub cleared: usize,
}

impl ScoredMove {
    #[must_use]
    pub const fn clears(&self) -> bool {
        self.cleared > 0
    }

    /// Compares two moves by rank; `Greater` means `self` is the better move.
    #[must_use]
    pub fn cmp_rank(&self, other: &Self) -> Ordering {
        self.clears()
            .cmp(&other.clears())
            .then_with(|| self.score.total_cmp(&other.score))
            .then_with(|| self.cleared.cmp(&other.cleared))
    }
}

/// Returns the best-ranked move, keeping the earliest one on a full tie.
pub fn best_move<I>(moves: I) -> Option<ScoredMove>
where
    I: IntoIterator<Item = ScoredMove>,
{
    moves.into_iter().reduce(|best, candidate| {
        if candidate.cmp_rank(&best).is_gt() {
            candidate
        } else {
            best
        }
    })
}

/// Scores the legal moves of a board.
pub trait MoveEvaluator: fmt::Debug + Send + Sync {
    /// Short name used in logs and reports.
    fn name(&self) -> &str;

    /// Scores every legal move of `board`, in [`Board::legal_moves`] order.
    ///
    /// Returns an empty list when there is no legal move. `board` is left as is;
    /// `rng` is only consumed by stochastic evaluators.
    fn score_moves(&self, board: &Board, rng: &mut GameRng) -> Vec<ScoredMove>;

    /// Selects the best move, or `None` when there is no legal move.
    fn select_move(&self, board: &Board, rng: &mut GameRng) -> Option<ScoredMove> {
        best_move(self.score_moves(board, rng))
    }
}

#[cfg(test)]
mod tests {
    use colorlines_engine::{Color, Pos};

    use super::*;

    fn scored(x: usize, score: f64, cleared: usize) -> ScoredMove {
        ScoredMove {
            mv: Move {
                from: Pos::new(x, 0),
                to: Pos::new(x, 1),
                color: Color::new(0),
            },
            score,
            cleared,
        }
    }

    #[test]
    fn test_clearing_move_outranks_higher_score() {
        let best = best_move([scored(0, 50_000.0, 0), scored(1, 10_500.0, 5)]).unwrap();
        assert_eq!(best.mv.from.x, 1);
    }

    #[test]
    fn test_higher_score_wins() {
        let best = best_move([scored(0, 10.0, 0), scored(1, 12.5, 0), scored(2, 12.0, 0)]).unwrap();
        assert_eq!(best.mv.from.x, 1);
    }

    #[test]
    fn test_equal_score_prefers_more_cleared() {
        let best = best_move([scored(0, 10_500.0, 5), scored(1, 10_500.0, 6)]).unwrap();
        assert_eq!(best.mv.from.x, 1);
    }

    #[test]
    fn test_full_tie_keeps_first() {
        let best = best_move([scored(0, 7.0, 0), scored(1, 7.0, 0), scored(2, 7.0, 0)]).unwrap();
        assert_eq!(best.mv.from.x, 0);
    }

    #[test]
    fn test_empty_list_has_no_best() {
        assert_eq!(best_move(Vec::new()), None);
    }
}
