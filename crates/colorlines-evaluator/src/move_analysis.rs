//! Analysis of the board right after a candidate move.
//!
//! [`MoveAnalysis`] collects everything the evaluators look at for one move: how many
//! balls it clears, the run of the moved color through the destination along each
//! axis, and the destination's surroundings. Board-wide measures that are costly to
//! compute, like [`board_potential`], are separate functions so only the evaluators
//! that use them pay for them.
//!
//! The analysis is taken on the board with the move applied and before any clear,
//! which is the board [`Board::with_move_applied`] hands to its closure.

use colorlines_engine::{Axis, Board, Move, Run};

#[derive(Debug, Clone)]
pub struct MoveAnalysis {
    mv: Move,
    cleared: usize,
    runs: [Run; 4],
    same_color_neighbors: usize,
    empty_neighbors: usize,
}

impl MoveAnalysis {
    /// Analyzes `mv` given the board `after` it was applied.
    #[must_use]
    pub fn from_board(after: &Board, mv: Move, line_length: usize) -> Self {
        debug_assert_eq!(after.get(mv.to), Some(mv.color), "move must be applied");
        let cleared = after.find_clearable_lines(line_length).len();
        let runs = Axis::ALL.map(|axis| after.run_through(mv.to, mv.color, axis));
        let neighbors = after.neighbors(mv.to);
        let same_color_neighbors = neighbors
            .iter()
            .filter(|p| after.get(**p) == Some(mv.color))
            .count();
        let empty_neighbors = neighbors.iter().filter(|p| after.is_empty_at(**p)).count();
        Self {
            mv,
            cleared,
            runs,
            same_color_neighbors,
            empty_neighbors,
        }
    }

    #[must_use]
    pub const fn mv(&self) -> Move {
        self.mv
    }

    /// Balls cleared by the move (union of every completed line).
    #[must_use]
    pub const fn cleared(&self) -> usize {
        self.cleared
    }

    /// Runs through the destination, one per axis in [`Axis::ALL`] order.
    #[must_use]
    pub const fn runs(&self) -> &[Run; 4] {
        &self.runs
    }

    /// Length of the longest run through the destination.
    #[must_use]
    pub fn longest_run(&self) -> usize {
        self.runs.iter().map(|run| run.len).max().unwrap_or(1)
    }

    /// Balls of the moved color among the eight cells around the destination.
    #[must_use]
    pub const fn same_color_neighbors(&self) -> usize {
        self.same_color_neighbors
    }

    /// Empty cells among the eight cells around the destination.
    #[must_use]
    pub const fn empty_neighbors(&self) -> usize {
        self.empty_neighbors
    }

    /// Squared distance from the destination to the board center.
    ///
    /// The center is `(width / 2, height / 2)` in real numbers, so odd-sized boards
    /// have their center in the middle of a cell.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn center_distance_sq(&self, board: &Board) -> f64 {
        let dx = self.mv.to.x as f64 - board.width() as f64 / 2.0;
        let dy = self.mv.to.y as f64 - board.height() as f64 / 2.0;
        dx * dx + dy * dy
    }
}

/// Measures how close the whole board is to forming lines.
///
/// For every ball and every axis, the run through that ball is measured; a run of at
/// least 3 adds `(len - 1)^exponent * scale`. A run is thus counted once per ball in
/// it, which weights long runs more than their length alone.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn board_potential(board: &Board, exponent: f64, scale: f64) -> f64 {
    board
        .balls()
        .flat_map(|(pos, color)| Axis::ALL.map(|axis| board.run_through(pos, color, axis).len))
        .filter(|len| *len >= 3)
        .map(|len| ((len - 1) as f64).powf(exponent) * scale)
        .sum()
}
