//! Move evaluators for the color-lines puzzle.
//!
//! Evaluation works in two levels:
//!
//! 1. **Move Analysis** ([`move_analysis`]) - Measures what a single move does to the
//!    board: balls cleared, runs through the destination, neighbourhood and overall
//!    board potential.
//! 2. **Move Evaluation** ([`move_evaluator`]) - Scores every legal move from its
//!    analysis and selects the best one.
//!
//! Three evaluators implement [`MoveEvaluator`](move_evaluator::MoveEvaluator):
//!
//! - [`heuristic::HeuristicEvaluator`] - Weighted sum of run, centrality, adjacency,
//!   mobility, supply and board-potential terms, scaled up as the board fills
//! - [`quick::QuickEvaluator`] - Run-length terms only; a cheap first pass
//! - [`rollout::MonteCarloEvaluator`] - Quick scores refined by random playouts of
//!   the best few candidates
//!
//! # Working Copies
//!
//! Evaluators never touch the board they are given. Each call clones it once into a
//! scratch board and applies every candidate with
//! [`Board::with_move_applied`](colorlines_engine::Board::with_move_applied), which
//! restores the scratch board before the next candidate.
//!
//! # Example
//!
//! ```
//! use colorlines_engine::{Board, GameRng, GameSeed};
//! use colorlines_evaluator::{heuristic::HeuristicEvaluator, move_evaluator::MoveEvaluator};
//!
//! let board = Board::from_ascii(
//!     3,
//!     r"
//!     AAAA.
//!     .....
//!     ....A
//!     ",
//! );
//! let evaluator = HeuristicEvaluator::default();
//! let mut rng = GameRng::new(&GameSeed::from("example"));
//! let best = evaluator.select_move(&board, &mut rng).unwrap();
//! assert_eq!(best.cleared, 5);
//! ```

pub mod heuristic;
pub mod move_analysis;
pub mod move_evaluator;
pub mod quick;
pub mod rollout;
