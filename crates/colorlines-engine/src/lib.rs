//! Rules engine for the color-lines puzzle.
//!
//! The board is a `width × height` grid where each cell is either empty or holds a
//! ball of one of `colors_count` colors. A move relocates one ball through empty
//! cells (orthogonal steps only) to an empty destination. Runs of `line_length` or
//! more same-colored balls along a row, column or diagonal are cleared; a turn that
//! clears nothing spawns new random balls.
//!
//! - [`core`] - Board model, reachability, line detection and wire snapshots
//! - [`engine`] - Deterministic RNG, spawning, turn resolution and game state
//!
//! # Example
//!
//! ```
//! use colorlines_engine::{Game, GameConfig, GameSeed};
//!
//! let mut game = Game::new(GameConfig::default(), &GameSeed::from("fixed-seed")).unwrap();
//! assert_eq!(game.board().ball_count(), 5);
//!
//! let mv = game.board().legal_moves()[0];
//! let summary = game.try_move(mv.from, mv.to).unwrap();
//! assert_eq!(game.stats().turns(), 1);
//! assert!(summary.cleared > 0 || summary.spawned == 3);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A game or board configuration that cannot describe a playable board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board width must be positive")]
    ZeroWidth,
    #[display("board height must be positive")]
    ZeroHeight,
    #[display("colors count must be positive")]
    ZeroColors,
    #[display("line length must be positive")]
    ZeroLineLength,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("illegal move from {from} to {to}")]
pub struct IllegalMoveError {
    pub from: Pos,
    pub to: Pos,
}
