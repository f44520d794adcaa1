//! Game engine logic and state management.
//!
//! This module builds the rules of a full game on top of the board model in
//! [`crate::core`]:
//!
//! - [`GameConfig`] - Board dimensions, spawn counts, line length and turn cap
//! - [`GameSeed`] / [`GameRng`] - Seed strings and the deterministic random stream
//! - [`resolve_turn`] - The clear-or-spawn step that ends every turn
//! - [`Game`] - A single game with its board, random stream and statistics
//! - [`GameStats`] - Score and turn counters
//!
//! # Game Flow
//!
//! 1. Create a [`Game`] from a config and a seed; the initial balls are spawned
//! 2. Each turn, either move a ball ([`Game::try_move`]), skip the move
//!    ([`Game::pass`]) or void the turn ([`Game::void_turn`])
//! 3. Lines formed are cleared and scored; otherwise new balls are spawned
//! 4. Repeat until the board is full or the turn cap is reached
//!
//! The same seed always reproduces the same spawns, so two players given the same
//! seed and making the same moves see identical games.

pub use self::{config::*, game::*, game_stats::*, rng::*, rules::*};

mod config;
mod game;
mod game_stats;
mod rng;
mod rules;
