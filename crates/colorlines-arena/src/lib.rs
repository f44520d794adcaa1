//! Harness that plays color-lines games against pluggable agents.
//!
//! - [`agent`] - The [`Agent`](agent::Agent) capability and its wire types
//! - [`agents`] - Built-in agents, including wrappers around the evaluators
//! - [`referee`] - Timed, panic-safe agent calls and move validation
//! - [`game_runner`] - Plays one game to the end and records a
//!   [`GameResult`](game_runner::GameResult)
//! - [`evaluation`] - Runs seeded batches of games and summarizes the scores
//!
//! # Turn Flow
//!
//! ```text
//! Game::is_over? ── yes ──▶ GameResult
//!      │ no
//!      ▼
//! Referee::consult(agent, snapshot, budget)
//!      ├─ Accepted(move) ─▶ Game::try_move    (clear, else spawn)
//!      ├─ NoMove / Timeout / AgentFailed ─▶ Game::pass (clear, else spawn)
//!      └─ InvalidMove ────▶ Game::void_turn   (clear only)
//! ```
//!
//! Every consultation is exactly one turn and is counted either as accepted or as
//! rejected, so `moves_accepted + moves_invalid_or_timeout == turns` for every game.
//!
//! # Example
//!
//! ```
//! use colorlines_arena::{agents::FirstMoveAgent, evaluation::{EvaluationConfig, evaluate}};
//!
//! let config = EvaluationConfig { games: 2, ..EvaluationConfig::default() };
//! let summary = evaluate(&config, &mut FirstMoveAgent).unwrap();
//! assert_eq!(summary.games, 2);
//! assert_eq!(summary.seed_used.as_str(), "fixed-seed");
//! ```

pub mod agent;
pub mod agents;
pub mod evaluation;
pub mod game_runner;
pub mod referee;
