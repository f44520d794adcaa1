//! Seeded batches of games and their summary.
//!
//! Game `i` of a batch is played from seed `"{base_seed}-{i}"`, so a batch is a
//! pure function of the config and the agent (as long as the agent stays within
//! its budget).

use std::time::Duration;

use colorlines_engine::{BoardSnapshot, ConfigError, GameConfig, GameSeed};
use colorlines_stats::{descriptive::DescriptiveStats, percentiles::Percentiles};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    agent::Agent,
    game_runner::{RejectionTally, run_game},
};

/// Games between two progress log lines.
const PROGRESS_INTERVAL: usize = 10;

/// Settings of a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EvaluationConfig {
    pub game: GameConfig,
    pub games: usize,
    pub base_seed: GameSeed,
    /// Time budget of a single agent call, in milliseconds.
    pub move_budget_ms: u64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            games: 50,
            base_seed: GameSeed::from("fixed-seed"),
            move_budget_ms: 20,
        }
    }
}

impl EvaluationConfig {
    #[must_use]
    pub const fn move_budget(&self) -> Duration {
        Duration::from_millis(self.move_budget_ms)
    }

    /// Checks the config before any game is played.
    pub fn validate(&self) -> Result<(), EvaluationError> {
        self.game.validate()?;
        if self.games == 0 {
            return Err(EvaluationError::NoGames);
        }
        Ok(())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum EvaluationError {
    #[display("invalid game config: {_0}")]
    Config(ConfigError),
    #[display("at least one game is required")]
    #[from(ignore)]
    NoGames,
}

/// Aggregated result of a batch.
///
/// Score statistics use the population standard deviation; the median is the
/// lower middle score when the number of games is even.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationSummary {
    pub agent: String,
    pub avg_score: f64,
    pub std_dev: f64,
    pub std_error: f64,
    pub best: usize,
    pub median: usize,
    pub worst: usize,
    pub p25: f64,
    pub p75: f64,
    pub games: usize,
    pub width: usize,
    pub height: usize,
    pub colors_count: u8,
    pub moves_accepted: usize,
    pub moves_invalid_or_timeout: usize,
    pub rejections: RejectionTally,
    pub seed_used: GameSeed,
    /// Cells of the final board of the last game (`-1` for empty).
    pub last_board: Vec<Vec<i32>>,
    /// Per-game scores in play order.
    pub scores: Vec<usize>,
}

impl EvaluationSummary {
    /// Final board of the last game as a snapshot.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn last_board_snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            width: self.width as i32,
            height: self.height as i32,
            colors_count: i32::from(self.colors_count),
            cells: self.last_board.clone(),
        }
    }
}

/// Plays `config.games` games with `agent` and summarizes them.
///
/// The config is validated before the first game. Agent failures never abort
/// the batch; they are counted as rejected moves.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn evaluate(
    config: &EvaluationConfig,
    agent: &mut dyn Agent,
) -> Result<EvaluationSummary, EvaluationError> {
    config.validate()?;

    let mut scores = Vec::with_capacity(config.games);
    let mut moves_accepted = 0;
    let mut moves_invalid_or_timeout = 0;
    let mut rejections = RejectionTally::default();
    let mut last_board = Vec::new();

    for index in 0..config.games {
        let seed = config.base_seed.for_game(index);
        let result = run_game(&config.game, &seed, agent, config.move_budget())?;
        scores.push(result.score);
        moves_accepted += result.moves_accepted;
        moves_invalid_or_timeout += result.moves_invalid_or_timeout;
        rejections.merge(&result.rejections);
        last_board = result.final_board.cells;

        if (index + 1) % PROGRESS_INTERVAL == 0 {
            info!("{}: {}/{} games played", agent.name(), index + 1, config.games);
        }
    }

    let mut sorted = scores.clone();
    sorted.sort_unstable();
    let sorted_f64 = sorted.iter().map(|&s| s as f64).collect::<Vec<_>>();
    let stats = DescriptiveStats::from_sorted(&sorted_f64).ok_or(EvaluationError::NoGames)?;
    let quartiles = Percentiles::from_sorted(&sorted_f64, &[25.0, 75.0]);

    Ok(EvaluationSummary {
        agent: agent.name().to_owned(),
        avg_score: stats.mean,
        std_dev: stats.std_dev,
        std_error: stats.std_error,
        best: sorted[sorted.len() - 1],
        median: stats.median as usize,
        worst: sorted[0],
        p25: quartiles.get(25.0).unwrap_or(stats.min),
        p75: quartiles.get(75.0).unwrap_or(stats.max),
        games: config.games,
        width: config.game.width,
        height: config.game.height,
        colors_count: config.game.colors_count,
        moves_accepted,
        moves_invalid_or_timeout,
        rejections,
        seed_used: config.base_seed.clone(),
        last_board,
        scores,
    })
}

/// Evaluates several agents on the same seeds, best average score first.
///
/// Ties keep the order in which the agents were given.
pub fn compare(
    config: &EvaluationConfig,
    agents: &mut [Box<dyn Agent>],
) -> Result<Vec<EvaluationSummary>, EvaluationError> {
    let mut summaries = agents
        .iter_mut()
        .map(|agent| evaluate(config, agent.as_mut()))
        .collect::<Result<Vec<_>, _>>()?;
    summaries.sort_by(|a, b| b.avg_score.total_cmp(&a.avg_score));
    Ok(summaries)
}
