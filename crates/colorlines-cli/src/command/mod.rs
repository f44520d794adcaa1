use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};
use colorlines_arena::{
    agent::Agent,
    agents::{EvaluatorAgent, FirstMoveAgent, PassAgent, RandomAgent},
    evaluation::EvaluationConfig,
};
use colorlines_engine::{GameConfig, GameSeed};
use colorlines_evaluator::{
    heuristic::{HeuristicEvaluator, HeuristicWeights},
    quick::{QuickEvaluator, QuickWeights},
    rollout::{MonteCarloEvaluator, RolloutConfig},
};

use self::{compare::CompareArg, eval::EvalArg};

mod compare;
mod eval;

#[derive(Debug, Clone, Parser)]
#[command(name = "colorlines", author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a seeded batch of games with one agent
    Eval(#[clap(flatten)] EvalArg),
    /// Play the same batch with several agents and rank them
    Compare(#[clap(flatten)] CompareArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Eval(arg) => eval::run(&arg)?,
        Mode::Compare(arg) => compare::run(&arg)?,
    }
    Ok(())
}

/// Built-in move-choosing strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum AgentKind {
    Pass,
    First,
    Random,
    Heuristic,
    Quick,
    MonteCarlo,
}

impl AgentKind {
    pub(crate) fn build(self, game: &GameConfig) -> Box<dyn Agent> {
        let line_length = game.line_length;
        match self {
            Self::Pass => Box::new(PassAgent),
            Self::First => Box::new(FirstMoveAgent),
            Self::Random => Box::new(RandomAgent),
            Self::Heuristic => Box::new(EvaluatorAgent::new(HeuristicEvaluator::new(
                HeuristicWeights::default(),
                line_length,
            ))),
            Self::Quick => Box::new(EvaluatorAgent::new(QuickEvaluator::new(
                QuickWeights::default(),
                line_length,
            ))),
            Self::MonteCarlo => Box::new(EvaluatorAgent::new(MonteCarloEvaluator::new(
                QuickEvaluator::new(QuickWeights::default(), line_length),
                RolloutConfig::default(),
                *game,
            ))),
        }
    }
}

/// Board and batch settings shared by all subcommands.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BatchArg {
    /// Number of games
    #[arg(short = 'n', long, default_value_t = 50)]
    games: usize,
    /// Board width
    #[arg(short = 'W', long, default_value_t = 9)]
    width: usize,
    /// Board height
    #[arg(short = 'H', long, default_value_t = 9)]
    height: usize,
    /// Number of colors
    #[arg(short = 'c', long, default_value_t = 7)]
    colors: u8,
    /// Base seed; `r` picks a fresh one
    #[arg(short = 's', long, default_value = "fixed-seed")]
    seed: String,
    /// Time budget of one agent call in milliseconds
    #[arg(long, default_value_t = 20)]
    budget_ms: u64,
}

impl BatchArg {
    pub(crate) fn to_config(&self) -> EvaluationConfig {
        EvaluationConfig {
            game: GameConfig {
                width: self.width,
                height: self.height,
                colors_count: self.colors,
                ..GameConfig::default()
            },
            games: self.games,
            base_seed: self.base_seed(),
            move_budget_ms: self.budget_ms,
        }
    }

    fn base_seed(&self) -> GameSeed {
        if self.seed != "r" {
            return GameSeed::from(self.seed.as_str());
        }
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis());
        let salt = rand::random_range(0..1000);
        GameSeed::from(format!("seed-{millis}-{salt}"))
    }
}
