use anyhow::Context as _;
use colorlines_arena::evaluation::{EvaluationSummary, evaluate};
use colorlines_engine::Board;

use crate::{
    command::{AgentKind, BatchArg},
    util::{self, JsonTarget},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EvalArg {
    /// Agent to evaluate
    #[arg(long, value_enum, default_value = "heuristic")]
    agent: AgentKind,
    #[clap(flatten)]
    batch: BatchArg,
    /// Show the final board of the last game
    #[arg(long)]
    board: bool,
    /// Write the summary as JSON to a file, or to stdout with `-`
    #[arg(long)]
    json: Option<JsonTarget>,
}

pub(crate) fn run(arg: &EvalArg) -> anyhow::Result<()> {
    let config = arg.batch.to_config();
    let mut agent = arg.agent.build(&config.game);

    eprintln!(
        "Running {} games ({}x{}, {} colors, seed: {})",
        config.games,
        config.game.width,
        config.game.height,
        config.game.colors_count,
        config.base_seed
    );
    let summary = evaluate(&config, agent.as_mut())
        .with_context(|| format!("Failed to evaluate agent {:?}", arg.agent))?;

    print_summary(&summary);
    if arg.board {
        let board = Board::try_from(&summary.last_board_snapshot())
            .context("Failed to rebuild the final board")?;
        println!();
        println!("Final board:");
        println!("{board}");
    }
    if let Some(target) = &arg.json {
        util::write_json(&summary, target)?;
    }
    Ok(())
}

fn print_summary(summary: &EvaluationSummary) {
    println!(
        "Avg Score: {:.1} ± {:.1} (stderr {:.2})",
        summary.avg_score, summary.std_dev, summary.std_error
    );
    println!(
        "Best/Median/Worst: {} / {} / {}",
        summary.best, summary.median, summary.worst
    );
    println!("Quartiles: {:.0} / {:.0}", summary.p25, summary.p75);
    let rejections = &summary.rejections;
    println!(
        "Moves: {} accepted, {} invalid/timeout ({} timeout, {} failed, {} no move, {} invalid)",
        summary.moves_accepted,
        summary.moves_invalid_or_timeout,
        rejections.timeouts,
        rejections.failures,
        rejections.no_move,
        rejections.invalid
    );
}
