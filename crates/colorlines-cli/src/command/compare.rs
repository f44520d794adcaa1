use anyhow::Context as _;
use colorlines_arena::evaluation::compare;

use crate::{
    command::{AgentKind, BatchArg},
    util::{self, JsonTarget},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CompareArg {
    /// Agents to compare, comma separated
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_value = "first,random,heuristic,monte-carlo"
    )]
    agents: Vec<AgentKind>,
    #[clap(flatten)]
    batch: BatchArg,
    /// Write all summaries as JSON to a file, or to stdout with `-`
    #[arg(long)]
    json: Option<JsonTarget>,
}

pub(crate) fn run(arg: &CompareArg) -> anyhow::Result<()> {
    let config = arg.batch.to_config();
    let mut agents = arg
        .agents
        .iter()
        .map(|kind| kind.build(&config.game))
        .collect::<Vec<_>>();

    eprintln!(
        "Comparing {} agents on {} games (seed: {})",
        agents.len(),
        config.games,
        config.base_seed
    );
    let ranked = compare(&config, &mut agents).context("Failed to compare agents")?;

    println!(
        "{:>4}  {:<12} {:>9} {:>8} {:>6} {:>6} {:>6} {:>9}",
        "rank", "agent", "avg", "stddev", "best", "median", "worst", "rejected"
    );
    for (rank, summary) in ranked.iter().enumerate() {
        println!(
            "{:>4}  {:<12} {:>9.1} {:>8.1} {:>6} {:>6} {:>6} {:>9}",
            rank + 1,
            summary.agent,
            summary.avg_score,
            summary.std_dev,
            summary.best,
            summary.median,
            summary.worst,
            summary.moves_invalid_or_timeout
        );
    }
    if let Some(target) = &arg.json {
        util::write_json(&ranked, target)?;
    }
    Ok(())
}
