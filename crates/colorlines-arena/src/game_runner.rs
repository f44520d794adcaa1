//! Plays a single game against an agent.

use std::time::Duration;

use colorlines_engine::{BoardSnapshot, ConfigError, Game, GameConfig, GameRng, GameSeed};
use log::debug;
use serde::Serialize;

use crate::{
    agent::Agent,
    referee::{MoveFault, RejectReason, Referee, Verdict},
};

/// Rejected consultations by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectionTally {
    pub timeouts: usize,
    pub failures: usize,
    pub no_move: usize,
    pub invalid: usize,
}

impl RejectionTally {
    pub const fn record(&mut self, reason: RejectReason) {
        match reason {
            RejectReason::Timeout => self.timeouts += 1,
            RejectReason::AgentFailed => self.failures += 1,
            RejectReason::NoMove => self.no_move += 1,
            RejectReason::InvalidMove(_) => self.invalid += 1,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.timeouts + self.failures + self.no_move + self.invalid
    }

    pub const fn merge(&mut self, other: &Self) {
        self.timeouts += other.timeouts;
        self.failures += other.failures;
        self.no_move += other.no_move;
        self.invalid += other.invalid;
    }
}

/// Outcome of one finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub seed: GameSeed,
    pub score: usize,
    pub turns: usize,
    pub moves_accepted: usize,
    /// Every consultation that did not produce an applied move.
    pub moves_invalid_or_timeout: usize,
    pub rejections: RejectionTally,
    pub clear_events: usize,
    pub final_board: BoardSnapshot,
}

/// Plays one game from `seed` until the board is full or the turn cap is hit.
///
/// The agent draws from its own stream, `"{seed}/agent"`, so it cannot shift
/// the spawns of the game.
pub fn run_game(
    config: &GameConfig,
    seed: &GameSeed,
    agent: &mut dyn Agent,
    budget: Duration,
) -> Result<GameResult, ConfigError> {
    let mut game = Game::new(*config, seed)?;
    let mut agent_rng = GameRng::new(&seed.stream("agent"));
    let referee = Referee::new(budget);
    let mut moves_accepted = 0;
    let mut rejections = RejectionTally::default();

    debug!("{seed}: {} starts", agent.name());
    while !game.is_over() {
        match referee.consult(agent, game.board(), &mut agent_rng) {
            Verdict::Accepted(mv) => match game.try_move(mv.from, mv.to) {
                Ok(_) => moves_accepted += 1,
                Err(_) => {
                    rejections.record(RejectReason::InvalidMove(MoveFault::Unreachable));
                    game.void_turn();
                }
            },
            Verdict::Rejected(reason) => {
                rejections.record(reason);
                if reason.spawns() {
                    game.pass();
                } else {
                    game.void_turn();
                }
            }
        }
    }

    let stats = game.stats();
    debug!(
        "{seed}: {} finished with score {} after {} turns ({} rejected)",
        agent.name(),
        stats.score(),
        stats.turns(),
        rejections.total()
    );
    Ok(GameResult {
        seed: seed.clone(),
        score: stats.score(),
        turns: stats.turns(),
        moves_accepted,
        moves_invalid_or_timeout: rejections.total(),
        rejections,
        clear_events: stats.clear_events(),
        final_board: BoardSnapshot::from(game.board()),
    })
}

#[cfg(test)]
mod tests {
    use crate::{
        agent::{AgentError, AgentMove, MoveRequest},
        agents::{FirstMoveAgent, PassAgent},
    };

    use super::*;

    const BUDGET: Duration = Duration::from_secs(1);

    fn small() -> GameConfig {
        GameConfig {
            width: 5,
            height: 5,
            colors_count: 3,
            ..GameConfig::default()
        }
    }

    #[derive(Debug)]
    struct OutOfBoundsAgent;

    impl Agent for OutOfBoundsAgent {
        fn name(&self) -> &str {
            "out-of-bounds"
        }

        fn propose_move(
            &mut self,
            _request: MoveRequest<'_>,
        ) -> Result<Option<AgentMove>, AgentError> {
            Ok(Some(AgentMove::new([0, 0], [99, 99])))
        }
    }

    #[test]
    fn test_pass_agent_fills_board() {
        let result = run_game(&small(), &GameSeed::from("pass"), &mut PassAgent, BUDGET).unwrap();
        assert_eq!(result.moves_accepted, 0);
        assert_eq!(result.rejections.no_move, result.turns);
        assert!(result.final_board.cells.iter().flatten().all(|&c| c >= 0));
    }

    #[test]
    fn test_turns_are_classified_once() {
        let result =
            run_game(&small(), &GameSeed::from("first"), &mut FirstMoveAgent, BUDGET).unwrap();
        assert_eq!(result.moves_accepted + result.moves_invalid_or_timeout, result.turns);
    }

    #[test]
    fn test_invalid_agent_stops_at_turn_cap() {
        let config = GameConfig {
            max_turns: 40,
            ..small()
        };
        let result =
            run_game(&config, &GameSeed::from("bad"), &mut OutOfBoundsAgent, BUDGET).unwrap();
        // Rejected moves never spawn, so only the turn cap ends the game.
        assert_eq!(result.turns, 40);
        assert_eq!(result.rejections.invalid, 40);
        assert_eq!(result.moves_invalid_or_timeout, 40);
        let balls = result.final_board.cells.iter().flatten().filter(|&&c| c >= 0).count();
        assert!(balls <= config.initial_spawn);
    }

    #[test]
    fn test_same_seed_same_result() {
        let a = run_game(&small(), &GameSeed::from("again"), &mut FirstMoveAgent, BUDGET).unwrap();
        let b = run_game(&small(), &GameSeed::from("again"), &mut FirstMoveAgent, BUDGET).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_config_error_before_play() {
        let config = GameConfig {
            colors_count: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            run_game(&config, &GameSeed::from("x"), &mut PassAgent, BUDGET),
            Err(ConfigError::ZeroColors)
        );
    }
}
