//! Timed, panic-safe agent calls and validation of the answers.

use std::{
    panic::{self, AssertUnwindSafe},
    time::{Duration, Instant},
};

use colorlines_engine::{Board, BoardSnapshot, GameRng, Move};
use log::warn;

use crate::agent::{Agent, AgentError, AgentMove, MoveRequest};

/// Why a proposed move was structurally or rule-wise unacceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveFault {
    #[display("malformed answer")]
    Malformed,
    #[display("coordinates out of range")]
    OutOfBounds,
    #[display("source equals destination")]
    SameCell,
    #[display("no ball at source")]
    EmptySource,
    #[display("destination occupied")]
    OccupiedDestination,
    #[display("destination unreachable")]
    Unreachable,
}

/// Why a consultation did not produce a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum RejectReason {
    #[display("time budget exceeded")]
    Timeout,
    #[display("agent failed")]
    AgentFailed,
    #[display("no move")]
    NoMove,
    #[display("invalid move: {_0}")]
    InvalidMove(MoveFault),
}

impl RejectReason {
    /// Whether the turn still spawns balls when nothing is cleared.
    ///
    /// Only a rejected move skips the spawn; a failed, slow or empty answer does
    /// not, so a stuck agent cannot stall the game.
    #[must_use]
    pub const fn spawns(self) -> bool {
        !matches!(self, Self::InvalidMove(_))
    }
}

/// Outcome of consulting an agent for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Verdict {
    Accepted(Move),
    Rejected(RejectReason),
}

/// Calls agents under a time budget and checks what they return.
#[derive(Debug, Clone, Copy)]
pub struct Referee {
    budget: Duration,
}

impl Referee {
    #[must_use]
    pub const fn new(budget: Duration) -> Self {
        Self { budget }
    }

    /// Asks `agent` for a move on a copy of `board`.
    ///
    /// The call cannot be interrupted, so an agent that overruns is only rejected
    /// once it returns. Panics and errors become [`RejectReason::AgentFailed`].
    pub fn consult(&self, agent: &mut dyn Agent, board: &Board, rng: &mut GameRng) -> Verdict {
        let started = Instant::now();
        let request = MoveRequest {
            board: BoardSnapshot::from(board),
            budget: self.budget,
            deadline: started + self.budget,
            rng,
        };
        let answer = panic::catch_unwind(AssertUnwindSafe(|| agent.propose_move(request)));
        let elapsed = started.elapsed();

        if elapsed > self.budget {
            warn!(
                "{}: answered after {elapsed:?}, budget {:?}",
                agent.name(),
                self.budget
            );
            return Verdict::Rejected(RejectReason::Timeout);
        }
        match answer {
            Err(_) => {
                warn!("{}: panicked while choosing a move", agent.name());
                Verdict::Rejected(RejectReason::AgentFailed)
            }
            Ok(Err(AgentError::Answer(err))) => {
                warn!("{}: malformed answer: {err}", agent.name());
                Verdict::Rejected(RejectReason::InvalidMove(MoveFault::Malformed))
            }
            Ok(Err(err)) => {
                warn!("{}: {err}", agent.name());
                Verdict::Rejected(RejectReason::AgentFailed)
            }
            Ok(Ok(None)) => Verdict::Rejected(RejectReason::NoMove),
            Ok(Ok(Some(proposal))) => match validate(board, &proposal) {
                Ok(mv) => Verdict::Accepted(mv),
                Err(fault) => Verdict::Rejected(RejectReason::InvalidMove(fault)),
            },
        }
    }
}

/// Checks a proposal against the authoritative board.
pub fn validate(board: &Board, proposal: &AgentMove) -> Result<Move, MoveFault> {
    let [fx, fy] = proposal.from;
    let [tx, ty] = proposal.to;
    let (Some(from), Some(to)) = (board.pos_checked(fx, fy), board.pos_checked(tx, ty)) else {
        return Err(MoveFault::OutOfBounds);
    };
    if from == to {
        return Err(MoveFault::SameCell);
    }
    if board.is_empty_at(from) {
        return Err(MoveFault::EmptySource);
    }
    if !board.is_empty_at(to) {
        return Err(MoveFault::OccupiedDestination);
    }
    board.checked_move(from, to).ok_or(MoveFault::Unreachable)
}

#[cfg(test)]
mod tests {
    use std::thread;

    use colorlines_engine::{GameSeed, Pos};

    use super::*;

    struct Scripted<F>(F);

    impl<F> Agent for Scripted<F>
    where
        F: FnMut(&MoveRequest<'_>) -> Result<Option<AgentMove>, AgentError>,
    {
        fn name(&self) -> &str {
            "scripted"
        }

        fn propose_move(
            &mut self,
            request: MoveRequest<'_>,
        ) -> Result<Option<AgentMove>, AgentError> {
            (self.0)(&request)
        }
    }

    fn consult<F>(answer: F) -> Verdict
    where
        F: FnMut(&MoveRequest<'_>) -> Result<Option<AgentMove>, AgentError>,
    {
        let board = walled_board();
        let mut rng = GameRng::new(&GameSeed::from("referee"));
        Referee::new(Duration::from_millis(200)).consult(&mut Scripted(answer), &board, &mut rng)
    }

    /// `A` at (0, 0) is walled in by `B`s; `A` at (4, 2) is free.
    fn walled_board() -> Board {
        Board::from_ascii(
            2,
            r"
            AB...
            BB...
            ....A
            ",
        )
    }

    #[test]
    fn test_accepts_legal_move() {
        let verdict = consult(|_| Ok(Some(AgentMove::new([4, 2], [0, 2]))));
        let Verdict::Accepted(mv) = verdict else {
            panic!("rejected: {verdict:?}");
        };
        assert_eq!((mv.from, mv.to), (Pos::new(4, 2), Pos::new(0, 2)));
    }

    #[test]
    fn test_move_faults() {
        let cases = [
            (AgentMove::new([4, 2], [5, 2]), MoveFault::OutOfBounds),
            (AgentMove::new([-1, 0], [2, 2]), MoveFault::OutOfBounds),
            (AgentMove::new([4, 2], [4, 2]), MoveFault::SameCell),
            (AgentMove::new([3, 2], [2, 2]), MoveFault::EmptySource),
            (AgentMove::new([4, 2], [1, 1]), MoveFault::OccupiedDestination),
            (AgentMove::new([0, 0], [2, 2]), MoveFault::Unreachable),
        ];
        for (proposal, fault) in cases {
            assert_eq!(
                validate(&walled_board(), &proposal),
                Err(fault),
                "{proposal:?}"
            );
        }
    }

    #[test]
    fn test_rejections() {
        assert_eq!(
            consult(|_| Ok(None)),
            Verdict::Rejected(RejectReason::NoMove)
        );
        assert_eq!(
            consult(|_| Err(AgentError::msg("nope"))),
            Verdict::Rejected(RejectReason::AgentFailed)
        );
        assert_eq!(
            consult(|_| panic!("agent bug")),
            Verdict::Rejected(RejectReason::AgentFailed)
        );
        assert_eq!(
            consult(|_| Ok(AgentMove::from_json(r#"{"to": [1, 1]}"#)?)),
            Verdict::Rejected(RejectReason::InvalidMove(MoveFault::Malformed))
        );
    }

    #[test]
    fn test_slow_agent_times_out_even_with_legal_move() {
        let board = walled_board();
        let mut rng = GameRng::new(&GameSeed::from("referee"));
        let mut slow = Scripted(|_: &MoveRequest<'_>| {
            thread::sleep(Duration::from_millis(30));
            Ok(Some(AgentMove::new([4, 2], [0, 2])))
        });
        let verdict = Referee::new(Duration::from_millis(5)).consult(&mut slow, &board, &mut rng);
        assert_eq!(verdict, Verdict::Rejected(RejectReason::Timeout));
    }

    #[test]
    fn test_agent_sees_copy_and_budget() {
        let verdict = consult(|request| {
            assert_eq!(request.board.cells[2], vec![-1, -1, -1, -1, 0]);
            assert_eq!(request.budget, Duration::from_millis(200));
            Ok(None)
        });
        assert!(verdict.is_rejected());
    }

    #[test]
    fn test_spawn_policy() {
        assert!(RejectReason::Timeout.spawns());
        assert!(RejectReason::AgentFailed.spawns());
        assert!(RejectReason::NoMove.spawns());
        assert!(!RejectReason::InvalidMove(MoveFault::Unreachable).spawns());
    }
}
