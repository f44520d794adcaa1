//! The agent capability: anything that proposes a move for a board snapshot.
//!
//! Agents only ever see a [`BoardSnapshot`] copied from the authoritative board,
//! so nothing they do can change the game. They answer with an [`AgentMove`] in
//! wire coordinates, `None` when they have no move, or an [`AgentError`]. The
//! referee validates whatever comes back.

use std::time::{Duration, Instant};

use colorlines_engine::{BoardSnapshot, GameRng, SnapshotError};
use serde::{Deserialize, Serialize};

/// A proposed move, `{"from": [x, y], "to": [x, y]}` on the wire.
///
/// Coordinates are signed so that out-of-range proposals are representable and can
/// be rejected by the referee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentMove {
    pub from: [i64; 2],
    pub to: [i64; 2],
}

impl AgentMove {
    #[must_use]
    pub const fn new(from: [i64; 2], to: [i64; 2]) -> Self {
        Self { from, to }
    }

    /// Parses a JSON answer of an out-of-process agent.
    ///
    /// `null` means "no move".
    pub fn from_json(answer: &str) -> Result<Option<Self>, serde_json::Error> {
        serde_json::from_str(answer)
    }
}

impl From<colorlines_engine::Move> for AgentMove {
    #[expect(clippy::cast_possible_wrap)]
    fn from(mv: colorlines_engine::Move) -> Self {
        Self {
            from: [mv.from.x as i64, mv.from.y as i64],
            to: [mv.to.x as i64, mv.to.y as i64],
        }
    }
}

/// Failure reported by an agent.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AgentError {
    #[display("{_0}")]
    #[from(ignore)]
    Message(#[error(not(source))] String),
    #[display("unreadable board: {_0}")]
    Board(SnapshotError),
    #[display("malformed answer: {_0}")]
    Answer(serde_json::Error),
}

impl AgentError {
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

/// Everything an agent gets for one turn.
#[derive(Debug)]
pub struct MoveRequest<'a> {
    /// Copy of the current board.
    pub board: BoardSnapshot,
    /// Time the agent may spend on this call.
    pub budget: Duration,
    /// `budget` as an absolute point in time.
    pub deadline: Instant,
    /// Random stream reserved for the agent, seeded per game.
    pub rng: &'a mut GameRng,
}

/// A move-choosing strategy.
pub trait Agent {
    /// Name shown in logs and reports.
    fn name(&self) -> &str;

    /// Proposes a move for `request.board`, or `None` when there is nothing to do.
    fn propose_move(&mut self, request: MoveRequest<'_>) -> Result<Option<AgentMove>, AgentError>;
}

impl<A> Agent for Box<A>
where
    A: Agent + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn propose_move(&mut self, request: MoveRequest<'_>) -> Result<Option<AgentMove>, AgentError> {
        (**self).propose_move(request)
    }
}

#[cfg(test)]
mod tests {
    use colorlines_engine::{Color, Move, Pos};

    use super::*;

    #[test]
    fn test_wire_shape() {
        let mv = AgentMove::new([1, 2], [3, 4]);
        let json = serde_json::to_value(mv).unwrap();
        assert_eq!(json, serde_json::json!({"from": [1, 2], "to": [3, 4]}));
    }

    #[test]
    fn test_from_json() {
        assert_eq!(AgentMove::from_json("null").unwrap(), None);
        assert_eq!(
            AgentMove::from_json(r#"{"from": [0, 0], "to": [-1, 9]}"#).unwrap(),
            Some(AgentMove::new([0, 0], [-1, 9]))
        );
        assert!(AgentMove::from_json(r#"{"from": [0, 0]}"#).is_err());
        assert!(AgentMove::from_json(r#"{"from": [0], "to": [1, 1]}"#).is_err());
    }

    #[test]
    fn test_from_engine_move() {
        let mv = Move {
            from: Pos::new(2, 3),
            to: Pos::new(4, 5),
            color: Color::new(1),
        };
        assert_eq!(AgentMove::from(mv), AgentMove::new([2, 3], [4, 5]));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(AgentError::msg("boom").to_string(), "boom");
    }
}
