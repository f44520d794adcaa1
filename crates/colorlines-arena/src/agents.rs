//! Built-in agents.

use colorlines_engine::Board;
use colorlines_evaluator::{
    heuristic::HeuristicEvaluator, move_evaluator::MoveEvaluator, quick::QuickEvaluator,
    rollout::MonteCarloEvaluator,
};
use rand::seq::IndexedRandom as _;

use crate::agent::{Agent, AgentError, AgentMove, MoveRequest};

/// Never moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassAgent;

impl Agent for PassAgent {
    fn name(&self) -> &str {
        "pass"
    }

    fn propose_move(&mut self, _request: MoveRequest<'_>) -> Result<Option<AgentMove>, AgentError> {
        Ok(None)
    }
}

/// Plays the first legal move in canonical enumeration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMoveAgent;

impl Agent for FirstMoveAgent {
    fn name(&self) -> &str {
        "first"
    }

    fn propose_move(&mut self, request: MoveRequest<'_>) -> Result<Option<AgentMove>, AgentError> {
        let board = Board::try_from(&request.board)?;
        Ok(board.legal_moves().first().copied().map(AgentMove::from))
    }
}

/// Plays a uniformly random legal move drawn from the agent stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAgent;

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn propose_move(&mut self, request: MoveRequest<'_>) -> Result<Option<AgentMove>, AgentError> {
        let board = Board::try_from(&request.board)?;
        Ok(board.legal_moves().choose(request.rng).copied().map(AgentMove::from))
    }
}

/// Plays the move selected by a [`MoveEvaluator`].
#[derive(Debug, Clone, Default)]
pub struct EvaluatorAgent<E> {
    evaluator: E,
}

impl<E> EvaluatorAgent<E>
where
    E: MoveEvaluator,
{
    pub const fn new(evaluator: E) -> Self {
        Self { evaluator }
    }
}

pub type HeuristicAgent = EvaluatorAgent<HeuristicEvaluator>;
pub type QuickAgent = EvaluatorAgent<QuickEvaluator>;
pub type MonteCarloAgent = EvaluatorAgent<MonteCarloEvaluator>;

impl<E> Agent for EvaluatorAgent<E>
where
    E: MoveEvaluator,
{
    fn name(&self) -> &str {
        self.evaluator.name()
    }

    fn propose_move(&mut self, request: MoveRequest<'_>) -> Result<Option<AgentMove>, AgentError> {
        let board = Board::try_from(&request.board)?;
        let selected = self.evaluator.select_move(&board, request.rng);
        Ok(selected.map(|scored| AgentMove::from(scored.mv)))
    }
}
