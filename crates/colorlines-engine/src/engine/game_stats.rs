use crate::engine::TurnSummary;

/// Counters for a single game.
///
/// The score is the total number of balls cleared. A turn is any call that ended
/// in the clear-or-spawn step, whether or not a ball was moved.
///
/// # Example
///
/// ```
/// use colorlines_engine::{GameStats, TurnSummary};
///
/// let mut stats = GameStats::new();
/// stats.complete_turn(true, TurnSummary { cleared: 5, spawned: 0 });
/// stats.complete_turn(false, TurnSummary { cleared: 0, spawned: 3 });
///
/// assert_eq!(stats.score(), 5);
/// assert_eq!(stats.turns(), 2);
/// assert_eq!(stats.moves_made(), 1);
/// assert_eq!(stats.clear_events(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    turns: usize,
    moves_made: usize,
    clear_events: usize,
    balls_spawned: usize,
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            turns: 0,
            moves_made: 0,
            clear_events: 0,
            balls_spawned: 0,
        }
    }

    /// Total balls cleared.
    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn turns(&self) -> usize {
        self.turns
    }

    /// Turns in which a ball was actually moved.
    #[must_use]
    pub const fn moves_made(&self) -> usize {
        self.moves_made
    }

    /// Turns that cleared at least one ball.
    #[must_use]
    pub const fn clear_events(&self) -> usize {
        self.clear_events
    }

    /// Balls spawned after the initial placement.
    #[must_use]
    pub const fn balls_spawned(&self) -> usize {
        self.balls_spawned
    }

    /// Records the end of a turn.
    pub const fn complete_turn(&mut self, moved: bool, summary: TurnSummary) {
        self.turns += 1;
        if moved {
            self.moves_made += 1;
        }
        if summary.cleared > 0 {
            self.clear_events += 1;
        }
        self.score += summary.cleared;
        self.balls_spawned += summary.spawned;
    }
}
