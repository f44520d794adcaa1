use crate::{
    core::{Board, Color, Pos},
    engine::{GameConfig, GameRng},
};

/// Outcome of the clear-or-spawn step at the end of a turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnSummary {
    /// Balls removed this turn, counting lines formed by the move and by the spawn.
    pub cleared: usize,
    /// Balls placed this turn.
    pub spawned: usize,
}

impl Board {
    /// Places up to `count` new balls on distinct empty cells.
    ///
    /// Empty cells are listed in row-major order. For each ball, one draw picks an
    /// index into the remaining list (the cell is removed from it) and a second draw
    /// picks the color. Fewer balls are placed when the board runs out of room.
    ///
    /// Returns the spawned positions in placement order.
    pub fn spawn_balls(&mut self, rng: &mut GameRng, count: usize) -> Vec<Pos> {
        let mut empties: Vec<Pos> = self.empty_cells().collect();
        let count = count.min(empties.len());
        let mut spawned = Vec::with_capacity(count);
        for _ in 0..count {
            let pos = empties.remove(rng.below(empties.len()));
            #[expect(clippy::cast_possible_truncation)]
            let color = Color::new(rng.below(usize::from(self.colors_count())) as u8);
            self.set(pos, Some(color));
            spawned.push(pos);
        }
        spawned
    }
}

/// Ends a turn: clears any lines on the board, or, when there are none and
/// `spawn` is set, spawns `config.spawn_per_turn` balls and clears the lines the
/// spawn completed.
///
/// The game loop passes `spawn = false` for a turn whose move was rejected, so
/// the board only changes if lines were already waiting to be cleared.
pub fn resolve_turn(
    board: &mut Board,
    rng: &mut GameRng,
    config: &GameConfig,
    spawn: bool,
) -> TurnSummary {
    let lines = board.find_clearable_lines(config.line_length);
    if !lines.is_empty() {
        return TurnSummary {
            cleared: board.clear_cells(&lines),
            spawned: 0,
        };
    }
    if !spawn {
        return TurnSummary::default();
    }
    let spawned = board.spawn_balls(rng, config.spawn_per_turn).len();
    let lines = board.find_clearable_lines(config.line_length);
    TurnSummary {
        cleared: board.clear_cells(&lines),
        spawned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GameSeed;

    fn rng(seed: &str) -> GameRng {
        GameRng::new(&GameSeed::from(seed))
    }

    #[test]
    fn test_spawn_is_deterministic() {
        let board = Board::new(9, 9, 7).unwrap();
        let mut a = board.clone();
        let mut b = board.clone();
        let spawned_a = a.spawn_balls(&mut rng("fixed-seed"), 5);
        let spawned_b = b.spawn_balls(&mut rng("fixed-seed"), 5);
        assert_eq!(spawned_a, spawned_b);
        assert_eq!(a, b);
        assert_eq!(a.ball_count(), 5);
    }

    #[test]
    fn test_spawn_draws_index_then_color() {
        let mut board = Board::new(3, 3, 2).unwrap();
        let mut expected = rng("order");
        let first_index = expected.below(9);
        let first_color = expected.below(2);

        let spawned = board.spawn_balls(&mut rng("order"), 1);
        let pos = board.pos_of(first_index);
        assert_eq!(spawned, vec![pos]);
        assert_eq!(board.get(pos), Some(Color::new(u8::try_from(first_color).unwrap())));
    }

    #[test]
    fn test_spawn_places_distinct_cells_and_stops_when_full() {
        let mut board = Board::from_ascii(
            3,
            r"
            A.B
            CA.
            ",
        );
        let spawned = board.spawn_balls(&mut rng("full"), 10);
        assert_eq!(spawned.len(), 2);
        assert!(board.is_full());
        assert!(board.spawn_balls(&mut rng("full"), 3).is_empty());
    }

    #[test]
    fn test_resolve_turn_clears_without_spawning() {
        let mut board = Board::from_ascii(
            2,
            r"
            AAAAA....
            .........
            ",
        );
        let summary = resolve_turn(&mut board, &mut rng("x"), &GameConfig::default(), true);
        assert_eq!(
            summary,
            TurnSummary {
                cleared: 5,
                spawned: 0
            }
        );
        assert_eq!(board.ball_count(), 0);
    }

    #[test]
    fn test_resolve_turn_spawns_when_nothing_cleared() {
        let mut board = Board::from_ascii(
            2,
            r"
            AB.......
            .........
            ",
        );
        let summary = resolve_turn(&mut board, &mut rng("x"), &GameConfig::default(), true);
        assert_eq!(summary.spawned, 3);
        assert_eq!(board.ball_count(), 5 - summary.cleared);
    }

    #[test]
    fn test_resolve_turn_without_spawn_leaves_board() {
        let mut board = Board::from_ascii(2, "AB.......");
        let before = board.clone();
        let summary = resolve_turn(&mut board, &mut rng("x"), &GameConfig::default(), false);
        assert_eq!(summary, TurnSummary::default());
        assert_eq!(board, before);
    }

    #[test]
    fn test_resolve_turn_clears_lines_completed_by_spawn() {
        // Only one empty cell: the spawn must fill it and complete the row.
        let mut board = Board::from_ascii(
            1,
            r"
            AAAA.
            ",
        );
        let config = GameConfig {
            colors_count: 1,
            ..GameConfig::default()
        };
        let summary = resolve_turn(&mut board, &mut rng("x"), &config, true);
        assert_eq!(
            summary,
            TurnSummary {
                cleared: 5,
                spawned: 1
            }
        );
        assert_eq!(board.ball_count(), 0);
    }
}
