use std::{collections::VecDeque, ops::ControlFlow};

use serde::{Deserialize, Serialize};

use crate::core::{
    board::{Board, Color, Pos},
    cell_set::CellSet,
};

/// Orthogonal steps in search order: right, left, down, up.
const ORTHOGONAL_STEPS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Relocation of the ball at `from` to the empty cell `to`.
///
/// `color` is the color of the moved ball; it is derivable from `from` but carried
/// along for evaluators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Pos,
    pub to: Pos,
    pub color: Color,
}

impl Board {
    /// Breadth-first flood fill over empty cells, starting from the empty neighbours of
    /// `origin`.
    ///
    /// `visit` is called once per reached cell, in discovery order, and may stop the
    /// search early by returning [`ControlFlow::Break`].
    fn flood_empty<B>(
        &self,
        origin: Pos,
        mut visit: impl FnMut(Pos) -> ControlFlow<B>,
    ) -> Option<B> {
        let mut seen = CellSet::for_board(self);
        seen.insert(origin);
        let mut queue = VecDeque::from([origin]);
        while let Some(pos) = queue.pop_front() {
            for (dx, dy) in ORTHOGONAL_STEPS {
                let Some(next) = self.offset(pos, dx, dy) else {
                    continue;
                };
                if !self.is_empty_at(next) || !seen.insert(next) {
                    continue;
                }
                if let ControlFlow::Break(value) = visit(next) {
                    return Some(value);
                }
                queue.push_back(next);
            }
        }
        None
    }

    /// Empty cells a ball at `origin` could move to, in breadth-first discovery order.
    #[must_use]
    pub fn reachable_from(&self, origin: Pos) -> Vec<Pos> {
        let mut reached = Vec::new();
        self.flood_empty::<()>(origin, |pos| {
            reached.push(pos);
            ControlFlow::Continue(())
        });
        reached
    }

    /// Returns `true` if moving the ball at `from` to `to` is legal.
    ///
    /// Both cells must be on the board, `from` must hold a ball, `to` must be empty,
    /// and `to` must be connected to `from` through empty cells by orthogonal steps.
    /// This is a pure predicate on the current board.
    #[must_use]
    pub fn is_legal_move(&self, from: Pos, to: Pos) -> bool {
        if from == to || !self.contains(from) || !self.contains(to) {
            return false;
        }
        if self.is_empty_at(from) || !self.is_empty_at(to) {
            return false;
        }
        self.flood_empty(from, |pos| {
            if pos == to {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .is_some()
    }

    /// Builds a [`Move`] for `from → to` if it is legal.
    #[must_use]
    pub fn checked_move(&self, from: Pos, to: Pos) -> Option<Move> {
        if !self.is_legal_move(from, to) {
            return None;
        }
        let color = self.get(from)?;
        Some(Move { from, to, color })
    }

    /// Enumerates every legal move.
    ///
    /// The order is canonical: balls in row-major order, and for each ball its
    /// destinations in breadth-first discovery order.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_full() {
            return Vec::new();
        }
        let mut moves = Vec::new();
        for (from, color) in self.balls() {
            moves.extend(
                self.reachable_from(from)
                    .into_iter()
                    .map(|to| Move { from, to, color }),
            );
        }
        moves
    }

    /// Moves the ball at `from` to `to` without checking legality.
    ///
    /// Callers that need to undo the move must snapshot the board or move the ball
    /// back themselves; see [`Board::with_move_applied`].
    pub fn apply_move(&mut self, from: Pos, to: Pos) {
        debug_assert!(self.is_empty_at(to), "destination {to} is occupied");
        let color = self.get(from);
        debug_assert!(color.is_some(), "no ball at {from}");
        self.set(from, None);
        self.set(to, color);
    }

    /// Runs `f` on the board with `mv` applied, then restores the board.
    pub fn with_move_applied<R>(&mut self, mv: Move, f: impl FnOnce(&Self) -> R) -> R {
        self.apply_move(mv.from, mv.to);
        let result = f(self);
        self.apply_move(mv.to, mv.from);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_move_through_corridor() {
        let board = Board::from_ascii(
            2,
            r"
            A....
            BBBB.
            .....
            ",
        );
        assert!(board.is_legal_move(Pos::new(0, 0), Pos::new(0, 2)));
        assert!(board.is_legal_move(Pos::new(0, 0), Pos::new(4, 0)));
    }

    #[test]
    fn test_walled_off_destination_is_illegal() {
        let board = Board::from_ascii(
            2,
            r"
            A.B..
            BBB..
            .....
            ",
        );
        assert!(board.is_legal_move(Pos::new(0, 0), Pos::new(1, 0)));
        assert!(!board.is_legal_move(Pos::new(0, 0), Pos::new(3, 0)));
        assert!(!board.is_legal_move(Pos::new(0, 0), Pos::new(0, 2)));
    }

    #[test]
    fn test_no_diagonal_steps() {
        let board = Board::from_ascii(
            2,
            r"
            AB
            B.
            ",
        );
        assert!(!board.is_legal_move(Pos::new(0, 0), Pos::new(1, 1)));
    }

    #[test]
    fn test_basic_rejections() {
        let board = Board::from_ascii(2, "AB..");
        // same cell
        assert!(!board.is_legal_move(Pos::new(1, 0), Pos::new(1, 0)));
        // occupied destination
        assert!(!board.is_legal_move(Pos::new(1, 0), Pos::new(0, 0)));
        // empty source
        assert!(!board.is_legal_move(Pos::new(2, 0), Pos::new(3, 0)));
        // off board
        assert!(!board.is_legal_move(Pos::new(1, 0), Pos::new(4, 0)));
        assert!(!board.is_legal_move(Pos::new(9, 9), Pos::new(3, 0)));
    }

    #[test]
    fn test_full_board_has_no_moves() {
        let board = Board::from_ascii(
            2,
            r"
            AB
            BA
            ",
        );
        assert!(board.legal_moves().is_empty());
        assert!(!board.is_legal_move(Pos::new(0, 0), Pos::new(1, 1)));
    }

    #[test]
    fn test_reachable_from_discovery_order() {
        let board = Board::from_ascii(
            2,
            r"
            ...
            .A.
            ...
            ",
        );
        let reached = board.reachable_from(Pos::new(1, 1));
        // right, left, down, up first, then the corners.
        assert_eq!(
            &reached[..4],
            &[
                Pos::new(2, 1),
                Pos::new(0, 1),
                Pos::new(1, 2),
                Pos::new(1, 0)
            ]
        );
        assert_eq!(reached.len(), 8);
        assert!(!reached.contains(&Pos::new(1, 1)));
    }

    #[test]
    fn test_legal_moves_canonical_order() {
        let board = Board::from_ascii(
            2,
            r"
            .A
            B.
            ",
        );
        let moves = board.legal_moves();
        let pairs: Vec<_> = moves.iter().map(|m| (m.from, m.to)).collect();
        assert_eq!(
            pairs,
            vec![
                (Pos::new(1, 0), Pos::new(1, 1)),
                (Pos::new(1, 0), Pos::new(0, 0)),
                (Pos::new(0, 1), Pos::new(1, 1)),
                (Pos::new(0, 1), Pos::new(0, 0)),
            ]
        );
        assert!(moves.iter().all(|m| board.is_legal_move(m.from, m.to)));
    }

    #[test]
    fn test_every_enumerated_move_is_legal_and_vice_versa() {
        let board = Board::from_ascii(
            3,
            r"
            A..B.
            .CC..
            B.A.C
            ..B..
            ",
        );
        let moves = board.legal_moves();
        for (from, _) in board.balls() {
            for to in board.empty_cells() {
                let listed = moves.iter().any(|m| m.from == from && m.to == to);
                assert_eq!(listed, board.is_legal_move(from, to), "{from} -> {to}");
            }
        }
    }

    #[test]
    fn test_with_move_applied_restores_board() {
        let mut board = Board::from_ascii(2, "A..B");
        let before = board.clone();
        let mv = board.checked_move(Pos::new(0, 0), Pos::new(2, 0)).unwrap();
        let seen = board.with_move_applied(mv, |b| (b.get(Pos::new(0, 0)), b.get(Pos::new(2, 0))));
        assert_eq!(seen, (None, Some(Color::new(0))));
        assert_eq!(board, before);
    }

    #[test]
    fn test_apply_move_relocates_ball() {
        let mut board = Board::from_ascii(2, "B..");
        board.apply_move(Pos::new(0, 0), Pos::new(2, 0));
        assert!(board.is_empty_at(Pos::new(0, 0)));
        assert_eq!(board.get(Pos::new(2, 0)), Some(Color::new(1)));
    }
}
