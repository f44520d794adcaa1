use crate::core::{
    board::{Board, Color, Pos},
    cell_set::CellSet,
};

/// One of the four scanning axes a line can run along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left to right (→).
    Horizontal,
    /// Top to bottom (↓).
    Vertical,
    /// Top-left to bottom-right (↘).
    Diagonal,
    /// Top-right to bottom-left (↙).
    AntiDiagonal,
}

impl Axis {
    pub const ALL: [Self; 4] = [
        Self::Horizontal,
        Self::Vertical,
        Self::Diagonal,
        Self::AntiDiagonal,
    ];

    /// Forward step `(dx, dy)` along this axis.
    #[must_use]
    pub const fn step(self) -> (isize, isize) {
        match self {
            Self::Horizontal => (1, 0),
            Self::Vertical => (0, 1),
            Self::Diagonal => (1, 1),
            Self::AntiDiagonal => (-1, 1),
        }
    }
}

/// What lies just past one end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum RunEnd {
    /// An empty cell: the run can still grow this way.
    Open,
    /// A ball of a different color.
    Blocked,
    /// The board edge.
    Edge,
}

/// Maximal same-colored run through a cell along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub len: usize,
    pub forward: RunEnd,
    pub backward: RunEnd,
}

impl Run {
    #[must_use]
    pub fn is_open_both_ends(&self) -> bool {
        self.forward.is_open() && self.backward.is_open()
    }
}

impl Board {
    /// Measures the run of `color` through `pos` along `axis`.
    ///
    /// `pos` counts as part of the run whatever it currently holds, so this can be
    /// asked about a cell a ball is about to land on.
    #[must_use]
    pub fn run_through(&self, pos: Pos, color: Color, axis: Axis) -> Run {
        let (dx, dy) = axis.step();
        let (ahead, forward) = self.extend_run(pos, color, dx, dy);
        let (behind, backward) = self.extend_run(pos, color, -dx, -dy);
        Run {
            len: 1 + ahead + behind,
            forward,
            backward,
        }
    }

    fn extend_run(&self, pos: Pos, color: Color, dx: isize, dy: isize) -> (usize, RunEnd) {
        let mut len = 0;
        for next in self.ray(pos, dx, dy) {
            match self.get(next) {
                Some(c) if c == color => len += 1,
                Some(_) => return (len, RunEnd::Blocked),
                None => return (len, RunEnd::Open),
            }
        }
        (len, RunEnd::Edge)
    }

    /// Finds every cell belonging to a run of at least `line_length` equal colors.
    ///
    /// All four axes are scanned. A run is walked only from its first cell (the cell
    /// whose predecessor along the axis is off-board or holds something else), so each
    /// maximal run is visited once. Overlapping lines share cells; the result is their
    /// union.
    #[must_use]
    pub fn find_clearable_lines(&self, line_length: usize) -> CellSet {
        let mut lines = CellSet::for_board(self);
        for axis in Axis::ALL {
            let (dx, dy) = axis.step();
            for (start, color) in self.balls() {
                let continues_run = self
                    .offset(start, -dx, -dy)
                    .is_some_and(|prev| self.get(prev) == Some(color));
                if continues_run {
                    continue;
                }
                let tail = self
                    .ray(start, dx, dy)
                    .take_while(|p| self.get(*p) == Some(color))
                    .count();
                if tail + 1 >= line_length {
                    lines.insert(start);
                    lines.extend(self.ray(start, dx, dy).take(tail));
                }
            }
        }
        lines
    }

    /// Empties every cell in `cells` and returns how many there were.
    pub fn clear_cells(&mut self, cells: &CellSet) -> usize {
        for pos in cells.iter() {
            self.set(pos, None);
        }
        cells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(set: &CellSet) -> Vec<(usize, usize)> {
        set.iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn test_single_horizontal_run_of_five() {
        let board = Board::from_ascii(
            3,
            r"
            .........
            .BAAAAAB.
            .........
            ",
        );
        let lines = board.find_clearable_lines(5);
        assert_eq!(positions(&lines), vec![(2, 1), (3, 1), (4, 1), (5, 1), (6, 1)]);
    }

    #[test]
    fn test_run_at_board_edge() {
        let board = Board::from_ascii(
            2,
            r"
            AAAAA
            B....
            ",
        );
        assert_eq!(board.find_clearable_lines(5).len(), 5);
    }

    #[test]
    fn test_run_of_four_is_not_clearable() {
        let board = Board::from_ascii(2, "AAAA.AAAA");
        assert!(board.find_clearable_lines(5).is_empty());
    }

    #[test]
    fn test_longer_run_is_cleared_whole() {
        let board = Board::from_ascii(2, "BAAAAAAAB");
        let lines = board.find_clearable_lines(5);
        assert_eq!(lines.len(), 7);
        assert!(!lines.contains(Pos::new(0, 0)));
        assert!(!lines.contains(Pos::new(8, 0)));
    }

    #[test]
    fn test_crossing_runs_share_one_cell() {
        let board = Board::from_ascii(
            3,
            r"
            ..A....
            ..A....
            AAAAA..
            ..A....
            ..A....
            ",
        );
        let lines = board.find_clearable_lines(5);
        assert_eq!(lines.len(), 9);
        assert!(lines.contains(Pos::new(2, 2)));
    }

    #[test]
    fn test_vertical_and_diagonal_runs() {
        let board = Board::from_ascii(
            3,
            r"
            B....C
            .B...C
            ..B..C
            ...B.C
            ....BC
            ",
        );
        let lines = board.find_clearable_lines(5);
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn test_anti_diagonal_run() {
        let board = Board::from_ascii(
            2,
            r"
            ....A
            ...A.
            ..A..
            .A...
            A....
            ",
        );
        let lines = board.find_clearable_lines(5);
        assert_eq!(
            positions(&lines),
            vec![(4, 0), (3, 1), (2, 2), (1, 3), (0, 4)]
        );
    }

    #[test]
    fn test_mixed_colors_do_not_join() {
        let board = Board::from_ascii(2, "AABAA");
        assert!(board.find_clearable_lines(5).is_empty());
    }

    #[test]
    fn test_configurable_line_length() {
        let board = Board::from_ascii(2, "AAA.B");
        assert_eq!(board.find_clearable_lines(3).len(), 3);
        assert!(board.find_clearable_lines(4).is_empty());
    }

    #[test]
    fn test_clear_cells_empties_and_counts() {
        let mut board = Board::from_ascii(2, "AAAAAB");
        let lines = board.find_clearable_lines(5);
        assert_eq!(board.clear_cells(&lines), 5);
        assert_eq!(board.ball_count(), 1);
        assert_eq!(board.get(Pos::new(5, 0)), Some(Color::new(1)));
    }

    #[test]
    fn test_clear_cells_with_empty_set_is_noop() {
        let mut board = Board::from_ascii(2, "AB.A");
        let before = board.clone();
        let nothing = CellSet::for_board(&board);
        assert_eq!(board.clear_cells(&nothing), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_run_through_reports_ends() {
        let board = Board::from_ascii(
            3,
            r"
            .AA.AB
            ",
        );
        let run = board.run_through(Pos::new(3, 0), Color::new(0), Axis::Horizontal);
        assert_eq!(run.len, 4);
        assert_eq!(run.backward, RunEnd::Open);
        assert_eq!(run.forward, RunEnd::Blocked);
        assert!(!run.is_open_both_ends());

        let run = board.run_through(Pos::new(3, 0), Color::new(0), Axis::Vertical);
        assert_eq!(run.len, 1);
        assert_eq!(run.forward, RunEnd::Edge);
        assert_eq!(run.backward, RunEnd::Edge);
    }
}
