use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Steps to the eight surrounding cells.
const NEIGHBOR_STEPS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Cell coordinate: `x` is the column, `y` is the row (row 0 at the top).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Ball color, an index in `0..colors_count`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Color(u8);

impl Color {
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Letter used by the ASCII rendering (`A` for color 0, `B` for color 1, ...).
    #[must_use]
    pub fn as_char(self) -> char {
        if self.0 < 26 {
            char::from(b'A' + self.0)
        } else {
            '?'
        }
    }
}

/// Grid of cells, each either empty (`None`) or holding a ball.
///
/// Cells are stored row-major (`index = y * width + x`). Every operation that takes a
/// [`Pos`] expects it to be inside the board; use [`Board::pos_checked`] to convert
/// untrusted coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    colors_count: u8,
    cells: Vec<Option<Color>>,
}

impl Board {
    /// Creates an empty board.
    pub fn new(width: usize, height: usize, colors_count: u8) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if colors_count == 0 {
            return Err(ConfigError::ZeroColors);
        }
        Ok(Self {
            width,
            height,
            colors_count,
            cells: vec![None; width * height],
        })
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub const fn colors_count(&self) -> u8 {
        self.colors_count
    }

    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }

    #[must_use]
    pub const fn contains(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Converts signed coordinates into a position, or `None` when off the board.
    #[must_use]
    pub fn pos_checked(&self, x: i64, y: i64) -> Option<Pos> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        let pos = Pos::new(x, y);
        self.contains(pos).then_some(pos)
    }

    #[must_use]
    pub const fn index_of(&self, pos: Pos) -> usize {
        pos.y * self.width + pos.x
    }

    #[must_use]
    pub const fn pos_of(&self, index: usize) -> Pos {
        Pos::new(index % self.width, index / self.width)
    }

    #[must_use]
    pub fn get(&self, pos: Pos) -> Option<Color> {
        self.cells[self.index_of(pos)]
    }

    pub fn set(&mut self, pos: Pos, cell: Option<Color>) {
        debug_assert!(cell.is_none_or(|c| c.index() < self.colors_count));
        let index = self.index_of(pos);
        self.cells[index] = cell;
    }

    #[must_use]
    pub fn is_empty_at(&self, pos: Pos) -> bool {
        self.get(pos).is_none()
    }

    /// Moves `pos` by `(dx, dy)`, returning `None` when the result leaves the board.
    #[must_use]
    pub fn offset(&self, pos: Pos, dx: isize, dy: isize) -> Option<Pos> {
        let x = pos.x.checked_add_signed(dx)?;
        let y = pos.y.checked_add_signed(dy)?;
        let pos = Pos::new(x, y);
        self.contains(pos).then_some(pos)
    }

    /// On-board cells among the eight surrounding `pos`.
    #[must_use]
    pub fn neighbors(&self, pos: Pos) -> ArrayVec<Pos, 8> {
        NEIGHBOR_STEPS
            .iter()
            .filter_map(|&(dx, dy)| self.offset(pos, dx, dy))
            .collect()
    }

    /// Cells visited by stepping from `pos` by `(dx, dy)` until the board edge.
    ///
    /// `pos` itself is not included.
    pub fn ray(&self, pos: Pos, dx: isize, dy: isize) -> impl Iterator<Item = Pos> + '_ {
        std::iter::successors(self.offset(pos, dx, dy), move |p| self.offset(*p, dx, dy))
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.cell_count()).map(|i| self.pos_of(i))
    }

    /// Occupied cells in row-major order.
    pub fn balls(&self) -> impl Iterator<Item = (Pos, Color)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.map(|color| (self.pos_of(i), color)))
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| self.pos_of(i))
    }

    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    #[must_use]
    pub fn ball_count(&self) -> usize {
        self.cell_count() - self.empty_count()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Number of balls per color, indexed by [`Color::index`].
    #[must_use]
    pub fn color_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; usize::from(self.colors_count)];
        for color in self.cells.iter().flatten() {
            counts[usize::from(color.index())] += 1;
        }
        counts
    }

    /// Creates a `Board` from ASCII art for testing.
    ///
    /// `.` is an empty cell, `A` is color 0, `B` is color 1 and so on. Whitespace is
    /// ignored and blank lines are skipped; row 0 is the first non-blank line.
    ///
    /// # Panics
    ///
    /// Panics if rows have different widths, the art is empty, or a letter is not a
    /// valid color for `colors_count`.
    #[must_use]
    pub fn from_ascii(colors_count: u8, art: &str) -> Self {
        let rows: Vec<Vec<char>> = art
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();
        assert!(!rows.is_empty(), "board art must contain at least one row");

        let width = rows[0].len();
        let mut board = Self::new(width, rows.len(), colors_count)
            .expect("board art describes a non-empty board");
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(
                row.len(),
                width,
                "Each row must have exactly {width} cells, got {} at row {y}",
                row.len()
            );
            for (x, &ch) in row.iter().enumerate() {
                let cell = match ch {
                    '.' => None,
                    'A'..='Z' => {
                        let index = ch as u8 - b'A';
                        assert!(
                            index < colors_count,
                            "color {ch} out of range at ({x}, {y})"
                        );
                        Some(Color::new(index))
                    }
                    _ => panic!("unrecognized cell {ch:?} at ({x}, {y})"),
                };
                board.set(Pos::new(x, y), cell);
            }
        }
        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for x in 0..self.width {
            write!(f, " {}", x % 10)?;
        }
        writeln!(f)?;
        writeln!(f, "   +{}", "-".repeat(self.width * 2))?;
        for y in 0..self.height {
            write!(f, "{y:2} |")?;
            for x in 0..self.width {
                let ch = self.get(Pos::new(x, y)).map_or('.', Color::as_char);
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
