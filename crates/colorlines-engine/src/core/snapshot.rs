use serde::{Deserialize, Serialize};

use crate::core::board::{Board, Color, Pos};

/// Cell value used for an empty cell in [`BoardSnapshot::cells`].
pub const EMPTY_CELL: i32 = -1;

/// Plain-data copy of a board, as handed to agents and written to reports.
///
/// `cells[y][x]` is `-1` for an empty cell or the color index otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub width: i32,
    pub height: i32,
    pub colors_count: i32,
    pub cells: Vec<Vec<i32>>,
}

/// Reasons a [`BoardSnapshot`] does not describe a valid board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SnapshotError {
    #[display("invalid board dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[display("invalid colors count {_0}")]
    InvalidColorsCount(#[error(not(source))] i32),
    #[display("expected {expected} rows, got {actual}")]
    RowCount { expected: usize, actual: usize },
    #[display("row {row} has {actual} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[display("cell ({x}, {y}) holds invalid value {value}")]
    InvalidCell { x: usize, y: usize, value: i32 },
}

impl BoardSnapshot {
    /// Value of the cell at `(x, y)`, or `None` when out of range.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<i32> {
        self.cells.get(y)?.get(x).copied()
    }
}

impl From<&Board> for BoardSnapshot {
    fn from(board: &Board) -> Self {
        let cells = (0..board.height())
            .map(|y| {
                (0..board.width())
                    .map(|x| {
                        board
                            .get(Pos::new(x, y))
                            .map_or(EMPTY_CELL, |c| i32::from(c.index()))
                    })
                    .collect()
            })
            .collect();
        Self {
            width: to_i32(board.width()),
            height: to_i32(board.height()),
            colors_count: i32::from(board.colors_count()),
            cells,
        }
    }
}

fn to_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

impl TryFrom<&BoardSnapshot> for Board {
    type Error = SnapshotError;

    fn try_from(snapshot: &BoardSnapshot) -> Result<Self, Self::Error> {
        let invalid_dimensions = SnapshotError::InvalidDimensions {
            width: snapshot.width,
            height: snapshot.height,
        };
        let width = usize::try_from(snapshot.width)
            .ok()
            .filter(|w| *w > 0)
            .ok_or(invalid_dimensions)?;
        let height = usize::try_from(snapshot.height)
            .ok()
            .filter(|h| *h > 0)
            .ok_or(invalid_dimensions)?;
        let colors_count = u8::try_from(snapshot.colors_count)
            .ok()
            .filter(|c| *c > 0)
            .ok_or(SnapshotError::InvalidColorsCount(snapshot.colors_count))?;
        let mut board = Self::new(width, height, colors_count).map_err(|_| invalid_dimensions)?;

        if snapshot.cells.len() != height {
            return Err(SnapshotError::RowCount {
                expected: height,
                actual: snapshot.cells.len(),
            });
        }
        for (y, row) in snapshot.cells.iter().enumerate() {
            if row.len() != width {
                return Err(SnapshotError::RowWidth {
                    row: y,
                    expected: width,
                    actual: row.len(),
                });
            }
            for (x, &value) in row.iter().enumerate() {
                let cell = match value {
                    EMPTY_CELL => None,
                    _ => {
                        let index = u8::try_from(value)
                            .ok()
                            .filter(|i| *i < colors_count)
                            .ok_or(SnapshotError::InvalidCell { x, y, value })?;
                        Some(Color::new(index))
                    }
                };
                board.set(Pos::new(x, y), cell);
            }
        }
        Ok(board)
    }
}
