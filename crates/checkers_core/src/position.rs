use std::fmt;

use crate::CheckersError;

/// Number of playable (dark) squares on the board.
pub const SQUARE_COUNT: usize = 32;

/// A dark square of the 8x8 board. Row 0 is Black's back rank, row 7 is White's.
///
/// Only squares where `row + col` is odd can be constructed, so every
/// `Position` maps to exactly one slot of the board storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: u8, // 0-7
    pub col: u8, // 0-7
}

impl Position {
    pub fn new(row: u8, col: u8) -> Result<Self, CheckersError> {
        if row > 7 || col > 7 {
            return Err(CheckersError::OffBoard { row, col });
        }
        if (row + col) % 2 == 0 {
            return Err(CheckersError::LightSquare { row, col });
        }
        Ok(Self { row, col })
    }

    /// Dense index in `0..32`, four dark squares per row.
    pub fn index(self) -> usize {
        self.row as usize * 4 + self.col as usize / 2
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index >= SQUARE_COUNT {
            return None;
        }
        let row = (index / 4) as u8;
        let col = (index % 4) as u8 * 2 + if row % 2 == 0 { 1 } else { 0 };
        Some(Self { row, col })
    }

    /// All 32 dark squares in index order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..SQUARE_COUNT).filter_map(Position::from_index)
    }

    /// Square reached by moving `distance` steps along the diagonal `(d_row, d_col)`,
    /// or `None` when that would leave the board.
    pub fn offset(self, (d_row, d_col): (i8, i8), distance: i8) -> Option<Position> {
        let row = self.row as i8 + d_row * distance;
        let col = self.col as i8 + d_col * distance;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            // diagonal offsets preserve square colour
            Some(Position { row: row as u8, col: col as u8 })
        } else {
            None
        }
    }

    /// Square halfway between two squares two diagonal steps apart.
    pub fn midpoint(self, other: Position) -> Position {
        Position {
            row: (self.row + other.row) / 2,
            col: (self.col + other.col) / 2,
        }
    }

    /// Chebyshev distance when both squares share a diagonal, otherwise `None`.
    pub fn diagonal_distance(self, other: Position) -> Option<u8> {
        let d_row = self.row.abs_diff(other.row);
        let d_col = self.col.abs_diff(other.col);
        (d_row == d_col).then_some(d_row)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}
