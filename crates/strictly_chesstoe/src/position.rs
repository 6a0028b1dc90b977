//! Board coordinates and the ten canonical winning lines.

use serde::{Deserialize, Serialize};

/// Side length of the square board.
pub const BOARD_SIZE: usize = 4;

/// Number of full-length lines: every row, every column, both diagonals.
pub const LINE_COUNT: usize = 2 * BOARD_SIZE + 2;

/// A square on the board addressed by row and column.
///
/// Row 0 is Player1's home edge; Player1 pawns advance toward higher rows.
/// A position may be out of bounds when it arrives from a caller; the
/// validators reject it with [`crate::RuleError::OutOfBounds`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    /// Row index, 0-based.
    pub row: usize,
    /// Column index, 0-based.
    pub col: usize,
}

impl Position {
    /// Creates a position without bounds checking.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns true if the position lies on the board.
    pub const fn in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Offsets the position, returning `None` when the result leaves the board.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        let next = Self::new(row, col);
        next.in_bounds().then_some(next)
    }

    /// Returns true if the square is one of the four central cells.
    pub fn is_center(self) -> bool {
        CENTER.contains(&self)
    }

    /// Iterates every on-board position in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The central 2x2 block.
pub const CENTER: [Position; 4] = [
    Position::new(1, 1),
    Position::new(1, 2),
    Position::new(2, 1),
    Position::new(2, 2),
];

/// Winning lines in scan order: rows, columns, main diagonal, anti-diagonal.
pub const LINES: [[Position; BOARD_SIZE]; LINE_COUNT] = build_lines();

const fn build_lines() -> [[Position; BOARD_SIZE]; LINE_COUNT] {
    let mut lines = [[Position::new(0, 0); BOARD_SIZE]; LINE_COUNT];
    let mut i = 0;
    while i < BOARD_SIZE {
        let mut j = 0;
        while j < BOARD_SIZE {
            lines[i][j] = Position::new(i, j);
            lines[BOARD_SIZE + i][j] = Position::new(j, i);
            j += 1;
        }
        lines[2 * BOARD_SIZE][i] = Position::new(i, i);
        lines[2 * BOARD_SIZE + 1][i] = Position::new(i, BOARD_SIZE - 1 - i);
        i += 1;
    }
    lines
}
