//! Board coordinates.
//!
//! A `Position` is a `(row, col)` pair. It is deliberately allowed to hold
//! coordinates that lie off the board: the external input surface may hand
//! us anything, and it is the `Board` that decides whether a coordinate is
//! valid. Use [`Position::is_on_board`] or `Board::is_valid_position`.

use serde::{Deserialize, Serialize};

/// Side length of the square board.
pub const BOARD_SIZE: usize = 5;

/// A grid coordinate, 0-indexed from the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Row index (0 = top).
    pub row: i32,
    /// Column index (0 = left).
    pub col: i32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// True iff both coordinates are within `[0, BOARD_SIZE)`.
    #[must_use]
    pub const fn is_on_board(self) -> bool {
        self.row >= 0
            && self.row < BOARD_SIZE as i32
            && self.col >= 0
            && self.col < BOARD_SIZE as i32
    }

    /// Row-major grid indices, if on the board.
    #[must_use]
    pub const fn indices(self) -> Option<(usize, usize)> {
        if self.is_on_board() {
            Some((self.row as usize, self.col as usize))
        } else {
            None
        }
    }

    /// Raw Moore neighbourhood, in row-then-column order, not clipped.
    ///
    /// The order matters: legality queries and the advisor both walk
    /// neighbours in this order, and advisor tie-breaking depends on it.
    pub fn neighbours(self) -> impl Iterator<Item = Position> {
        (-1..=1).flat_map(move |dr| {
            (-1..=1)
                .filter(move |&dc| dr != 0 || dc != 0)
                .map(move |dc| Position::new(self.row + dr, self.col + dc))
        })
    }

    /// Iterate over every on-board position in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        let size = BOARD_SIZE as i32;
        (0..size).flat_map(move |r| (0..size).map(move |c| Position::new(r, c)))
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
