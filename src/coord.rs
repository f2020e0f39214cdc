//! Human-facing cell names such as `A7`.
//!
//! Column `x` maps to a letter, row `y` to a 1-based number. Names are only
//! used for display and input parsing; the engine itself works on `(x, y)`.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use crate::config::BOARD_SIZE;

/// Column letters, indexed by `x`.
pub const COLUMN_LETTERS: [char; BOARD_SIZE as usize] =
    ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J'];

/// A cell position on the board, `0..BOARD_SIZE` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    /// Returns `None` when either axis is off the board.
    pub const fn new(x: u8, y: u8) -> Option<Self> {
        if x < BOARD_SIZE && y < BOARD_SIZE {
            Some(Coord { x, y })
        } else {
            None
        }
    }

    /// The cell one step right, if still on the board.
    pub fn right(self) -> Option<Self> {
        Coord::new(self.x.saturating_add(1), self.y)
    }

    /// The cell one step down, if still on the board.
    pub fn down(self) -> Option<Self> {
        Coord::new(self.x, self.y.saturating_add(1))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = COLUMN_LETTERS.get(self.x as usize).copied().unwrap_or('?');
        write!(f, "{}{}", letter, u16::from(self.y) + 1)
    }
}

/// Label for `(x, y)`, e.g. `label(0, 6) == Some("A7")`.
pub fn label(x: u8, y: u8) -> Option<String> {
    Coord::new(x, y).map(|c| c.to_string())
}

/// Errors from parsing a cell label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCoordError {
    Empty,
    InvalidColumn(char),
    InvalidRow(String),
}

impl fmt::Display for ParseCoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCoordError::Empty => write!(f, "Empty input"),
            ParseCoordError::InvalidColumn(c) => {
                write!(f, "Invalid column '{}' - must be a letter A-J", c)
            }
            ParseCoordError::InvalidRow(r) => {
                write!(f, "Invalid row '{}' - must be a number 1-10", r)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseCoordError {}

impl FromStr for Coord {
    type Err = ParseCoordError;

    /// Parses labels like `A7` or `j10`, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let col_ch = chars.next().ok_or(ParseCoordError::Empty)?.to_ascii_uppercase();
        let x = COLUMN_LETTERS
            .iter()
            .position(|&c| c == col_ch)
            .ok_or(ParseCoordError::InvalidColumn(col_ch))?;
        let row_str = chars.as_str();
        let row: u8 = row_str
            .parse()
            .map_err(|_| ParseCoordError::InvalidRow(row_str.to_string()))?;
        if row == 0 || row > BOARD_SIZE {
            return Err(ParseCoordError::InvalidRow(row_str.to_string()));
        }
        Ok(Coord {
            x: x as u8,
            y: row - 1,
        })
    }
}
