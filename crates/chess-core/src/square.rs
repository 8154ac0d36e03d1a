//! Board square representation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A square on a rectangular board, addressed by 0-based rank and file.
///
/// A square carries no board size. Whether it lies on a given board is
/// answered by the board, which keeps squares usable for any grid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    /// Creates a square from rank (row) and file (column).
    #[inline]
    pub const fn new(rank: u8, file: u8) -> Self {
        Square { rank, file }
    }

    /// Creates a square from signed coordinates, if both fit.
    #[inline]
    pub fn from_coords(rank: i32, file: i32) -> Option<Self> {
        let rank = u8::try_from(rank).ok()?;
        let file = u8::try_from(file).ok()?;
        Some(Square { rank, file })
    }

    /// Returns the rank (row index).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Returns the file (column index).
    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Returns the square shifted by the given rank and file deltas.
    ///
    /// Returns `None` if either coordinate leaves the `u8` range.
    #[inline]
    pub fn offset(self, dr: i8, df: i8) -> Option<Self> {
        Self::from_coords(
            i32::from(self.rank) + i32::from(dr),
            i32::from(self.file) + i32::from(df),
        )
    }

    /// Parses coordinate notation: a file letter followed by a 1-based rank ("e4", "a10").
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file_char = chars.next()?.to_ascii_lowercase();
        if !file_char.is_ascii_lowercase() {
            return None;
        }
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let rank: u16 = digits.parse().ok()?;
        if rank == 0 {
            return None;
        }
        let rank = u8::try_from(rank - 1).ok()?;
        Some(Square::new(rank, file_char as u8 - b'a'))
    }

    /// Returns the coordinate notation for this square.
    ///
    /// Files past 'z' have no letter and are written as `?`.
    pub fn to_algebraic(self) -> String {
        let file = if self.file < 26 {
            (b'a' + self.file) as char
        } else {
            '?'
        };
        format!("{}{}", file, u16::from(self.rank) + 1)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
