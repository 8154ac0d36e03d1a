//! Piece-placement text parsing and serialization.
//!
//! The format is the placement field of FEN, generalised to any
//! rectangular board: ranks are separated by `/` with the top rank
//! first, runs of empty squares are written as decimal numbers, and
//! pieces use uppercase letters for White and lowercase for Black.

use crate::{Color, PieceKind, Square};
use thiserror::Error;

/// Largest number of files or ranks a placement may describe.
const MAX_SIDE: usize = u8::MAX as usize;

/// Errors that can occur when parsing placement text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("empty placement")]
    Empty,

    #[error("invalid character '{character}' in rank {rank}")]
    InvalidCharacter { character: char, rank: usize },

    #[error("rank {rank} has {found} squares, expected {expected}")]
    RaggedRank {
        rank: usize,
        found: usize,
        expected: usize,
    },

    #[error("board of {width}x{height} squares is not supported")]
    UnsupportedSize { width: usize, height: usize },
}

/// A parsed piece placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    width: u8,
    height: u8,
    /// Cells indexed by `rank * width + file`, rank 0 first.
    cells: Vec<Option<(PieceKind, Color)>>,
}

impl Placement {
    /// The standard starting placement.
    pub const STANDARD: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    /// Parses placement text.
    pub fn parse(text: &str) -> Result<Self, PlacementError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PlacementError::Empty);
        }

        let rows: Vec<&str> = text.split('/').collect();
        let height = rows.len();
        let mut parsed_rows = Vec::with_capacity(height);
        let mut width = None;

        for (i, row) in rows.iter().enumerate() {
            let rank = height - i;
            let cells = Self::parse_row(row, rank, height)?;
            let expected = *width.get_or_insert(cells.len());
            if cells.len() != expected {
                return Err(PlacementError::RaggedRank {
                    rank,
                    found: cells.len(),
                    expected,
                });
            }
            parsed_rows.push(cells);
        }

        let width = width.unwrap_or(0);
        let (Ok(w), Ok(h)) = (u8::try_from(width), u8::try_from(height)) else {
            return Err(PlacementError::UnsupportedSize { width, height });
        };
        if w == 0 {
            return Err(PlacementError::UnsupportedSize { width, height });
        }

        // Text lists the top rank first; cells are stored bottom-up.
        let cells = parsed_rows.into_iter().rev().flatten().collect();
        Ok(Placement {
            width: w,
            height: h,
            cells,
        })
    }

    /// Parses one rank. Widths past `u8::MAX` are rejected as soon as a
    /// digit run or a piece pushes the rank over the limit.
    fn parse_row(
        row: &str,
        rank: usize,
        height: usize,
    ) -> Result<Vec<Option<(PieceKind, Color)>>, PlacementError> {
        let too_wide = |width| PlacementError::UnsupportedSize { width, height };
        let mut cells = Vec::new();
        let mut run = 0usize;
        for c in row.chars() {
            if let Some(d) = c.to_digit(10) {
                run = run
                    .checked_mul(10)
                    .and_then(|r| r.checked_add(d as usize))
                    .ok_or_else(|| too_wide(usize::MAX))?;
                let width = cells.len().saturating_add(run);
                if width > MAX_SIDE {
                    return Err(too_wide(width));
                }
                continue;
            }
            cells.extend(std::iter::repeat(None).take(run));
            run = 0;
            match PieceKind::from_char(c) {
                Some(piece) => cells.push(Some(piece)),
                None => {
                    return Err(PlacementError::InvalidCharacter { character: c, rank });
                }
            }
            if cells.len() > MAX_SIDE {
                return Err(too_wide(cells.len()));
            }
        }
        cells.extend(std::iter::repeat(None).take(run));
        Ok(cells)
    }

    /// Returns the number of files.
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Returns the number of ranks.
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Returns the piece on the given square, if any.
    pub fn get(&self, square: Square) -> Option<(PieceKind, Color)> {
        if square.rank() >= self.height || square.file() >= self.width {
            return None;
        }
        let idx = square.rank() as usize * self.width as usize + square.file() as usize;
        self.cells[idx]
    }

    /// Iterates over occupied squares, rank 0 first and by increasing file.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, PieceKind, Color)> + '_ {
        let width = self.width as usize;
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            let (kind, color) = (*cell)?;
            let square = Square::new((idx / width) as u8, (idx % width) as u8);
            Some((square, kind, color))
        })
    }

    /// Builds placement text from a lookup of the occupant of each square.
    pub fn write<F>(width: u8, height: u8, occupant: F) -> String
    where
        F: Fn(Square) -> Option<(PieceKind, Color)>,
    {
        let mut out = String::new();
        for rank in (0..height).rev() {
            let mut empty = 0;
            for file in 0..width {
                match occupant(Square::new(rank, file)) {
                    Some((kind, color)) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(kind.to_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }

    /// Converts the placement back to text.
    pub fn to_text(&self) -> String {
        Self::write(self.width, self.height, |sq| self.get(sq))
    }
}

impl Default for Placement {
    fn default() -> Self {
        Placement {
            width: 8,
            height: 8,
            cells: Self::STANDARD_CELLS.to_vec(),
        }
    }
}

impl Placement {
    const STANDARD_CELLS: [Option<(PieceKind, Color)>; 64] = {
        const BACK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut cells = [None; 64];
        let mut file = 0;
        while file < 8 {
            cells[file] = Some((BACK[file], Color::White));
            cells[8 + file] = Some((PieceKind::Pawn, Color::White));
            cells[48 + file] = Some((PieceKind::Pawn, Color::Black));
            cells[56 + file] = Some((BACK[file], Color::Black));
            file += 1;
        }
        cells
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn parse_standard() {
        let p = Placement::parse(Placement::STANDARD).unwrap();
        assert_eq!(p.width(), 8);
        assert_eq!(p.height(), 8);
        assert_eq!(p.get(sq("a1")), Some((PieceKind::Rook, Color::White)));
        assert_eq!(p.get(sq("e1")), Some((PieceKind::King, Color::White)));
        assert_eq!(p.get(sq("d8")), Some((PieceKind::Queen, Color::Black)));
        assert_eq!(p.get(sq("e4")), None);
        assert_eq!(p.pieces().count(), 32);
    }

    #[test]
    fn default_matches_standard_text() {
        assert_eq!(Placement::default(), Placement::parse(Placement::STANDARD).unwrap());
    }

    #[test]
    fn to_text_reproduces_input() {
        let text = "r3k2r/8/8/3pP3/8/8/8/R3K2R";
        assert_eq!(Placement::parse(text).unwrap().to_text(), text);
    }

    #[test]
    fn parse_rectangular_board_with_multi_digit_runs() {
        let p = Placement::parse("k11/12/11K").unwrap();
        assert_eq!(p.width(), 12);
        assert_eq!(p.height(), 3);
        assert_eq!(p.get(Square::new(2, 0)), Some((PieceKind::King, Color::Black)));
        assert_eq!(p.get(Square::new(0, 11)), Some((PieceKind::King, Color::White)));
        assert_eq!(p.get(Square::new(0, 12)), None);
    }

    #[test]
    fn invalid_character() {
        assert_eq!(
            Placement::parse("8/8/8/8/8/8/PPPPXPPP/8"),
            Err(PlacementError::InvalidCharacter {
                character: 'X',
                rank: 2
            })
        );
    }

    #[test]
    fn ragged_rank() {
        assert_eq!(
            Placement::parse("8/9/8"),
            Err(PlacementError::RaggedRank {
                rank: 2,
                found: 9,
                expected: 8
            })
        );
    }

    #[test]
    fn empty_and_zero_width() {
        assert_eq!(Placement::parse("  "), Err(PlacementError::Empty));
        assert!(matches!(
            Placement::parse("/"),
            Err(PlacementError::UnsupportedSize { width: 0, .. })
        ));
    }

    #[test]
    fn oversized_board() {
        assert!(matches!(
            Placement::parse("300"),
            Err(PlacementError::UnsupportedSize { width: 300, .. })
        ));
    }

    #[test]
    fn huge_empty_runs_are_rejected_before_allocating() {
        for text in ["99999999999999999999999", "100000000000000", "8/255p/8"] {
            assert!(
                matches!(
                    Placement::parse(text),
                    Err(PlacementError::UnsupportedSize { .. })
                ),
                "{} should be rejected",
                text
            );
        }
        assert_eq!(Placement::parse("255").unwrap().width(), 255);
    }

    #[test]
    fn error_display() {
        let err = PlacementError::InvalidCharacter {
            character: 'x',
            rank: 3,
        };
        assert_eq!(err.to_string(), "invalid character 'x' in rank 3");
    }
}
