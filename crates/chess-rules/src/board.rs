//! Board state: a rectangular grid of squares, a piece arena, and the turn.

use crate::PieceRecord;
use chess_core::{Color, PieceId, PieceKind, Placement, PlacementError, Square};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when setting up a board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid placement: {0}")]
    Placement(#[from] PlacementError),

    #[error("board of {width}x{height} squares is not supported")]
    InvalidSize { width: u8, height: u8 },

    #[error("square {0} is not on the board")]
    OffBoard(Square),

    #[error("square {0} is already occupied")]
    Occupied(Square),

    #[error("too many pieces for one board")]
    TooManyPieces,

    #[error("inconsistent board: {0}")]
    Inconsistent(String),
}

/// A board square together with its occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    square: Square,
    occupant: Option<PieceId>,
}

impl Cell {
    /// Returns the square's coordinates.
    #[inline]
    pub fn square(&self) -> Square {
        self.square
    }

    /// Returns the rank (row index).
    #[inline]
    pub fn rank(&self) -> u8 {
        self.square.rank()
    }

    /// Returns the file (column index).
    #[inline]
    pub fn file(&self) -> u8 {
        self.square.file()
    }

    /// Returns the id of the occupying piece, if any.
    #[inline]
    pub fn occupant(&self) -> Option<PieceId> {
        self.occupant
    }

    /// Returns true if no piece occupies the square.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

/// Complete board state.
///
/// Pieces live in an arena indexed by [`PieceId`]; the grid stores which id
/// occupies each square. Cloning a board gives an independent lookalike for
/// look-ahead.
///
/// Deserialization checks the arena invariants and rejects snapshots that
/// break them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    width: u8,
    height: u8,
    /// Occupancy indexed by `rank * width + file`.
    cells: Vec<Option<PieceId>>,
    /// Every piece ever placed, captured ones included.
    pieces: Vec<PieceRecord>,
    turn: Color,
}

impl Board {
    /// The side length of a standard board.
    pub const STANDARD_SIZE: u8 = 8;

    /// Creates an empty board of the given size with White to move.
    pub fn empty(width: u8, height: u8) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::InvalidSize { width, height });
        }
        Ok(Self::with_size(width, height))
    }

    fn with_size(width: u8, height: u8) -> Self {
        Board {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
            pieces: Vec::new(),
            turn: Color::White,
        }
    }

    /// Creates the standard 8x8 starting position with White to move.
    ///
    /// Pieces are numbered rank by rank from White's back rank, so the
    /// white rooks are `#0` and `#7` and the black king is `#28`.
    pub fn standard() -> Self {
        Self::from_parsed(&Placement::default(), Color::White)
    }

    /// Creates a board from placement text with the given side to move.
    ///
    /// All pieces start unmoved, except pawns standing off their home rank,
    /// which are marked as moved so they cannot double-move.
    pub fn from_placement(text: &str, turn: Color) -> Result<Self, BoardError> {
        let placement = Placement::parse(text)?;
        Ok(Self::from_parsed(&placement, turn))
    }

    fn from_parsed(placement: &Placement, turn: Color) -> Self {
        let mut board = Self::with_size(placement.width(), placement.height());
        board.turn = turn;
        for (square, kind, color) in placement.pieces() {
            // A u8 x u8 grid holds fewer pieces than a u16 id can number.
            let id = PieceId::new(board.pieces.len() as u16);
            board.insert(id, color, kind, square);
        }
        board
    }

    /// Places a new piece on an empty square.
    ///
    /// Pawns placed off their home rank count as having moved.
    pub fn place(
        &mut self,
        color: Color,
        kind: PieceKind,
        square: Square,
    ) -> Result<PieceId, BoardError> {
        if !self.contains(square) {
            return Err(BoardError::OffBoard(square));
        }
        if self.occupant_id(square).is_some() {
            return Err(BoardError::Occupied(square));
        }
        let id = u16::try_from(self.pieces.len())
            .map(PieceId::new)
            .map_err(|_| BoardError::TooManyPieces)?;
        self.insert(id, color, kind, square);
        Ok(id)
    }

    fn insert(&mut self, id: PieceId, color: Color, kind: PieceKind, square: Square) {
        let mut record = PieceRecord::new(id, color, kind, square);
        if kind == PieceKind::Pawn && square.rank() != self.home_rank(color) {
            record.set_moved(true);
        }
        let idx = self.index(square);
        self.cells[idx] = Some(id);
        self.pieces.push(record);
    }

    /// Returns the number of files.
    #[inline]
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Returns the number of ranks.
    #[inline]
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Returns whether the given rank and file lie on the board.
    #[inline]
    pub fn on_board(&self, rank: i32, file: i32) -> bool {
        rank >= 0 && rank < i32::from(self.height) && file >= 0 && file < i32::from(self.width)
    }

    /// Returns whether the square lies on the board.
    #[inline]
    pub fn contains(&self, square: Square) -> bool {
        square.rank() < self.height && square.file() < self.width
    }

    /// Returns the square shifted by the given deltas, if it stays on the board.
    #[inline]
    pub fn offset(&self, square: Square, dr: i8, df: i8) -> Option<Square> {
        square.offset(dr, df).filter(|sq| self.contains(*sq))
    }

    /// Returns the piece at the given rank and file; `None` if empty or off the board.
    pub fn piece_at(&self, rank: i32, file: i32) -> Option<&PieceRecord> {
        self.occupant(Square::from_coords(rank, file)?)
    }

    /// Returns the square at the given rank and file; `None` if off the board.
    pub fn square_at(&self, rank: i32, file: i32) -> Option<Cell> {
        let square = Square::from_coords(rank, file).filter(|sq| self.contains(*sq))?;
        Some(Cell {
            square,
            occupant: self.occupant_id(square),
        })
    }

    /// Returns the piece on the given square, if any.
    pub fn occupant(&self, square: Square) -> Option<&PieceRecord> {
        self.occupant_id(square).and_then(|id| self.piece(id))
    }

    /// Returns the id of the piece on the given square, if any.
    #[inline]
    pub fn occupant_id(&self, square: Square) -> Option<PieceId> {
        if !self.contains(square) {
            return None;
        }
        self.cells[self.index(square)]
    }

    /// Returns true if the square is on the board and empty.
    #[inline]
    pub fn is_vacant(&self, square: Square) -> bool {
        self.contains(square) && self.cells[self.index(square)].is_none()
    }

    /// Returns the record of the given piece, captured or not.
    #[inline]
    pub fn piece(&self, id: PieceId) -> Option<&PieceRecord> {
        self.pieces.get(id.index())
    }

    /// Iterates over the pieces still in play.
    pub fn pieces(&self) -> impl Iterator<Item = &PieceRecord> + '_ {
        self.pieces.iter().filter(|p| !p.is_captured())
    }

    /// Iterates over the pieces that have been captured.
    pub fn captured(&self) -> impl Iterator<Item = &PieceRecord> + '_ {
        self.pieces.iter().filter(|p| p.is_captured())
    }

    /// Returns the color to move.
    #[inline]
    pub fn current_turn(&self) -> Color {
        self.turn
    }

    /// Passes the turn to the other color.
    #[inline]
    pub fn advance_turn(&mut self) {
        self.turn = self.turn.opposite();
    }

    /// Returns the rank pawns of the given color start on.
    #[inline]
    pub fn home_rank(&self, color: Color) -> u8 {
        match color {
            Color::White => 1,
            Color::Black => self.height.saturating_sub(2),
        }
    }

    /// Returns true if a pawn reaching this rank is promoted.
    #[inline]
    pub fn is_promotion_rank(&self, rank: u8) -> bool {
        rank == 0 || rank == self.height - 1
    }

    /// Returns the placement text of the current position.
    pub fn to_placement(&self) -> String {
        Placement::write(self.width, self.height, |sq| {
            self.occupant(sq).map(|p| (p.kind(), p.color()))
        })
    }

    #[inline]
    fn index(&self, square: Square) -> usize {
        square.rank() as usize * self.width as usize + square.file() as usize
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> Option<&mut PieceRecord> {
        self.pieces.get_mut(id.index())
    }

    /// Moves a piece onto a square and marks it as moved.
    ///
    /// Any piece already on the destination is removed from play and its id
    /// returned. The destination must be on the board.
    pub(crate) fn relocate(&mut self, id: PieceId, to: Square) -> Option<PieceId> {
        debug_assert!(self.contains(to));
        let captured = self.cells[self.index(to)].filter(|&other| other != id);
        if let Some(other) = captured {
            self.remove(other);
        }
        if let Some(from) = self.piece(id).and_then(PieceRecord::square) {
            let from_idx = self.index(from);
            self.cells[from_idx] = None;
        }
        let to_idx = self.index(to);
        self.cells[to_idx] = Some(id);
        if let Some(record) = self.piece_mut(id) {
            record.set_square(Some(to));
            record.set_moved(true);
        }
        captured
    }

    /// Removes a piece from play, vacating its square.
    pub(crate) fn remove(&mut self, id: PieceId) -> Option<Square> {
        let square = self.piece(id)?.square()?;
        let idx = self.index(square);
        if self.cells[idx] == Some(id) {
            self.cells[idx] = None;
        }
        if let Some(record) = self.piece_mut(id) {
            record.set_square(None);
            record.set_just_double_moved(false);
        }
        Some(square)
    }
}

/// Board fields as they appear in a snapshot, before validation.
#[derive(Deserialize)]
struct RawBoard {
    width: u8,
    height: u8,
    cells: Vec<Option<PieceId>>,
    pieces: Vec<PieceRecord>,
    turn: Color,
}

impl TryFrom<RawBoard> for Board {
    type Error = BoardError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        let RawBoard {
            width,
            height,
            cells,
            pieces,
            turn,
        } = raw;
        if width == 0 || height == 0 {
            return Err(BoardError::InvalidSize { width, height });
        }
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(BoardError::Inconsistent(format!(
                "{} cells for a {}x{} board",
                cells.len(),
                width,
                height
            )));
        }
        if pieces.len() > usize::from(u16::MAX) + 1 {
            return Err(BoardError::TooManyPieces);
        }

        let board = Board {
            width,
            height,
            cells,
            pieces,
            turn,
        };
        for (index, record) in board.pieces.iter().enumerate() {
            if record.id().index() != index {
                return Err(BoardError::Inconsistent(format!(
                    "piece {} stored at index {}",
                    record.id(),
                    index
                )));
            }
            if let Some(square) = record.square() {
                if board.occupant_id(square) != Some(record.id()) {
                    return Err(BoardError::Inconsistent(format!(
                        "piece {} is not on {}",
                        record.id(),
                        square
                    )));
                }
            }
        }
        for (index, cell) in board.cells.iter().enumerate() {
            let Some(id) = *cell else {
                continue;
            };
            let square = Square::new((index / width as usize) as u8, (index % width as usize) as u8);
            if board.piece(id).and_then(PieceRecord::square) != Some(square) {
                return Err(BoardError::Inconsistent(format!(
                    "{} holds {} which is not there",
                    square, id
                )));
            }
        }
        if board.pieces().filter(|p| p.just_double_moved()).count() > 1 {
            return Err(BoardError::Inconsistent(
                "more than one pawn just double-moved".to_string(),
            ));
        }
        Ok(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    /// Writes one line per rank, top rank first, with `.` for empty squares.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..self.height).rev() {
            for file in 0..self.width {
                let c = match self.occupant(Square::new(rank, file)) {
                    Some(p) => p.kind().to_char(p.color()),
                    None => '.',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
