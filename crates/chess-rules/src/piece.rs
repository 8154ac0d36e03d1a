//! Per-piece state tracked by the board.

use chess_core::{Color, PieceId, PieceKind, Square};
use serde::{Deserialize, Serialize};

/// A piece in the board's arena.
///
/// The record keeps the piece's current square as a back-reference to the
/// board's occupancy grid. The two always agree outside of move application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceRecord {
    id: PieceId,
    color: Color,
    kind: PieceKind,
    has_moved: bool,
    just_double_moved: bool,
    /// `None` once the piece has been captured.
    square: Option<Square>,
}

impl PieceRecord {
    pub(crate) fn new(id: PieceId, color: Color, kind: PieceKind, square: Square) -> Self {
        PieceRecord {
            id,
            color,
            kind,
            has_moved: false,
            just_double_moved: false,
            square: Some(square),
        }
    }

    /// Returns the piece's stable id.
    #[inline]
    pub fn id(&self) -> PieceId {
        self.id
    }

    /// Returns the piece's color.
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the piece's current kind.
    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns true once the piece has moved at least once.
    #[inline]
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Returns true if the piece double-moved on the previous ply.
    #[inline]
    pub fn just_double_moved(&self) -> bool {
        self.just_double_moved
    }

    /// Returns the square the piece stands on, or `None` if captured.
    #[inline]
    pub fn square(&self) -> Option<Square> {
        self.square
    }

    /// Returns true if the piece has been removed from play.
    #[inline]
    pub fn is_captured(&self) -> bool {
        self.square.is_none()
    }

    pub(crate) fn set_kind(&mut self, kind: PieceKind) {
        self.kind = kind;
    }

    pub(crate) fn set_moved(&mut self, moved: bool) {
        self.has_moved = moved;
    }

    pub(crate) fn set_just_double_moved(&mut self, flag: bool) {
        self.just_double_moved = flag;
    }

    pub(crate) fn set_square(&mut self, square: Option<Square>) {
        self.square = square;
    }
}
