//! Move representation.

use crate::{PieceId, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of move a [`Move`] is, with the partner piece where one exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MoveKind {
    /// Normal move or capture.
    Standard,
    /// Pawn advance of two squares from its starting position.
    DoubleMove,
    /// King move of two files, carrying the rook it castles with.
    Castle { rook: PieceId },
    /// Pawn capture of a pawn that just double-moved beside it.
    EnPassant { captured: PieceId },
    /// Pawn move onto the first or last rank. The new kind is chosen on application.
    Promotion,
}

impl MoveKind {
    /// Returns the second piece taking part in the move, if any.
    #[inline]
    pub const fn partner(self) -> Option<PieceId> {
        match self {
            MoveKind::Castle { rook } => Some(rook),
            MoveKind::EnPassant { captured } => Some(captured),
            MoveKind::Standard | MoveKind::DoubleMove | MoveKind::Promotion => None,
        }
    }
}

/// A candidate move of one piece.
///
/// Moves are produced by move generation and handed back unchanged
/// to move application.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    piece: PieceId,
    from: Square,
    to: Square,
    kind: MoveKind,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(piece: PieceId, from: Square, to: Square, kind: MoveKind) -> Self {
        Move {
            piece,
            from,
            to,
            kind,
        }
    }

    /// Creates a standard move.
    #[inline]
    pub const fn standard(piece: PieceId, from: Square, to: Square) -> Self {
        Self::new(piece, from, to, MoveKind::Standard)
    }

    /// Returns the moving piece.
    #[inline]
    pub const fn piece(self) -> PieceId {
        self.piece
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Returns the move kind.
    #[inline]
    pub const fn kind(self) -> MoveKind {
        self.kind
    }

    /// Returns the partner piece for castling and en passant.
    #[inline]
    pub const fn partner(self) -> Option<PieceId> {
        self.kind.partner()
    }

    /// Returns a copy of this move with a different kind.
    #[inline]
    pub const fn with_kind(self, kind: MoveKind) -> Self {
        Move { kind, ..self }
    }

    /// Returns true if this move ends in a promotion.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(self.kind, MoveKind::Promotion)
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self.kind, MoveKind::Castle { .. })
    }

    /// Returns the coordinate notation of this move (e.g., "e2e4").
    pub fn to_notation(self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {:?} {})", self.to_notation(), self.kind, self.piece)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}
