//! Chess piece representation.

use crate::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Returns the placement character for this kind with the given color.
    pub const fn to_char(self, color: Color) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a placement character into a piece kind and color.
    pub const fn from_char(c: char) -> Option<(PieceKind, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((kind, color))
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// The kinds a pawn may be promoted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromotionKind {
    Knight,
    Bishop,
    Rook,
    Queen,
}

impl PromotionKind {
    /// Every promotion choice, in prompt order.
    pub const ALL: [PromotionKind; 4] = [
        PromotionKind::Knight,
        PromotionKind::Bishop,
        PromotionKind::Rook,
        PromotionKind::Queen,
    ];

    /// Returns the piece kind the pawn becomes.
    #[inline]
    pub const fn piece_kind(self) -> PieceKind {
        match self {
            PromotionKind::Knight => PieceKind::Knight,
            PromotionKind::Bishop => PieceKind::Bishop,
            PromotionKind::Rook => PieceKind::Rook,
            PromotionKind::Queen => PieceKind::Queen,
        }
    }

    /// Returns the lowercase suffix letter used in move notation.
    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            PromotionKind::Knight => 'n',
            PromotionKind::Bishop => 'b',
            PromotionKind::Rook => 'r',
            PromotionKind::Queen => 'q',
        }
    }
}

impl From<PromotionKind> for PieceKind {
    fn from(kind: PromotionKind) -> Self {
        kind.piece_kind()
    }
}

impl fmt::Display for PromotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.piece_kind())
    }
}

/// Error returned when a promotion choice cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid promotion choice '{0}': expected knight, bishop, rook or queen")]
pub struct PromotionKindError(pub String);

impl FromStr for PromotionKind {
    type Err = PromotionKindError;

    /// Accepts the full name or its first letter, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "knight" => Ok(PromotionKind::Knight),
            "b" | "bishop" => Ok(PromotionKind::Bishop),
            "r" | "rook" => Ok(PromotionKind::Rook),
            "q" | "queen" => Ok(PromotionKind::Queen),
            _ => Err(PromotionKindError(s.to_string())),
        }
    }
}

/// Stable handle of a piece for the lifetime of a game.
///
/// Ids index the board's piece arena. A captured piece keeps its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(u16);

impl PieceId {
    /// Creates an id from an arena index.
    #[inline]
    pub const fn new(index: u16) -> Self {
        PieceId(index)
    }

    /// Returns the arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
