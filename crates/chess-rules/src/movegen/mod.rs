//! Move generation.
//!
//! Generators produce the candidate moves of one piece on any board,
//! including board lookalikes cloned for look-ahead. Candidates exclude
//! off-board squares, squares held by the mover's own color, and blocked
//! paths. They are not filtered for self-check.

pub mod perft;
mod rays;

use crate::{Board, PieceRecord};
use chess_core::{Move, MoveKind, PieceId, PieceKind, Square};

pub use rays::{BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRECTIONS};
use rays::{ray_moves, step_moves};

/// A list of candidate moves.
///
/// Order carries no meaning; callers must not rely on it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList { moves: Vec::new() }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        self.moves.push(m);
    }

    /// Returns the number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns true if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Iterates over the moves.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    /// Returns true if the list contains the move.
    #[inline]
    pub fn contains(&self, m: &Move) -> bool {
        self.moves.contains(m)
    }

    /// Returns the move landing on the given square, if any.
    pub fn find_to(&self, to: Square) -> Option<Move> {
        self.moves.iter().copied().find(|m| m.to() == to)
    }

    /// Appends every move of another list.
    pub fn append(&mut self, other: &mut MoveList) {
        self.moves.append(&mut other.moves);
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        self.moves.retain(f);
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl FromIterator<Move> for MoveList {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        MoveList {
            moves: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates the candidate moves of one piece.
///
/// Unknown and captured pieces have no moves.
pub fn generate_moves(board: &Board, id: PieceId) -> MoveList {
    let mut moves = MoveList::new();
    let Some(piece) = board.piece(id) else {
        return moves;
    };

    match piece.kind() {
        PieceKind::Pawn => pawn_moves(board, piece, &mut moves),
        PieceKind::Knight => knight_moves(board, piece, &mut moves),
        PieceKind::Bishop => bishop_moves(board, piece, &mut moves),
        PieceKind::Rook => rook_moves(board, piece, &mut moves),
        PieceKind::Queen => queen_moves(board, piece, &mut moves),
        PieceKind::King => king_moves(board, piece, &mut moves),
    }

    tracing::trace!(piece = %id, kind = %piece.kind(), count = moves.len(), "generated moves");
    moves
}

/// Generates pawn moves: forward steps, diagonal captures, en passant, and promotions.
pub fn pawn_moves(board: &Board, pawn: &PieceRecord, moves: &mut MoveList) {
    let Some(from) = pawn.square() else {
        return;
    };
    let id = pawn.id();
    let dir = pawn.color().pawn_direction();
    let start = moves.len();

    // Single and double steps
    if let Some(one) = board.offset(from, dir, 0).filter(|sq| board.is_vacant(*sq)) {
        moves.push(Move::standard(id, from, one));
        if !pawn.has_moved() {
            if let Some(two) = board.offset(from, 2 * dir, 0).filter(|sq| board.is_vacant(*sq)) {
                moves.push(Move::new(id, from, two, MoveKind::DoubleMove));
            }
        }
    }

    // Captures
    for df in [-1, 1] {
        let Some(target) = board.offset(from, dir, df) else {
            continue;
        };
        match board.occupant(target) {
            Some(victim) => {
                if victim.color() != pawn.color() {
                    moves.push(Move::standard(id, from, target));
                }
            }
            None => {
                // En passant: the pawn beside us just double-moved past the target.
                let beside = board
                    .offset(from, 0, df)
                    .and_then(|sq| board.occupant(sq));
                if let Some(victim) = beside {
                    if victim.color() != pawn.color() && victim.just_double_moved() {
                        moves.push(Move::new(
                            id,
                            from,
                            target,
                            MoveKind::EnPassant {
                                captured: victim.id(),
                            },
                        ));
                    }
                }
            }
        }
    }

    // Promotion overrides the tag of anything landing on the first or last rank.
    // An en passant capture never lands there, so it keeps its partner.
    for m in &mut moves.moves[start..] {
        if board.is_promotion_rank(m.to().rank()) && m.partner().is_none() {
            *m = m.with_kind(MoveKind::Promotion);
        }
    }
}

/// Generates knight jumps.
pub fn knight_moves(board: &Board, knight: &PieceRecord, moves: &mut MoveList) {
    if let Some(from) = knight.square() {
        step_moves(board, knight, from, &KNIGHT_OFFSETS, moves);
    }
}

/// Generates bishop moves along the four diagonals.
pub fn bishop_moves(board: &Board, bishop: &PieceRecord, moves: &mut MoveList) {
    if let Some(from) = bishop.square() {
        ray_moves(board, bishop, from, &BISHOP_DIRECTIONS, moves);
    }
}

/// Generates rook moves along ranks and files.
pub fn rook_moves(board: &Board, rook: &PieceRecord, moves: &mut MoveList) {
    if let Some(from) = rook.square() {
        ray_moves(board, rook, from, &ROOK_DIRECTIONS, moves);
    }
}

/// Generates queen moves: the union of bishop and rook rays.
pub fn queen_moves(board: &Board, queen: &PieceRecord, moves: &mut MoveList) {
    bishop_moves(board, queen, moves);
    rook_moves(board, queen, moves);
}

/// Generates king steps and castling.
pub fn king_moves(board: &Board, king: &PieceRecord, moves: &mut MoveList) {
    let Some(from) = king.square() else {
        return;
    };
    step_moves(board, king, from, &KING_OFFSETS, moves);
    castling_moves(board, king, from, moves);
}

/// Generates castling moves toward each unmoved rook on the edge files of the king's rank.
///
/// The king travels two files toward the rook. Squares strictly between king
/// and rook must be empty, and the rook must stand at least three files away
/// so the king lands between its own square and the rook's.
fn castling_moves(board: &Board, king: &PieceRecord, from: Square, moves: &mut MoveList) {
    if king.has_moved() {
        return;
    }

    let edge_files = [0, board.width() - 1];
    for (i, &rook_file) in edge_files.iter().enumerate() {
        if i == 1 && edge_files[0] == rook_file {
            break;
        }
        let Some(rook) = board.occupant(Square::new(from.rank(), rook_file)) else {
            continue;
        };
        if rook.kind() != PieceKind::Rook || rook.color() != king.color() || rook.has_moved() {
            continue;
        }

        let distance = i16::from(rook_file) - i16::from(from.file());
        if distance.abs() < 3 {
            continue;
        }
        let df: i8 = if distance > 0 { 1 } else { -1 };

        let (low, high) = if df > 0 {
            (from.file() + 1, rook_file)
        } else {
            (rook_file + 1, from.file())
        };
        let path_clear = (low..high).all(|file| board.is_vacant(Square::new(from.rank(), file)));
        if !path_clear {
            continue;
        }

        if let Some(to) = board.offset(from, 0, 2 * df) {
            moves.push(Move::new(
                king.id(),
                from,
                to,
                MoveKind::Castle { rook: rook.id() },
            ));
        }
    }
}
