//! Step and ray tables shared by the piece generators.

use crate::{Board, MoveList, PieceRecord};
use chess_core::{Move, Square};

/// Knight jumps as (rank delta, file delta).
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// King steps as (rank delta, file delta).
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (1, -1),
    (1, 0),
    (1, 1),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Diagonal ray directions.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Orthogonal ray directions.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Returns true if `piece` may end its move on `target`: empty, or held by the other color.
#[inline]
pub(crate) fn can_land(board: &Board, piece: &PieceRecord, target: Square) -> bool {
    board
        .occupant(target)
        .map_or(true, |other| other.color() != piece.color())
}

/// Pushes a standard move for every single-step offset the piece may land on.
pub(crate) fn step_moves(
    board: &Board,
    piece: &PieceRecord,
    from: Square,
    offsets: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(dr, df) in offsets {
        if let Some(to) = board.offset(from, dr, df) {
            if can_land(board, piece, to) {
                moves.push(Move::standard(piece.id(), from, to));
            }
        }
    }
}

/// Walks each direction until the board edge or the first occupied square.
///
/// Empty squares are candidates; the blocking square is a candidate only
/// when it holds a piece of the other color.
pub(crate) fn ray_moves(
    board: &Board,
    piece: &PieceRecord,
    from: Square,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(dr, df) in directions {
        let mut current = from;
        while let Some(to) = board.offset(current, dr, df) {
            match board.occupant(to) {
                None => moves.push(Move::standard(piece.id(), from, to)),
                Some(blocker) => {
                    if blocker.color() != piece.color() {
                        moves.push(Move::standard(piece.id(), from, to));
                    }
                    break;
                }
            }
            current = to;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_tables_are_distinct() {
        for table in [&KNIGHT_OFFSETS[..], &KING_OFFSETS[..]] {
            for (i, a) in table.iter().enumerate() {
                assert!(!table[i + 1..].contains(a));
            }
        }
    }

    #[test]
    fn queen_directions_cover_king_steps() {
        let mut dirs: Vec<_> = BISHOP_DIRECTIONS
            .iter()
            .chain(ROOK_DIRECTIONS.iter())
            .copied()
            .collect();
        let mut king = KING_OFFSETS.to_vec();
        dirs.sort();
        king.sort();
        assert_eq!(dirs, king);
    }
}
