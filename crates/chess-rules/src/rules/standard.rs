//! Standard chess rules.

use super::RuleSet;
use crate::movegen::generate_moves;
use crate::{Board, MoveList};
use chess_core::PieceId;

/// Standard chess movement rules.
///
/// - Standard piece movement on a rectangular board
/// - Pawn double move, en passant, and promotion
/// - Castling with an unmoved king and rook over an empty path
///
/// Moves are not filtered for self-check, and there is no check,
/// checkmate, or draw detection.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardChess;

impl RuleSet for StandardChess {
    fn initial_board(&self) -> Board {
        Board::standard()
    }

    fn generate_moves(&self, board: &Board, piece: PieceId) -> MoveList {
        generate_moves(board, piece)
    }
}
