//! Rule set abstraction.
//!
//! This module provides the [`RuleSet`] trait, the seam through which the
//! [`Game`](crate::Game) session asks every rules question. The session
//! itself only sequences move application.

mod standard;

pub use standard::StandardChess;

use crate::{Board, MoveList};
use chess_core::{Move, PieceId};

/// Trait for the rules a game is played under.
///
/// # Example
///
/// ```
/// use chess_rules::rules::RuleSet;
/// use chess_rules::StandardChess;
///
/// let board = StandardChess.initial_board();
/// let knight = board.piece_at(0, 1).unwrap().id();
/// assert_eq!(StandardChess.generate_moves(&board, knight).len(), 2);
/// ```
pub trait RuleSet {
    /// Returns the board a new game starts from.
    fn initial_board(&self) -> Board;

    /// Generates the candidate moves of one piece.
    fn generate_moves(&self, board: &Board, piece: PieceId) -> MoveList;

    /// Returns true if the move is one of the current candidates of its piece.
    fn is_candidate(&self, board: &Board, m: Move) -> bool {
        self.generate_moves(board, m.piece()).contains(&m)
    }
}
