//! Chess rules engine: board state, candidate move generation, and move
//! application.
//!
//! This crate provides:
//! - [`Board`] - a rectangular grid over an arena of [`PieceRecord`]s, plus the turn
//! - [`generate_moves`] and the per-kind generators in [`movegen`]
//! - [`RuleSet`] - the trait the session delegates rule questions to
//! - [`Game`] - a session applying moves in two phases around promotion
//! - [`PromotionPrompt`] - the collaborator that picks a promotion kind
//!
//! Moves are candidates, not legal moves: nothing checks whether a move
//! leaves the mover's king capturable, and there is no check, mate, or
//! draw detection.
//!
//! # Example
//!
//! ```
//! use chess_core::{PromotionKind, Square};
//! use chess_rules::Game;
//!
//! let mut game = Game::new();
//! let pawn = game.piece_at(1, 4).unwrap().id();
//! let double = game
//!     .valid_moves(pawn)
//!     .find_to(Square::from_algebraic("e4").unwrap())
//!     .unwrap();
//! game.apply_move(double, &mut PromotionKind::Queen).unwrap();
//! println!("{}", game.board());
//! ```

mod board;
mod game;
pub mod movegen;
mod piece;
mod promotion;
pub mod rules;

pub use board::{Board, BoardError, Cell};
pub use game::{
    Capture, Game, GameError, MoveOutcome, MoveStatus, PendingPromotion, RookRelocation,
};
pub use movegen::{
    bishop_moves, generate_moves, king_moves, knight_moves, pawn_moves, queen_moves, rook_moves,
    MoveList,
};
pub use piece::PieceRecord;
pub use promotion::PromotionPrompt;
pub use rules::{RuleSet, StandardChess};
