//! Game session: turn order, the double-moved pawn, and move application.
//!
//! Applying a move is two-phased. [`Game::begin_move`] performs everything
//! that does not depend on a promotion choice; if the move promotes, the
//! game waits in a pending state until [`Game::resolve_promotion`] supplies
//! the new kind. [`Game::apply_move`] runs both phases with a
//! [`PromotionPrompt`].

use crate::rules::{RuleSet, StandardChess};
use crate::{Board, Cell, MoveList, PieceRecord, PromotionPrompt};
use chess_core::{Color, Move, MoveKind, PieceId, PieceKind, PromotionKind, Square};
use thiserror::Error;

/// Error type for game operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The move names a piece the board does not know.
    #[error("unknown piece {0}")]
    UnknownPiece(PieceId),
    /// The moving piece does not belong to the side to move.
    #[error("{color} cannot move while it is {turn}'s turn")]
    WrongTurn { color: Color, turn: Color },
    /// The move is not one of the current candidates of its piece.
    #[error("move {0} is not a candidate in the current position")]
    NotCandidate(Move),
    /// A promotion is waiting for its choice.
    #[error("the promotion on {0} is still waiting for a choice")]
    PromotionPending(Square),
    /// There is no promotion to resolve.
    #[error("no promotion is waiting for a choice")]
    NoPendingPromotion,
}

/// A piece removed from play by a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    /// The captured piece.
    pub piece: PieceId,
    /// Its kind when captured.
    pub kind: PieceKind,
    /// The square it was taken from (not the destination for en passant).
    pub square: Square,
}

/// The rook's part of a castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RookRelocation {
    pub rook: PieceId,
    pub from: Square,
    pub to: Square,
}

/// Everything a view layer needs to mirror an applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The applied move.
    pub mov: Move,
    /// The piece removed from play, if any.
    pub captured: Option<Capture>,
    /// The rook relocation of a castling move.
    pub rook: Option<RookRelocation>,
    /// The new kind of a promoted pawn.
    pub promoted_to: Option<PieceKind>,
    /// The side to move after the move.
    pub turn: Color,
}

/// A promotion waiting for its choice.
///
/// The pawn already stands on its destination and any capture has been
/// made; only its new kind and the turn change are outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPromotion {
    mov: Move,
    color: Color,
    captured: Option<Capture>,
}

impl PendingPromotion {
    /// Returns the promoting pawn.
    pub fn pawn(&self) -> PieceId {
        self.mov.piece()
    }

    /// Returns the pawn's color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the square the pawn promotes on.
    pub fn square(&self) -> Square {
        self.mov.to()
    }

    /// Returns the promoting move.
    pub fn mov(&self) -> Move {
        self.mov
    }
}

/// The result of [`Game::begin_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    /// The move is complete and the turn has passed.
    Applied(MoveOutcome),
    /// The move waits for [`Game::resolve_promotion`].
    PendingPromotion(PendingPromotion),
}

/// A game session.
///
/// Owns the board and the one piece of state the board does not: the pawn
/// that double-moved on the previous ply.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    rules: StandardChess,
    double_moved: Option<PieceId>,
    pending: Option<PendingPromotion>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game from the standard starting position.
    pub fn new() -> Self {
        Self::from_board(StandardChess.initial_board())
    }

    /// Creates a game from a custom board.
    ///
    /// A pawn already flagged as just double-moved becomes the session's
    /// double-moved pawn.
    pub fn from_board(board: Board) -> Self {
        let double_moved = board
            .pieces()
            .find(|p| p.just_double_moved())
            .map(PieceRecord::id);
        Game {
            board,
            rules: StandardChess,
            double_moved,
            pending: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the color to move.
    pub fn current_turn(&self) -> Color {
        self.board.current_turn()
    }

    /// Returns the piece at the given rank and file; `None` if empty or off the board.
    pub fn piece_at(&self, rank: i32, file: i32) -> Option<&PieceRecord> {
        self.board.piece_at(rank, file)
    }

    /// Returns the square at the given rank and file; `None` if off the board.
    pub fn square_at(&self, rank: i32, file: i32) -> Option<Cell> {
        self.board.square_at(rank, file)
    }

    /// Returns the record of a piece.
    pub fn piece(&self, id: PieceId) -> Option<&PieceRecord> {
        self.board.piece(id)
    }

    /// Returns the pawn that double-moved on the previous ply.
    pub fn double_moved_pawn(&self) -> Option<PieceId> {
        self.double_moved
    }

    /// Returns the promotion waiting for a choice, if any.
    pub fn pending_promotion(&self) -> Option<&PendingPromotion> {
        self.pending.as_ref()
    }

    /// Returns true if the piece may be picked up now: in play, of the side
    /// to move, and no promotion is outstanding.
    pub fn is_interactive(&self, id: PieceId) -> bool {
        self.pending.is_none()
            && self
                .board
                .piece(id)
                .is_some_and(|p| !p.is_captured() && p.color() == self.current_turn())
    }

    /// Iterates over the pieces that may be picked up now.
    pub fn interactive_pieces(&self) -> impl Iterator<Item = &PieceRecord> + '_ {
        self.board.pieces().filter(|p| self.is_interactive(p.id()))
    }

    /// Returns the candidate moves of a piece. Has no side effects.
    pub fn valid_moves(&self, id: PieceId) -> MoveList {
        self.rules.generate_moves(&self.board, id)
    }

    /// Returns the candidate moves of every piece of the side to move.
    pub fn side_moves(&self) -> MoveList {
        let turn = self.current_turn();
        let mut moves = MoveList::new();
        for piece in self.board.pieces().filter(|p| p.color() == turn) {
            moves.append(&mut self.valid_moves(piece.id()));
        }
        moves
    }

    /// Applies a move, asking `prompt` for the new kind if it promotes.
    pub fn apply_move<P>(&mut self, m: Move, prompt: &mut P) -> Result<MoveOutcome, GameError>
    where
        P: PromotionPrompt + ?Sized,
    {
        match self.begin_move(m)? {
            MoveStatus::Applied(outcome) => Ok(outcome),
            MoveStatus::PendingPromotion(pending) => {
                let kind = prompt.choose_promotion_kind(pending.color());
                self.resolve_promotion(kind)
            }
        }
    }

    /// Starts applying a move.
    ///
    /// The move must be a current candidate of a piece of the side to move;
    /// anything else is rejected without touching the board.
    pub fn begin_move(&mut self, m: Move) -> Result<MoveStatus, GameError> {
        if let Some(pending) = &self.pending {
            return Err(GameError::PromotionPending(pending.square()));
        }
        let piece = self
            .board
            .piece(m.piece())
            .ok_or(GameError::UnknownPiece(m.piece()))?;
        let color = piece.color();
        let turn = self.current_turn();
        if color != turn {
            return Err(GameError::WrongTurn { color, turn });
        }
        if !self.rules.is_candidate(&self.board, m) {
            return Err(GameError::NotCandidate(m));
        }

        // The en passant window closes before this move's own effects.
        self.clear_double_moved();

        let mut captured = self.relocate(m.piece(), m.to());
        let mut rook = None;

        match m.kind() {
            MoveKind::Standard => {}
            MoveKind::DoubleMove => {
                if let Some(pawn) = self.board.piece_mut(m.piece()) {
                    pawn.set_just_double_moved(true);
                }
                self.double_moved = Some(m.piece());
            }
            MoveKind::EnPassant { captured: victim } => {
                captured = self.capture(victim);
            }
            MoveKind::Castle { rook: rook_id } => {
                rook = self.castle_rook(m, rook_id);
            }
            MoveKind::Promotion => {
                let pending = PendingPromotion {
                    mov: m,
                    color,
                    captured,
                };
                tracing::debug!(mv = %m, "promotion waiting for a choice");
                self.pending = Some(pending);
                return Ok(MoveStatus::PendingPromotion(pending));
            }
        }

        self.board.advance_turn();
        let outcome = MoveOutcome {
            mov: m,
            captured,
            rook,
            promoted_to: None,
            turn: self.current_turn(),
        };
        tracing::debug!(mv = %m, kind = ?m.kind(), turn = %outcome.turn, "applied move");
        Ok(MoveStatus::Applied(outcome))
    }

    /// Completes a pending promotion with the chosen kind and passes the turn.
    pub fn resolve_promotion(&mut self, kind: PromotionKind) -> Result<MoveOutcome, GameError> {
        let pending = self.pending.take().ok_or(GameError::NoPendingPromotion)?;
        let new_kind = kind.piece_kind();
        if let Some(pawn) = self.board.piece_mut(pending.pawn()) {
            pawn.set_kind(new_kind);
        }
        self.board.advance_turn();
        let outcome = MoveOutcome {
            mov: pending.mov,
            captured: pending.captured,
            rook: None,
            promoted_to: Some(new_kind),
            turn: self.current_turn(),
        };
        tracing::debug!(mv = %pending.mov, promoted_to = %new_kind, "resolved promotion");
        Ok(outcome)
    }

    fn clear_double_moved(&mut self) {
        if let Some(id) = self.double_moved.take() {
            if let Some(pawn) = self.board.piece_mut(id) {
                pawn.set_just_double_moved(false);
            }
        }
    }

    /// Moves a piece and reports whatever stood on the destination.
    fn relocate(&mut self, id: PieceId, to: Square) -> Option<Capture> {
        let victim = self.board.occupant(to).filter(|p| p.id() != id).map(|p| Capture {
            piece: p.id(),
            kind: p.kind(),
            square: to,
        });
        self.board.relocate(id, to);
        victim
    }

    /// Removes a piece from play and reports it.
    fn capture(&mut self, id: PieceId) -> Option<Capture> {
        let kind = self.board.piece(id)?.kind();
        let square = self.board.remove(id)?;
        Some(Capture {
            piece: id,
            kind,
            square,
        })
    }

    /// Places the castling rook on the square the king crossed.
    fn castle_rook(&mut self, m: Move, rook: PieceId) -> Option<RookRelocation> {
        let from = self.board.piece(rook)?.square()?;
        let df: i8 = if m.to().file() > m.from().file() { 1 } else { -1 };
        let to = self.board.offset(m.from(), 0, df)?;
        self.board.relocate(rook, to);
        Some(RookRelocation { rook, from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn find_move(game: &Game, from: &str, to: &str) -> Move {
        let id = game.board().occupant_id(sq(from)).expect("piece on square");
        game.valid_moves(id)
            .find_to(sq(to))
            .unwrap_or_else(|| panic!("{}{} is not a candidate", from, to))
    }

    fn play(game: &mut Game, from: &str, to: &str) -> MoveOutcome {
        let m = find_move(game, from, to);
        game.apply_move(m, &mut PromotionKind::Queen).unwrap()
    }

    #[test]
    fn new_game() {
        let game = Game::new();
        assert_eq!(game.current_turn(), Color::White);
        assert_eq!(game.double_moved_pawn(), None);
        assert!(game.pending_promotion().is_none());
        assert_eq!(game.side_moves().len(), 20);
        assert_eq!(game.interactive_pieces().count(), 16);
    }

    #[test]
    fn standard_move_passes_the_turn() {
        let mut game = Game::new();
        let outcome = play(&mut game, "g1", "f3");
        assert_eq!(outcome.turn, Color::Black);
        assert_eq!(outcome.captured, None);
        assert_eq!(game.current_turn(), Color::Black);
        assert!(game.board().is_vacant(sq("g1")));
        assert!(game.piece(outcome.mov.piece()).unwrap().has_moved());
    }

    #[test]
    fn double_move_sets_and_clears_the_flag() {
        let mut game = Game::new();
        let outcome = play(&mut game, "e2", "e4");
        let pawn = outcome.mov.piece();
        assert!(game.piece(pawn).unwrap().just_double_moved());
        assert_eq!(game.double_moved_pawn(), Some(pawn));

        play(&mut game, "g8", "f6");
        assert!(!game.piece(pawn).unwrap().just_double_moved());
        assert_eq!(game.double_moved_pawn(), None);
    }

    #[test]
    fn capture_is_reported() {
        let mut game = Game::new();
        play(&mut game, "e2", "e4");
        play(&mut game, "d7", "d5");
        let outcome = play(&mut game, "e4", "d5");
        let captured = outcome.captured.unwrap();
        assert_eq!(captured.kind, PieceKind::Pawn);
        assert_eq!(captured.square, sq("d5"));
        assert!(game.piece(captured.piece).unwrap().is_captured());
    }

    #[test]
    fn wrong_turn_is_rejected() {
        let mut game = Game::new();
        let m = find_move(&game, "e7", "e5");
        assert_eq!(
            game.begin_move(m),
            Err(GameError::WrongTurn {
                color: Color::Black,
                turn: Color::White
            })
        );
        assert_eq!(game.current_turn(), Color::White);
    }

    #[test]
    fn stale_move_is_rejected() {
        let mut game = Game::new();
        let double = find_move(&game, "e2", "e4");
        play(&mut game, "e2", "e3");
        play(&mut game, "e7", "e6");
        assert_eq!(game.begin_move(double), Err(GameError::NotCandidate(double)));
    }

    #[test]
    fn unknown_piece_is_rejected() {
        let mut game = Game::new();
        let ghost = Move::standard(PieceId::new(500), sq("a3"), sq("a4"));
        assert_eq!(
            game.begin_move(ghost),
            Err(GameError::UnknownPiece(PieceId::new(500)))
        );
    }

    #[test]
    fn promotion_is_two_phase() {
        let board = Board::from_placement("8/4P3/8/8/8/8/8/k6K", Color::White).unwrap();
        let mut game = Game::from_board(board);
        let m = find_move(&game, "e7", "e8");

        let MoveStatus::PendingPromotion(pending) = game.begin_move(m).unwrap() else {
            panic!("expected a pending promotion");
        };
        assert_eq!(pending.square(), sq("e8"));
        assert_eq!(pending.color(), Color::White);
        assert_eq!(game.current_turn(), Color::White);
        assert_eq!(game.board().occupant_id(sq("e8")), Some(pending.pawn()));
        assert!(!game.is_interactive(pending.pawn()));

        let other = find_move(&game, "h1", "h2");
        assert_eq!(
            game.begin_move(other),
            Err(GameError::PromotionPending(sq("e8")))
        );

        let outcome = game.resolve_promotion(PromotionKind::Knight).unwrap();
        assert_eq!(outcome.promoted_to, Some(PieceKind::Knight));
        assert_eq!(outcome.turn, Color::Black);
        let knight = game.piece(pending.pawn()).unwrap();
        assert_eq!(knight.kind(), PieceKind::Knight);
        assert_eq!(knight.color(), Color::White);
        assert_eq!(knight.square(), Some(sq("e8")));
    }

    #[test]
    fn resolve_without_pending_promotion() {
        let mut game = Game::new();
        assert_eq!(
            game.resolve_promotion(PromotionKind::Queen),
            Err(GameError::NoPendingPromotion)
        );
    }

    #[test]
    fn from_board_adopts_double_moved_pawn() {
        let mut game = Game::new();
        let outcome = play(&mut game, "c2", "c4");
        let restored = Game::from_board(game.board().clone());
        assert_eq!(restored.double_moved_pawn(), Some(outcome.mov.piece()));
    }

    #[test]
    fn error_display() {
        let err = GameError::WrongTurn {
            color: Color::Black,
            turn: Color::White,
        };
        assert_eq!(err.to_string(), "Black cannot move while it is White's turn");
        assert_eq!(
            GameError::PromotionPending(sq("e8")).to_string(),
            "the promotion on e8 is still waiting for a choice"
        );
    }
}
