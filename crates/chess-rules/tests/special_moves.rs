//! Special moves played through a full game session.

use chess_core::{Color, Move, MoveKind, PieceKind, PromotionKind, Square};
use chess_rules::{Board, Game, MoveOutcome, MoveStatus};

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

fn play_line(game: &mut Game, line: &[(&str, &str)]) {
    for (from, to) in line {
        play(game, from, to);
    }
}

#[test]
fn initial_board_layout() {
    let game = Game::new();
    let a1 = game.piece_at(0, 0).unwrap();
    let a8 = game.piece_at(7, 0).unwrap();
    assert_eq!((a1.kind(), a1.color()), (PieceKind::Rook, Color::White));
    assert_eq!((a8.kind(), a8.color()), (PieceKind::Rook, Color::Black));
    for file in 0..8 {
        let white = game.piece_at(1, file).unwrap();
        let black = game.piece_at(6, file).unwrap();
        assert_eq!((white.kind(), white.color()), (PieceKind::Pawn, Color::White));
        assert_eq!((black.kind(), black.color()), (PieceKind::Pawn, Color::Black));
        for rank in 2..6 {
            assert!(game.piece_at(rank, file).is_none());
            assert!(game.square_at(rank, file).unwrap().is_empty());
        }
    }
    assert_eq!(game.current_turn(), Color::White);
}

#[test]
fn pawn_loses_double_move_after_moving() {
    let mut game = Game::new();
    let pawn = game.piece_at(1, 0).unwrap().id();
    let kinds: Vec<_> = game.valid_moves(pawn).iter().map(|m| m.kind()).collect();
    assert_eq!(
        kinds.iter().filter(|k| **k == MoveKind::DoubleMove).count(),
        1
    );
    assert_eq!(kinds.iter().filter(|k| **k == MoveKind::Standard).count(), 1);

    play_line(&mut game, &[("a2", "a3"), ("h7", "h6")]);
    let moves = game.valid_moves(pawn);
    assert_eq!(moves.len(), 1);
    assert!(moves.iter().all(|m| m.kind() != MoveKind::DoubleMove));
}

#[test]
fn en_passant_capture() {
    let mut game = Game::new();
    play_line(&mut game, &[("e2", "e4"), ("a7", "a6"), ("e4", "e5")]);
    let advanced = play(&mut game, "d7", "d5").mov.piece();

    let m = find_move(&game, "e5", "d6");
    assert_eq!(m.kind(), MoveKind::EnPassant { captured: advanced });

    let outcome = game.apply_move(m, &mut PromotionKind::Queen).unwrap();
    let captured = outcome.captured.unwrap();
    assert_eq!(captured.piece, advanced);
    assert_eq!(captured.square, sq("d5"));

    let board = game.board();
    assert!(board.is_vacant(sq("d5")));
    assert_eq!(board.occupant_id(sq("d6")), Some(m.piece()));
    assert!(board.piece(advanced).unwrap().is_captured());
    assert!(board.pieces().all(|p| !p.just_double_moved()));
}

#[test]
fn en_passant_expires_after_one_ply() {
    let mut game = Game::new();
    play_line(
        &mut game,
        &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")],
    );
    play_line(&mut game, &[("g1", "f3"), ("h7", "h6")]);

    let pawn = game.board().occupant_id(sq("e5")).unwrap();
    let moves = game.valid_moves(pawn);
    assert!(moves
        .iter()
        .all(|m| !matches!(m.kind(), MoveKind::EnPassant { .. })));
    assert!(game.board().pieces().all(|p| !p.just_double_moved()));
}

#[test]
fn en_passant_ignores_own_pawns_and_single_steps() {
    let mut game = Game::new();
    play_line(
        &mut game,
        &[("e2", "e4"), ("d7", "d6"), ("e4", "e5"), ("d6", "d5")],
    );
    // d5 arrived by two single steps, so there is nothing to take en passant.
    let pawn = game.board().occupant_id(sq("e5")).unwrap();
    assert!(game
        .valid_moves(pawn)
        .iter()
        .all(|m| !matches!(m.kind(), MoveKind::EnPassant { .. })));
}

#[test]
fn promotion_by_capture_keeps_identity() {
    let board = Board::from_placement("1r5k/P7/8/8/8/8/8/K7", Color::White).unwrap();
    let mut game = Game::from_board(board);
    let m = find_move(&game, "a7", "b8");
    assert!(m.is_promotion());
    let pawn = m.piece();
    let has_moved_before = game.piece(pawn).unwrap().has_moved();

    let outcome = game.apply_move(m, &mut |_: Color| PromotionKind::Rook).unwrap();
    assert_eq!(outcome.promoted_to, Some(PieceKind::Rook));
    assert_eq!(outcome.captured.unwrap().kind, PieceKind::Rook);

    let promoted = game.piece(pawn).unwrap();
    assert_eq!(promoted.kind(), PieceKind::Rook);
    assert_eq!(promoted.color(), Color::White);
    assert_eq!(promoted.square(), Some(sq("b8")));
    assert_eq!(promoted.has_moved(), has_moved_before);
    assert_eq!(game.current_turn(), Color::Black);
}

#[test]
fn every_promotion_choice_is_accepted() {
    for kind in PromotionKind::ALL {
        let board = Board::from_placement("8/8/8/8/8/8/p7/7K", Color::Black).unwrap();
        let mut game = Game::from_board(board);
        let m = find_move(&game, "a2", "a1");
        let MoveStatus::PendingPromotion(pending) = game.begin_move(m).unwrap() else {
            panic!("expected a pending promotion");
        };
        assert_eq!(pending.color(), Color::Black);
        game.resolve_promotion(kind).unwrap();
        assert_eq!(
            game.piece(m.piece()).unwrap().kind(),
            kind.piece_kind()
        );
        assert_eq!(game.current_turn(), Color::White);
    }
}

#[test]
fn castling_kingside_moves_king_and_rook() {
    let mut game = Game::new();
    play_line(
        &mut game,
        &[
            ("e2", "e4"),
            ("e7", "e5"),
            ("g1", "f3"),
            ("b8", "c6"),
            ("f1", "c4"),
            ("g8", "f6"),
        ],
    );
    let m = find_move(&game, "e1", "g1");
    let rook_id = game.board().occupant_id(sq("h1")).unwrap();
    assert_eq!(m.kind(), MoveKind::Castle { rook: rook_id });

    let outcome = game.apply_move(m, &mut PromotionKind::Queen).unwrap();
    let rook = outcome.rook.unwrap();
    assert_eq!((rook.rook, rook.from, rook.to), (rook_id, sq("h1"), sq("f1")));

    let board = game.board();
    assert_eq!(board.occupant_id(sq("g1")), Some(m.piece()));
    assert_eq!(board.occupant_id(sq("f1")), Some(rook_id));
    assert!(board.is_vacant(sq("e1")));
    assert!(board.is_vacant(sq("h1")));
    assert!(board.piece(rook_id).unwrap().has_moved());
    // One flip for the whole castle.
    assert_eq!(game.current_turn(), Color::Black);
}

#[test]
fn castling_queenside_for_black() {
    let board = Board::from_placement("r3k2r/8/8/8/8/8/8/4K3", Color::Black).unwrap();
    let mut game = Game::from_board(board);
    let outcome = play(&mut game, "e8", "c8");
    let rook = outcome.rook.unwrap();
    assert_eq!((rook.from, rook.to), (sq("a8"), sq("d8")));
    assert_eq!(game.board().occupant(sq("c8")).unwrap().kind(), PieceKind::King);
    assert_eq!(game.current_turn(), Color::White);
}

#[test]
fn no_castling_after_rook_moved() {
    let board = Board::from_placement("4k3/8/8/8/8/8/8/R3K2R", Color::White).unwrap();
    let mut game = Game::from_board(board);
    play_line(
        &mut game,
        &[("h1", "h2"), ("e8", "d8"), ("h2", "h1"), ("d8", "e8")],
    );
    let king = game.board().occupant_id(sq("e1")).unwrap();
    let castles: Vec<_> = game
        .valid_moves(king)
        .iter()
        .filter(|m| m.is_castle())
        .map(|m| m.to())
        .collect();
    assert_eq!(castles, [sq("c1")]);
}

#[test]
fn no_castling_after_king_moved() {
    let board = Board::from_placement("4k3/8/8/8/8/8/8/R3K2R", Color::White).unwrap();
    let mut game = Game::from_board(board);
    play_line(
        &mut game,
        &[("e1", "e2"), ("e8", "d8"), ("e2", "e1"), ("d8", "e8")],
    );
    let king = game.board().occupant_id(sq("e1")).unwrap();
    assert!(game.valid_moves(king).iter().all(|m| !m.is_castle()));
}

#[test]
fn no_castling_through_pieces() {
    let game = Game::new();
    let king = game.piece_at(0, 4).unwrap().id();
    assert!(game.valid_moves(king).is_empty());
}

#[test]
fn turn_alternates_over_mixed_moves() {
    let mut game = Game::new();
    let line = [
        ("e2", "e4"),
        ("d7", "d5"),
        ("e4", "d5"),
        ("d8", "d5"),
        ("b1", "c3"),
        ("d5", "a5"),
    ];
    let mut expected = Color::White;
    for (from, to) in line {
        assert_eq!(game.current_turn(), expected);
        play(&mut game, from, to);
        expected = expected.opposite();
    }
    assert_eq!(game.current_turn(), Color::White);
}

#[test]
fn snapshot_roundtrips_through_json() {
    let mut game = Game::new();
    play_line(&mut game, &[("e2", "e4"), ("c7", "c5")]);
    let json = serde_json::to_string(game.board()).unwrap();
    let restored: Board = serde_json::from_str(&json).unwrap();
    assert_eq!(&restored, game.board());
    assert_eq!(
        Game::from_board(restored).double_moved_pawn(),
        game.double_moved_pawn()
    );
}
