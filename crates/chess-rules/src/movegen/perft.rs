//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the candidate-move tree at a given depth.
//! Candidates are not filtered for self-check, so counts match standard
//! legal perft only while no side can be in check. Each promotion branches
//! into all four choices.

use crate::{Game, MoveStatus};
use chess_core::{Move, PromotionKind};

/// Counts the number of leaf nodes at the given depth.
pub fn perft(game: &Game, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0u64;
    for m in &game.side_moves() {
        nodes += perft_move(game, *m, depth);
    }
    nodes
}

/// Perft with divide: the node count under each candidate move at the root.
/// Useful for finding which move a generator change affected.
pub fn perft_divide(game: &Game, depth: u32) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = game
        .side_moves()
        .iter()
        .map(|m| (m.to_notation(), perft_move(game, *m, depth.max(1))))
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

fn perft_move(game: &Game, m: Move, depth: u32) -> u64 {
    let mut child = game.clone();
    match child.begin_move(m) {
        Ok(MoveStatus::Applied(_)) => perft(&child, depth - 1),
        Ok(MoveStatus::PendingPromotion(_)) => PromotionKind::ALL
            .iter()
            .map(|&kind| {
                let mut promoted = child.clone();
                match promoted.resolve_promotion(kind) {
                    Ok(_) => perft(&promoted, depth - 1),
                    Err(_) => 0,
                }
            })
            .sum(),
        // Generated moves are always applicable to the game they came from.
        Err(_) => 0,
    }
}
