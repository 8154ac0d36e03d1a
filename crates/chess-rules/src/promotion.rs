//! The promotion-choice collaborator.

use chess_core::{Color, PromotionKind};

/// Supplies the kind a promoting pawn becomes.
///
/// Implementations must always return one of the four choices; the game
/// has no fallback and no timeout.
pub trait PromotionPrompt {
    /// Chooses the new kind for a pawn of the given color.
    fn choose_promotion_kind(&mut self, color: Color) -> PromotionKind;
}

/// A fixed choice, for automatic promotion.
impl PromotionPrompt for PromotionKind {
    fn choose_promotion_kind(&mut self, _color: Color) -> PromotionKind {
        *self
    }
}

impl<F> PromotionPrompt for F
where
    F: FnMut(Color) -> PromotionKind,
{
    fn choose_promotion_kind(&mut self, color: Color) -> PromotionKind {
        self(color)
    }
}
