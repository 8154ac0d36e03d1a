//! Core types for the chess rules engine.
//!
//! This crate provides the value types shared across the workspace:
//! - [`Color`], [`PieceKind`] and [`PromotionKind`] for piece identity
//! - [`PieceId`] for stable piece handles
//! - [`Square`] for board coordinates on any rectangular board
//! - [`Move`] and [`MoveKind`] for generated moves
//! - [`Placement`] for piece-placement text

mod color;
mod mov;
mod piece;
mod placement;
mod square;

pub use color::{Color, ColorError};
pub use mov::{Move, MoveKind};
pub use piece::{PieceId, PieceKind, PromotionKind, PromotionKindError};
pub use placement::{Placement, PlacementError};
pub use square::Square;
