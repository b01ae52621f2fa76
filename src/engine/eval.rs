//! Material evaluation.
//!
//! Scores are White-positive: each white piece adds its value, each black
//! piece subtracts it. Kings are worth nothing.

use shakmaty::{Color, Role};

use crate::core::Rules;
use crate::engine::search::Score;

pub const PAWN_VALUE: Score = 5;
pub const KNIGHT_VALUE: Score = 30;
pub const BISHOP_VALUE: Score = 45;
pub const ROOK_VALUE: Score = 60;
pub const QUEEN_VALUE: Score = 90;

/// Material value of a piece kind.
pub fn role_value(role: Role) -> Score {
    match role {
        Role::Pawn => PAWN_VALUE,
        Role::Knight => KNIGHT_VALUE,
        Role::Bishop => BISHOP_VALUE,
        Role::Rook => ROOK_VALUE,
        Role::Queen => QUEEN_VALUE,
        Role::King => 0,
    }
}

/// Static material balance of `pos`, White-positive.
pub fn evaluate<R: Rules + ?Sized>(pos: &R) -> Score {
    pos.occupied()
        .into_iter()
        .filter_map(|sq| pos.piece_at(sq))
        .map(|piece| match piece.color {
            Color::White => role_value(piece.role),
            Color::Black => -role_value(piece.role),
        })
        .sum()
}
