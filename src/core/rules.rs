//! The rules-engine contract consumed by the search.
//!
//! The search never generates or validates moves itself. Everything it
//! needs from a position goes through this trait, and the position is
//! mutated in place with a strict push/pop discipline.

use std::fmt::Debug;
use std::hash::Hash;

use shakmaty::{Bitboard, Color, Move, MoveList, Piece, Square};

use super::board::BoardError;

pub trait Rules {
    /// Canonical position key. Lookups compare keys for exact equality.
    type Key: Clone + Eq + Hash + Debug;

    /// Side to move.
    fn turn(&self) -> Color;

    fn piece_at(&self, square: Square) -> Option<Piece>;

    /// Squares holding a piece of either colour.
    fn occupied(&self) -> Bitboard;

    fn legal_moves(&self) -> MoveList;

    fn is_capture(&self, mv: &Move) -> bool;

    fn is_en_passant(&self, mv: &Move) -> bool;

    /// Whether the side to move is in check.
    fn is_check(&self) -> bool;

    /// Applies `mv` in place. Illegal moves are rejected and leave the
    /// position untouched.
    fn push(&mut self, mv: &Move) -> Result<(), BoardError>;

    /// Undoes the most recently pushed move and returns it.
    fn pop(&mut self) -> Result<Move, BoardError>;

    fn key(&self) -> Self::Key;
}
