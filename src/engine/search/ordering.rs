//! Move ordering: killer move, then MVV-LVA captures, then quiet moves.

use shakmaty::{Color, Move, Square};

use crate::core::Rules;
use crate::engine::eval::role_value;

use super::types::Score;

/// One killer slot per remaining depth, shared by every node searched at
/// that depth.
#[derive(Clone, Debug, Default)]
pub struct KillerTable {
    slots: Vec<Option<Move>>,
}

impl KillerTable {
    pub fn new() -> Self {
        KillerTable::default()
    }

    pub fn get(&self, depth: u32) -> Option<&Move> {
        self.slots.get(depth as usize).and_then(Option::as_ref)
    }

    /// Records `mv` as the cutoff move for `depth`, replacing the previous one.
    pub fn set(&mut self, depth: u32, mv: Move) {
        let idx = depth as usize;
        if self.slots.len() <= idx {
            self.slots.resize(idx + 1, None);
        }
        self.slots[idx] = Some(mv);
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

/// Orders the legal moves of `pos` for a search at `depth`.
///
/// The result is a permutation of the legal-move set: the killer for
/// `depth` first when it is legal here, then captures by descending
/// MVV-LVA score, then the remaining moves in generator order.
pub fn order_moves<R: Rules + ?Sized>(pos: &R, depth: u32, killers: &KillerTable) -> Vec<Move> {
    let mut moves: Vec<Move> = pos.legal_moves().into_iter().collect();
    let mut ordered = Vec::with_capacity(moves.len());

    if let Some(killer) = killers.get(depth) {
        if let Some(idx) = moves.iter().position(|mv| mv == killer) {
            ordered.push(moves.remove(idx));
        }
    }

    let (mut captures, quiets): (Vec<Move>, Vec<Move>) =
        moves.into_iter().partition(|mv| pos.is_capture(mv));

    // stable, so equal scores keep generator order
    captures.sort_by_key(|mv| std::cmp::Reverse(mvv_lva(pos, mv)));

    ordered.extend(captures);
    ordered.extend(quiets);
    ordered
}

/// `victim * 100 - attacker`, using the evaluation's material values.
pub fn mvv_lva<R: Rules + ?Sized>(pos: &R, mv: &Move) -> Score {
    let victim = victim_square(pos, mv)
        .and_then(|sq| pos.piece_at(sq))
        .map_or(0, |p| role_value(p.role));
    let attacker = mv
        .from()
        .and_then(|sq| pos.piece_at(sq))
        .map_or(0, |p| role_value(p.role));
    victim * 100 - attacker
}

/// Square of the captured piece. For en passant that is one rank behind
/// the destination, seen from the mover.
fn victim_square<R: Rules + ?Sized>(pos: &R, mv: &Move) -> Option<Square> {
    let to = mv.to();
    if !pos.is_en_passant(mv) {
        return Some(to);
    }
    let idx = to as u32;
    let behind = match pos.turn() {
        Color::White => idx.checked_sub(8)?,
        Color::Black => idx + 8,
    };
    (behind < 64).then(|| Square::new(behind))
}
