//! Principal variation reconstruction from the transposition table.

use std::collections::HashSet;

use shakmaty::{CastlingMode, Move};

use crate::core::{BoardError, Rules};
use crate::engine::tt::TranspositionTable;

/// Follows stored best moves from `pos` for at most `max_plies` plies.
///
/// Stops at a missing entry, a stored move that is not legal here, or a
/// repeated position. Every move pushed on `pos` is popped again.
pub fn principal_variation<R: Rules + ?Sized>(
    tt: &TranspositionTable<R::Key>,
    pos: &mut R,
    max_plies: usize,
) -> Result<Vec<Move>, BoardError> {
    let mut pv = Vec::with_capacity(max_plies);
    let mut seen = HashSet::new();

    while pv.len() < max_plies {
        let key = pos.key();
        let mv = match tt.get(&key).and_then(|e| e.best_move.clone()) {
            Some(mv) => mv,
            None => break,
        };
        if !seen.insert(key) || !pos.legal_moves().contains(&mv) {
            break;
        }
        pos.push(&mv)?;
        pv.push(mv);
    }

    for _ in 0..pv.len() {
        pos.pop()?;
    }
    Ok(pv)
}

/// Space-separated UCI notation.
pub fn format_line(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|m| m.to_uci(CastlingMode::Standard).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
