//! Transposition Table
//!
//! Maps a canonical position key to the last search result for that
//! position. Entries are overwritten on every store and never evicted, so
//! the table grows for the lifetime of the engine that owns it.
//!
//! Scores and bounds are kept White-relative, as the maximizing side sees
//! them. Whether an entry may stand in for a fresh search depends on the
//! role of the probing node, see [`TranspositionTable::probe`].

use std::collections::HashMap;
use std::hash::Hash;

use shakmaty::{Color, Move};

use crate::engine::search::Score;

/// How a stored score relates to the window it was computed under.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Bound {
    /// Score lies strictly inside the window
    Exact,
    /// Score reached beta (fail-high)
    LowerBound,
    /// Score never improved on alpha (fail-low)
    UpperBound,
}

impl Bound {
    /// Classifies a finished node's result against its original window.
    pub fn classify(best: Score, alpha0: Score, beta0: Score) -> Bound {
        if best <= alpha0 {
            Bound::UpperBound
        } else if best >= beta0 {
            Bound::LowerBound
        } else {
            Bound::Exact
        }
    }
}

/// Whether a node maximizes or minimizes the White-relative score.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NodeRole {
    Max,
    Min,
}

impl NodeRole {
    pub fn of(side: Color) -> NodeRole {
        match side {
            Color::White => NodeRole::Max,
            Color::Black => NodeRole::Min,
        }
    }

    /// +1 for the maximizing role, -1 for the minimizing one.
    pub fn sign(self) -> Score {
        match self {
            NodeRole::Max => 1,
            NodeRole::Min => -1,
        }
    }
}

/// A cached search result.
#[derive(Clone, Debug, PartialEq)]
pub struct TTEntry {
    /// White-relative score
    pub score: Score,
    pub best_move: Option<Move>,
    /// Plies searched below the position
    pub depth: u32,
    pub bound: Bound,
}

impl TTEntry {
    /// Whether this entry answers a search of `depth` plies with the
    /// White-relative window `(alpha, beta)` at a node playing `role`.
    pub fn usable(&self, depth: u32, alpha: Score, beta: Score, role: NodeRole) -> bool {
        if self.depth < depth {
            return false;
        }
        match (self.bound, role) {
            (Bound::Exact, _) => true,
            (Bound::UpperBound, NodeRole::Min) => self.score <= alpha,
            (Bound::LowerBound, NodeRole::Min) => self.score < beta,
            (Bound::LowerBound, NodeRole::Max) => self.score >= beta,
            (Bound::UpperBound, NodeRole::Max) => self.score > alpha,
        }
    }
}

/// Transposition table keyed by exact position keys.
pub struct TranspositionTable<K> {
    entries: HashMap<K, TTEntry>,
}

impl<K: Eq + Hash> TranspositionTable<K> {
    pub fn new() -> Self {
        TranspositionTable {
            entries: HashMap::new(),
        }
    }

    /// Returns the cached `(score, move)` if the entry for `key` is valid
    /// for this request.
    pub fn probe(
        &self,
        key: &K,
        depth: u32,
        alpha: Score,
        beta: Score,
        role: NodeRole,
    ) -> Option<(Score, Option<Move>)> {
        self.entries
            .get(key)
            .filter(|entry| entry.usable(depth, alpha, beta, role))
            .map(|entry| (entry.score, entry.best_move.clone()))
    }

    /// Raw entry lookup, no validity rule applied.
    pub fn get(&self, key: &K) -> Option<&TTEntry> {
        self.entries.get(key)
    }

    /// Stores `entry`, replacing whatever was there.
    pub fn store(&mut self, key: K, entry: TTEntry) {
        self.entries.insert(key, entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &TTEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: Eq + Hash> Default for TranspositionTable<K> {
    fn default() -> Self {
        Self::new()
    }
}
