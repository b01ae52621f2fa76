//! Chess engine components
//!
//! - Material evaluation
//! - Alpha-beta search with iterative deepening
//! - Transposition table

pub mod eval;
pub mod search;
pub mod tt;

pub use eval::evaluate;
pub use search::{
    ConfigError, INFINITY, MATE_SCORE, Preset, Score, SearchConfig, SearchError, SearchStats,
    Searcher,
};
pub use tt::{Bound, NodeRole, TTEntry, TranspositionTable};
