//! Search: iterative deepening, alpha-beta, move ordering.

mod alphabeta;
mod error;
pub mod ordering;
pub mod pv;
mod searcher;
mod types;

pub use error::{ConfigError, SearchError};
pub use ordering::KillerTable;
pub use searcher::Searcher;
pub use types::{
    DRAW_SCORE, INFINITY, IterationReport, MATE_SCORE, MAX_DEPTH, Preset, Score, SearchConfig,
    SearchStats,
};
