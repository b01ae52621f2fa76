pub mod core;
pub mod engine;
pub mod uci;

pub use crate::core::{Board, BoardError, Rules};
pub use engine::eval::evaluate;
pub use engine::search::{Preset, SearchConfig, SearchError, Searcher};
pub use shakmaty;
pub use uci::UCI;
