//! Search and configuration errors.

use thiserror::Error;

use crate::core::BoardError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("no legal move: the game is already over")]
    NoLegalMove,

    #[error("search depth must be at least 1")]
    DepthTooLow,

    #[error(transparent)]
    Rules(#[from] BoardError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("depth {depth} out of range (1..={max})")]
    DepthOutOfRange { depth: u32, max: u32 },

    #[error("unknown strength preset {0:?} (expected easy, medium or hard)")]
    UnknownPreset(String),
}
