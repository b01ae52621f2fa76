//! Rules-engine binding
//!
//! - [`Rules`]: the narrow contract the search consumes
//! - [`Board`]: `shakmaty` position plus an undo stack

pub mod board;
pub mod rules;

pub use board::{Board, BoardError};
pub use rules::Rules;
