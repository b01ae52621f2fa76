//! Search configuration, stats, and constants.

use std::fmt;
use std::str::FromStr;

use shakmaty::Move;

use super::error::ConfigError;

pub type Score = i32;

pub const INFINITY: Score = 30000;
pub const MATE_SCORE: Score = 29000;
pub const DRAW_SCORE: Score = 0;
pub const MAX_DEPTH: u32 = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Deepest iteration the driver runs, in plies.
    pub max_depth: u32,
}

impl SearchConfig {
    pub fn new(max_depth: u32) -> Result<Self, ConfigError> {
        if (1..=MAX_DEPTH).contains(&max_depth) {
            Ok(SearchConfig { max_depth })
        } else {
            Err(ConfigError::DepthOutOfRange {
                depth: max_depth,
                max: MAX_DEPTH,
            })
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_depth: 4 }
    }
}

/// Strength presets offered to players.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    Depth2,
    Depth4,
    Depth6,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Depth2, Preset::Depth4, Preset::Depth6];

    pub fn depth(self) -> u32 {
        match self {
            Preset::Depth2 => 2,
            Preset::Depth4 => 4,
            Preset::Depth6 => 6,
        }
    }
}

impl From<Preset> for SearchConfig {
    fn from(preset: Preset) -> Self {
        SearchConfig {
            max_depth: preset.depth(),
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "2" => Ok(Preset::Depth2),
            "medium" | "4" => Ok(Preset::Depth4),
            "hard" | "6" => Ok(Preset::Depth6),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MiniMax({})", self.depth())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub tt_hits: u64,
    pub cutoffs: u64,
}

/// Outcome of one completed iterative-deepening pass.
#[derive(Clone, Debug)]
pub struct IterationReport {
    pub depth: u32,
    /// Root score from the side to move's point of view
    pub score: Score,
    pub best_move: Option<Move>,
    /// Nodes visited so far in this `select_move` call
    pub nodes: u64,
    pub pv: Vec<Move>,
}
