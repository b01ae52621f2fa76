//! Searcher: iterative deepening driver and search entry point.

use shakmaty::Move;

use crate::core::{Board, Rules};
use crate::engine::tt::TranspositionTable;

use super::error::{ConfigError, SearchError};
use super::ordering::{self, KillerTable};
use super::pv;
use super::types::{INFINITY, IterationReport, Score, SearchConfig, SearchStats};

/// Depth-limited alpha-beta engine.
///
/// Each instance owns its transposition and killer tables. Both persist
/// across calls until [`Searcher::clear`], so reusing an instance lets
/// later searches start from earlier results.
pub struct Searcher<R: Rules = Board> {
    pub(super) config: SearchConfig,
    pub(super) tt: TranspositionTable<R::Key>,
    pub(super) killers: KillerTable,
    pub(super) stats: SearchStats,
    reports: Vec<IterationReport>,
}

impl<R: Rules> Searcher<R> {
    pub fn new(config: SearchConfig) -> Self {
        Searcher {
            config,
            tt: TranspositionTable::new(),
            killers: KillerTable::new(),
            stats: SearchStats::default(),
            reports: Vec::new(),
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    pub fn set_max_depth(&mut self, max_depth: u32) -> Result<(), ConfigError> {
        self.config = SearchConfig::new(max_depth)?;
        Ok(())
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Reports of the iterations run by the last `select_move`/`search`.
    pub fn reports(&self) -> &[IterationReport] {
        &self.reports
    }

    pub fn tt(&self) -> &TranspositionTable<R::Key> {
        &self.tt
    }

    pub fn killers(&self) -> &KillerTable {
        &self.killers
    }

    pub fn clear(&mut self) {
        self.tt.clear();
        self.killers.clear();
        self.stats = SearchStats::default();
        self.reports.clear();
    }

    /// Picks a move for the side to move, searching up to the configured depth.
    pub fn select_move(&mut self, pos: &mut R) -> Result<Move, SearchError> {
        self.search(pos, self.config.max_depth)
    }

    /// Iterative deepening from depth 1 to `max_depth`. The move of the
    /// deepest iteration that produced one wins.
    pub fn search(&mut self, pos: &mut R, max_depth: u32) -> Result<Move, SearchError> {
        if max_depth == 0 {
            return Err(SearchError::DepthTooLow);
        }
        self.stats = SearchStats::default();
        self.reports.clear();

        let mut chosen: Option<Move> = None;
        for depth in 1..=max_depth {
            let (score, best_move) = self.search_root(pos, depth)?;
            if let Some(mv) = &best_move {
                chosen = Some(mv.clone());
            }

            let pv = pv::principal_variation(&self.tt, pos, depth as usize)?;
            log::debug!(
                "depth {} score {} nodes {} tt_hits {} cutoffs {} pv {}",
                depth,
                score,
                self.stats.nodes,
                self.stats.tt_hits,
                self.stats.cutoffs,
                pv::format_line(&pv),
            );
            self.reports.push(IterationReport {
                depth,
                score,
                best_move,
                nodes: self.stats.nodes,
                pv,
            });
        }

        chosen.ok_or(SearchError::NoLegalMove)
    }

    /// One full-window search at a fixed depth. The score is relative to
    /// the side to move.
    pub fn search_root(
        &mut self,
        pos: &mut R,
        depth: u32,
    ) -> Result<(Score, Option<Move>), SearchError> {
        self.negamax(pos, depth, -INFINITY, INFINITY)
    }

    pub(super) fn order_moves(&self, pos: &R, depth: u32) -> Vec<Move> {
        ordering::order_moves(pos, depth, &self.killers)
    }
}

impl<R: Rules> Default for Searcher<R> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}
