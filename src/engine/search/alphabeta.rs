//! Alpha-beta search in negamax form.
//!
//! The recursion works with scores relative to the side to move. The
//! evaluation and the transposition table are White-relative, so leaf
//! scores and table entries are converted with the role's sign on the way
//! in and out.

use shakmaty::Move;

use crate::core::Rules;
use crate::engine::eval::evaluate;
use crate::engine::tt::{Bound, NodeRole, TTEntry};

use super::error::SearchError;
use super::searcher::Searcher;
use super::types::{DRAW_SCORE, INFINITY, MATE_SCORE, Score};

impl<R: Rules> Searcher<R> {
    /// Searches `pos` to `depth` plies with the side-to-move window
    /// `(alpha, beta)`. Returns the side-to-move score and the move that
    /// produced it. `pos` is left exactly as it was given.
    pub(super) fn negamax(
        &mut self,
        pos: &mut R,
        depth: u32,
        mut alpha: Score,
        beta: Score,
    ) -> Result<(Score, Option<Move>), SearchError> {
        self.stats.nodes += 1;

        let role = NodeRole::of(pos.turn());
        let sign = role.sign();
        let (abs_alpha, abs_beta) = white_window(role, alpha, beta);

        let key = pos.key();
        if let Some((score, mv)) = self.tt.probe(&key, depth, abs_alpha, abs_beta, role) {
            self.stats.tt_hits += 1;
            log::trace!("tt hit at depth {depth}: {score}");
            return Ok((sign * score, mv));
        }

        if depth == 0 {
            return Ok((sign * evaluate(pos), None));
        }

        let mut best_score = -INFINITY;
        let mut best_move: Option<Move> = None;

        let ordered = self.order_moves(pos, depth);
        if ordered.is_empty() {
            best_score = if pos.is_check() {
                -(MATE_SCORE + depth as Score)
            } else {
                DRAW_SCORE
            };
        }

        for mv in ordered {
            pos.push(&mv)?;
            let child = self.negamax(pos, depth - 1, -beta, -alpha);
            pos.pop()?;
            let score = -child?.0;

            if score > best_score {
                best_score = score;
                best_move = Some(mv.clone());
            }

            alpha = alpha.max(best_score);
            if alpha >= beta {
                self.stats.cutoffs += 1;
                log::trace!("killer at depth {depth}: {mv:?}");
                self.killers.set(depth, mv);
                break;
            }
        }

        self.tt.store(
            key,
            TTEntry {
                score: sign * best_score,
                best_move: best_move.clone(),
                depth,
                bound: Bound::classify(sign * best_score, abs_alpha, abs_beta),
            },
        );

        Ok((best_score, best_move))
    }
}

/// Converts a side-to-move window into the White-relative one.
fn white_window(role: NodeRole, alpha: Score, beta: Score) -> (Score, Score) {
    match role {
        NodeRole::Max => (alpha, beta),
        NodeRole::Min => (-beta, -alpha),
    }
}
