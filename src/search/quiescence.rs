//! Quiescence search: resolve captures before trusting a static eval.

use crate::position::MAX_PLY;

use super::move_order::order_captures;
use super::Searcher;

/// Below the horizon, captures are bounded by consumption: each one removes
/// a piece, so this limit exists only as a backstop.
const MAX_QUIESCENCE_DEPTH: u32 = 32;

/// Largest swing a capture can add on top of its victim's value.
const DELTA_MARGIN: i32 = 200;

impl Searcher<'_> {
    /// Search only captures until the position is quiet, with the static
    /// eval as a stand-pat floor.
    pub(crate) fn quiescence(
        &mut self,
        mut alpha: i32,
        beta: i32,
        ply: usize,
        qdepth: u32,
    ) -> i32 {
        self.nodes += 1;
        if self.check_abort() {
            return 0;
        }

        let stand_pat = self.eval_for_side();
        if ply >= MAX_PLY || qdepth >= MAX_QUIESCENCE_DEPTH {
            return stand_pat;
        }
        if stand_pat >= beta {
            return stand_pat;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut captures: Vec<_> = self
            .pos
            .legal_moves()
            .into_iter()
            .filter(|mv| mv.is_capture())
            .collect();
        order_captures(&mut captures);

        let mut best = stand_pat;
        for mv in &captures {
            let victim = match mv.captured {
                Some(victim) => victim.value(),
                None => 0,
            };

            // Delta pruning: even winning this piece outright cannot lift
            // the score to alpha.
            if stand_pat + victim + DELTA_MARGIN <= alpha {
                continue;
            }

            // Optionally skip captures that lose material on their face.
            if self.params.skip_losing_captures
                && mv.piece.value() > victim
                && !mv.is_promotion()
            {
                continue;
            }

            self.pos.make_move(mv);
            let score = -self.quiescence(-beta, -alpha, ply + 1, qdepth + 1);
            self.pos.undo_move();
            if self.aborted {
                return 0;
            }

            if score > best {
                best = score;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }

        best
    }
}
