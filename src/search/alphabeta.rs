//! The recursive negamax core.

use crate::eval::evaluate;
use crate::position::MAX_PLY;
use crate::tt::Bound;

use super::move_order::order_moves;
use super::{Searcher, INFINITY, MATE_SCORE, MATE_THRESHOLD, STALEMATE_SCORE};

impl Searcher<'_> {
    /// Negamax with alpha-beta. Scores are from the side to move at this
    /// node; `ply` is the distance from root. Returns garbage once the
    /// search has aborted, which the caller detects through `self.aborted`.
    pub(crate) fn alphabeta(
        &mut self,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        ply: usize,
        allow_null: bool,
    ) -> i32 {
        self.nodes += 1;
        if self.check_abort() {
            return 0;
        }

        // The root position already counts once, so a second occurrence
        // inside the tree means the opponent can force the repetition.
        if ply > 0 && self.pos.repetition_count() >= 2 {
            return STALEMATE_SCORE;
        }
        if ply >= MAX_PLY {
            return self.eval_for_side();
        }

        // Mate-distance pruning: no line from here can beat a mate already
        // priced into the window.
        if ply > 0 {
            alpha = alpha.max(-(MATE_SCORE - ply as i32));
            beta = beta.min(MATE_SCORE - ply as i32 - 1);
            if alpha >= beta {
                return alpha;
            }
        }

        let hash = self.pos.hash();
        if self.params.use_tt && ply > 0 {
            if let Some(probe) = self.state.tt.lookup(hash, depth, ply) {
                match probe.bound {
                    Bound::Exact => return probe.score,
                    Bound::Lower if probe.score >= beta => return probe.score,
                    Bound::Upper if probe.score <= alpha => return probe.score,
                    _ => {}
                }
            }
        }

        let side = self.pos.side_to_move();
        let in_check = self.pos.in_check_now(side);

        if depth == 0 {
            return if self.params.use_quiescence {
                self.quiescence(alpha, beta, ply, 0)
            } else {
                self.eval_for_side()
            };
        }

        let is_pv = beta - alpha > 1;
        if !in_check && !is_pv && beta.abs() < MATE_THRESHOLD {
            let static_eval = self.eval_for_side();

            // Reverse futility: eval so far above beta that a quiet reply
            // cannot bring it back down within the remaining depth.
            if self.params.use_rfp
                && depth <= 3
                && static_eval - self.params.rfp_margin * depth as i32 >= beta
            {
                return static_eval;
            }

            // Razoring: eval so far below alpha near the horizon that only
            // a tactic could save it; verify with quiescence.
            if self.params.use_razoring
                && self.params.use_quiescence
                && depth <= 3
                && static_eval + self.params.razor_margin * depth as i32 <= alpha
            {
                let verified = self.quiescence(alpha, beta, ply, 0);
                if self.aborted || verified <= alpha {
                    return verified;
                }
            }

            // Null move: hand the opponent a free tenpo; if they still
            // cannot reach beta, a real move will not either. Unsound in
            // zugzwang, hence the non-pawn-material gate.
            if self.params.use_null_move
                && allow_null
                && depth >= 3
                && static_eval >= beta
                && self.pos.has_non_pawn_material(side)
            {
                let reduction = 2 + depth / 4;
                let undo = self.pos.make_null_move();
                let score = -self.alphabeta(
                    depth.saturating_sub(1 + reduction),
                    -beta,
                    -beta + 1,
                    ply + 1,
                    false,
                );
                self.pos.undo_null_move(undo);
                if self.aborted {
                    return 0;
                }
                if score >= beta {
                    // Never trust a null-move mate.
                    return if score > MATE_THRESHOLD { beta } else { score };
                }
            }
        }

        let mut moves = self.pos.legal_moves();
        if moves.is_empty() {
            return if in_check {
                -(MATE_SCORE - ply as i32)
            } else {
                STALEMATE_SCORE
            };
        }

        let hash_move = if self.params.use_tt {
            self.state.tt.hash_move(hash)
        } else {
            None
        };
        order_moves(
            &mut moves,
            hash_move,
            &self.state.killers,
            &self.state.history,
            ply,
        );

        let original_alpha = alpha;
        let mut best_score = -INFINITY;
        let mut best_move = None;

        for (index, mv) in moves.iter().enumerate() {
            self.pos.make_move(mv);
            let gives_check = self.pos.in_check_now(self.pos.side_to_move());

            let score = if index == 0 {
                -self.alphabeta(depth - 1, -beta, -alpha, ply + 1, true)
            } else {
                // Principal variation search: probe with a null window, and
                // reduce quiet late moves first.
                let mut reduced = depth - 1;
                if self.params.use_lmr
                    && depth >= 3
                    && index >= 3
                    && mv.is_quiet()
                    && !in_check
                    && !gives_check
                {
                    reduced = depth - 2 - (index as u32 / 8).min(depth - 2);
                }

                let mut score =
                    -self.alphabeta(reduced, -alpha - 1, -alpha, ply + 1, true);
                if score > alpha && reduced < depth - 1 && !self.aborted {
                    score = -self.alphabeta(depth - 1, -alpha - 1, -alpha, ply + 1, true);
                }
                if score > alpha && score < beta && !self.aborted {
                    score = -self.alphabeta(depth - 1, -beta, -alpha, ply + 1, true);
                }
                score
            };

            self.pos.undo_move();
            if self.aborted {
                return 0;
            }

            if score > best_score {
                best_score = score;
                best_move = Some(*mv);
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                if mv.is_quiet() {
                    self.state.killers.insert(ply, *mv);
                    self.state.history.reward(mv.piece, mv.to, depth);
                }
                break;
            }
        }

        if self.params.use_tt {
            let bound = if best_score >= beta {
                Bound::Lower
            } else if best_score <= original_alpha {
                Bound::Upper
            } else {
                Bound::Exact
            };
            self.state.tt.store(hash, depth, best_score, bound, best_move, ply);
        }

        best_score
    }

    /// Static evaluation from the side to move's point of view.
    #[inline]
    pub(crate) fn eval_for_side(&self) -> i32 {
        self.pos.side_to_move().sign() * evaluate(self.pos)
    }
}
