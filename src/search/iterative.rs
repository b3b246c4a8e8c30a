//! Iterative deepening driver with aspiration windows.

use std::time::Instant;

use crate::position::Move;
use crate::tt::Bound;

use super::move_order::order_moves;
use super::{SearchResult, Searcher, INFINITY, MATE_SCORE, MATE_THRESHOLD, STALEMATE_SCORE};

impl Searcher<'_> {
    /// Drive the search to completion and return the best move found.
    pub(crate) fn run(&mut self) -> SearchResult {
        self.state.tt.new_generation();
        self.state.history.decay();

        let root_moves = self.pos.legal_moves();
        if root_moves.is_empty() {
            let score = if self.pos.is_in_check() {
                -MATE_SCORE
            } else {
                STALEMATE_SCORE
            };
            return SearchResult {
                best_move: None,
                score,
                depth: 0,
                nodes: 0,
            };
        }

        // Fallback so an early abort still answers with a legal move.
        let mut best_move = root_moves[0];
        let mut best_score = -INFINITY;

        if !self.use_iterative_deepening {
            self.completed_depth = 1;
            let (score, mv) = self.root_search(self.max_depth, -INFINITY, INFINITY);
            return SearchResult {
                best_move: Some(mv.unwrap_or(best_move)),
                score,
                depth: self.max_depth,
                nodes: self.nodes,
            };
        }

        for depth in 1..=self.max_depth {
            let score = if self.params.use_aspiration
                && depth >= 3
                && best_score.abs() < MATE_THRESHOLD
            {
                self.aspiration(depth, best_score, &mut best_move)
            } else {
                let (score, mv) = self.root_search(depth, -INFINITY, INFINITY);
                if let Some(mv) = mv {
                    if !self.aborted {
                        best_move = mv;
                    }
                }
                score
            };
            if self.aborted {
                break;
            }

            best_score = score;
            self.completed_depth = depth;
            log::debug!(
                "depth {depth}: score {best_score} best {best_move} nodes {}",
                self.nodes
            );

            // A forced mate does not improve with more depth.
            if best_score.abs() >= MATE_THRESHOLD {
                break;
            }
            // Starting another iteration this late rarely finishes it.
            if Instant::now() >= self.soft_deadline {
                break;
            }
            if root_moves.len() == 1 {
                break;
            }
        }

        SearchResult {
            best_move: Some(best_move),
            score: best_score,
            depth: self.completed_depth,
            nodes: self.nodes,
        }
    }

    /// Search `depth` with a window around the previous iteration's score,
    /// widening on failure until the result fits.
    fn aspiration(&mut self, depth: u32, previous: i32, best_move: &mut Move) -> i32 {
        let mut delta = self.params.aspiration_window.max(10);
        let mut alpha = previous - delta;
        let mut beta = previous + delta;

        loop {
            let (score, mv) = self.root_search(depth, alpha, beta);
            if self.aborted {
                return score;
            }
            if score <= alpha {
                // Fail low: the move that produced `previous` is suspect,
                // keep the old best until a full-window result lands.
                alpha -= delta;
                delta *= 2;
            } else if score >= beta {
                if let Some(mv) = mv {
                    *best_move = mv;
                }
                beta += delta;
                delta *= 2;
            } else {
                if let Some(mv) = mv {
                    *best_move = mv;
                }
                return score;
            }

            if delta >= INFINITY / 2 || alpha <= -INFINITY || beta >= INFINITY {
                alpha = -INFINITY;
                beta = INFINITY;
            }
        }
    }

    /// One full-depth pass over the root moves. Returns the best score and
    /// move seen so far, which on abort is a usable partial result.
    fn root_search(&mut self, depth: u32, mut alpha: i32, beta: i32) -> (i32, Option<Move>) {
        let hash = self.pos.hash();
        let mut moves = self.pos.legal_moves();

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
            0,
        );

        let original_alpha = alpha;
        let mut best_score = -INFINITY;
        let mut best_move = None;

        for (index, mv) in moves.iter().enumerate() {
            self.pos.make_move(mv);
            let score = if index == 0 {
                -self.alphabeta(depth - 1, -beta, -alpha, 1, true)
            } else {
                let mut score = -self.alphabeta(depth - 1, -alpha - 1, -alpha, 1, true);
                if score > alpha && score < beta && !self.aborted {
                    score = -self.alphabeta(depth - 1, -beta, -alpha, 1, true);
                }
                score
            };
            self.pos.undo_move();
            if self.aborted {
                return (best_score, best_move);
            }

            if score > best_score {
                best_score = score;
                best_move = Some(*mv);
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
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
            self.state.tt.store(hash, depth, best_score, bound, best_move, 0);
        }

        (best_score, best_move)
    }
}
