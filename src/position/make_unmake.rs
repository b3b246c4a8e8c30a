//! Applying and reverting moves, with incremental hash maintenance.

use crate::zobrist::ZOBRIST;

use super::state::{NullUndo, Position, UndoRecord};
use super::types::{Color, Move, Piece, Square};

impl Position {
    /// Apply a legal move in place.
    ///
    /// `mv` must come from this position's [`Position::legal_moves`]; the
    /// method trusts the move's tag fields. Use
    /// [`Position::make_move_checked`] for externally supplied moves.
    pub fn make_move(&mut self, mv: &Move) {
        let mover = self.side_to_move();
        let opponent = mover.opponent();

        self.undo_log.push(UndoRecord {
            captured: mv.captured.map(|p| (opponent, p)),
            castling: self.castling,
            en_passant: self.en_passant,
            hash: self.hash,
        });

        let mut hash = self.hash;
        hash ^= ZOBRIST.en_passant_key(self.en_passant);
        hash ^= ZOBRIST.castling_key(self.castling);

        if let Some(victim) = mv.captured {
            // En passant removes the pawn beside the start square, not the
            // (empty) destination.
            let victim_sq = if mv.is_en_passant {
                Square(mv.from.0, mv.to.1)
            } else {
                mv.to
            };
            debug_assert_eq!(
                self.grid[victim_sq.0][victim_sq.1],
                Some((opponent, victim)),
                "capture tag inconsistent with board at {victim_sq}"
            );
            self.grid[victim_sq.0][victim_sq.1] = None;
            hash ^= ZOBRIST.piece_key(opponent, victim, victim_sq);
        }

        let placed = mv.promotion.unwrap_or(mv.piece);
        self.grid[mv.from.0][mv.from.1] = None;
        self.grid[mv.to.0][mv.to.1] = Some((mover, placed));
        hash ^= ZOBRIST.piece_key(mover, mv.piece, mv.from);
        hash ^= ZOBRIST.piece_key(mover, placed, mv.to);

        if mv.piece == Piece::King {
            self.kings[mover.index()] = mv.to;
            self.castling.revoke_both(mover);
        }

        if mv.is_castle {
            let rank = mv.from.0;
            let (rook_from, rook_to) = if mv.is_castle_kingside() {
                (Square(rank, 7), Square(rank, 5))
            } else {
                (Square(rank, 0), Square(rank, 3))
            };
            self.grid[rook_from.0][rook_from.1] = None;
            self.grid[rook_to.0][rook_to.1] = Some((mover, Piece::Rook));
            hash ^= ZOBRIST.piece_key(mover, Piece::Rook, rook_from);
            hash ^= ZOBRIST.piece_key(mover, Piece::Rook, rook_to);
        }

        if mv.piece == Piece::Rook {
            self.clear_rook_right(mover, mv.from);
        }
        // Capturing a rook that never left home kills that right too,
        // otherwise a later castle could "use" a rook that is gone.
        if mv.captured == Some(Piece::Rook) && !mv.is_en_passant {
            self.clear_rook_right(opponent, mv.to);
        }

        self.en_passant = if mv.piece == Piece::Pawn && mv.from.0.abs_diff(mv.to.0) == 2 {
            Some(Square((mv.from.0 + mv.to.0) / 2, mv.from.1))
        } else {
            None
        };

        hash ^= ZOBRIST.castling_key(self.castling);
        hash ^= ZOBRIST.en_passant_key(self.en_passant);
        hash ^= ZOBRIST.side_key();

        self.white_to_move = !self.white_to_move;
        self.hash = hash;
        self.move_log.push(*mv);
        self.repetitions.increment(hash);
    }

    /// Revert the most recent move, restoring the exact prior state.
    /// Returns the move that was undone, or `None` with nothing to undo.
    pub fn undo_move(&mut self) -> Option<Move> {
        // Both logs grow in lockstep inside make_move.
        let (mv, record) = match (self.move_log.pop(), self.undo_log.pop()) {
            (Some(mv), Some(record)) => (mv, record),
            _ => return None,
        };

        self.repetitions.decrement(self.hash);
        self.white_to_move = !self.white_to_move;
        let mover = self.side_to_move();

        self.grid[mv.to.0][mv.to.1] = None;
        self.grid[mv.from.0][mv.from.1] = Some((mover, mv.piece));
        if mv.piece == Piece::King {
            self.kings[mover.index()] = mv.from;
        }

        if let Some((color, victim)) = record.captured {
            let victim_sq = if mv.is_en_passant {
                Square(mv.from.0, mv.to.1)
            } else {
                mv.to
            };
            self.grid[victim_sq.0][victim_sq.1] = Some((color, victim));
        }

        if mv.is_castle {
            let rank = mv.from.0;
            let (rook_from, rook_to) = if mv.is_castle_kingside() {
                (Square(rank, 7), Square(rank, 5))
            } else {
                (Square(rank, 0), Square(rank, 3))
            };
            self.grid[rook_to.0][rook_to.1] = None;
            self.grid[rook_from.0][rook_from.1] = Some((mover, Piece::Rook));
        }

        self.castling = record.castling;
        self.en_passant = record.en_passant;
        self.hash = record.hash;
        Some(mv)
    }

    /// Pass the turn without moving. Search-only; null moves never enter the
    /// move log or the repetition table, so the caller must pair each call
    /// with [`Position::undo_null_move`].
    pub(crate) fn make_null_move(&mut self) -> NullUndo {
        let undo = NullUndo {
            en_passant: self.en_passant,
            hash: self.hash,
        };
        self.hash ^= ZOBRIST.en_passant_key(self.en_passant);
        self.hash ^= ZOBRIST.side_key();
        self.en_passant = None;
        self.white_to_move = !self.white_to_move;
        undo
    }

    /// Revert a null move.
    pub(crate) fn undo_null_move(&mut self, undo: NullUndo) {
        self.white_to_move = !self.white_to_move;
        self.en_passant = undo.en_passant;
        self.hash = undo.hash;
    }

    /// Drop the right for the wing whose rook sits on `sq` at the start of
    /// the game, if `sq` is one of `color`'s corner squares.
    fn clear_rook_right(&mut self, color: Color, sq: Square) {
        if sq.0 != color.back_rank() {
            return;
        }
        match sq.1 {
            0 => self.castling.revoke(color, false),
            7 => self.castling.revoke(color, true),
            _ => {}
        }
    }
}
