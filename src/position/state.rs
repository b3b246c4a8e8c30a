//! Canonical board state.

use std::collections::HashMap;

use crate::zobrist::ZOBRIST;

use super::error::MoveError;
use super::types::{CastlingRights, Color, Move, Piece, Square};

/// Everything one ply changed that cannot be reconstructed from the move
/// itself: the prior castling rights, en passant target, and hash, plus the
/// captured piece. One record per ply makes undo an exact inverse of make.
#[derive(Clone, Debug)]
pub(crate) struct UndoRecord {
    pub(crate) captured: Option<(Color, Piece)>,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) hash: u64,
}

/// Restoration data for a null move (search-only, outside the history log).
pub(crate) struct NullUndo {
    pub(crate) en_passant: Option<Square>,
    pub(crate) hash: u64,
}

/// Occurrence counts per position hash, for repetition detection.
#[derive(Clone, Debug, Default)]
pub(crate) struct RepetitionCounts {
    counts: HashMap<u64, u32>,
}

impl RepetitionCounts {
    pub(crate) fn get(&self, hash: u64) -> u32 {
        self.counts.get(&hash).copied().unwrap_or(0)
    }

    pub(crate) fn increment(&mut self, hash: u64) {
        *self.counts.entry(hash).or_insert(0) += 1;
    }

    pub(crate) fn decrement(&mut self, hash: u64) {
        if let Some(count) = self.counts.get_mut(&hash) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&hash);
            }
        }
    }
}

/// Canonical board state with full undo history.
///
/// The position is created once and mutated in place through the search
/// recursion; every [`Position::make_move`] has a matching
/// [`Position::undo_move`] at the same call depth. The derived game-state
/// flags (`in_check`, `checkmate`, `stalemate`, `threefold`) are recomputed
/// by [`Position::legal_moves`] and never set anywhere else.
#[derive(Clone, Debug)]
pub struct Position {
    pub(crate) grid: [[Option<(Color, Piece)>; 8]; 8],
    pub(crate) white_to_move: bool,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    /// Indexed by `Color::index()`. Must always equal the grid cell actually
    /// holding that king.
    pub(crate) kings: [Square; 2],
    pub(crate) hash: u64,
    pub(crate) move_log: Vec<Move>,
    pub(crate) undo_log: Vec<UndoRecord>,
    pub(crate) repetitions: RepetitionCounts,
    // Derived flags, owned by the move generator.
    pub(crate) in_check: bool,
    pub(crate) checkmate: bool,
    pub(crate) stalemate: bool,
    pub(crate) threefold: bool,
}

impl Position {
    /// The standard starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut pos = Position::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, &piece) in back_rank.iter().enumerate() {
            pos.grid[0][file] = Some((Color::White, piece));
            pos.grid[7][file] = Some((Color::Black, piece));
            pos.grid[1][file] = Some((Color::White, Piece::Pawn));
            pos.grid[6][file] = Some((Color::Black, Piece::Pawn));
        }
        pos.kings = [Square(0, 4), Square(7, 4)];
        pos.castling = CastlingRights::all();
        pos.hash = pos.full_hash();
        pos.repetitions.increment(pos.hash);
        pos
    }

    pub(crate) fn empty() -> Self {
        Position {
            grid: [[None; 8]; 8],
            white_to_move: true,
            castling: CastlingRights::none(),
            en_passant: None,
            kings: [Square(0, 0), Square(0, 0)],
            hash: 0,
            move_log: Vec::new(),
            undo_log: Vec::new(),
            repetitions: RepetitionCounts::default(),
            in_check: false,
            checkmate: false,
            stalemate: false,
            threefold: false,
        }
    }

    /// Side to move.
    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        if self.white_to_move {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Contents of a square.
    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.grid[sq.0][sq.1]
    }

    #[inline]
    pub(crate) fn is_empty_square(&self, sq: Square) -> bool {
        self.grid[sq.0][sq.1].is_none()
    }

    /// Location of the given king.
    ///
    /// # Panics
    /// Panics if the tracked location does not hold that king. That means
    /// state maintenance lost the one-king-per-color invariant, which is a
    /// programmer error, never recoverable input trouble.
    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Square {
        let sq = self.kings[color.index()];
        assert!(
            self.grid[sq.0][sq.1] == Some((color, Piece::King)),
            "king invariant violated: {color} king not at {sq}"
        );
        sq
    }

    /// Incrementally maintained Zobrist hash of the position.
    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Current castling rights.
    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// En passant target square, if the previous ply was a double push.
    #[inline]
    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    /// Whether the side to move is in check, per the last generation pass.
    #[inline]
    #[must_use]
    pub fn is_in_check(&self) -> bool {
        self.in_check
    }

    /// Whether the side to move is checkmated, per the last generation pass.
    #[inline]
    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    /// Whether the position is stalemate, per the last generation pass.
    #[inline]
    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        self.stalemate
    }

    /// Whether the current position has occurred three or more times.
    #[inline]
    #[must_use]
    pub fn is_threefold_repetition(&self) -> bool {
        self.threefold
    }

    /// Number of plies played from the constructed position.
    #[inline]
    #[must_use]
    pub fn ply_count(&self) -> usize {
        self.move_log.len()
    }

    /// Moves played so far, oldest first.
    #[must_use]
    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    /// How many times the current position has occurred.
    #[inline]
    pub(crate) fn repetition_count(&self) -> u32 {
        self.repetitions.get(self.hash)
    }

    /// Whether the side to move still has a knight, bishop, rook, or queen.
    /// Gates null-move pruning: zugzwang is common without such material.
    pub(crate) fn has_non_pawn_material(&self, color: Color) -> bool {
        for rank in 0..8 {
            for file in 0..8 {
                if let Some((c, piece)) = self.grid[rank][file] {
                    if c == color && !matches!(piece, Piece::Pawn | Piece::King) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Find the legal move matching `(from, to, promotion)`. A promotion
    /// request without a target kind defaults to queen.
    #[must_use]
    pub fn find_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Option<Move> {
        let moves = self.legal_moves();
        let wants_promotion = moves
            .iter()
            .any(|m| m.from == from && m.to == to && m.is_promotion());
        let promotion = if wants_promotion {
            Some(promotion.unwrap_or(Piece::Queen))
        } else {
            promotion
        };
        moves
            .into_iter()
            .find(|m| m.from == from && m.to == to && m.promotion == promotion)
    }

    /// Apply `mv` only if it is a member of the current legal-move set.
    ///
    /// # Errors
    /// Returns [`MoveError::NotLegal`] without touching the position when
    /// the move is not legal here.
    pub fn make_move_checked(&mut self, mv: &Move) -> Result<(), MoveError> {
        let legal = self.legal_moves();
        match legal.iter().find(|m| *m == mv) {
            Some(found) => {
                // Apply the generator's copy: its tag fields are guaranteed
                // consistent with this position.
                let found = *found;
                self.make_move(&found);
                Ok(())
            }
            None => Err(MoveError::NotLegal {
                notation: mv.to_string(),
            }),
        }
    }

    /// Recompute the hash from scratch. Used at construction and by tests to
    /// cross-check the incremental updates.
    pub(crate) fn full_hash(&self) -> u64 {
        let mut hash = 0u64;
        for rank in 0..8 {
            for file in 0..8 {
                if let Some((color, piece)) = self.grid[rank][file] {
                    hash ^= ZOBRIST.piece_key(color, piece, Square(rank, file));
                }
            }
        }
        if !self.white_to_move {
            hash ^= ZOBRIST.side_key();
        }
        hash ^= ZOBRIST.castling_key(self.castling);
        hash ^= ZOBRIST.en_passant_key(self.en_passant);
        hash
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}
