//! Zobrist hashing: a fixed per-piece-per-square random-value XOR scheme.
//!
//! Keys come from a seeded RNG so hashes are stable across runs. The hash is
//! maintained incrementally by make/undo rather than recomputed per query.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::position::{CastlingRights, Color, Piece, Square};

pub(crate) struct ZobristKeys {
    /// piece[color][piece kind][square index]
    piece: [[[u64; 64]; 6]; 2],
    black_to_move: u64,
    /// One key per castling-right bit, indexed by bit position.
    castling: [u64; 4],
    /// Only the file of the en passant target matters.
    en_passant_file: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        // Fixed seed for reproducible hashes.
        let mut rng = StdRng::seed_from_u64(0x9E37_79B9_7F4A_7C15);

        let mut piece = [[[0u64; 64]; 6]; 2];
        for color in &mut piece {
            for kind in color.iter_mut() {
                for key in kind.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let black_to_move = rng.gen();

        let mut castling = [0u64; 4];
        for key in &mut castling {
            *key = rng.gen();
        }

        let mut en_passant_file = [0u64; 8];
        for key in &mut en_passant_file {
            *key = rng.gen();
        }

        ZobristKeys {
            piece,
            black_to_move,
            castling,
            en_passant_file,
        }
    }

    #[inline]
    pub(crate) fn piece_key(&self, color: Color, piece: Piece, sq: Square) -> u64 {
        self.piece[color.index()][piece.index()][sq.index()]
    }

    #[inline]
    pub(crate) fn side_key(&self) -> u64 {
        self.black_to_move
    }

    /// XOR-combination of the keys for every right set in `rights`.
    #[inline]
    pub(crate) fn castling_key(&self, rights: CastlingRights) -> u64 {
        let mut hash = 0;
        let bits = rights.as_u8();
        for (i, key) in self.castling.iter().enumerate() {
            if bits & (1 << i) != 0 {
                hash ^= key;
            }
        }
        hash
    }

    #[inline]
    pub(crate) fn en_passant_key(&self, target: Option<Square>) -> u64 {
        match target {
            Some(sq) => self.en_passant_file[sq.file()],
            None => 0,
        }
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);
