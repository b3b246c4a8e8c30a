//! Board representation, move generation, and game-state tracking.
//!
//! [`Position`] is the single mutable state the whole engine works on: an
//! 8x8 mailbox grid plus side to move, castling rights, en passant target,
//! and the full make/undo history. Move generation is exact; every move
//! returned by [`Position::legal_moves`] is legal under the complete rules
//! of chess (checks, pins, castling legality, en passant discoveries).

pub mod error;
mod fen;
mod make_unmake;
mod movegen;
mod san;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use error::{FenError, MoveError, SquareError};
pub use state::Position;
pub use types::{CastlingRights, Color, Disambiguation, Move, Piece, Square};

pub(crate) use types::MAX_PLY;
