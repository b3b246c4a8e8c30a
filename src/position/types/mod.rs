//! Core value types: pieces, squares, moves, castling rights.

mod castling;
mod moves;
mod piece;
mod square;

pub use castling::CastlingRights;
pub use moves::{Disambiguation, Move};
pub use piece::{Color, Piece};
pub use square::Square;

pub(crate) use moves::MAX_PLY;
pub(crate) use piece::PROMOTION_PIECES;
