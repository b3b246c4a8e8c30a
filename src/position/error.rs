//! Error types for position construction and move application.

use std::fmt;

use super::types::Color;

/// Failure parsing a FEN-style board description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN needs at least a board field and a side-to-move field.
    TooFewParts { found: usize },
    /// Board field must describe exactly 8 ranks.
    WrongRankCount { found: usize },
    /// Invalid piece character in the board field.
    InvalidPiece { ch: char },
    /// A rank describes more than 8 files.
    TooManyFiles { rank: usize },
    /// Side to move must be 'w' or 'b'.
    InvalidSideToMove { found: String },
    /// Invalid castling character.
    InvalidCastling { ch: char },
    /// Invalid en passant square.
    InvalidEnPassant { found: String },
    /// A legal position has exactly one king per color.
    MissingKing { color: Color },
    /// A legal position has exactly one king per color.
    DuplicateKing { color: Color },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN needs at least board and side fields, found {found}")
            }
            FenError::WrongRankCount { found } => {
                write!(f, "FEN board field must have 8 ranks, found {found}")
            }
            FenError::InvalidPiece { ch } => write!(f, "invalid piece character '{ch}' in FEN"),
            FenError::TooManyFiles { rank } => {
                write!(f, "more than 8 files described on rank {rank}")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidCastling { ch } => write!(f, "invalid castling character '{ch}'"),
            FenError::InvalidEnPassant { found } => {
                write!(f, "invalid en passant square '{found}'")
            }
            FenError::MissingKing { color } => write!(f, "no {color} king on the board"),
            FenError::DuplicateKing { color } => write!(f, "more than one {color} king"),
        }
    }
}

impl std::error::Error for FenError {}

/// Failure addressing a board square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    RankOutOfBounds { rank: usize },
    FileOutOfBounds { file: usize },
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RankOutOfBounds { rank } => {
                write!(f, "rank {rank} out of bounds (must be 0-7)")
            }
            SquareError::FileOutOfBounds { file } => {
                write!(f, "file {file} out of bounds (must be 0-7)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Failure applying an externally supplied move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// The move is not in the current legal-move set and was not applied.
    NotLegal { notation: String },
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::NotLegal { notation } => {
                write!(f, "move '{notation}' is not legal in this position")
            }
        }
    }
}

impl std::error::Error for MoveError {}
