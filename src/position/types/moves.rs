//! Move representation.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::piece::Piece;
use super::square::Square;

/// Minimal source annotation needed to distinguish a move in algebraic
/// notation when another piece of the same kind can reach the same square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Disambiguation {
    #[default]
    None,
    File,
    Rank,
    Both,
}

/// One ply transition, fully tagged. Built by the move generator and
/// immutable afterwards (the generator fills `disambiguation` in a final
/// pass before handing the list out).
///
/// Equality, ordering identity, and hashing use only the 4-coordinate tuple
/// plus the promotion kind; the remaining fields are derived from the
/// position the move was generated for.
#[derive(Clone, Copy, Debug)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// Kind of the piece being moved.
    pub piece: Piece,
    /// Kind of the piece captured, if any. For en passant this is the pawn
    /// removed from the bypassed square, not the (empty) destination.
    pub captured: Option<Piece>,
    /// Promotion target, present only for pawn moves reaching the far rank.
    pub promotion: Option<Piece>,
    pub is_en_passant: bool,
    pub is_castle: bool,
    /// Notation-only annotation, never part of move identity.
    pub disambiguation: Disambiguation,
}

impl Move {
    /// A non-capturing move.
    #[must_use]
    pub(crate) fn quiet(from: Square, to: Square, piece: Piece) -> Self {
        Move {
            from,
            to,
            piece,
            captured: None,
            promotion: None,
            is_en_passant: false,
            is_castle: false,
            disambiguation: Disambiguation::None,
        }
    }

    /// A capture of `victim` on the destination square.
    #[must_use]
    pub(crate) fn capture(from: Square, to: Square, piece: Piece, victim: Piece) -> Self {
        Move {
            captured: Some(victim),
            ..Move::quiet(from, to, piece)
        }
    }

    /// A pawn promotion, optionally capturing on the destination.
    #[must_use]
    pub(crate) fn promotion(
        from: Square,
        to: Square,
        promoted: Piece,
        victim: Option<Piece>,
    ) -> Self {
        Move {
            captured: victim,
            promotion: Some(promoted),
            ..Move::quiet(from, to, Piece::Pawn)
        }
    }

    /// An en passant capture; the victim pawn sits beside the start square.
    #[must_use]
    pub(crate) fn en_passant(from: Square, to: Square) -> Self {
        Move {
            captured: Some(Piece::Pawn),
            is_en_passant: true,
            ..Move::quiet(from, to, Piece::Pawn)
        }
    }

    /// A castling move, described by the king's two-square displacement.
    #[must_use]
    pub(crate) fn castle(from: Square, to: Square) -> Self {
        Move {
            is_castle: true,
            ..Move::quiet(from, to, Piece::King)
        }
    }

    /// True if this move removes an enemy piece (including en passant).
    #[inline]
    #[must_use]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// True if this move is a pawn promotion.
    #[inline]
    #[must_use]
    pub const fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// True if this move is neither a capture nor a promotion.
    #[inline]
    #[must_use]
    pub const fn is_quiet(&self) -> bool {
        self.captured.is_none() && self.promotion.is_none()
    }

    /// True for kingside castling (king moves toward the h-file).
    #[inline]
    #[must_use]
    pub const fn is_castle_kingside(&self) -> bool {
        self.is_castle && self.to.1 > self.from.1
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.promotion == other.promotion
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
        self.promotion.hash(state);
    }
}

impl fmt::Display for Move {
    /// Coordinate notation: `e2e4`, `e7e8q`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promo) = self.promotion {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

/// Deepest recursion the search supports, in plies.
pub(crate) const MAX_PLY: usize = 128;
