//! Castling rights bookkeeping.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;

const WHITE_KINGSIDE: u8 = 1 << 0;
const WHITE_QUEENSIDE: u8 = 1 << 1;
const BLACK_KINGSIDE: u8 = 1 << 2;
const BLACK_QUEENSIDE: u8 = 1 << 3;

/// Four independent castling rights packed into a bitmask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// No right remaining for either side.
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    /// All four rights, as in the starting position.
    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(WHITE_KINGSIDE | WHITE_QUEENSIDE | BLACK_KINGSIDE | BLACK_QUEENSIDE)
    }

    /// Whether the given side may still castle on the given wing.
    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, kingside: bool) -> bool {
        self.0 & Self::bit(color, kingside) != 0
    }

    #[inline]
    pub(crate) fn grant(&mut self, color: Color, kingside: bool) {
        self.0 |= Self::bit(color, kingside);
    }

    #[inline]
    pub(crate) fn revoke(&mut self, color: Color, kingside: bool) {
        self.0 &= !Self::bit(color, kingside);
    }

    #[inline]
    pub(crate) fn revoke_both(&mut self, color: Color) {
        self.revoke(color, true);
        self.revoke(color, false);
    }

    /// Raw bitmask, used to index the Zobrist castling keys.
    #[inline]
    #[must_use]
    pub(crate) const fn as_u8(self) -> u8 {
        self.0
    }

    #[inline]
    const fn bit(color: Color, kingside: bool) -> u8 {
        match (color, kingside) {
            (Color::White, true) => WHITE_KINGSIDE,
            (Color::White, false) => WHITE_QUEENSIDE,
            (Color::Black, true) => BLACK_KINGSIDE,
            (Color::Black, false) => BLACK_QUEENSIDE,
        }
    }
}
