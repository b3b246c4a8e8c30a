//! Board square addressing.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::position::error::SquareError;

/// A square on the board as (rank, file), rank 0 = rank 1, file 0 = file a.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(pub usize, pub usize);

impl Square {
    /// Create a square with bounds checking.
    #[must_use]
    pub fn new(rank: usize, file: usize) -> Option<Self> {
        if rank < 8 && file < 8 {
            Some(Square(rank, file))
        } else {
            None
        }
    }

    /// Rank index (0-7, where 0 = rank 1).
    #[inline]
    #[must_use]
    pub const fn rank(self) -> usize {
        self.0
    }

    /// File index (0-7, where 0 = file a).
    #[inline]
    #[must_use]
    pub const fn file(self) -> usize {
        self.1
    }

    /// Linear index 0-63 (a1=0, b1=1, ..., h8=63), used for hashing and
    /// heuristic tables.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 * 8 + self.1
    }

    /// The square displaced by (dr, df), or `None` if off the board.
    #[inline]
    #[must_use]
    pub fn offset(self, dr: isize, df: isize) -> Option<Self> {
        let rank = self.0 as isize + dr;
        let file = self.1 as isize + df;
        if (0..8).contains(&rank) && (0..8).contains(&file) {
            Some(Square(rank as usize, file as usize))
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (self.1 as u8 + b'a') as char, self.0 + 1)
    }
}

impl TryFrom<(usize, usize)> for Square {
    type Error = SquareError;

    fn try_from((rank, file): (usize, usize)) -> Result<Self, Self::Error> {
        if rank >= 8 {
            return Err(SquareError::RankOutOfBounds { rank });
        }
        if file >= 8 {
            return Err(SquareError::FileOutOfBounds { file });
        }
        Ok(Square(rank, file))
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file_ch), Some(rank_ch), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(SquareError::InvalidNotation {
                notation: s.to_string(),
            });
        };

        let file = match file_ch {
            'a'..='h' => file_ch as usize - 'a' as usize,
            _ => {
                return Err(SquareError::InvalidNotation {
                    notation: s.to_string(),
                })
            }
        };
        let rank = match rank_ch {
            '1'..='8' => rank_ch as usize - '1' as usize,
            _ => {
                return Err(SquareError::InvalidNotation {
                    notation: s.to_string(),
                })
            }
        };

        Ok(Square(rank, file))
    }
}
