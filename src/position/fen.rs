//! FEN import and export.

use super::error::FenError;
use super::state::Position;
use super::types::{Color, Piece, Square};

impl Position {
    /// Parse a position from FEN.
    ///
    /// The board and side-to-move fields are required; castling, en passant,
    /// and the move counters may be omitted. The position must hold exactly
    /// one king per color, which is the invariant the rest of the engine is
    /// built on.
    ///
    /// # Errors
    /// Returns a [`FenError`] describing the first malformed field.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let mut pos = Position::empty();
        let mut kings_seen = [0u32; 2];

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }
        for (i, rank_str) in ranks.iter().enumerate() {
            // FEN lists rank 8 first.
            let rank = 7 - i;
            let mut file = 0usize;
            for ch in rank_str.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    file += skip as usize;
                    continue;
                }
                let Some(piece) = Piece::from_char(ch) else {
                    return Err(FenError::InvalidPiece { ch });
                };
                if file >= 8 {
                    return Err(FenError::TooManyFiles { rank: rank + 1 });
                }
                let color = if ch.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                pos.grid[rank][file] = Some((color, piece));
                if piece == Piece::King {
                    kings_seen[color.index()] += 1;
                    pos.kings[color.index()] = Square(rank, file);
                }
                file += 1;
            }
            if file > 8 {
                return Err(FenError::TooManyFiles { rank: rank + 1 });
            }
        }

        for color in [Color::White, Color::Black] {
            match kings_seen[color.index()] {
                0 => return Err(FenError::MissingKing { color }),
                1 => {}
                _ => return Err(FenError::DuplicateKing { color }),
            }
        }

        pos.white_to_move = match parts[1] {
            "w" => true,
            "b" => false,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        if let Some(&field) = parts.get(2) {
            if field != "-" {
                for ch in field.chars() {
                    match ch {
                        'K' => pos.castling.grant(Color::White, true),
                        'Q' => pos.castling.grant(Color::White, false),
                        'k' => pos.castling.grant(Color::Black, true),
                        'q' => pos.castling.grant(Color::Black, false),
                        _ => return Err(FenError::InvalidCastling { ch }),
                    }
                }
            }
        }

        if let Some(&field) = parts.get(3) {
            if field != "-" {
                let sq: Square = field.parse().map_err(|_| FenError::InvalidEnPassant {
                    found: field.to_string(),
                })?;
                pos.en_passant = Some(sq);
            }
        }

        pos.hash = pos.full_hash();
        pos.repetitions.increment(pos.hash);
        Ok(pos)
    }

    /// Render the position as a FEN string.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(80);

        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.grid[rank][file] {
                    None => empty += 1,
                    Some((color, piece)) => {
                        if empty > 0 {
                            fen.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        fen.push(piece.to_fen_char(color));
                    }
                }
            }
            if empty > 0 {
                fen.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(if self.white_to_move { 'w' } else { 'b' });

        fen.push(' ');
        let mut any_right = false;
        for (right, ch) in [
            ((Color::White, true), 'K'),
            ((Color::White, false), 'Q'),
            ((Color::Black, true), 'k'),
            ((Color::Black, false), 'q'),
        ] {
            if self.castling.has(right.0, right.1) {
                fen.push(ch);
                any_right = true;
            }
        }
        if !any_right {
            fen.push('-');
        }

        fen.push(' ');
        match self.en_passant {
            Some(sq) => fen.push_str(&sq.to_string()),
            None => fen.push('-'),
        }

        // Halfmove clock is not tracked; emit the fullmove number from the
        // log so round trips stay plausible.
        fen.push_str(" 0 ");
        fen.push_str(&(self.move_log.len() / 2 + 1).to_string());
        fen
    }
}
