//! Standard algebraic notation rendering.

use super::state::Position;
use super::types::{Disambiguation, Move, Piece};

impl Position {
    /// Render `mv` in standard algebraic notation, with `+`/`#` suffixes.
    ///
    /// `mv` must be legal here; the move is played and taken back to decide
    /// the check suffix.
    #[must_use]
    pub fn move_to_san(&mut self, mv: &Move) -> String {
        let mut san = String::new();

        if mv.is_castle {
            san.push_str(if mv.is_castle_kingside() {
                "O-O"
            } else {
                "O-O-O"
            });
        } else {
            let from_file = char::from(b'a' + mv.from.1 as u8);
            let from_rank = char::from(b'1' + mv.from.0 as u8);

            if mv.piece == Piece::Pawn {
                if mv.is_capture() {
                    san.push(from_file);
                }
            } else {
                san.push(mv.piece.to_char().to_ascii_uppercase());
                match mv.disambiguation {
                    Disambiguation::None => {}
                    Disambiguation::File => san.push(from_file),
                    Disambiguation::Rank => san.push(from_rank),
                    Disambiguation::Both => {
                        san.push(from_file);
                        san.push(from_rank);
                    }
                }
            }

            if mv.is_capture() {
                san.push('x');
            }
            san.push_str(&mv.to.to_string());

            if let Some(promoted) = mv.promotion {
                san.push('=');
                san.push(promoted.to_char().to_ascii_uppercase());
            }
        }

        self.make_move(mv);
        let _ = self.legal_moves();
        if self.checkmate {
            san.push('#');
        } else if self.in_check {
            san.push('+');
        }
        self.undo_move();

        san
    }
}
