//! Static evaluation: material plus piece-square tables.
//!
//! Scores are centipawns from White's point of view; the search negates as
//! needed for its side-to-move convention. Tables are written in board
//! display order (rank 8 at the top) and read mirrored for Black.

use crate::position::{Color, Piece, Position, Square};
use crate::search::{MATE_SCORE, STALEMATE_SCORE};

#[rustfmt::skip]
const PAWN_TABLE: [[i32; 8]; 8] = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [ 50,  50,  50,  50,  50,  50,  50,  50],
    [ 10,  10,  20,  30,  30,  20,  10,  10],
    [  5,   5,  10,  25,  25,  10,   5,   5],
    [  0,   0,   0,  20,  20,   0,   0,   0],
    [  5,  -5, -10,   0,   0, -10,  -5,   5],
    [  5,  10,  10, -20, -20,  10,  10,   5],
    [  0,   0,   0,   0,   0,   0,   0,   0],
];

#[rustfmt::skip]
const KNIGHT_TABLE: [[i32; 8]; 8] = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20,   0,   0,   0,   0, -20, -40],
    [-30,   0,  10,  15,  15,  10,   0, -30],
    [-30,   5,  15,  20,  20,  15,   5, -30],
    [-30,   0,  15,  20,  20,  15,   0, -30],
    [-30,   5,  10,  15,  15,  10,   5, -30],
    [-40, -20,   0,   5,   5,   0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

#[rustfmt::skip]
const BISHOP_TABLE: [[i32; 8]; 8] = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-10,   0,   5,  10,  10,   5,   0, -10],
    [-10,   5,   5,  10,  10,   5,   5, -10],
    [-10,   0,  10,  10,  10,  10,   0, -10],
    [-10,  10,  10,  10,  10,  10,  10, -10],
    [-10,   5,   0,   0,   0,   0,   5, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

#[rustfmt::skip]
const ROOK_TABLE: [[i32; 8]; 8] = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [  5,  10,  10,  10,  10,  10,  10,   5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [  0,   0,   0,   5,   5,   0,   0,   0],
];

#[rustfmt::skip]
const QUEEN_TABLE: [[i32; 8]; 8] = [
    [-20, -10, -10,  -5,  -5, -10, -10, -20],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-10,   0,   5,   5,   5,   5,   0, -10],
    [ -5,   0,   5,   5,   5,   5,   0,  -5],
    [  0,   0,   5,   5,   5,   5,   0,  -5],
    [-10,   5,   5,   5,   5,   5,   0, -10],
    [-10,   0,   5,   0,   0,   0,   0, -10],
    [-20, -10, -10,  -5,  -5, -10, -10, -20],
];

/// Positional bonus for `piece` of `color` on `sq`. The king has no table;
/// its placement is priced implicitly through castling and piece activity.
#[inline]
fn square_bonus(color: Color, piece: Piece, sq: Square) -> i32 {
    let table = match piece {
        Piece::Pawn => &PAWN_TABLE,
        Piece::Knight => &KNIGHT_TABLE,
        Piece::Bishop => &BISHOP_TABLE,
        Piece::Rook => &ROOK_TABLE,
        Piece::Queen => &QUEEN_TABLE,
        Piece::King => return 0,
    };
    // Tables are stored with rank 8 in row 0, which is Black's perspective.
    let row = match color {
        Color::White => 7 - sq.0,
        Color::Black => sq.0,
    };
    table[row][sq.1]
}

/// Static score of the position in centipawns, positive for White.
///
/// Honors the terminal flags when the last generation pass set them:
/// checkmate scores as a mate against the side to move, stalemate as a dead
/// draw.
#[must_use]
pub fn evaluate(pos: &Position) -> i32 {
    if pos.is_checkmate() {
        return -pos.side_to_move().sign() * MATE_SCORE;
    }
    if pos.is_stalemate() {
        return STALEMATE_SCORE;
    }

    let mut score = 0;
    for rank in 0..8 {
        for file in 0..8 {
            let sq = Square(rank, file);
            if let Some((color, piece)) = pos.piece_at(sq) {
                score += color.sign() * (piece.value() + square_bonus(color, piece, sq));
            }
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_is_balanced() {
        let pos = Position::new();
        assert_eq!(evaluate(&pos), 0);
    }

    #[test]
    fn extra_material_counts_for_its_owner() {
        let up_a_rook =
            Position::from_fen("rnbqkbn1/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQq - 0 1")
                .unwrap();
        assert!(evaluate(&up_a_rook) >= 400);

        let down_a_queen =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR w KQkq - 0 1")
                .unwrap();
        assert!(evaluate(&down_a_queen) <= -800);
    }

    #[test]
    fn central_knight_beats_rim_knight() {
        let central = Position::from_fen("4k3/8/8/4N3/8/8/8/4K3 w - - 0 1").unwrap();
        let rim = Position::from_fen("4k3/8/8/N7/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(evaluate(&central) > evaluate(&rim));
    }

    #[test]
    fn tables_are_mirrored_for_black() {
        let white_view = Position::from_fen("4k3/8/8/8/4N3/8/8/4K3 w - - 0 1").unwrap();
        let black_view = Position::from_fen("4k3/8/8/4n3/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(evaluate(&white_view), -evaluate(&black_view));
    }
}
