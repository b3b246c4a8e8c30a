//! Exact legal move generation.
//!
//! The generator never plays a move to test legality. A single ray scan from
//! the king classifies checks and absolute pins up front; piece moves are
//! then generated under their pin constraints, king moves are validated by
//! attack scans that treat the king's own square as vacated, and the few
//! remaining special cases (en passant discoveries, castling traversal) get
//! dedicated checks.

use super::state::Position;
use super::types::{Color, Disambiguation, Move, Piece, Square, PROMOTION_PIECES};

/// Straight directions first, then diagonals. Scans that distinguish rook
/// rays from bishop rays rely on this ordering.
const RAY_DIRS: [(isize, isize); 8] = [
    (-1, 0),
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Result of the check-and-pin scan around one king. Directions point from
/// the king toward the checker or pinned piece.
struct RayScan {
    checks: Vec<(Square, (isize, isize))>,
    pins: Vec<(Square, (isize, isize))>,
}

impl Position {
    /// Every legal move in the current position.
    ///
    /// Also refreshes the derived game-state flags: `in_check`, `checkmate`,
    /// `stalemate`, and `threefold`.
    pub fn legal_moves(&mut self) -> Vec<Move> {
        let color = self.side_to_move();
        let king = self.king_square(color);
        let scan = self.scan_checks_and_pins(color, king);
        self.in_check = !scan.checks.is_empty();

        let mut moves = Vec::with_capacity(48);
        match scan.checks.len() {
            // Double check: only the king can move.
            2.. => self.king_moves(color, king, &mut moves),
            1 => {
                let mut candidates = Vec::with_capacity(48);
                self.piece_moves(color, &scan.pins, &mut candidates);

                let (checker, dir) = scan.checks[0];
                let valid = self.block_or_capture_squares(king, checker, dir);
                for mv in candidates {
                    // En passant can capture a checking pawn even though the
                    // destination square is not the checker's square.
                    let captures_checker =
                        mv.is_en_passant && Square(mv.from.0, mv.to.1) == checker;
                    if captures_checker || valid.contains(&mv.to) {
                        moves.push(mv);
                    }
                }
                self.king_moves(color, king, &mut moves);
            }
            0 => {
                self.piece_moves(color, &scan.pins, &mut moves);
                self.king_moves(color, king, &mut moves);
                self.castle_moves(color, king, &mut moves);
            }
        }

        self.checkmate = moves.is_empty() && self.in_check;
        self.stalemate = moves.is_empty() && !self.in_check;
        self.threefold = self.repetition_count() >= 3;

        assign_disambiguation(&mut moves);
        moves
    }

    /// Count leaf nodes of the move-generation tree to `depth`. The standard
    /// movegen correctness measure.
    pub fn perft(&mut self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0;
        for mv in &moves {
            self.make_move(mv);
            nodes += self.perft(depth - 1);
            self.undo_move();
        }
        nodes
    }

    /// Whether `color`'s king is attacked right now. Used by the search for
    /// check extensions and null-move gating without a full generation pass.
    pub(crate) fn in_check_now(&self, color: Color) -> bool {
        let king = self.king_square(color);
        self.square_attacked(king, color.opponent(), None)
    }

    /// One pass over the eight rays plus knight offsets, classifying every
    /// check on `king` and every absolute pin against it.
    fn scan_checks_and_pins(&self, color: Color, king: Square) -> RayScan {
        let enemy = color.opponent();
        let mut checks = Vec::new();
        let mut pins = Vec::new();

        for (j, &(dr, df)) in RAY_DIRS.iter().enumerate() {
            let straight = j < 4;
            let mut shield: Option<(Square, (isize, isize))> = None;
            for step in 1..8 {
                let Some(sq) = king.offset(dr * step, df * step) else {
                    break;
                };
                match self.piece_at(sq) {
                    Some((c, _)) if c == color => {
                        if shield.is_some() {
                            // Two own pieces on the ray: neither is pinned.
                            break;
                        }
                        shield = Some((sq, (dr, df)));
                    }
                    Some((_, piece)) => {
                        let attacks = if straight {
                            piece.attacks_straight()
                        } else {
                            piece.attacks_diagonally()
                                || (step == 1
                                    && piece == Piece::Pawn
                                    && dr == -enemy.pawn_direction())
                        } || (step == 1 && piece == Piece::King);
                        if attacks {
                            match shield {
                                None => checks.push((sq, (dr, df))),
                                Some(pin) => pins.push(pin),
                            }
                        }
                        break;
                    }
                    None => {}
                }
            }
        }

        for (dr, df) in KNIGHT_OFFSETS {
            if let Some(sq) = king.offset(dr, df) {
                if self.piece_at(sq) == Some((enemy, Piece::Knight)) {
                    checks.push((sq, (dr, df)));
                }
            }
        }

        RayScan { checks, pins }
    }

    /// Whether `attacker` attacks `sq`. `vacated` is treated as empty on
    /// sliding rays, so king-move validation sees through the king's current
    /// square.
    pub(crate) fn square_attacked(
        &self,
        sq: Square,
        attacker: Color,
        vacated: Option<Square>,
    ) -> bool {
        // Pawns attack toward their own forward direction.
        let pawn_rank = -attacker.pawn_direction();
        for df in [-1, 1] {
            if let Some(from) = sq.offset(pawn_rank, df) {
                if self.piece_at(from) == Some((attacker, Piece::Pawn)) {
                    return true;
                }
            }
        }

        for (dr, df) in KNIGHT_OFFSETS {
            if let Some(from) = sq.offset(dr, df) {
                if self.piece_at(from) == Some((attacker, Piece::Knight)) {
                    return true;
                }
            }
        }

        for (j, &(dr, df)) in RAY_DIRS.iter().enumerate() {
            let straight = j < 4;
            for step in 1..8 {
                let Some(from) = sq.offset(dr * step, df * step) else {
                    break;
                };
                if Some(from) == vacated {
                    continue;
                }
                match self.piece_at(from) {
                    None => {}
                    Some((c, piece)) => {
                        if c == attacker {
                            let hits = if straight {
                                piece.attacks_straight()
                            } else {
                                piece.attacks_diagonally()
                            } || (step == 1 && piece == Piece::King);
                            if hits {
                                return true;
                            }
                        }
                        break;
                    }
                }
            }
        }

        false
    }

    /// The squares a non-king move may target while `checker` gives check:
    /// the checker itself plus, for sliding checkers, every square between
    /// it and the king.
    fn block_or_capture_squares(
        &self,
        king: Square,
        checker: Square,
        dir: (isize, isize),
    ) -> Vec<Square> {
        let mut valid = vec![checker];
        if let Some((_, piece)) = self.piece_at(checker) {
            if piece.attacks_straight() || piece.attacks_diagonally() {
                for step in 1..8 {
                    match king.offset(dir.0 * step, dir.1 * step) {
                        Some(sq) if sq != checker => valid.push(sq),
                        _ => break,
                    }
                }
            }
        }
        valid
    }

    /// Pin-aware moves for every piece except the king.
    fn piece_moves(&self, color: Color, pins: &[(Square, (isize, isize))], out: &mut Vec<Move>) {
        for rank in 0..8 {
            for file in 0..8 {
                let sq = Square(rank, file);
                let Some((c, piece)) = self.piece_at(sq) else {
                    continue;
                };
                if c != color {
                    continue;
                }
                let pin = pins
                    .iter()
                    .find(|(pinned, _)| *pinned == sq)
                    .map(|(_, dir)| *dir);
                match piece {
                    Piece::Pawn => self.pawn_moves(sq, color, pin, out),
                    // A pinned knight can never stay on the pin ray.
                    Piece::Knight => {
                        if pin.is_none() {
                            self.knight_moves(sq, color, out);
                        }
                    }
                    Piece::Bishop | Piece::Rook | Piece::Queen => {
                        self.slider_moves(sq, color, piece, pin, out);
                    }
                    Piece::King => {}
                }
            }
        }
    }

    fn pawn_moves(
        &self,
        sq: Square,
        color: Color,
        pin: Option<(isize, isize)>,
        out: &mut Vec<Move>,
    ) {
        let dir = color.pawn_direction();

        // Pushes stay on the file, so only a pin along the file allows them.
        let push_ok = pin.map_or(true, |(_, df)| df == 0);
        if push_ok {
            if let Some(to) = sq.offset(dir, 0) {
                if self.is_empty_square(to) {
                    self.push_pawn_move(sq, to, color, None, out);
                    if sq.0 == color.pawn_start_rank() {
                        if let Some(two) = sq.offset(2 * dir, 0) {
                            if self.is_empty_square(two) {
                                out.push(Move::quiet(sq, two, Piece::Pawn));
                            }
                        }
                    }
                }
            }
        }

        for df in [-1, 1] {
            // A capture must travel along the pin ray, in either sense.
            let capture_ok =
                pin.map_or(true, |p| p == (dir, df) || p == (-dir, -df));
            if !capture_ok {
                continue;
            }
            let Some(to) = sq.offset(dir, df) else {
                continue;
            };
            match self.piece_at(to) {
                Some((c, victim)) if c != color => {
                    self.push_pawn_move(sq, to, color, Some(victim), out);
                }
                None if self.en_passant == Some(to) => {
                    if self.en_passant_is_safe(sq, to, color) {
                        out.push(Move::en_passant(sq, to));
                    }
                }
                _ => {}
            }
        }
    }

    /// Emit a pawn move to `to`, expanding into the four promotion choices
    /// on the far rank.
    fn push_pawn_move(
        &self,
        from: Square,
        to: Square,
        color: Color,
        victim: Option<Piece>,
        out: &mut Vec<Move>,
    ) {
        if to.0 == color.promotion_rank() {
            for promoted in PROMOTION_PIECES {
                out.push(Move::promotion(from, to, promoted, victim));
            }
        } else {
            match victim {
                Some(v) => out.push(Move::capture(from, to, Piece::Pawn, v)),
                None => out.push(Move::quiet(from, to, Piece::Pawn)),
            }
        }
    }

    /// En passant removes two pawns from the capturer's rank at once. If the
    /// king shares that rank, scan past both vacated squares for a rook or
    /// queen that the capture would uncover.
    fn en_passant_is_safe(&self, from: Square, to: Square, color: Color) -> bool {
        let king = self.king_square(color);
        if king.0 != from.0 {
            return true;
        }
        let enemy = color.opponent();
        let step: isize = if from.1 > king.1 { 1 } else { -1 };
        let mut file = king.1 as isize + step;
        while (0..8).contains(&file) {
            let f = file as usize;
            if f != from.1 && f != to.1 {
                match self.grid[king.0][f] {
                    None => {}
                    Some((c, piece)) => {
                        return !(c == enemy && piece.attacks_straight());
                    }
                }
            }
            file += step;
        }
        true
    }

    fn knight_moves(&self, sq: Square, color: Color, out: &mut Vec<Move>) {
        for (dr, df) in KNIGHT_OFFSETS {
            let Some(to) = sq.offset(dr, df) else {
                continue;
            };
            match self.piece_at(to) {
                None => out.push(Move::quiet(sq, to, Piece::Knight)),
                Some((c, victim)) if c != color => {
                    out.push(Move::capture(sq, to, Piece::Knight, victim));
                }
                Some(_) => {}
            }
        }
    }

    fn slider_moves(
        &self,
        sq: Square,
        color: Color,
        piece: Piece,
        pin: Option<(isize, isize)>,
        out: &mut Vec<Move>,
    ) {
        for (j, &(dr, df)) in RAY_DIRS.iter().enumerate() {
            let fits = if j < 4 {
                piece.attacks_straight()
            } else {
                piece.attacks_diagonally()
            };
            if !fits {
                continue;
            }
            // A pinned slider may only travel the pin ray, in either sense.
            if let Some(p) = pin {
                if p != (dr, df) && p != (-dr, -df) {
                    continue;
                }
            }
            for step in 1..8 {
                let Some(to) = sq.offset(dr * step, df * step) else {
                    break;
                };
                match self.piece_at(to) {
                    None => out.push(Move::quiet(sq, to, piece)),
                    Some((c, victim)) => {
                        if c != color {
                            out.push(Move::capture(sq, to, piece, victim));
                        }
                        break;
                    }
                }
            }
        }
    }

    /// King steps, validated by attack scans that treat the king's current
    /// square as vacated so escapes along a checking ray are rejected.
    fn king_moves(&self, color: Color, king: Square, out: &mut Vec<Move>) {
        let enemy = color.opponent();
        for (dr, df) in RAY_DIRS {
            let Some(to) = king.offset(dr, df) else {
                continue;
            };
            let victim = match self.piece_at(to) {
                Some((c, _)) if c == color => continue,
                Some((_, v)) => Some(v),
                None => None,
            };
            if self.square_attacked(to, enemy, Some(king)) {
                continue;
            }
            match victim {
                Some(v) => out.push(Move::capture(king, to, Piece::King, v)),
                None => out.push(Move::quiet(king, to, Piece::King)),
            }
        }
    }

    /// Castling, only reachable when not in check. Requires the right, the
    /// rook on its home square, empty squares between, and both squares the
    /// king traverses to be unattacked.
    fn castle_moves(&self, color: Color, king: Square, out: &mut Vec<Move>) {
        let enemy = color.opponent();
        let rank = color.back_rank();
        if king != Square(rank, 4) {
            return;
        }

        if self.castling.has(color, true)
            && self.piece_at(Square(rank, 7)) == Some((color, Piece::Rook))
            && self.is_empty_square(Square(rank, 5))
            && self.is_empty_square(Square(rank, 6))
            && !self.square_attacked(Square(rank, 5), enemy, Some(king))
            && !self.square_attacked(Square(rank, 6), enemy, Some(king))
        {
            out.push(Move::castle(king, Square(rank, 6)));
        }

        if self.castling.has(color, false)
            && self.piece_at(Square(rank, 0)) == Some((color, Piece::Rook))
            && self.is_empty_square(Square(rank, 1))
            && self.is_empty_square(Square(rank, 2))
            && self.is_empty_square(Square(rank, 3))
            && !self.square_attacked(Square(rank, 3), enemy, Some(king))
            && !self.square_attacked(Square(rank, 2), enemy, Some(king))
        {
            out.push(Move::castle(king, Square(rank, 2)));
        }
    }
}

/// Fill in the source annotation needed to render unambiguous algebraic
/// notation: when two pieces of the same kind reach the same square, prefer
/// the file, then the rank, then both.
fn assign_disambiguation(moves: &mut [Move]) {
    let snapshot: Vec<(Piece, Square, Square)> =
        moves.iter().map(|m| (m.piece, m.from, m.to)).collect();

    for mv in moves.iter_mut() {
        if matches!(mv.piece, Piece::Pawn | Piece::King) {
            continue;
        }
        let rivals: Vec<Square> = snapshot
            .iter()
            .filter(|(piece, from, to)| {
                *piece == mv.piece && *to == mv.to && *from != mv.from
            })
            .map(|(_, from, _)| *from)
            .collect();
        if rivals.is_empty() {
            continue;
        }
        let file_shared = rivals.iter().any(|sq| sq.1 == mv.from.1);
        let rank_shared = rivals.iter().any(|sq| sq.0 == mv.from.0);
        mv.disambiguation = if !file_shared {
            Disambiguation::File
        } else if !rank_shared {
            Disambiguation::Rank
        } else {
            Disambiguation::Both
        };
    }
}
