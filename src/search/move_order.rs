//! Move ordering: hash move, MVV-LVA captures, killers, history.

use crate::position::{Move, Piece, Square, MAX_PLY};

/// Hash move outranks everything else.
const HASH_MOVE_SCORE: i32 = 1 << 20;
/// Captures sort above killers even when the exchange looks poor.
const CAPTURE_BASE: i32 = 100_000;
const PROMOTION_BONUS: i32 = 80_000;
const KILLER_PRIMARY: i32 = 20_000;
const KILLER_SECONDARY: i32 = 10_000;

/// Most-valuable-victim, least-valuable-attacker. Victim value dominates so
/// PxQ sorts ahead of QxP.
#[inline]
pub(crate) fn mvv_lva(mv: &Move) -> i32 {
    match mv.captured {
        Some(victim) => victim.value() * 10 - mv.piece.value(),
        None => 0,
    }
}

/// Two quiet moves per ply that most recently caused a beta cutoff.
pub(crate) struct KillerTable {
    slots: [[Option<Move>; 2]; MAX_PLY],
}

impl KillerTable {
    pub(crate) fn new() -> Self {
        KillerTable {
            slots: [[None; 2]; MAX_PLY],
        }
    }

    pub(crate) fn insert(&mut self, ply: usize, mv: Move) {
        if ply >= MAX_PLY {
            return;
        }
        let slots = &mut self.slots[ply];
        if slots[0] != Some(mv) {
            slots[1] = slots[0];
            slots[0] = Some(mv);
        }
    }

    fn bonus(&self, ply: usize, mv: &Move) -> i32 {
        if ply >= MAX_PLY {
            return 0;
        }
        if self.slots[ply][0] == Some(*mv) {
            KILLER_PRIMARY
        } else if self.slots[ply][1] == Some(*mv) {
            KILLER_SECONDARY
        } else {
            0
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots = [[None; 2]; MAX_PLY];
    }
}

/// Quiet-move success counts by piece kind and destination square.
pub(crate) struct HistoryTable {
    table: [[i32; 64]; 6],
}

/// Keep history scores safely below the killer bonuses.
const HISTORY_CAP: i32 = 8_000;

impl HistoryTable {
    pub(crate) fn new() -> Self {
        HistoryTable {
            table: [[0; 64]; 6],
        }
    }

    /// Credit a quiet move that caused a cutoff. Deeper cutoffs count more;
    /// the whole table is halved when any counter saturates.
    pub(crate) fn reward(&mut self, piece: Piece, to: Square, depth: u32) {
        let cell = &mut self.table[piece.index()][to.index()];
        *cell += (depth * depth) as i32;
        if *cell >= HISTORY_CAP {
            for row in &mut self.table {
                for value in row.iter_mut() {
                    *value /= 2;
                }
            }
        }
    }

    #[inline]
    fn get(&self, piece: Piece, to: Square) -> i32 {
        self.table[piece.index()][to.index()]
    }

    /// Age the table between searches so stale preferences fade.
    pub(crate) fn decay(&mut self) {
        for row in &mut self.table {
            for value in row.iter_mut() {
                *value /= 8;
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        self.table = [[0; 64]; 6];
    }
}

/// Sort `moves` best-first for the node at `ply`.
pub(crate) fn order_moves(
    moves: &mut [Move],
    hash_move: Option<Move>,
    killers: &KillerTable,
    history: &HistoryTable,
    ply: usize,
) {
    moves.sort_by_cached_key(|mv| {
        let mut score = 0;
        if hash_move == Some(*mv) {
            score += HASH_MOVE_SCORE;
        }
        if mv.is_capture() {
            score += CAPTURE_BASE + mvv_lva(mv);
        }
        if let Some(promoted) = mv.promotion {
            score += PROMOTION_BONUS + promoted.value();
        }
        if mv.is_quiet() {
            score += killers.bonus(ply, mv) + history.get(mv.piece, mv.to);
        }
        std::cmp::Reverse(score)
    });
}

/// Sort captures best-first for quiescence, victims first.
pub(crate) fn order_captures(moves: &mut [Move]) {
    moves.sort_by_cached_key(|mv| std::cmp::Reverse(mvv_lva(mv)));
}
