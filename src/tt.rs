//! Transposition table.
//!
//! Bucketed, generation-stamped, owned by a single search at a time. Mate
//! scores are normalized to be relative to the storing node, so a mate found
//! at one depth reads back correctly from another.

use crate::position::Move;
use crate::search::MATE_THRESHOLD;

/// How the stored score relates to the true value at the node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// Searched with a full window; the score is exact.
    Exact,
    /// Failed high; the true score is at least this.
    Lower,
    /// Failed low; the true score is at most this.
    Upper,
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    hash: u64,
    depth: u32,
    score: i32,
    bound: Bound,
    best: Option<Move>,
    generation: u8,
}

const BUCKET_SIZE: usize = 4;

/// A probe that passed the depth gate.
pub struct Probe {
    pub score: i32,
    pub bound: Bound,
    pub best: Option<Move>,
}

/// Fixed-size hash table of search results, replacement by depth and age.
pub struct TranspositionTable {
    buckets: Vec<[Option<Entry>; BUCKET_SIZE]>,
    mask: usize,
    generation: u8,
}

impl TranspositionTable {
    /// Create a table using roughly `size_mb` megabytes.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let bytes = size_mb.max(1) * 1024 * 1024;
        let entries = bytes / std::mem::size_of::<Entry>();
        // Power-of-two bucket count, rounded down, so indexing is a mask.
        let buckets = (entries / BUCKET_SIZE).max(1);
        let buckets = if buckets.is_power_of_two() {
            buckets
        } else {
            buckets.next_power_of_two() / 2
        };
        log::debug!(
            "transposition table: {} buckets of {BUCKET_SIZE} ({size_mb} MB requested)",
            buckets
        );
        TranspositionTable {
            buckets: vec![[None; BUCKET_SIZE]; buckets],
            mask: buckets - 1,
            generation: 0,
        }
    }

    /// Advance the age stamp. Called once per search so stale entries lose
    /// replacement priority without being erased.
    pub fn new_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            *bucket = [None; BUCKET_SIZE];
        }
    }

    #[inline]
    fn bucket_index(&self, hash: u64) -> usize {
        hash as usize & self.mask
    }

    /// Look up `hash` for a result searched to at least `depth`. `ply` is
    /// the probing node's distance from root, used to denormalize mate
    /// scores.
    pub fn lookup(&self, hash: u64, depth: u32, ply: usize) -> Option<Probe> {
        let bucket = &self.buckets[self.bucket_index(hash)];
        for entry in bucket.iter().flatten() {
            if entry.hash == hash && entry.depth >= depth {
                return Some(Probe {
                    score: score_from_tt(entry.score, ply),
                    bound: entry.bound,
                    best: entry.best,
                });
            }
        }
        None
    }

    /// The stored best move for `hash` regardless of depth. Ordering only.
    pub fn hash_move(&self, hash: u64) -> Option<Move> {
        let bucket = &self.buckets[self.bucket_index(hash)];
        bucket
            .iter()
            .flatten()
            .find(|entry| entry.hash == hash)
            .and_then(|entry| entry.best)
    }

    /// Store a search result. Prefers an empty or same-position slot, then
    /// evicts the shallowest, oldest entry in the bucket.
    pub fn store(
        &mut self,
        hash: u64,
        depth: u32,
        score: i32,
        bound: Bound,
        best: Option<Move>,
        ply: usize,
    ) {
        let generation = self.generation;
        let index = self.bucket_index(hash);
        let bucket = &mut self.buckets[index];

        let mut target = 0;
        let mut worst = i32::MAX;
        for (i, slot) in bucket.iter().enumerate() {
            match slot {
                None => {
                    target = i;
                    break;
                }
                Some(entry) if entry.hash == hash => {
                    target = i;
                    break;
                }
                Some(entry) => {
                    let age = generation.wrapping_sub(entry.generation) as i32;
                    let value = entry.depth as i32 * 2 - age * 8;
                    if value < worst {
                        worst = value;
                        target = i;
                    }
                }
            }
        }

        bucket[target] = Some(Entry {
            hash,
            depth,
            score: score_to_tt(score, ply),
            bound,
            best,
            generation,
        });
    }
}

/// Convert a root-relative mate score to a node-relative one for storage.
#[inline]
fn score_to_tt(score: i32, ply: usize) -> i32 {
    if score > MATE_THRESHOLD {
        score + ply as i32
    } else if score < -MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

/// Convert a stored node-relative mate score back to root-relative.
#[inline]
fn score_from_tt(score: i32, ply: usize) -> i32 {
    if score > MATE_THRESHOLD {
        score - ply as i32
    } else if score < -MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    #[test]
    fn store_then_lookup_roundtrip() {
        let mut tt = TranspositionTable::new(1);
        let mut pos = Position::new();
        let mv = pos.legal_moves()[0];
        tt.store(pos.hash(), 5, 42, Bound::Exact, Some(mv), 0);

        let probe = tt.lookup(pos.hash(), 5, 0).unwrap();
        assert_eq!(probe.score, 42);
        assert_eq!(probe.bound, Bound::Exact);
        assert_eq!(probe.best, Some(mv));
    }

    #[test]
    fn depth_gate_rejects_shallow_entries() {
        let mut tt = TranspositionTable::new(1);
        tt.store(0xABCD, 3, 10, Bound::Lower, None, 0);
        assert!(tt.lookup(0xABCD, 5, 0).is_none());
        assert!(tt.lookup(0xABCD, 3, 0).is_some());
    }

    #[test]
    fn hash_move_ignores_depth() {
        let mut tt = TranspositionTable::new(1);
        let mut pos = Position::new();
        let mv = pos.legal_moves()[0];
        tt.store(pos.hash(), 1, 0, Bound::Upper, Some(mv), 0);
        assert_eq!(tt.hash_move(pos.hash()), Some(mv));
    }

    #[test]
    fn mate_scores_are_ply_normalized() {
        use crate::search::MATE_SCORE;
        let mut tt = TranspositionTable::new(1);
        // Mate in 3 plies found at ply 2: root-relative score MATE - 5.
        tt.store(0x1234, 8, MATE_SCORE - 5, Bound::Exact, None, 2);
        // Probed from ply 4, the same mate is 2 plies further from that root.
        let probe = tt.lookup(0x1234, 8, 4).unwrap();
        assert_eq!(probe.score, MATE_SCORE - 7);
    }
}
