//! Time-bounded iterative-deepening alpha-beta search.
//!
//! The public entry points are [`get_best_move`] for a blocking search under
//! a [`SearchConfig`], and [`search_with_limits`] when another thread needs
//! to cancel or re-deadline a running search through [`SearchLimits`].
//! Heuristic state (transposition table, killers, history) lives in
//! [`SearchState`], owned by the caller and reusable across searches; the
//! engine keeps no global mutable state.

mod alphabeta;
mod iterative;
mod move_order;
mod params;
mod quiescence;

pub use params::PruneParams;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::position::{Move, Position};
use crate::tt::TranspositionTable;

use move_order::{HistoryTable, KillerTable};

/// Score for mate delivered at the root; mate at `ply` scores
/// `MATE_SCORE - ply`, so nearer mates win comparisons.
pub const MATE_SCORE: i32 = 30_000;
/// Scores beyond this magnitude are forced mates.
pub const MATE_THRESHOLD: i32 = 29_000;
/// Draw score for stalemate and repetition.
pub const STALEMATE_SCORE: i32 = 0;
pub(crate) const INFINITY: i32 = 31_000;

/// How many nodes between clock checks.
const ABORT_CHECK_INTERVAL: u64 = 2_048;
/// Fraction of the budget after which a new iteration is not worth starting,
/// in percent.
const SOFT_STOP_PERCENT: u32 = 60;

/// Limits for one search invocation.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Maximum iterative-deepening depth in plies.
    pub max_depth: u32,
    /// Wall-clock budget. Depth 1 always completes regardless.
    pub time_limit: Duration,
    /// Deepen one ply at a time; disable to search `max_depth` directly.
    pub use_iterative_deepening: bool,
    /// Pruning technique selection.
    pub params: PruneParams,
}

impl SearchConfig {
    /// Fixed-depth search with an effectively unlimited clock.
    #[must_use]
    pub fn depth(max_depth: u32) -> Self {
        SearchConfig {
            max_depth,
            time_limit: Duration::from_secs(3_600),
            ..SearchConfig::default()
        }
    }

    /// Time-bounded search, deepening as far as the budget allows.
    #[must_use]
    pub fn timed(time_limit: Duration) -> Self {
        SearchConfig {
            max_depth: 64,
            time_limit,
            ..SearchConfig::default()
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_depth: 6,
            time_limit: Duration::from_secs(5),
            use_iterative_deepening: true,
            params: PruneParams::default(),
        }
    }
}

/// Heuristic state that persists between searches.
pub struct SearchState {
    pub(crate) tt: TranspositionTable,
    pub(crate) killers: KillerTable,
    pub(crate) history: HistoryTable,
}

impl SearchState {
    /// Fresh state with a transposition table of roughly `tt_size_mb`
    /// megabytes.
    #[must_use]
    pub fn new(tt_size_mb: usize) -> Self {
        SearchState {
            tt: TranspositionTable::new(tt_size_mb),
            killers: KillerTable::new(),
            history: HistoryTable::new(),
        }
    }

    /// Forget everything learned so far.
    pub fn clear(&mut self) {
        self.tt.clear();
        self.killers.clear();
        self.history.clear();
    }
}

/// Outcome of one search invocation.
#[derive(Clone, Copy, Debug)]
pub struct SearchResult {
    /// Best move found, or `None` when the position has no legal moves.
    pub best_move: Option<Move>,
    /// Score of `best_move` in centipawns for the side to move.
    pub score: i32,
    /// Deepest fully completed iteration.
    pub depth: u32,
    /// Nodes visited, main search and quiescence together.
    pub nodes: u64,
}

/// Deadline shared between a searching thread and its controller. The
/// controller may shorten or extend it while the search runs.
pub struct SearchClock {
    deadline: Mutex<Option<Instant>>,
}

impl SearchClock {
    #[must_use]
    pub fn new() -> Self {
        SearchClock {
            deadline: Mutex::new(None),
        }
    }

    pub fn set_deadline(&self, deadline: Instant) {
        *self.deadline.lock() = Some(deadline);
    }

    pub fn clear_deadline(&self) {
        *self.deadline.lock() = None;
    }

    #[must_use]
    pub fn expired(&self) -> bool {
        match *self.deadline.lock() {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }
}

impl Default for SearchClock {
    fn default() -> Self {
        SearchClock::new()
    }
}

/// Cancellation handle for a search running on another thread. Cloning
/// shares the underlying clock and stop flag.
#[derive(Clone)]
pub struct SearchLimits {
    clock: Arc<SearchClock>,
    stop: Arc<AtomicBool>,
}

impl SearchLimits {
    #[must_use]
    pub fn new() -> Self {
        SearchLimits {
            clock: Arc::new(SearchClock::new()),
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The shared clock, for adjusting the deadline mid-search.
    #[must_use]
    pub fn clock(&self) -> &SearchClock {
        &self.clock
    }

    /// Ask the search to stop at the next node-count check.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Re-arm the handle for another search.
    pub fn reset(&self) {
        self.stop.store(false, Ordering::Relaxed);
        self.clock.clear_deadline();
    }

    pub(crate) fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed) || self.clock.expired()
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits::new()
    }
}

/// One search invocation over a borrowed position and heuristic state.
pub(crate) struct Searcher<'a> {
    pos: &'a mut Position,
    state: &'a mut SearchState,
    params: PruneParams,
    max_depth: u32,
    use_iterative_deepening: bool,
    deadline: Instant,
    soft_deadline: Instant,
    limits: Option<&'a SearchLimits>,
    nodes: u64,
    aborted: bool,
    completed_depth: u32,
}

impl<'a> Searcher<'a> {
    fn new(
        pos: &'a mut Position,
        state: &'a mut SearchState,
        config: &SearchConfig,
        limits: Option<&'a SearchLimits>,
    ) -> Self {
        let start = Instant::now();
        let soft = config.time_limit * SOFT_STOP_PERCENT / 100;
        Searcher {
            pos,
            state,
            params: config.params,
            max_depth: config.max_depth.max(1),
            use_iterative_deepening: config.use_iterative_deepening,
            deadline: start + config.time_limit,
            soft_deadline: start + soft,
            limits,
            nodes: 0,
            aborted: false,
            completed_depth: 0,
        }
    }

    /// Periodic clock and cancellation check. Never aborts before the first
    /// iteration completes, so a best move always exists when any legal move
    /// does.
    pub(crate) fn check_abort(&mut self) -> bool {
        if self.aborted {
            return true;
        }
        if self.completed_depth == 0 {
            return false;
        }
        if self.nodes % ABORT_CHECK_INTERVAL == 0 {
            if Instant::now() >= self.deadline {
                self.aborted = true;
            } else if let Some(limits) = self.limits {
                if limits.should_stop() {
                    self.aborted = true;
                }
            }
        }
        self.aborted
    }
}

/// Run a full search and return its result.
pub fn search(
    pos: &mut Position,
    state: &mut SearchState,
    config: &SearchConfig,
) -> SearchResult {
    Searcher::new(pos, state, config, None).run()
}

/// Run a search that another thread can cancel through `limits`.
pub fn search_with_limits(
    pos: &mut Position,
    state: &mut SearchState,
    config: &SearchConfig,
    limits: &SearchLimits,
) -> SearchResult {
    Searcher::new(pos, state, config, Some(limits)).run()
}

/// Best move in the position, or `None` when there is no legal move
/// (checkmate or stalemate).
pub fn get_best_move(
    pos: &mut Position,
    state: &mut SearchState,
    config: &SearchConfig,
) -> Option<Move> {
    search(pos, state, config).best_move
}
