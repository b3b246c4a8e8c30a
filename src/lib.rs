//! Chess engine core: legal move generation and time-bounded adversarial search.
//!
//! The crate is organized leaves-first:
//! - [`position`]: mailbox board state with exact make/undo, ray-based legal
//!   move generation, FEN parsing, and algebraic notation.
//! - [`eval`]: static material + piece-square evaluation.
//! - [`tt`]: transposition table owned by a single search invocation.
//! - [`search`]: iterative-deepening alpha-beta negamax with quiescence,
//!   null-move pruning, late-move reductions, and killer/history ordering.
//!
//! # Example
//! ```
//! use rayboard::position::Position;
//! use rayboard::search::{get_best_move, SearchConfig, SearchState};
//!
//! let mut pos = Position::new();
//! assert_eq!(pos.legal_moves().len(), 20);
//!
//! let mut state = SearchState::new(16);
//! let best = get_best_move(&mut pos, &mut state, &SearchConfig::depth(3));
//! assert!(best.is_some());
//! ```

pub mod eval;
pub mod position;
pub mod search;
pub mod tt;

pub(crate) mod zobrist;

pub use position::{Color, Move, Piece, Position, Square};
pub use search::{get_best_move, SearchConfig, SearchState};
pub use tt::TranspositionTable;
