//! Morris engine core
//!
//! This crate provides the engine for the Morris family of board games:
//! - Board topology (concentric square rings with fixed mill lines)
//! - Rules engine for the Six and Nine Men's variants
//! - Heuristic position evaluation
//! - Generic depth-limited alpha-beta search
//! - Max/min player abstraction

pub mod board;
pub mod eval;
pub mod game;
pub mod player;
pub mod search;

// Re-exports for convenient access
pub use board::{Cell, Variant, MIN_PIECES, RING_CELLS};
pub use eval::{evaluate, Weights};
pub use game::{MorrisState, Move, Outcome, Phase, RulesError, Side};
pub use player::{player_pair, PlayerError, SearchPlayer};
pub use search::{Game, SearchError, Searcher, DEFAULT_MAX_DEPTH};
