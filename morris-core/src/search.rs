//! Depth-limited alpha-beta minimax over the generic game contract

use crate::game::{Outcome, RulesError, Side};
use std::hash::Hash;

/// Default search horizon in plies
pub const DEFAULT_MAX_DEPTH: u32 = 5;

// ============================================================================
// GAME CONTRACT
// ============================================================================

/// Contract a state must expose to be searchable.
///
/// The search core depends only on this trait, not on any Morris specifics.
/// `Eq + Hash` give callers structural equality over the canonical position
/// for external deduplication; the search itself never mutates a state, it
/// only derives successors through `apply_move`.
pub trait Game: Eq + Hash {
    type Move: Copy;

    /// Terminal outcome, or `None` while undecided
    fn utility(&self) -> Option<Outcome>;

    /// Moves available to the side to move, in a deterministic order
    fn legal_moves(&self) -> Result<Vec<Self::Move>, RulesError>;

    /// Successor state after `mover` plays `mv`; the receiver is unchanged
    fn apply_move(&self, mv: Self::Move, mover: Side) -> Self;

    /// Heuristic estimate of the utility from `perspective`
    fn evaluate(&self, perspective: Side) -> f32;
}

// ============================================================================
// ERRORS
// ============================================================================

/// Failures surfaced by the search core
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Precondition violation raised by the rules engine
    #[error(transparent)]
    Rules(#[from] RulesError),

    /// An undecided position produced no moves. The rules engine's terminal
    /// conditions exactly mirror empty-move states, so this is an internal
    /// consistency defect, never a recoverable condition.
    #[error("no legal moves in an undecided position: rules and search disagree on terminal states")]
    UndecidedWithoutMoves,
}

// ============================================================================
// SEARCHER
// ============================================================================

/// Alpha-beta searcher with a configurable depth cutoff
#[derive(Clone, Copy, Debug)]
pub struct Searcher {
    max_depth: u32,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Searcher {
    pub fn new(max_depth: u32) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Best value and move for `to_move`, searching to the configured depth.
    ///
    /// The move is `None` exactly when the position is terminal or the
    /// cutoff fires at the root.
    pub fn best_move<G: Game>(
        &self,
        state: &G,
        to_move: Side,
    ) -> Result<(f32, Option<G::Move>), SearchError> {
        self.search_value(state, f32::NEG_INFINITY, f32::INFINITY, 0, to_move)
    }

    /// Recursive alpha-beta step.
    ///
    /// Terminal outcomes take precedence over the depth cutoff; the cutoff
    /// falls back to the heuristic from the side to move. Ties keep the
    /// first move seen, which is stable because move enumeration order is
    /// deterministic per state.
    fn search_value<G: Game>(
        &self,
        state: &G,
        mut alpha: f32,
        mut beta: f32,
        depth: u32,
        to_move: Side,
    ) -> Result<(f32, Option<G::Move>), SearchError> {
        if let Some(outcome) = state.utility() {
            return Ok((outcome.value(), None));
        }

        if depth >= self.max_depth {
            return Ok((state.evaluate(to_move), None));
        }

        let moves = state.legal_moves()?;
        if moves.is_empty() {
            return Err(SearchError::UndecidedWithoutMoves);
        }

        let mut best_value = 0.0;
        let mut best_move = None;

        for mv in moves {
            let child = state.apply_move(mv, to_move);
            let (value, _) =
                self.search_value(&child, alpha, beta, depth + 1, to_move.opponent())?;

            let improves = if to_move.maximizes() {
                value > best_value
            } else {
                value < best_value
            };
            if best_move.is_none() || improves {
                best_value = value;
                best_move = Some(mv);
            }

            if to_move.maximizes() {
                alpha = alpha.max(best_value);
            } else {
                beta = beta.min(best_value);
            }
            if beta <= alpha {
                break;
            }
        }

        Ok((best_value, best_move))
    }
}

// ============================================================================
// TESTS
// ============================================================================
