//! Heuristic position evaluation for the depth cutoff

use crate::game::{MorrisState, Side};
use serde::{Deserialize, Serialize};

/// Weights for the evaluation terms
///
/// The default weighting follows the Petcu/Holban feature set: normalized
/// differentials for material and blockage, amplified differentials for
/// closed and near mills, plus an absolute bonus for the perspective side's
/// own mill prospects, all scaled down to a bounded range.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Weights {
    /// Off-board piece-count differential
    pub in_hand: f32,
    /// On-board piece-count differential
    pub on_board: f32,
    /// Closed-mill differential
    pub mills: f32,
    /// Near-mill differential
    pub near_mills: f32,
    /// Blocked-opponent-piece differential
    pub blocked: f32,
    /// Perspective side's own closed mills
    pub own_mills: f32,
    /// Perspective side's own near mills
    pub own_near_mills: f32,
    /// Divisor applied to the summed terms
    pub scale: f32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            in_hand: 1.0,
            on_board: 1.0,
            mills: 3.0,
            near_mills: 2.0,
            blocked: 1.0,
            own_mills: 2.0,
            own_near_mills: 1.0,
            scale: 10.0,
        }
    }
}

/// Normalized differential `(a - b) / (a + b)`; zero when both terms are
/// zero (defined, not an error)
fn ratio(a: usize, b: usize) -> f32 {
    let sum = a + b;
    if sum == 0 {
        0.0
    } else {
        (a as f32 - b as f32) / sum as f32
    }
}

/// Estimate the utility of an undecided position.
///
/// Positive values favor the maximizer in every differential term; the own
/// mill and own near-mill bonuses are taken for `perspective`. Near-mill
/// counts are phase-aware, keyed per side on that side's own hand.
pub fn evaluate(state: &MorrisState, perspective: Side, weights: &Weights) -> f32 {
    let max_phase = state.phase(Side::Max);
    let min_phase = state.phase(Side::Min);

    let in_hand = ratio(
        state.in_hand(Side::Max) as usize,
        state.in_hand(Side::Min) as usize,
    );
    let on_board = ratio(state.on_board(Side::Max), state.on_board(Side::Min));
    let mills = ratio(state.mill_count(Side::Max), state.mill_count(Side::Min));
    let near_mills = ratio(
        state.near_mill_count(Side::Max, max_phase),
        state.near_mill_count(Side::Min, min_phase),
    );
    let blocked = ratio(
        state.blocked_count(Side::Min),
        state.blocked_count(Side::Max),
    );

    let own_mills = state.mill_count(perspective) as f32;
    let own_near_mills = state.near_mill_count(perspective, state.phase(perspective)) as f32;

    (weights.in_hand * in_hand
        + weights.on_board * on_board
        + weights.mills * mills
        + weights.near_mills * near_mills
        + weights.blocked * blocked
        + weights.own_mills * own_mills
        + weights.own_near_mills * own_near_mills)
        / weights.scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Variant};

    fn cell(ring: u8, index: u8) -> Cell {
        Cell::new(ring, index)
    }

    #[test]
    fn test_empty_board_is_neutral() {
        // Every counter is zero except the equal hands; all ratios are
        // defined as zero, so the estimate is exactly zero
        let state = MorrisState::new(Variant::SixMens);
        assert_eq!(evaluate(&state, Side::Max, &Weights::default()), 0.0);
        assert_eq!(evaluate(&state, Side::Min, &Weights::default()), 0.0);
    }

    #[test]
    fn test_material_advantage_is_positive() {
        let state = MorrisState::from_setup(
            Variant::SixMens,
            &[cell(0, 0), cell(0, 2), cell(0, 4)],
            &[cell(1, 0)],
            3,
            3,
            Some(Side::Min),
        );
        let score = evaluate(&state, Side::Max, &Weights::default());
        assert!(score > 0.0, "score {score} should favor the maximizer");
    }

    #[test]
    fn test_mill_advantage_dominates_material() {
        let with_mill = MorrisState::from_setup(
            Variant::SixMens,
            &[cell(0, 0), cell(0, 1), cell(0, 2)],
            &[cell(1, 0), cell(1, 2), cell(1, 4)],
            3,
            3,
            Some(Side::Min),
        );
        let without = MorrisState::from_setup(
            Variant::SixMens,
            &[cell(0, 0), cell(0, 2), cell(0, 4)],
            &[cell(1, 0), cell(1, 2), cell(1, 4)],
            3,
            3,
            Some(Side::Min),
        );
        let w = Weights::default();
        assert!(evaluate(&with_mill, Side::Max, &w) > evaluate(&without, Side::Max, &w));
    }

    #[test]
    fn test_perspective_bonus() {
        // Min's own mill raises the estimate taken from Min's perspective
        let state = MorrisState::from_setup(
            Variant::SixMens,
            &[cell(0, 0)],
            &[cell(1, 0), cell(1, 1), cell(1, 2)],
            5,
            3,
            Some(Side::Min),
        );
        let w = Weights::default();
        assert!(evaluate(&state, Side::Min, &w) > evaluate(&state, Side::Max, &w));
    }

    #[test]
    fn test_bounded_range() {
        // A lopsided but legal-ish position stays within a sane band
        let state = MorrisState::from_setup(
            Variant::NineMens,
            &[
                cell(0, 0),
                cell(0, 1),
                cell(0, 2),
                cell(1, 0),
                cell(1, 1),
                cell(1, 2),
                cell(2, 1),
            ],
            &[cell(2, 4), cell(2, 6)],
            2,
            0,
            Some(Side::Max),
        );
        let score = evaluate(&state, Side::Max, &Weights::default());
        assert!(score.abs() <= 10.0);
    }
}
