//! End-to-end game between two search players with invariant checks

use morris_core::{player_pair, Cell, MorrisState, Searcher, Side, Variant};

/// Occupied and free cells must partition the board after every move, and
/// no side's total force may ever grow
fn assert_state_consistent(state: &MorrisState) {
    let variant = state.variant();
    let budget = variant.pieces_per_side() as usize;

    let max_cells: Vec<Cell> = state.locations(Side::Max).collect();
    let min_cells: Vec<Cell> = state.locations(Side::Min).collect();
    let free: Vec<Cell> = state.free_cells().collect();

    assert_eq!(
        max_cells.len() + min_cells.len() + free.len(),
        variant.cell_count()
    );
    for cell in variant.cells() {
        let occupied = max_cells.contains(&cell) || min_cells.contains(&cell);
        assert_ne!(occupied, free.contains(&cell), "cell {cell} misfiled");
        assert_eq!(state.occupant(cell).is_some(), occupied);
    }

    for side in [Side::Max, Side::Min] {
        assert!(state.on_board(side) + state.in_hand(side) as usize <= budget);
    }
}

fn play(variant: Variant, depth: u32, max_plies: usize) {
    let (max_player, min_player) = player_pair(Searcher::new(depth));
    let mut state = MorrisState::new(variant);
    let mut budgets = [
        variant.pieces_per_side() as usize,
        variant.pieces_per_side() as usize,
    ];

    let mut player = &max_player;
    let mut opponent = &min_player;

    for _ in 0..max_plies {
        if state.utility().is_some() {
            break;
        }

        let mv = player.decide(&state).expect("undecided game must have a move");
        let moves = state.legal_moves().unwrap();
        assert!(moves.contains(&mv), "decided move {mv} is not legal");

        state = state.apply_move(mv, player.side());
        assert_state_consistent(&state);

        // Totals never increase
        for (i, side) in [Side::Max, Side::Min].into_iter().enumerate() {
            let total = state.on_board(side) + state.in_hand(side) as usize;
            assert!(total <= budgets[i]);
            budgets[i] = total;
        }

        std::mem::swap(&mut player, &mut opponent);
    }

    // Decided iff the side to move is out of moves or below the minimum
    if let Some(outcome) = state.utility() {
        let loser = outcome.winner().opponent();
        assert!(
            state.legal_moves().unwrap().is_empty() || state.on_board(loser) <= 2,
            "decided game but the loser still has material and moves"
        );
    }
}

#[test]
fn six_mens_game_stays_consistent() {
    play(Variant::SixMens, 2, 60);
}

#[test]
fn nine_mens_placement_stays_consistent() {
    // Shallow search, enough plies to finish placement and enter movement
    play(Variant::NineMens, 1, 30);
}

#[test]
fn successors_are_reproducible() {
    let (max_player, _) = player_pair(Searcher::new(2));
    let state = MorrisState::new(Variant::SixMens);
    let mv = max_player.decide(&state).unwrap();

    let a = state.apply_move(mv, Side::Max);
    let b = state.apply_move(mv, Side::Max);
    assert_eq!(a, b);
    assert_eq!(state, MorrisState::new(Variant::SixMens));
}
