//! Console board rendering
//!
//! Rendering lives out here because the engine has no display dependency;
//! the maximizer draws as `X`, the minimizer as `O`.

use morris_core::{Cell, MorrisState, Side, Variant};
use std::fmt::Write;

fn glyph(state: &MorrisState, ring: u8, index: u8) -> char {
    match state.occupant(Cell::new(ring, index)) {
        Some(Side::Max) => 'X',
        Some(Side::Min) => 'O',
        None => '.',
    }
}

/// Draw the board as fixed-width ASCII art
pub fn render(state: &MorrisState) -> String {
    match state.variant() {
        Variant::SixMens => render_six(state),
        Variant::NineMens => render_nine(state),
    }
}

fn render_six(state: &MorrisState) -> String {
    let g = |ring, index| glyph(state, ring, index);
    let mut out = String::new();

    let _ = writeln!(out, "{}---------{}---------{}", g(0, 0), g(0, 1), g(0, 2));
    let _ = writeln!(out, "|         |         |");
    let _ = writeln!(out, "|   {}-----{}-----{}   |", g(1, 0), g(1, 1), g(1, 2));
    let _ = writeln!(out, "|   |           |   |");
    let _ = writeln!(out, "{}---{}           {}---{}", g(0, 7), g(1, 7), g(1, 3), g(0, 3));
    let _ = writeln!(out, "|   |           |   |");
    let _ = writeln!(out, "|   {}-----{}-----{}   |", g(1, 6), g(1, 5), g(1, 4));
    let _ = writeln!(out, "|         |         |");
    let _ = writeln!(out, "{}---------{}---------{}", g(0, 6), g(0, 5), g(0, 4));

    out
}

fn render_nine(state: &MorrisState) -> String {
    let g = |ring, index| glyph(state, ring, index);
    let mut out = String::new();

    let _ = writeln!(out, "{}-----------{}-----------{}", g(0, 0), g(0, 1), g(0, 2));
    let _ = writeln!(out, "|           |           |");
    let _ = writeln!(out, "|   {}-------{}-------{}   |", g(1, 0), g(1, 1), g(1, 2));
    let _ = writeln!(out, "|   |       |       |   |");
    let _ = writeln!(out, "|   |   {}---{}---{}   |   |", g(2, 0), g(2, 1), g(2, 2));
    let _ = writeln!(out, "|   |   |       |   |   |");
    let _ = writeln!(
        out,
        "{}---{}---{}       {}---{}---{}",
        g(0, 7),
        g(1, 7),
        g(2, 7),
        g(2, 3),
        g(1, 3),
        g(0, 3)
    );
    let _ = writeln!(out, "|   |   |       |   |   |");
    let _ = writeln!(out, "|   |   {}---{}---{}   |   |", g(2, 6), g(2, 5), g(2, 4));
    let _ = writeln!(out, "|   |       |       |   |");
    let _ = writeln!(out, "|   {}-------{}-------{}   |", g(1, 6), g(1, 5), g(1, 4));
    let _ = writeln!(out, "|           |           |");
    let _ = writeln!(out, "{}-----------{}-----------{}", g(0, 6), g(0, 5), g(0, 4));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use morris_core::Move;

    #[test]
    fn test_empty_boards_have_only_dots() {
        for variant in [Variant::SixMens, Variant::NineMens] {
            let board = render(&MorrisState::new(variant));
            assert_eq!(
                board.chars().filter(|&c| c == '.').count(),
                variant.cell_count()
            );
            assert!(!board.contains('X'));
            assert!(!board.contains('O'));
        }
    }

    #[test]
    fn test_pieces_appear() {
        let state = MorrisState::new(Variant::SixMens)
            .apply_move(Move::Place { to: Cell::new(0, 0) }, Side::Max)
            .apply_move(Move::Place { to: Cell::new(1, 5) }, Side::Min);
        let board = render(&state);
        assert!(board.starts_with('X'));
        assert_eq!(board.chars().filter(|&c| c == 'O').count(), 1);
    }
}
