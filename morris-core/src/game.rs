//! Game state, move generation and mill resolution

use crate::board::{Cell, Variant, MIN_PIECES, RING_CELLS};
use crate::search::Game;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Storage rings; Six Men's leaves the innermost ring empty
const MAX_RINGS: usize = 3;

// ============================================================================
// CORE TYPES
// ============================================================================

/// A side of the game, named for its role in the search
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Max,
    Min,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Max => Side::Min,
            Side::Min => Side::Max,
        }
    }

    pub fn maximizes(self) -> bool {
        self == Side::Max
    }
}

/// Terminal outcome; an undecided game has no outcome
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    MaxWin,
    MinWin,
}

impl Outcome {
    /// Utility value: +1 for a maximizer win, -1 for a minimizer win
    pub fn value(self) -> f32 {
        match self {
            Outcome::MaxWin => 1.0,
            Outcome::MinWin => -1.0,
        }
    }

    pub fn winner(self) -> Side {
        match self {
            Outcome::MaxWin => Side::Max,
            Outcome::MinWin => Side::Min,
        }
    }
}

/// Phase of the game for one side
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Still holds pieces to place
    Placing,
    /// All pieces on the board, restricted to adjacent cells
    Moving,
}

/// A legal move, meaningful only relative to the state that generated it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Put an in-hand piece on a free cell (placement phase)
    Place { to: Cell },
    /// Slide an on-board piece to an adjacent free cell (movement phase)
    Shift { from: Cell, to: Cell },
}

impl Move {
    /// Cell the moved piece ends up on
    pub fn target(self) -> Cell {
        match self {
            Move::Place { to } => to,
            Move::Shift { to, .. } => to,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Place { to } => write!(f, "place {to}"),
            Move::Shift { from, to } => write!(f, "{from} -> {to}"),
        }
    }
}

/// Precondition violations in the rules engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// Phase logic was invoked on a state with no recorded last mover.
    /// Only the true initial state is in this situation, and only once a
    /// side has finished placing does move generation need the last mover.
    #[error("side to move is undefined: state records no last mover")]
    UnspecifiedSideToMove,
}

// ============================================================================
// GAME STATE
// ============================================================================

/// A Morris position: piece placement, in-hand counts and the last mover.
///
/// States are immutable once constructed; `apply_move` builds the successor
/// and leaves the parent untouched. Equality and hashing cover the canonical
/// (variant, grid, in-hand counts) tuple only, so structurally equal states
/// compare equal regardless of how they were reached.
#[derive(Clone, Debug)]
pub struct MorrisState {
    variant: Variant,
    /// Cell contents, indexed [ring][position-in-ring]
    grid: [[Option<Side>; RING_CELLS as usize]; MAX_RINGS],
    /// Occupied cells per side; `free_cells` is always the complement
    max_locations: FxHashSet<Cell>,
    min_locations: FxHashSet<Cell>,
    free_cells: FxHashSet<Cell>,
    /// Pieces not yet placed
    max_in_hand: u8,
    min_in_hand: u8,
    /// `None` only for the initial state
    last_mover: Option<Side>,
}

impl MorrisState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// The unique initial state: empty board, full hands, no last mover
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            grid: [[None; RING_CELLS as usize]; MAX_RINGS],
            max_locations: FxHashSet::default(),
            min_locations: FxHashSet::default(),
            free_cells: variant.cells().collect(),
            max_in_hand: variant.pieces_per_side(),
            min_in_hand: variant.pieces_per_side(),
            last_mover: None,
        }
    }

    /// Build an arbitrary position directly (analysis and tests)
    pub fn from_setup(
        variant: Variant,
        max_cells: &[Cell],
        min_cells: &[Cell],
        max_in_hand: u8,
        min_in_hand: u8,
        last_mover: Option<Side>,
    ) -> Self {
        let mut state = Self::new(variant);
        for &cell in max_cells {
            state.put(cell, Side::Max);
        }
        for &cell in min_cells {
            state.put(cell, Side::Min);
        }
        state.max_in_hand = max_in_hand;
        state.min_in_hand = min_in_hand;
        state.last_mover = last_mover;
        debug_assert!(state.invariants_hold());
        state
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn occupant(&self, cell: Cell) -> Option<Side> {
        self.grid[cell.ring as usize][cell.index as usize]
    }

    pub fn in_hand(&self, side: Side) -> u8 {
        match side {
            Side::Max => self.max_in_hand,
            Side::Min => self.min_in_hand,
        }
    }

    pub fn on_board(&self, side: Side) -> usize {
        self.location_set(side).len()
    }

    /// Occupied cells of a side, in canonical board order
    pub fn locations(&self, side: Side) -> impl Iterator<Item = Cell> + '_ {
        let set = self.location_set(side);
        self.variant.cells().filter(move |cell| set.contains(cell))
    }

    /// Unoccupied cells, in canonical board order
    pub fn free_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.variant
            .cells()
            .filter(move |cell| self.free_cells.contains(cell))
    }

    pub fn last_mover(&self) -> Option<Side> {
        self.last_mover
    }

    /// Phase a side is in, by its own in-hand count
    pub fn phase(&self, side: Side) -> Phase {
        if self.in_hand(side) > 0 {
            Phase::Placing
        } else {
            Phase::Moving
        }
    }

    fn location_set(&self, side: Side) -> &FxHashSet<Cell> {
        match side {
            Side::Max => &self.max_locations,
            Side::Min => &self.min_locations,
        }
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// Legal moves for the side to move.
    ///
    /// The maximizer opens by convention, so the initial state needs no last
    /// mover while both sides are still placing; once a side has emptied its
    /// hand the phase depends on who moved last, and a missing last mover is
    /// a caller bug.
    pub fn legal_moves(&self) -> Result<Vec<Move>, RulesError> {
        let mover = match self.last_mover {
            Some(side) => side.opponent(),
            None if self.max_in_hand > 0 && self.min_in_hand > 0 => Side::Max,
            None => return Err(RulesError::UnspecifiedSideToMove),
        };
        Ok(self.moves_for(mover))
    }

    /// Moves available to a known mover (order is deterministic per state)
    fn moves_for(&self, mover: Side) -> Vec<Move> {
        if self.in_hand(mover) > 0 {
            return self.free_cells().map(|to| Move::Place { to }).collect();
        }

        if self.on_board(mover) > MIN_PIECES {
            let mut moves = Vec::new();
            for from in self.locations(mover) {
                for to in self.variant.neighbors(from) {
                    if self.free_cells.contains(&to) {
                        moves.push(Move::Shift { from, to });
                    }
                }
            }
            return moves;
        }

        // Reduced to the minimum: no moves, which is a loss
        Vec::new()
    }

    // ========================================================================
    // APPLY MOVE
    // ========================================================================

    /// Apply a move for `mover`, returning the successor state.
    ///
    /// Each mill closed by the moved piece removes one opposing piece: the
    /// opponent's lowest occupied cell in canonical order. A double mill
    /// therefore removes two.
    pub fn apply_move(&self, mv: Move, mover: Side) -> Self {
        let mut next = self.clone();
        next.apply_move_internal(mv, mover);
        debug_assert!(next.invariants_hold());
        next
    }

    fn apply_move_internal(&mut self, mv: Move, mover: Side) {
        match mv {
            Move::Place { to } => {
                self.put(to, mover);
                match mover {
                    Side::Max => self.max_in_hand -= 1,
                    Side::Min => self.min_in_hand -= 1,
                }
            }
            Move::Shift { from, to } => {
                self.take(from, mover);
                self.put(to, mover);
            }
        }

        self.last_mover = Some(mover);

        let closed = self.mills_closed_at(mv.target(), mover);
        for _ in 0..closed {
            self.remove_lowest(mover.opponent());
        }
    }

    fn put(&mut self, cell: Cell, side: Side) {
        debug_assert!(self.free_cells.contains(&cell));
        self.grid[cell.ring as usize][cell.index as usize] = Some(side);
        self.free_cells.remove(&cell);
        match side {
            Side::Max => self.max_locations.insert(cell),
            Side::Min => self.min_locations.insert(cell),
        };
    }

    fn take(&mut self, cell: Cell, side: Side) {
        debug_assert_eq!(self.occupant(cell), Some(side));
        self.grid[cell.ring as usize][cell.index as usize] = None;
        self.free_cells.insert(cell);
        match side {
            Side::Max => self.max_locations.remove(&cell),
            Side::Min => self.min_locations.remove(&cell),
        };
    }

    /// Mills newly closed by the piece that just arrived on `cell`
    fn mills_closed_at(&self, cell: Cell, side: Side) -> usize {
        let own = self.location_set(side);
        self.variant
            .lines_through(cell)
            .iter()
            .filter(|line| line.iter().all(|c| own.contains(c)))
            .count()
    }

    /// Remove the side's lowest piece in canonical order, if any remain
    fn remove_lowest(&mut self, side: Side) {
        let lowest = self.locations(side).next();
        if let Some(cell) = lowest {
            self.take(cell, side);
        }
    }

    // ========================================================================
    // TERMINAL DETECTION
    // ========================================================================

    /// Terminal outcome, or `None` while the game is undecided.
    ///
    /// A side loses once it is at or below the minimum piece count with an
    /// empty hand, or once it has no legal moves on its turn. The initial
    /// state is always undecided.
    pub fn utility(&self) -> Option<Outcome> {
        let last = self.last_mover?;

        match last {
            Side::Max if self.min_in_hand == 0 && self.min_locations.len() <= MIN_PIECES => {
                return Some(Outcome::MaxWin);
            }
            Side::Min if self.max_in_hand == 0 && self.max_locations.len() <= MIN_PIECES => {
                return Some(Outcome::MinWin);
            }
            _ => {}
        }

        if self.moves_for(last.opponent()).is_empty() {
            return Some(match last {
                Side::Max => Outcome::MaxWin,
                Side::Min => Outcome::MinWin,
            });
        }

        None
    }

    // ========================================================================
    // EVALUATION COUNTERS
    // ========================================================================

    /// Closed mills a side currently holds; each line counts once, so a
    /// shared corner never double-counts a single line
    pub fn mill_count(&self, side: Side) -> usize {
        let own = self.location_set(side);
        self.variant
            .lines()
            .iter()
            .filter(|line| line.iter().all(|c| own.contains(c)))
            .count()
    }

    /// Lines one piece short of a mill: two own pieces and a free third
    /// cell. In the movement phase the free cell must also be reachable by
    /// an own piece from outside the line (moving a line piece would only
    /// break the pair).
    pub fn near_mill_count(&self, side: Side, phase: Phase) -> usize {
        let own = self.location_set(side);
        let mut count = 0;

        for line in self.variant.lines() {
            let missing: Vec<Cell> = line
                .iter()
                .copied()
                .filter(|c| !own.contains(c))
                .collect();
            let &[hole] = missing.as_slice() else {
                continue;
            };
            if !self.free_cells.contains(&hole) {
                continue;
            }

            let completable = match phase {
                Phase::Placing => true,
                Phase::Moving => self
                    .variant
                    .neighbors(hole)
                    .iter()
                    .any(|n| own.contains(n) && !line.contains(n)),
            };

            if completable {
                count += 1;
            }
        }

        count
    }

    /// Pieces of a side with no adjacent free cell (fully immobilized).
    /// An evaluation signal only; legality comes from `legal_moves`.
    pub fn blocked_count(&self, side: Side) -> usize {
        self.locations(side)
            .filter(|&cell| {
                self.variant
                    .neighbors(cell)
                    .iter()
                    .all(|n| !self.free_cells.contains(n))
            })
            .count()
    }

    // ========================================================================
    // CONSISTENCY
    // ========================================================================

    fn invariants_hold(&self) -> bool {
        let partition_ok = self.max_locations.len()
            + self.min_locations.len()
            + self.free_cells.len()
            == self.variant.cell_count();

        let grid_ok = self.variant.cells().all(|cell| match self.occupant(cell) {
            Some(Side::Max) => {
                self.max_locations.contains(&cell) && !self.free_cells.contains(&cell)
            }
            Some(Side::Min) => {
                self.min_locations.contains(&cell) && !self.free_cells.contains(&cell)
            }
            None => self.free_cells.contains(&cell),
        });

        let budget = self.variant.pieces_per_side() as usize;
        let counts_ok = self.max_locations.len() + self.max_in_hand as usize <= budget
            && self.min_locations.len() + self.min_in_hand as usize <= budget;

        partition_ok && grid_ok && counts_ok
    }
}

// ============================================================================
// VALUE EQUALITY
// ============================================================================

// Equality and hashing are defined over the canonical position only: the
// location sets are derived data and the last mover is not part of position
// identity for callers deduplicating states.

impl PartialEq for MorrisState {
    fn eq(&self, other: &Self) -> bool {
        self.variant == other.variant
            && self.grid == other.grid
            && self.max_in_hand == other.max_in_hand
            && self.min_in_hand == other.min_in_hand
    }
}

impl Eq for MorrisState {}

impl Hash for MorrisState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.variant.hash(state);
        self.grid.hash(state);
        self.max_in_hand.hash(state);
        self.min_in_hand.hash(state);
    }
}

// ============================================================================
// GAME CONTRACT
// ============================================================================

impl Game for MorrisState {
    type Move = Move;

    fn utility(&self) -> Option<Outcome> {
        MorrisState::utility(self)
    }

    fn legal_moves(&self) -> Result<Vec<Move>, RulesError> {
        MorrisState::legal_moves(self)
    }

    fn apply_move(&self, mv: Move, mover: Side) -> Self {
        MorrisState::apply_move(self, mv, mover)
    }

    fn evaluate(&self, perspective: Side) -> f32 {
        crate::eval::evaluate(self, perspective, &crate::eval::Weights::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================
