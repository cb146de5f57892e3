//! Morris board topology: concentric square rings with fixed mill lines

use serde::{Deserialize, Serialize};
use std::fmt;

/// Positions per ring (four corners, four side midpoints)
pub const RING_CELLS: u8 = 8;

/// Smallest on-board force that can still play; at this count a side has lost
pub const MIN_PIECES: usize = 2;

/// A board cell addressed by (ring, position-in-ring)
///
/// Index 0 is the top-left corner of the ring, increasing clockwise.
/// Even indices are corners, odd indices are side midpoints. The derived
/// `Ord` (ring-major, then index) is the canonical enumeration order used
/// everywhere moves and pieces are listed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub ring: u8,
    pub index: u8,
}

impl Cell {
    pub const fn new(ring: u8, index: u8) -> Self {
        Self { ring, index }
    }

    /// Corner of a ring (no spoke connection)
    pub fn is_corner(&self) -> bool {
        self.index % 2 == 0
    }

    /// Midpoint of a ring side (spoke connection point)
    pub fn is_midpoint(&self) -> bool {
        self.index % 2 == 1
    }

    /// Counter-clockwise neighbor on the same ring
    pub fn ring_prev(&self) -> Cell {
        Cell::new(self.ring, (self.index + RING_CELLS - 1) % RING_CELLS)
    }

    /// Clockwise neighbor on the same ring
    pub fn ring_next(&self) -> Cell {
        Cell::new(self.ring, (self.index + 1) % RING_CELLS)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ring, self.index)
    }
}

/// Game variant: fixes ring count, starting pieces and the mill-line table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Two rings, six pieces per side, no spoke mills
    SixMens,
    /// Three rings, nine pieces per side, the four full spokes are mills
    NineMens,
}

impl Variant {
    pub fn rings(self) -> u8 {
        match self {
            Variant::SixMens => 2,
            Variant::NineMens => 3,
        }
    }

    pub fn pieces_per_side(self) -> u8 {
        match self {
            Variant::SixMens => 6,
            Variant::NineMens => 9,
        }
    }

    pub fn cell_count(self) -> usize {
        self.rings() as usize * RING_CELLS as usize
    }

    /// All cells in canonical order (ring-major, then index)
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.rings()).flat_map(|ring| (0..RING_CELLS).map(move |index| Cell::new(ring, index)))
    }

    pub fn contains(self, cell: Cell) -> bool {
        cell.ring < self.rings() && cell.index < RING_CELLS
    }

    /// Topological neighbors of a cell, in a fixed order: ring predecessor,
    /// ring successor, then cross-ring spokes by ascending ring.
    ///
    /// Spokes exist only at midpoints and only between adjacent rings.
    pub fn neighbors(self, cell: Cell) -> Vec<Cell> {
        let mut adjacent = vec![cell.ring_prev(), cell.ring_next()];

        if cell.is_midpoint() {
            if cell.ring > 0 {
                adjacent.push(Cell::new(cell.ring - 1, cell.index));
            }
            if cell.ring + 1 < self.rings() {
                adjacent.push(Cell::new(cell.ring + 1, cell.index));
            }
        }

        adjacent
    }

    /// Every mill line on the board, in a fixed order: the four side lines of
    /// each ring (ring-major), then any spoke lines.
    ///
    /// A ring side line runs corner - midpoint - corner; a spoke line (Nine
    /// Men's only) runs through the three midpoints at one index.
    pub fn lines(self) -> Vec<[Cell; 3]> {
        let mut lines = Vec::with_capacity(self.rings() as usize * 4 + 4);

        for ring in 0..self.rings() {
            for side in 0..4 {
                let mid = side * 2 + 1;
                lines.push([
                    Cell::new(ring, mid - 1),
                    Cell::new(ring, mid),
                    Cell::new(ring, (mid + 1) % RING_CELLS),
                ]);
            }
        }

        if self.rings() == 3 {
            for index in (1..RING_CELLS).step_by(2) {
                lines.push([Cell::new(0, index), Cell::new(1, index), Cell::new(2, index)]);
            }
        }

        lines
    }

    /// Mill lines containing the given cell
    pub fn lines_through(self, cell: Cell) -> Vec<[Cell; 3]> {
        self.lines()
            .into_iter()
            .filter(|line| line.contains(&cell))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_counts() {
        assert_eq!(Variant::SixMens.cell_count(), 16);
        assert_eq!(Variant::NineMens.cell_count(), 24);
        assert_eq!(Variant::SixMens.cells().count(), 16);
        assert_eq!(Variant::NineMens.cells().count(), 24);
    }

    #[test]
    fn test_ring_neighbors_wrap() {
        let cell = Cell::new(0, 0);
        assert_eq!(cell.ring_prev(), Cell::new(0, 7));
        assert_eq!(cell.ring_next(), Cell::new(0, 1));
    }

    #[test]
    fn test_corner_adjacency() {
        // Corners only touch their two ring neighbors
        let adjacent = Variant::SixMens.neighbors(Cell::new(0, 2));
        assert_eq!(adjacent, vec![Cell::new(0, 1), Cell::new(0, 3)]);
    }

    #[test]
    fn test_midpoint_spokes() {
        // Outer midpoint reaches inward
        let outer = Variant::SixMens.neighbors(Cell::new(0, 1));
        assert!(outer.contains(&Cell::new(1, 1)));
        assert_eq!(outer.len(), 3);

        // Middle-ring midpoint in Nine Men's reaches both ways
        let middle = Variant::NineMens.neighbors(Cell::new(1, 3));
        assert!(middle.contains(&Cell::new(0, 3)));
        assert!(middle.contains(&Cell::new(2, 3)));
        assert_eq!(middle.len(), 4);
    }

    #[test]
    fn test_line_tables() {
        assert_eq!(Variant::SixMens.lines().len(), 8);
        assert_eq!(Variant::NineMens.lines().len(), 16);

        // Every line is corner-midpoint-corner or a full spoke
        for line in Variant::NineMens.lines() {
            let midpoints = line.iter().filter(|c| c.is_midpoint()).count();
            assert!(midpoints == 1 || midpoints == 3);
        }
    }

    #[test]
    fn test_lines_through() {
        // A corner sits on exactly two ring lines
        assert_eq!(Variant::SixMens.lines_through(Cell::new(0, 0)).len(), 2);
        // A Six Men's midpoint sits on one line, a Nine Men's midpoint on two
        assert_eq!(Variant::SixMens.lines_through(Cell::new(1, 5)).len(), 1);
        assert_eq!(Variant::NineMens.lines_through(Cell::new(1, 5)).len(), 2);
    }
}
