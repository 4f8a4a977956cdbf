//! Grid bounds: the `[1, N] x [1, N]` coordinate space.
//!
//! [`GridBounds`] is a small copyable value shared by the world model, the
//! agent's belief state, and the path planner so that all three agree on
//! which cells exist and who their neighbors are.

use serde::{Deserialize, Serialize};
use wumpus_types::{Cell, Direction};

use crate::error::WorldError;

/// Side length of the classic Wumpus World cave.
pub const DEFAULT_GRID_SIZE: u32 = 4;

/// Smallest supported side length. A 1x1 cave has no room for hazards.
pub const MIN_GRID_SIZE: u32 = 2;

/// Largest supported side length.
pub const MAX_GRID_SIZE: u32 = 64;

/// The extent of a square grid with 1-based coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    /// Side length `N`.
    size: u32,
}

impl GridBounds {
    /// Create bounds for an `size` x `size` grid.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidSize`] if `size` is outside
    /// `MIN_GRID_SIZE..=MAX_GRID_SIZE`.
    pub const fn new(size: u32) -> Result<Self, WorldError> {
        if size < MIN_GRID_SIZE || size > MAX_GRID_SIZE {
            return Err(WorldError::InvalidSize {
                size,
                min: MIN_GRID_SIZE,
                max: MAX_GRID_SIZE,
            });
        }
        Ok(Self { size })
    }

    /// Side length of the grid.
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Total number of cells.
    pub const fn cell_count(&self) -> u32 {
        self.size.saturating_mul(self.size)
    }

    /// Whether the cell lies inside the grid.
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.x >= 1 && cell.x <= self.size && cell.y >= 1 && cell.y <= self.size
    }

    /// Validate a cell supplied by a caller.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if the cell is not on the grid.
    pub const fn check(&self, cell: Cell) -> Result<Cell, WorldError> {
        if self.contains(cell) {
            Ok(cell)
        } else {
            Err(WorldError::OutOfBounds {
                cell,
                size: self.size,
            })
        }
    }

    /// The in-bounds cell one step from `cell` in `direction`, if any.
    pub fn step(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        cell.offset(direction).filter(|c| self.contains(*c))
    }

    /// Every cell of the grid, column by column.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let size = self.size;
        (1..=size).flat_map(move |x| (1..=size).map(move |y| Cell::new(x, y)))
    }

    /// The in-bounds orthogonal neighbors of `cell`, each paired with the
    /// direction that leads to it.
    pub fn neighbors(&self, cell: Cell) -> Vec<(Cell, Direction)> {
        Direction::ALL
            .into_iter()
            .filter_map(|d| self.step(cell, d).map(|n| (n, d)))
            .collect()
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    #[test]
    fn rejects_tiny_and_huge_grids() {
        assert!(GridBounds::new(1).is_err());
        assert!(GridBounds::new(0).is_err());
        assert!(GridBounds::new(MAX_GRID_SIZE + 1).is_err());
        assert!(GridBounds::new(2).is_ok());
    }

    #[test]
    fn contains_is_one_based() {
        let b = GridBounds::default();
        assert!(b.contains(Cell::new(1, 1)));
        assert!(b.contains(Cell::new(4, 4)));
        assert!(!b.contains(Cell::new(0, 1)));
        assert!(!b.contains(Cell::new(1, 5)));
    }

    #[test]
    fn check_reports_out_of_bounds() {
        let b = GridBounds::default();
        let err = b.check(Cell::new(5, 2)).unwrap_err();
        assert_eq!(
            err,
            WorldError::OutOfBounds {
                cell: Cell::new(5, 2),
                size: 4
            }
        );
    }

    #[test]
    fn cells_cover_whole_grid() {
        let b = GridBounds::new(3).unwrap();
        let cells: Vec<Cell> = b.cells().collect();
        assert_eq!(cells.len(), 9);
        assert_eq!(cells.first(), Some(&Cell::new(1, 1)));
        assert_eq!(cells.last(), Some(&Cell::new(3, 3)));
    }

    #[test]
    fn corner_has_two_neighbors() {
        let b = GridBounds::default();
        let n = b.neighbors(Cell::START);
        assert_eq!(n.len(), 2);
        assert!(n.contains(&(Cell::new(1, 2), Direction::North)));
        assert!(n.contains(&(Cell::new(2, 1), Direction::East)));
    }

    #[test]
    fn interior_has_four_neighbors() {
        let b = GridBounds::default();
        assert_eq!(b.neighbors(Cell::new(2, 3)).len(), 4);
    }

    #[test]
    fn step_stays_on_grid() {
        let b = GridBounds::default();
        assert_eq!(b.step(Cell::new(4, 4), Direction::North), None);
        assert_eq!(b.step(Cell::new(4, 4), Direction::West), Some(Cell::new(3, 4)));
    }
}
