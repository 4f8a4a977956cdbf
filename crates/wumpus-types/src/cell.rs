//! Grid coordinates and compass directions.
//!
//! A [`Cell`] is a 1-based `(x, y)` coordinate. `x` grows to the east and
//! `y` grows to the north, so the start cell `(1, 1)` is the south-west
//! corner. [`Direction::delta`] is the only displacement table in the
//! workspace; moving, shooting, and neighbor enumeration all go through it.

use serde::{Deserialize, Serialize};

/// A single grid coordinate.
///
/// Cells are ordered by `x` first, then `y`. That ordering makes every
/// `BTreeSet<Cell>` iterate deterministically, which in turn makes tie
/// breaks in target selection reproducible across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Column, 1-based, growing eastward.
    pub x: u32,
    /// Row, 1-based, growing northward.
    pub y: u32,
}

impl Cell {
    /// The cell every game starts on, and the only cell one can climb out of.
    pub const START: Self = Self::new(1, 1);

    /// Create a cell from raw coordinates.
    ///
    /// No bounds are checked here; grid membership is a property of the
    /// world, not of the coordinate.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two cells.
    pub const fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }

    /// The cell one unit step away in `direction`.
    ///
    /// Returns `None` only when the step would underflow below zero; the
    /// caller is responsible for checking the result against grid bounds.
    pub const fn offset(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.delta();
        let Some(x) = self.x.checked_add_signed(dx) else {
            return None;
        };
        let Some(y) = self.y.checked_add_signed(dy) else {
            return None;
        };
        Some(Self { x, y })
    }

    /// The direction of a unit orthogonal step from `self` to `to`.
    ///
    /// Returns `None` when `to` is not exactly one orthogonal step away.
    pub fn direction_to(self, to: Self) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&d| self.offset(d) == Some(to))
    }
}

impl core::fmt::Display for Cell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four compass directions. There is no diagonal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Towards larger `y`.
    North,
    /// Towards larger `x`.
    East,
    /// Towards smaller `y`.
    South,
    /// Towards smaller `x`.
    West,
}

impl Direction {
    /// All four directions in enumeration order.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Unit displacement `(dx, dy)` for this direction.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::West => (-1, 0),
        }
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::North => write!(f, "north"),
            Self::East => write!(f, "east"),
            Self::South => write!(f, "south"),
            Self::West => write!(f, "west"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_is_symmetric() {
        let a = Cell::new(1, 1);
        let b = Cell::new(3, 4);
        assert_eq!(a.manhattan(b), 5);
        assert_eq!(b.manhattan(a), 5);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn offsets_follow_compass() {
        let c = Cell::new(2, 2);
        assert_eq!(c.offset(Direction::North), Some(Cell::new(2, 3)));
        assert_eq!(c.offset(Direction::East), Some(Cell::new(3, 2)));
        assert_eq!(c.offset(Direction::South), Some(Cell::new(2, 1)));
        assert_eq!(c.offset(Direction::West), Some(Cell::new(1, 2)));
    }

    #[test]
    fn offset_below_zero_is_none() {
        let c = Cell::new(0, 0);
        assert_eq!(c.offset(Direction::West), None);
        assert_eq!(c.offset(Direction::South), None);
    }

    #[test]
    fn direction_to_adjacent_only() {
        let c = Cell::new(2, 2);
        assert_eq!(c.direction_to(Cell::new(2, 3)), Some(Direction::North));
        assert_eq!(c.direction_to(Cell::new(1, 2)), Some(Direction::West));
        assert_eq!(c.direction_to(Cell::new(3, 3)), None);
        assert_eq!(c.direction_to(c), None);
    }

    #[test]
    fn cells_order_by_x_then_y() {
        assert!(Cell::new(1, 4) < Cell::new(2, 1));
        assert!(Cell::new(2, 1) < Cell::new(2, 2));
    }
}
