//! Error types for the `wumpus-world` crate.
//!
//! Every operation that accepts a coordinate from outside the crate checks
//! it first and reports [`WorldError::OutOfBounds`] instead of touching
//! state. Bumping into a wall is not an error; it is a normal move outcome.

use wumpus_types::Cell;

/// Errors that can occur during world operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// A coordinate outside `[1, size]` on either axis.
    #[error("cell {cell} is outside the {size}x{size} grid")]
    OutOfBounds {
        /// The rejected coordinate.
        cell: Cell,
        /// Side length of the grid.
        size: u32,
    },

    /// The requested grid side length is not supported.
    #[error("grid size {size} is not supported (expected {min}..={max})")]
    InvalidSize {
        /// The rejected side length.
        size: u32,
        /// Smallest supported side length.
        min: u32,
        /// Largest supported side length.
        max: u32,
    },

    /// The grid has too few free cells for the requested hazards.
    #[error("cannot place {requested} features in {available} free cells")]
    TooManyHazards {
        /// Number of features to place (wumpus, gold, and pits).
        requested: u32,
        /// Number of cells other than the start cell.
        available: u32,
    },

    /// An explicit layout violates the placement rules.
    #[error("invalid layout: {reason}")]
    InvalidLayout {
        /// Description of the violated rule.
        reason: String,
    },
}
