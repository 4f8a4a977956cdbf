//! Cave layout, hazard placement, and percept physics for the Wumpus World.
//!
//! This crate models the physical world the agent explores: a fixed-size
//! square grid with one wumpus, one pile of gold, and a handful of pits.
//! It knows nothing about what the agent believes.
//!
//! # Modules
//!
//! - [`error`] -- Error types for grid and layout operations.
//! - [`grid`] -- [`GridBounds`]: coordinate validation and neighbor queries.
//! - [`world_model`] -- [`WorldModel`]: feature placement, seeded generation,
//!   percepts, movement, and arrow flight.

pub mod error;
pub mod grid;
pub mod world_model;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use grid::{DEFAULT_GRID_SIZE, GridBounds, MAX_GRID_SIZE};
pub use world_model::{DEFAULT_PIT_COUNT, WorldModel};
