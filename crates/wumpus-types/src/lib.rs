//! Shared type definitions for the Wumpus World agent.
//!
//! This crate is the single source of truth for the value types passed
//! between the world model, the agent's reasoning layer, and the game
//! driver. Nothing in here owns state or performs I/O.
//!
//! # Modules
//!
//! - [`cell`] -- Grid coordinates and the [`Direction`] displacement table
//! - [`enums`] -- Cell features and causes of death
//! - [`actions`] -- The action vocabulary and the per-action [`TurnOutcome`]
//! - [`percept`] -- The sensations available at the agent's current cell

pub mod actions;
pub mod cell;
pub mod enums;
pub mod percept;

// Re-export all public types at crate root for convenience.
pub use actions::{Action, ActionParseError, TurnOutcome};
pub use cell::{Cell, Direction};
pub use enums::{DeathCause, Feature};
pub use percept::Percept;
