//! Belief state, inference, path planning, and scoring for the agent.
//!
//! This crate contains the reasoning layer: everything the agent knows and
//! how that knowledge changes. It sits between `wumpus-world` (the physical
//! cave) and `wumpus-core` (the turn cycle and decision policy) and performs
//! no I/O.
//!
//! # Modules
//!
//! - [`agent`] -- [`Agent`]: position, inventory, score, and outcome
//!   application against the world.
//! - [`belief`] -- [`BeliefState`]: the safe / unsafe / unknown partition,
//!   visit history, and the latched wumpus sighting.
//! - [`config`] -- Tunable scoring values and the scream policy.
//! - [`error`] -- Error types for agent operations ([`AgentError`]).
//! - [`inference`] -- Percept-driven belief updates.
//! - [`planner`] -- A* search over cells the belief certifies as passable.

pub mod agent;
pub mod belief;
pub mod config;
pub mod error;
pub mod inference;
pub mod planner;

// Re-export primary types at crate root for convenience.
pub use agent::Agent;
pub use belief::{BeliefState, WumpusSighting};
pub use config::{InferenceConfig, ScoringConfig, ScreamPolicy};
pub use error::AgentError;
pub use inference::{InferenceReport, observe};
pub use planner::find_path;
