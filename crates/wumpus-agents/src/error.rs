//! Error types for the wumpus-agents crate.
//!
//! Game events such as bumping, dying, or finding no path are ordinary
//! return values. The errors here only cover caller misuse.

use wumpus_world::WorldError;

/// Errors that can occur during agent operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    /// A world operation rejected its arguments.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// The agent has died or left the cave and cannot act again.
    #[error("agent is no longer in play")]
    Inactive,
}
