//! Enumeration types for the Wumpus World.
//!
//! [`Feature`] is the closed set of things a cell can contain. The world
//! model matches on it exhaustively; there is no runtime type probing.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Cell features
// ---------------------------------------------------------------------------

/// What occupies a single cell of the cave.
///
/// At most one feature exists per cell. The world stores features sparsely,
/// so a missing entry means [`Feature::Empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// The wumpus. Lethal to enter, causes stench in neighboring cells.
    Wumpus,
    /// A bottomless pit. Lethal to enter, causes breeze in neighboring cells.
    Pit,
    /// The gold. Glitters in its own cell.
    Gold,
    /// Nothing here.
    Empty,
}

impl Feature {
    /// Whether entering a cell holding this feature kills the agent.
    pub const fn is_hazard(self) -> bool {
        matches!(self, Self::Wumpus | Self::Pit)
    }

    /// The cause of death for entering a cell holding this feature, if any.
    pub const fn death_cause(self) -> Option<DeathCause> {
        match self {
            Self::Wumpus => Some(DeathCause::Wumpus),
            Self::Pit => Some(DeathCause::Pit),
            Self::Gold | Self::Empty => None,
        }
    }

    /// Single-letter map symbol.
    pub const fn symbol(self) -> char {
        match self {
            Self::Wumpus => 'W',
            Self::Pit => 'P',
            Self::Gold => 'G',
            Self::Empty => '.',
        }
    }
}

// ---------------------------------------------------------------------------
// Death
// ---------------------------------------------------------------------------

/// How the agent died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    /// Fell into a pit.
    Pit,
    /// Eaten by the wumpus.
    Wumpus,
}

impl core::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Pit => write!(f, "pit"),
            Self::Wumpus => write!(f, "wumpus"),
        }
    }
}
