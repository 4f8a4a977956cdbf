//! The action vocabulary and the outcome of applying one action.
//!
//! [`Action`] is the complete command surface of the game:
//! `MOVE_NORTH | MOVE_EAST | MOVE_SOUTH | MOVE_WEST | SHOOT | GRAB | CLIMB`.
//! After an action is applied to the world, the driver receives a
//! [`TurnOutcome`] describing what physically happened.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, Direction};
use crate::enums::DeathCause;

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// A single command the agent (or a manual driver) can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Step one cell north.
    MoveNorth,
    /// Step one cell east.
    MoveEast,
    /// Step one cell south.
    MoveSouth,
    /// Step one cell west.
    MoveWest,
    /// Loose the single arrow in the facing direction.
    Shoot,
    /// Pick up the gold in the current cell.
    Grab,
    /// Leave the cave. Only has an effect on the start cell.
    Climb,
}

impl Action {
    /// The move action for a direction.
    pub const fn move_toward(direction: Direction) -> Self {
        match direction {
            Direction::North => Self::MoveNorth,
            Direction::East => Self::MoveEast,
            Direction::South => Self::MoveSouth,
            Direction::West => Self::MoveWest,
        }
    }

    /// The direction of a move action, or `None` for non-move actions.
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::MoveNorth => Some(Direction::North),
            Self::MoveEast => Some(Direction::East),
            Self::MoveSouth => Some(Direction::South),
            Self::MoveWest => Some(Direction::West),
            Self::Shoot | Self::Grab | Self::Climb => None,
        }
    }

    /// The move that takes the agent from `from` to the adjacent cell `to`.
    ///
    /// Coordinates are compared x first, then y, so a diagonal pair still
    /// yields a single orthogonal move. Returns `None` only when the cells
    /// are identical.
    pub const fn step_between(from: Cell, to: Cell) -> Option<Self> {
        if to.x > from.x {
            Some(Self::MoveEast)
        } else if to.x < from.x {
            Some(Self::MoveWest)
        } else if to.y > from.y {
            Some(Self::MoveNorth)
        } else if to.y < from.y {
            Some(Self::MoveSouth)
        } else {
            None
        }
    }

    /// Canonical upper-case name, as used on the wire and in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MoveNorth => "MOVE_NORTH",
            Self::MoveEast => "MOVE_EAST",
            Self::MoveSouth => "MOVE_SOUTH",
            Self::MoveWest => "MOVE_WEST",
            Self::Shoot => "SHOOT",
            Self::Grab => "GRAB",
            Self::Climb => "CLIMB",
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action name that is not part of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action: {input:?}")]
pub struct ActionParseError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for Action {
    type Err = ActionParseError;

    /// Parse a canonical name (`MOVE_NORTH`, case-insensitive) or one of the
    /// short aliases `n`, `e`, `s`, `w`, `shoot`, `grab`, `climb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "MOVE_NORTH" | "NORTH" | "N" => Ok(Self::MoveNorth),
            "MOVE_EAST" | "EAST" | "E" => Ok(Self::MoveEast),
            "MOVE_SOUTH" | "SOUTH" | "S" => Ok(Self::MoveSouth),
            "MOVE_WEST" | "WEST" | "W" => Ok(Self::MoveWest),
            "SHOOT" => Ok(Self::Shoot),
            "GRAB" => Ok(Self::Grab),
            "CLIMB" => Ok(Self::Climb),
            _ => Err(ActionParseError {
                input: s.to_owned(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// TurnOutcome
// ---------------------------------------------------------------------------

/// What physically happened when an action was applied.
///
/// `died` and `climbed_out` are terminal: the game is over once either is
/// set. They are ordinary values, never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct TurnOutcome {
    /// The action that was applied.
    pub action: Action,
    /// A move ran into the grid boundary; position is unchanged.
    pub bumped: bool,
    /// A shot killed the wumpus.
    pub screamed: bool,
    /// The agent ended the action on a hazard.
    pub died: bool,
    /// Which hazard killed the agent, if it died.
    pub death_cause: Option<DeathCause>,
    /// The agent climbed out of the cave from the start cell.
    pub climbed_out: bool,
}

impl TurnOutcome {
    /// An outcome with no physical effects for `action`.
    pub const fn quiet(action: Action) -> Self {
        Self {
            action,
            bumped: false,
            screamed: false,
            died: false,
            death_cause: None,
            climbed_out: false,
        }
    }

    /// Whether the game ended with this action.
    pub const fn is_terminal(&self) -> bool {
        self.died || self.climbed_out
    }
}
