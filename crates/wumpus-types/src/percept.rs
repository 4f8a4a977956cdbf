//! The percept delivered to the agent at the start of each turn.

use serde::{Deserialize, Serialize};

/// Sensations available at the agent's current cell.
///
/// `breeze`, `stench` and `glitter` are computed fresh from the world each
/// turn. `bump` and `scream` report the physical outcome of the agent's
/// previous action and are attached by the turn cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Percept {
    /// A pit is orthogonally adjacent.
    pub breeze: bool,
    /// The wumpus is orthogonally adjacent.
    pub stench: bool,
    /// The gold is in this cell.
    pub glitter: bool,
    /// The previous move hit a wall.
    pub bump: bool,
    /// The previous shot killed the wumpus.
    pub scream: bool,
}

impl Percept {
    /// Attach the feedback flags from the previous action.
    #[must_use]
    pub const fn with_feedback(mut self, bump: bool, scream: bool) -> Self {
        self.bump = bump;
        self.scream = scream;
        self
    }

    /// Neither breeze nor stench: every neighbor is hazard-free.
    pub const fn is_quiet(&self) -> bool {
        !self.breeze && !self.stench
    }
}

impl core::fmt::Display for Percept {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let flags = [
            (self.breeze, "breeze"),
            (self.stench, "stench"),
            (self.glitter, "glitter"),
            (self.bump, "bump"),
            (self.scream, "scream"),
        ];
        let mut wrote = false;
        for (set, name) in flags {
            if set {
                if wrote {
                    write!(f, ",")?;
                }
                write!(f, "{name}")?;
                wrote = true;
            }
        }
        if !wrote {
            write!(f, "none")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_when_no_breeze_or_stench() {
        let p = Percept {
            glitter: true,
            ..Percept::default()
        };
        assert!(p.is_quiet());
        let p = Percept {
            breeze: true,
            ..Percept::default()
        };
        assert!(!p.is_quiet());
    }

    #[test]
    fn feedback_is_attached() {
        let p = Percept::default().with_feedback(true, false);
        assert!(p.bump);
        assert!(!p.scream);
    }

    #[test]
    fn display_lists_flags() {
        assert_eq!(Percept::default().to_string(), "none");
        let p = Percept {
            breeze: true,
            glitter: true,
            ..Percept::default()
        };
        assert_eq!(p.to_string(), "breeze,glitter");
    }
}
