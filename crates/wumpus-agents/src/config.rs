//! Scoring values and inference toggles.
//!
//! The defaults reproduce the classic performance measure: -1 per move,
//! -1 extra for bumping a wall, -10 for the arrow, +1000 for the gold,
//! -1000 for dying, and -1 for climbing out empty-handed. `wumpus-core`
//! embeds both structs in its YAML configuration.

use serde::{Deserialize, Serialize};

/// Points added or removed by each action outcome.
///
/// All values are magnitudes; [`crate::Agent::apply`] decides the sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Cost of any move action (default: 1).
    pub move_cost: i64,

    /// Extra cost when a move bumps into the boundary (default: 1).
    pub bump_penalty: i64,

    /// Cost of loosing the arrow (default: 10).
    pub arrow_cost: i64,

    /// Reward for picking up the gold (default: 1000).
    pub gold_reward: i64,

    /// Cost of ending a turn on a pit or the wumpus (default: 1000).
    pub death_penalty: i64,

    /// Cost of climbing out without the gold (default: 1).
    pub climb_without_gold_penalty: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            move_cost: 1,
            bump_penalty: 1,
            arrow_cost: 10,
            gold_reward: 1000,
            death_penalty: 1000,
            climb_without_gold_penalty: 1,
        }
    }
}

/// What the agent does to its beliefs when it hears the wumpus scream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreamPolicy {
    /// Mark every cell of the grid safe, including cells previously
    /// deduced to hold pits. This is the classic behavior.
    ///
    /// A pit deduced from a breeze is still a pit after the wumpus dies,
    /// so this can walk the agent into one.
    #[default]
    Optimistic,

    /// Only clear the wumpus sighting. Pit deductions and unknown cells
    /// are kept as they were.
    Conservative,
}

/// Knobs for the inference engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Belief update applied on a scream.
    pub scream_policy: ScreamPolicy,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_scoring_matches_classic_measure() {
        let s = ScoringConfig::default();
        assert_eq!(s.move_cost, 1);
        assert_eq!(s.bump_penalty, 1);
        assert_eq!(s.arrow_cost, 10);
        assert_eq!(s.gold_reward, 1000);
        assert_eq!(s.death_penalty, 1000);
        assert_eq!(s.climb_without_gold_penalty, 1);
    }

    #[test]
    fn scream_policy_defaults_to_optimistic() {
        assert_eq!(InferenceConfig::default().scream_policy, ScreamPolicy::Optimistic);
    }

    #[test]
    fn partial_scoring_json_fills_defaults() {
        let s: ScoringConfig = serde_json::from_str(r#"{"gold_reward": 500}"#).unwrap();
        assert_eq!(s.gold_reward, 500);
        assert_eq!(s.death_penalty, 1000);
    }

    #[test]
    fn scream_policy_parses_snake_case() {
        let c: InferenceConfig =
            serde_json::from_str(r#"{"scream_policy": "conservative"}"#).unwrap();
        assert_eq!(c.scream_policy, ScreamPolicy::Conservative);
    }
}
