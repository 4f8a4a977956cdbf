//! Decision policies: turning beliefs into an action.
//!
//! A [`DecisionPolicy`] is asked for exactly one action per turn, after the
//! percept has already been folded into the agent's beliefs. The returned
//! [`Decision`] carries the [`DecisionRule`] that fired so the turn log can
//! say why an action was chosen.
//!
//! [`ExplorerPolicy`] evaluates a fixed priority list; the first rule that
//! produces an action wins:
//!
//! 1. **Hunt wumpus**: a sighting is latched and the arrow is held -- shoot
//!    when standing on the sighted cell, otherwise step toward it (x axis
//!    first). The step is not checked against the beliefs.
//! 2. **Grab gold**: glitter and the gold is not yet held.
//! 3. **Return home**: the gold is held -- first step of a safe path to the
//!    start cell, or climb when already there or no safe path exists.
//! 4. **Explore frontier**: nearest safe, unvisited cell.
//! 5. **Backtrack**: most recently visited cell that still has a safe,
//!    unvisited neighbor.
//! 6. **Take risk**: nearest unknown cell, allowing unknown cells en route.
//! 7. **Give up**: climb.
//!
//! "Nearest" means smallest Manhattan distance, ties broken by cell order.
//! Only the nearest target is tried; if it has no path the next rule runs.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use wumpus_agents::{Agent, find_path};
use wumpus_types::{Action, Cell, Percept};

// ---------------------------------------------------------------------------
// Decision tagging
// ---------------------------------------------------------------------------

/// The rule that produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionRule {
    /// Shoot at, or walk toward, the sighted wumpus.
    HuntWumpus,
    /// Pick up glittering gold.
    GrabGold,
    /// Carry the gold back to the start cell.
    ReturnHome,
    /// Head for the nearest safe, unvisited cell.
    ExploreFrontier,
    /// Return to a visited cell that borders unexplored safe ground.
    Backtrack,
    /// Walk into unknown territory.
    TakeRisk,
    /// Nothing left to try; climb out.
    GiveUp,
    /// Next entry of a scripted action list.
    Scripted,
}

impl DecisionRule {
    /// Short label for logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HuntWumpus => "hunt_wumpus",
            Self::GrabGold => "grab_gold",
            Self::ReturnHome => "return_home",
            Self::ExploreFrontier => "explore_frontier",
            Self::Backtrack => "backtrack",
            Self::TakeRisk => "take_risk",
            Self::GiveUp => "give_up",
            Self::Scripted => "scripted",
        }
    }
}

impl core::fmt::Display for DecisionRule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action together with the rule that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// The action to apply.
    pub action: Action,
    /// Why it was chosen.
    pub rule: DecisionRule,
}

impl Decision {
    /// Pair an action with its rule.
    pub const fn new(action: Action, rule: DecisionRule) -> Self {
        Self { action, rule }
    }
}

/// A source of agent actions.
///
/// Implementations see the percept of the current turn and the agent after
/// its beliefs have been updated with that percept.
pub trait DecisionPolicy {
    /// Choose the next action.
    fn decide(&mut self, percept: Percept, agent: &Agent) -> Decision;
}

// ---------------------------------------------------------------------------
// ExplorerPolicy
// ---------------------------------------------------------------------------

/// The rule-based explorer described in the module docs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplorerPolicy;

impl ExplorerPolicy {
    /// Create a new explorer policy.
    pub const fn new() -> Self {
        Self
    }
}

impl DecisionPolicy for ExplorerPolicy {
    fn decide(&mut self, percept: Percept, agent: &Agent) -> Decision {
        let decision = explore(percept, agent);
        debug!(
            cell = %agent.position(),
            rule = decision.rule.as_str(),
            action = %decision.action,
            "Decision made"
        );
        decision
    }
}

fn explore(percept: Percept, agent: &Agent) -> Decision {
    let here = agent.position();
    let belief = agent.belief();

    // Rule 1: Hunt the sighted wumpus
    if agent.has_arrow()
        && let Some(sighting) = belief.wumpus_sighting()
    {
        let action = Action::step_between(here, sighting.cell).unwrap_or(Action::Shoot);
        return Decision::new(action, DecisionRule::HuntWumpus);
    }

    // Rule 2: Grab glittering gold
    if percept.glitter && !agent.has_gold() {
        return Decision::new(Action::Grab, DecisionRule::GrabGold);
    }

    // Rule 3: Carry the gold home
    if agent.has_gold() {
        let action = first_step(agent, Cell::START, false).unwrap_or(Action::Climb);
        return Decision::new(action, DecisionRule::ReturnHome);
    }

    // Rule 4: Nearest safe, unvisited cell
    if let Some(target) = nearest(here, belief.frontier())
        && let Some(action) = first_step(agent, target, false)
    {
        return Decision::new(action, DecisionRule::ExploreFrontier);
    }

    // Rule 5: Backtrack toward unexplored safe ground
    for previous in belief.visits_most_recent_first() {
        let borders_frontier = belief
            .bounds()
            .neighbors(previous)
            .into_iter()
            .any(|(n, _)| belief.is_safe(n) && !belief.is_visited(n));
        if borders_frontier && let Some(action) = first_step(agent, previous, false) {
            return Decision::new(action, DecisionRule::Backtrack);
        }
    }

    // Rule 6: Gamble on the nearest unknown cell
    if let Some(target) = nearest(here, belief.risky_candidates())
        && let Some(action) = first_step(agent, target, true)
    {
        return Decision::new(action, DecisionRule::TakeRisk);
    }

    // Rule 7: Give up
    Decision::new(Action::Climb, DecisionRule::GiveUp)
}

/// The candidate closest to `from`, ties broken by cell order.
fn nearest(from: Cell, candidates: impl Iterator<Item = Cell>) -> Option<Cell> {
    candidates.min_by_key(|&c| (from.manhattan(c), c))
}

/// The move toward the first cell of a path to `goal`, if the path is
/// non-empty.
fn first_step(agent: &Agent, goal: Cell, allow_unknown: bool) -> Option<Action> {
    let here = agent.position();
    let path = match find_path(agent.belief(), here, goal, allow_unknown) {
        Ok(path) => path?,
        Err(err) => {
            warn!(%err, "Path query rejected");
            return None;
        }
    };
    let next = path.first()?;
    Action::step_between(here, *next)
}

// ---------------------------------------------------------------------------
// ScriptedPolicy
// ---------------------------------------------------------------------------

/// Replays a fixed list of actions, then climbs.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPolicy {
    queue: VecDeque<Action>,
}

impl ScriptedPolicy {
    /// Create a policy that plays `actions` in order.
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            queue: actions.into_iter().collect(),
        }
    }

    /// Actions not yet played.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl DecisionPolicy for ScriptedPolicy {
    fn decide(&mut self, _percept: Percept, _agent: &Agent) -> Decision {
        let action = self.queue.pop_front().unwrap_or(Action::Climb);
        debug!(%action, remaining = self.remaining(), "Scripted action");
        Decision::new(action, DecisionRule::Scripted)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wumpus_agents::{ScoringConfig, ScreamPolicy};
    use wumpus_types::Feature;
    use wumpus_world::{GridBounds, WorldModel};

    use super::*;

    fn quiet() -> Percept {
        Percept::default()
    }

    fn stench() -> Percept {
        Percept {
            stench: true,
            ..Percept::default()
        }
    }

    fn breeze() -> Percept {
        Percept {
            breeze: true,
            ..Percept::default()
        }
    }

    /// Observe `percept` at `cell`, leaving the agent there.
    fn sense(agent: &mut Agent, cell: Cell, percept: &Percept) {
        agent.relocate(cell).unwrap();
        agent.observe(percept, ScreamPolicy::Optimistic).unwrap();
    }

    #[test]
    fn quiet_start_explores_nearest_frontier() {
        let mut agent = Agent::new(GridBounds::default());
        sense(&mut agent, Cell::START, &quiet());
        let d = ExplorerPolicy::new().decide(quiet(), &agent);
        // (1,2) and (2,1) tie on distance; (1,2) sorts first.
        assert_eq!(d, Decision::new(Action::MoveNorth, DecisionRule::ExploreFrontier));
    }

    #[test]
    fn glitter_grabs() {
        let mut agent = Agent::new(GridBounds::default());
        let glitter = Percept {
            glitter: true,
            ..Percept::default()
        };
        sense(&mut agent, Cell::START, &glitter);
        let d = ExplorerPolicy::new().decide(glitter, &agent);
        assert_eq!(d, Decision::new(Action::Grab, DecisionRule::GrabGold));
    }

    #[test]
    fn latched_wumpus_is_hunted() {
        let mut agent = Agent::new(GridBounds::default());
        sense(&mut agent, Cell::START, &quiet());
        sense(&mut agent, Cell::new(2, 1), &quiet());
        sense(&mut agent, Cell::new(3, 1), &quiet());
        // (2,3) is the only unknown neighbor of (2,2).
        sense(&mut agent, Cell::new(2, 2), &stench());
        assert!(agent.belief().wumpus_inferred());
        let d = ExplorerPolicy::new().decide(stench(), &agent);
        assert_eq!(d, Decision::new(Action::MoveNorth, DecisionRule::HuntWumpus));
    }

    /// Explore (1,1), (2,1), (3,1), then smell the wumpus at (2,2). The
    /// only unknown neighbor of (2,2) is (2,3).
    fn agent_with_sighting_at_2_3() -> Agent {
        let mut agent = Agent::new(GridBounds::default());
        sense(&mut agent, Cell::START, &quiet());
        sense(&mut agent, Cell::new(2, 1), &quiet());
        sense(&mut agent, Cell::new(3, 1), &quiet());
        sense(&mut agent, Cell::new(2, 2), &stench());
        agent
    }

    #[test]
    fn shoots_when_standing_on_sighted_cell() {
        let mut agent = agent_with_sighting_at_2_3();
        agent.relocate(Cell::new(2, 3)).unwrap();
        let d = ExplorerPolicy::new().decide(stench(), &agent);
        assert_eq!(d, Decision::new(Action::Shoot, DecisionRule::HuntWumpus));
    }

    #[test]
    fn hunt_closes_x_gap_before_y() {
        let mut agent = agent_with_sighting_at_2_3();
        agent.relocate(Cell::START).unwrap();
        let d = ExplorerPolicy::new().decide(quiet(), &agent);
        assert_eq!(d, Decision::new(Action::MoveEast, DecisionRule::HuntWumpus));

        agent.relocate(Cell::new(4, 1)).unwrap();
        let d = ExplorerPolicy::new().decide(quiet(), &agent);
        assert_eq!(d, Decision::new(Action::MoveWest, DecisionRule::HuntWumpus));
    }

    #[test]
    fn no_hunt_without_arrow() {
        let mut agent = agent_with_sighting_at_2_3();
        // Wumpus out of the line of fire: the arrow flies east from (2,2)
        // and misses, so the sighting stays latched.
        let mut world = WorldModel::from_features(
            GridBounds::default(),
            [(Cell::new(1, 4), Feature::Wumpus), (Cell::new(4, 4), Feature::Gold)],
        )
        .unwrap();
        let outcome = agent
            .apply(Action::Shoot, &mut world, &ScoringConfig::default())
            .unwrap();
        assert!(!outcome.screamed);
        assert!(!agent.has_arrow());
        assert!(agent.belief().wumpus_inferred());

        let d = ExplorerPolicy::new().decide(stench(), &agent);
        // (1,2) and (3,2) tie as nearest frontier; (1,2) sorts first.
        assert_eq!(d, Decision::new(Action::MoveWest, DecisionRule::ExploreFrontier));
    }

    #[test]
    fn breeze_everywhere_falls_back_to_risk() {
        let mut agent = Agent::new(GridBounds::default());
        sense(&mut agent, Cell::START, &breeze());
        let d = ExplorerPolicy::new().decide(breeze(), &agent);
        assert_eq!(d, Decision::new(Action::MoveNorth, DecisionRule::TakeRisk));
    }

    #[test]
    fn dead_end_routes_back_to_frontier() {
        let mut agent = Agent::new(GridBounds::default());
        sense(&mut agent, Cell::START, &quiet());
        sense(&mut agent, Cell::new(1, 2), &breeze());
        let d = ExplorerPolicy::new().decide(breeze(), &agent);
        assert_eq!(d, Decision::new(Action::MoveSouth, DecisionRule::ExploreFrontier));
    }

    #[test]
    fn backtracks_when_nearest_frontier_is_cut_off() {
        let mut agent = Agent::new(GridBounds::default());
        sense(&mut agent, Cell::START, &quiet());
        sense(&mut agent, Cell::new(2, 1), &breeze());
        // An island of safe cells around (4,3), unreachable from below.
        sense(&mut agent, Cell::new(4, 3), &quiet());
        sense(&mut agent, Cell::new(3, 1), &breeze());
        // Nearest frontier is (3,3), which has no safe path. The start cell
        // still borders the unvisited (1,2).
        let d = ExplorerPolicy::new().decide(breeze(), &agent);
        assert_eq!(d, Decision::new(Action::MoveWest, DecisionRule::Backtrack));
    }

    #[test]
    fn gives_up_when_nothing_reachable() {
        let mut agent = Agent::new(GridBounds::new(2).unwrap());
        sense(&mut agent, Cell::START, &quiet());
        sense(&mut agent, Cell::new(1, 2), &quiet());
        sense(&mut agent, Cell::new(2, 1), &quiet());
        sense(&mut agent, Cell::new(2, 2), &quiet());
        sense(&mut agent, Cell::START, &quiet());
        let d = ExplorerPolicy::new().decide(quiet(), &agent);
        assert_eq!(d, Decision::new(Action::Climb, DecisionRule::GiveUp));
    }

    #[test]
    fn scripted_policy_replays_then_climbs() {
        let agent = Agent::new(GridBounds::default());
        let mut policy = ScriptedPolicy::new([Action::MoveEast, Action::Shoot]);
        assert_eq!(policy.remaining(), 2);
        assert_eq!(policy.decide(quiet(), &agent).action, Action::MoveEast);
        assert_eq!(policy.decide(quiet(), &agent).action, Action::Shoot);
        let last = policy.decide(quiet(), &agent);
        assert_eq!(last, Decision::new(Action::Climb, DecisionRule::Scripted));
    }

    #[test]
    fn nearest_breaks_ties_by_cell_order() {
        let from = Cell::new(2, 2);
        let candidates = [Cell::new(3, 2), Cell::new(2, 1), Cell::new(4, 4)];
        assert_eq!(nearest(from, candidates.into_iter()), Some(Cell::new(2, 1)));
        assert_eq!(nearest(from, std::iter::empty()), None);
    }
}
