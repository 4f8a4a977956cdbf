//! The agent: position, inventory, score, and beliefs.
//!
//! [`Agent::apply`] is the only place where actions touch the world and the
//! only place where the performance score changes. Every action goes
//! through the same sequence: apply its physical effect, charge or reward
//! it, then check whether the agent is now standing on a hazard.

use serde::Serialize;
use tracing::{debug, warn};
use wumpus_types::{Action, Cell, Direction, Feature, Percept, TurnOutcome};
use wumpus_world::{GridBounds, WorldModel};

use crate::belief::BeliefState;
use crate::config::{ScoringConfig, ScreamPolicy};
use crate::error::AgentError;
use crate::inference::{self, InferenceReport};

/// A single agent exploring the cave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Agent {
    position: Cell,
    facing: Direction,
    has_gold: bool,
    has_arrow: bool,
    performance: i64,
    alive: bool,
    escaped: bool,
    belief: BeliefState,
}

impl Agent {
    /// A fresh agent on the start cell, facing east, holding the arrow.
    pub fn new(bounds: GridBounds) -> Self {
        Self {
            position: Cell::START,
            facing: Direction::East,
            has_gold: false,
            has_arrow: true,
            performance: 0,
            alive: true,
            escaped: false,
            belief: BeliefState::new(bounds),
        }
    }

    // -------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------

    /// Current cell.
    pub const fn position(&self) -> Cell {
        self.position
    }

    /// Direction of the last move; the arrow flies this way.
    pub const fn facing(&self) -> Direction {
        self.facing
    }

    /// Whether the gold has been picked up.
    pub const fn has_gold(&self) -> bool {
        self.has_gold
    }

    /// Whether the arrow is still available.
    pub const fn has_arrow(&self) -> bool {
        self.has_arrow
    }

    /// Cumulative performance score.
    pub const fn performance(&self) -> i64 {
        self.performance
    }

    /// Whether the agent is alive.
    pub const fn alive(&self) -> bool {
        self.alive
    }

    /// Whether the agent has climbed out of the cave.
    pub const fn escaped(&self) -> bool {
        self.escaped
    }

    /// Alive and still inside the cave.
    pub const fn is_active(&self) -> bool {
        self.alive && !self.escaped
    }

    /// What the agent believes about the cave.
    pub const fn belief(&self) -> &BeliefState {
        &self.belief
    }

    // -------------------------------------------------------------------
    // Setup
    // -------------------------------------------------------------------

    /// Place the agent on another cell without moving through the world.
    ///
    /// Used to set up scenarios. Beliefs are untouched; the next
    /// observation records the visit.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::World`] if the cell is off-grid.
    pub fn relocate(&mut self, cell: Cell) -> Result<(), AgentError> {
        self.position = self.belief.bounds().check(cell)?;
        Ok(())
    }

    // -------------------------------------------------------------------
    // Perception
    // -------------------------------------------------------------------

    /// Fold a percept sensed at the current position into the beliefs.
    ///
    /// A scream also clears the arrow flag.
    pub fn observe(
        &mut self,
        percept: &Percept,
        scream_policy: ScreamPolicy,
    ) -> Result<InferenceReport, AgentError> {
        let report = inference::observe(
            &mut self.belief,
            self.position,
            percept,
            self.has_arrow,
            scream_policy,
        )?;
        if report.scream_processed {
            self.has_arrow = false;
        }
        Ok(report)
    }

    // -------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------

    /// Apply an action to the world and update score and state.
    ///
    /// Moves that leave the grid bump and cost extra. Shooting without the
    /// arrow, grabbing where there is no gold (or with the gold already in
    /// hand), and climbing anywhere but the start cell are no-ops with no
    /// score change.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Inactive`] once the agent has died or escaped.
    pub fn apply(
        &mut self,
        action: Action,
        world: &mut WorldModel,
        scoring: &ScoringConfig,
    ) -> Result<TurnOutcome, AgentError> {
        if !self.is_active() {
            return Err(AgentError::Inactive);
        }

        let mut outcome = match action {
            Action::MoveNorth => self.step(Direction::North, world, scoring)?,
            Action::MoveEast => self.step(Direction::East, world, scoring)?,
            Action::MoveSouth => self.step(Direction::South, world, scoring)?,
            Action::MoveWest => self.step(Direction::West, world, scoring)?,
            Action::Shoot => self.shoot(world, scoring)?,
            Action::Grab => self.grab(world, scoring),
            Action::Climb => self.climb(scoring),
        };

        if let Some(cause) = world.hazard_at(self.position) {
            self.alive = false;
            self.performance = self.performance.saturating_sub(scoring.death_penalty);
            outcome.died = true;
            outcome.death_cause = Some(cause);
            debug!(cell = %self.position, cause = %cause, "Agent died");
        }

        Ok(outcome)
    }

    fn step(
        &mut self,
        direction: Direction,
        world: &WorldModel,
        scoring: &ScoringConfig,
    ) -> Result<TurnOutcome, AgentError> {
        let mut outcome = TurnOutcome::quiet(Action::move_toward(direction));
        self.facing = direction;
        let (next, bumped) = world.move_from(self.position, direction)?;
        self.position = next;
        self.performance = self.performance.saturating_sub(scoring.move_cost);
        if bumped {
            self.performance = self.performance.saturating_sub(scoring.bump_penalty);
            outcome.bumped = true;
        }
        Ok(outcome)
    }

    fn shoot(
        &mut self,
        world: &mut WorldModel,
        scoring: &ScoringConfig,
    ) -> Result<TurnOutcome, AgentError> {
        let mut outcome = TurnOutcome::quiet(Action::Shoot);
        if !self.has_arrow {
            warn!(cell = %self.position, "Shoot ignored: no arrow left");
            return Ok(outcome);
        }
        self.has_arrow = false;
        self.performance = self.performance.saturating_sub(scoring.arrow_cost);
        outcome.screamed = world.shoot(self.position, self.facing)?;
        debug!(
            from = %self.position,
            direction = %self.facing,
            hit = outcome.screamed,
            "Arrow loosed"
        );
        Ok(outcome)
    }

    fn grab(&mut self, world: &WorldModel, scoring: &ScoringConfig) -> TurnOutcome {
        if self.has_gold || world.feature_at(self.position) != Feature::Gold {
            warn!(cell = %self.position, has_gold = self.has_gold, "Grab ignored");
            return TurnOutcome::quiet(Action::Grab);
        }
        self.has_gold = true;
        self.performance = self.performance.saturating_add(scoring.gold_reward);
        debug!(cell = %self.position, "Gold picked up");
        TurnOutcome::quiet(Action::Grab)
    }

    fn climb(&mut self, scoring: &ScoringConfig) -> TurnOutcome {
        let mut outcome = TurnOutcome::quiet(Action::Climb);
        if self.position != Cell::START {
            debug!(cell = %self.position, "Climb ignored away from the start cell");
            return outcome;
        }
        if !self.has_gold {
            self.performance = self
                .performance
                .saturating_sub(scoring.climb_without_gold_penalty);
        }
        self.escaped = true;
        outcome.climbed_out = true;
        outcome
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wumpus_types::DeathCause;

    use super::*;

    /// Wumpus (1,3), pits (3,3) (3,1) (4,1), gold (2,2).
    fn world() -> WorldModel {
        WorldModel::from_features(
            GridBounds::default(),
            [
                (Cell::new(1, 3), Feature::Wumpus),
                (Cell::new(3, 3), Feature::Pit),
                (Cell::new(2, 2), Feature::Gold),
                (Cell::new(4, 1), Feature::Pit),
                (Cell::new(3, 1), Feature::Pit),
            ],
        )
        .unwrap()
    }

    fn agent() -> Agent {
        Agent::new(GridBounds::default())
    }

    #[test]
    fn starts_at_origin_facing_east() {
        let a = agent();
        assert_eq!(a.position(), Cell::START);
        assert_eq!(a.facing(), Direction::East);
        assert!(a.has_arrow());
        assert!(!a.has_gold());
        assert_eq!(a.performance(), 0);
        assert!(a.is_active());
    }

    #[test]
    fn move_costs_one() {
        let mut w = world();
        let mut a = agent();
        let outcome = a.apply(Action::MoveNorth, &mut w, &ScoringConfig::default()).unwrap();
        assert!(!outcome.bumped);
        assert_eq!(a.position(), Cell::new(1, 2));
        assert_eq!(a.facing(), Direction::North);
        assert_eq!(a.performance(), -1);
    }

    #[test]
    fn bump_costs_two_and_turns_agent() {
        let mut w = world();
        let mut a = agent();
        let outcome = a.apply(Action::MoveWest, &mut w, &ScoringConfig::default()).unwrap();
        assert!(outcome.bumped);
        assert_eq!(a.position(), Cell::START);
        assert_eq!(a.facing(), Direction::West);
        assert_eq!(a.performance(), -2);
    }

    #[test]
    fn shooting_in_facing_direction_kills_wumpus() {
        let mut w = world();
        let mut a = agent();
        let scoring = ScoringConfig::default();
        a.apply(Action::MoveNorth, &mut w, &scoring).unwrap();
        let outcome = a.apply(Action::Shoot, &mut w, &scoring).unwrap();
        assert!(outcome.screamed);
        assert!(!a.has_arrow());
        assert!(!w.wumpus_alive());
        assert_eq!(a.performance(), -11);
    }

    #[test]
    fn shooting_without_arrow_is_noop() {
        let mut w = world();
        let mut a = agent();
        let scoring = ScoringConfig::default();
        let miss = a.apply(Action::Shoot, &mut w, &scoring).unwrap();
        assert!(!miss.screamed);
        assert_eq!(a.performance(), -10);

        let again = a.apply(Action::Shoot, &mut w, &scoring).unwrap();
        assert_eq!(again, TurnOutcome::quiet(Action::Shoot));
        assert_eq!(a.performance(), -10);
    }

    #[test]
    fn grab_only_where_gold_lies() {
        let mut w = world();
        let mut a = agent();
        let scoring = ScoringConfig::default();
        a.apply(Action::Grab, &mut w, &scoring).unwrap();
        assert!(!a.has_gold());
        assert_eq!(a.performance(), 0);

        a.relocate(Cell::new(2, 2)).unwrap();
        a.apply(Action::Grab, &mut w, &scoring).unwrap();
        assert!(a.has_gold());
        assert_eq!(a.performance(), 1000);

        a.apply(Action::Grab, &mut w, &scoring).unwrap();
        assert_eq!(a.performance(), 1000);
    }

    #[test]
    fn climb_away_from_start_is_noop() {
        let mut w = world();
        let mut a = agent();
        a.relocate(Cell::new(2, 2)).unwrap();
        let outcome = a.apply(Action::Climb, &mut w, &ScoringConfig::default()).unwrap();
        assert!(!outcome.climbed_out);
        assert!(a.is_active());
        assert_eq!(a.performance(), 0);
    }

    #[test]
    fn climb_without_gold_costs_one() {
        let mut w = world();
        let mut a = agent();
        let outcome = a.apply(Action::Climb, &mut w, &ScoringConfig::default()).unwrap();
        assert!(outcome.climbed_out);
        assert!(a.escaped());
        assert_eq!(a.performance(), -1);
    }

    #[test]
    fn climb_with_gold_is_free() {
        let mut w = world();
        let mut a = agent();
        let scoring = ScoringConfig::default();
        a.relocate(Cell::new(2, 2)).unwrap();
        a.apply(Action::Grab, &mut w, &scoring).unwrap();
        a.relocate(Cell::START).unwrap();
        a.apply(Action::Climb, &mut w, &scoring).unwrap();
        assert!(a.escaped());
        assert_eq!(a.performance(), 1000);
    }

    #[test]
    fn walking_into_pit_is_fatal() {
        let mut w = world();
        let mut a = agent();
        let scoring = ScoringConfig::default();
        a.apply(Action::MoveEast, &mut w, &scoring).unwrap();
        let outcome = a.apply(Action::MoveEast, &mut w, &scoring).unwrap();
        assert!(outcome.died);
        assert_eq!(outcome.death_cause, Some(DeathCause::Pit));
        assert!(!a.alive());
        assert_eq!(a.performance(), -1002);
    }

    #[test]
    fn no_actions_after_game_over() {
        let mut w = world();
        let mut a = agent();
        let scoring = ScoringConfig::default();
        a.apply(Action::Climb, &mut w, &scoring).unwrap();
        let err = a.apply(Action::MoveNorth, &mut w, &scoring).unwrap_err();
        assert_eq!(err, AgentError::Inactive);
    }

    #[test]
    fn relocate_rejects_off_grid() {
        let mut a = agent();
        assert!(a.relocate(Cell::new(0, 3)).is_err());
        assert_eq!(a.position(), Cell::START);
    }

    #[test]
    fn scream_consumes_arrow() {
        let mut a = agent();
        let scream = Percept::default().with_feedback(false, true);
        let report = a.observe(&scream, ScreamPolicy::Conservative).unwrap();
        assert!(report.scream_processed);
        assert!(!a.has_arrow());
    }
}
