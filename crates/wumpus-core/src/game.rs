//! Turn cycle: one cave, one agent, one action per turn.
//!
//! Each autonomous turn runs through these phases:
//!
//! 1. **Perceive** -- read breeze, stench and glitter at the agent's cell
//!    and attach the bump and scream feedback of the previous action.
//! 2. **Observe** -- fold the percept into the agent's beliefs.
//! 3. **Decide** -- ask the [`DecisionPolicy`] for an action.
//! 4. **Apply** -- apply the action to the world, update score and state.
//!
//! [`Game::manual`] skips phases 2 and 3 and applies a caller-supplied
//! action directly. Once an action kills the agent or climbs out, every
//! further turn is refused with [`GameError::Finished`].
//!
//! The cycle is deterministic given the same cave and the same policy.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};
use wumpus_agents::{Agent, AgentError, InferenceConfig, ScoringConfig};
use wumpus_types::{Action, Cell, Percept, TurnOutcome};
use wumpus_world::{GridBounds, WorldError, WorldModel};

use crate::config::GameConfig;
use crate::policy::{DecisionPolicy, DecisionRule};

/// Errors that can occur during turn execution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The game already ended; no further turns are accepted.
    #[error("game is finished")]
    Finished,

    /// A world operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// An agent operation failed.
    #[error("agent error: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },
}

/// Summary of a single turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnSummary {
    /// The turn number that was executed, starting at 1.
    pub turn: u64,
    /// What the agent sensed before acting.
    pub percept: Percept,
    /// The rule behind the action; `None` for manual turns.
    pub rule: Option<DecisionRule>,
    /// What happened when the action was applied.
    pub outcome: TurnOutcome,
    /// Agent position after the action.
    pub position: Cell,
    /// Performance score after the action.
    pub performance: i64,
}

/// A single game in progress.
#[derive(Debug, Clone)]
pub struct Game {
    world: WorldModel,
    agent: Agent,
    scoring: ScoringConfig,
    inference: InferenceConfig,
    turn: u64,
    last_outcome: Option<TurnOutcome>,
    finished: bool,
}

impl Game {
    /// Generate a cave from the configuration and the injected random
    /// source, and place a fresh agent on the start cell.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::World`] if the grid size is unsupported or the
    /// hazards do not fit.
    pub fn new<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Self, GameError> {
        let bounds = GridBounds::new(config.world.size)?;
        let world = WorldModel::generate(bounds, config.world.pit_count, rng)?;
        Ok(Self::with_world(world, config))
    }

    /// Start a game in an existing cave.
    pub fn with_world(world: WorldModel, config: &GameConfig) -> Self {
        info!(
            size = world.bounds().size(),
            pits = world.pit_cells().len(),
            scream_policy = ?config.inference.scream_policy,
            "Game started"
        );
        Self {
            agent: Agent::new(world.bounds()),
            world,
            scoring: config.scoring.clone(),
            inference: config.inference,
            turn: 0,
            last_outcome: None,
            finished: false,
        }
    }

    // -------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------

    /// The cave.
    pub const fn world(&self) -> &WorldModel {
        &self.world
    }

    /// The agent.
    pub const fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Number of turns played so far.
    pub const fn turn(&self) -> u64 {
        self.turn
    }

    /// Whether the agent has died or climbed out.
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Outcome of the most recent action, if any.
    pub const fn last_outcome(&self) -> Option<TurnOutcome> {
        self.last_outcome
    }

    /// The percept the agent would receive now, including feedback from
    /// the previous action.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::World`] if the agent is somehow off-grid.
    pub fn current_percept(&self) -> Result<Percept, GameError> {
        let percept = self.world.perceive(self.agent.position())?;
        let (bump, scream) = self
            .last_outcome
            .map_or((false, false), |o| (o.bumped, o.screamed));
        Ok(percept.with_feedback(bump, scream))
    }

    // -------------------------------------------------------------------
    // Turns
    // -------------------------------------------------------------------

    /// Play one autonomous turn: perceive, observe, decide, apply.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Finished`] once the game has ended.
    pub fn next_turn(
        &mut self,
        policy: &mut dyn DecisionPolicy,
    ) -> Result<TurnSummary, GameError> {
        if self.finished {
            return Err(GameError::Finished);
        }
        let turn = self.turn.saturating_add(1);

        // --- Phase 1: Perceive ---
        let percept = self.current_percept()?;
        debug!(turn, cell = %self.agent.position(), %percept, "Perceived");

        // --- Phase 2: Observe ---
        let report = self
            .agent
            .observe(&percept, self.inference.scream_policy)?;
        debug!(
            turn,
            pit = ?report.pit_deduced,
            wumpus = ?report.wumpus_latched,
            declared_safe = report.declared_safe.len(),
            scream = report.scream_processed,
            "Beliefs updated"
        );

        // --- Phase 3: Decide ---
        let decision = policy.decide(percept, &self.agent);

        // --- Phase 4: Apply ---
        let outcome = self
            .agent
            .apply(decision.action, &mut self.world, &self.scoring)?;
        Ok(self.finish_turn(percept, Some(decision.rule), outcome))
    }

    /// Apply an action chosen by the caller, bypassing inference and the
    /// decision policy.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Finished`] once the game has ended.
    pub fn manual(&mut self, action: Action) -> Result<TurnSummary, GameError> {
        if self.finished {
            return Err(GameError::Finished);
        }
        let percept = self.current_percept()?;
        let outcome = self.agent.apply(action, &mut self.world, &self.scoring)?;
        Ok(self.finish_turn(percept, None, outcome))
    }

    fn finish_turn(
        &mut self,
        percept: Percept,
        rule: Option<DecisionRule>,
        outcome: TurnOutcome,
    ) -> TurnSummary {
        self.turn = self.turn.saturating_add(1);
        self.last_outcome = Some(outcome);
        if outcome.is_terminal() {
            self.finished = true;
        }

        let summary = TurnSummary {
            turn: self.turn,
            percept,
            rule,
            outcome,
            position: self.agent.position(),
            performance: self.agent.performance(),
        };
        debug!(
            turn = summary.turn,
            action = %outcome.action,
            rule = rule.map(DecisionRule::as_str),
            cell = %summary.position,
            bumped = outcome.bumped,
            screamed = outcome.screamed,
            performance = summary.performance,
            "Turn applied"
        );
        summary
    }
}
