//! Bounded game loop.
//!
//! [`run_game`] plays autonomous turns until the agent dies, climbs out, or
//! the turn limit is reached, invoking a [`TurnCallback`] after every turn.
//! The final state is reported as a [`GameResult`].

use serde::Serialize;
use tracing::info;
use wumpus_types::{Cell, DeathCause, TurnOutcome};

use crate::game::{Game, GameError, TurnSummary};
use crate::policy::DecisionPolicy;

/// Why a game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEndReason {
    /// The agent climbed out of the cave.
    Escaped {
        /// Whether it carried the gold.
        with_gold: bool,
    },
    /// The agent walked onto a hazard.
    Died(DeathCause),
    /// The turn limit was reached with the agent still inside.
    TurnLimit,
    /// The driver stopped before the game ended.
    Quit,
}

impl GameEndReason {
    /// The end reason implied by a turn outcome, or `None` if the game
    /// goes on.
    pub const fn from_outcome(outcome: &TurnOutcome, has_gold: bool) -> Option<Self> {
        if outcome.climbed_out {
            return Some(Self::Escaped {
                with_gold: has_gold,
            });
        }
        match outcome.death_cause {
            Some(cause) if outcome.died => Some(Self::Died(cause)),
            _ => None,
        }
    }

    /// One-line description for the end-of-game report.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Escaped { with_gold: true } => "Escaped with the gold",
            Self::Escaped { with_gold: false } => "Climbed out without the gold",
            Self::Died(DeathCause::Pit) => "Fell into a pit",
            Self::Died(DeathCause::Wumpus) => "Eaten by the wumpus",
            Self::TurnLimit => "Ran out of turns",
            Self::Quit => "Game abandoned",
        }
    }
}

/// Result of a game run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// The reason the game ended.
    pub end_reason: GameEndReason,
    /// Total number of turns played.
    pub total_turns: u64,
    /// Final performance score.
    pub performance: i64,
    /// Final agent position.
    pub final_position: Cell,
    /// Number of cells the agent visited.
    pub cells_visited: usize,
}

impl GameResult {
    /// Capture the state of `game` as it ends.
    pub fn capture(game: &Game, end_reason: GameEndReason, total_turns: u64) -> Self {
        let agent = game.agent();
        Self {
            end_reason,
            total_turns,
            performance: agent.performance(),
            final_position: agent.position(),
            cells_visited: agent.belief().visited().len(),
        }
    }
}

/// Callback invoked after each turn completes.
pub trait TurnCallback {
    /// Called after a turn completes successfully.
    fn on_turn(&mut self, summary: &TurnSummary, game: &Game);
}

/// A no-op turn callback.
pub struct NoOpCallback;

impl TurnCallback for NoOpCallback {
    fn on_turn(&mut self, _summary: &TurnSummary, _game: &Game) {}
}

/// Play `game` with `policy` until it ends or `max_turns` turns have run.
///
/// # Errors
///
/// Returns [`GameError`] if a turn fails, including
/// [`GameError::Finished`] if the game had already ended before the call.
pub fn run_game(
    game: &mut Game,
    policy: &mut dyn DecisionPolicy,
    max_turns: u64,
    callback: &mut dyn TurnCallback,
) -> Result<GameResult, GameError> {
    info!(max_turns, "Game loop starting");
    let mut total_turns: u64 = 0;

    while total_turns < max_turns {
        let summary = game.next_turn(policy)?;
        total_turns = total_turns.saturating_add(1);
        callback.on_turn(&summary, game);

        if let Some(reason) =
            GameEndReason::from_outcome(&summary.outcome, game.agent().has_gold())
        {
            return Ok(GameResult::capture(game, reason, total_turns));
        }
    }

    info!(turn = game.turn(), max_turns, "Turn limit reached");
    Ok(GameResult::capture(game, GameEndReason::TurnLimit, total_turns))
}

/// Log the end of a game.
pub fn log_game_end(result: &GameResult) {
    info!(
        reason = ?result.end_reason,
        total_turns = result.total_turns,
        performance = result.performance,
        final_position = %result.final_position,
        cells_visited = result.cells_visited,
        "Game ended"
    );
}
