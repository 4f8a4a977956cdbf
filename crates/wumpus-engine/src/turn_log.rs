//! Turn callback that logs every turn.

use tracing::{debug, info};
use wumpus_core::game::{Game, TurnSummary};
use wumpus_core::policy::DecisionRule;
use wumpus_core::runner::TurnCallback;

/// Logs each turn at `info` and the belief partition at `debug`.
pub struct TurnLogCallback {
    game_index: u64,
}

impl TurnLogCallback {
    /// Create a callback that tags its lines with the game's index.
    pub const fn new(game_index: u64) -> Self {
        Self { game_index }
    }
}

impl TurnCallback for TurnLogCallback {
    fn on_turn(&mut self, summary: &TurnSummary, game: &Game) {
        info!(
            game = self.game_index,
            turn = summary.turn,
            percept = %summary.percept,
            action = %summary.outcome.action,
            rule = summary.rule.map(DecisionRule::as_str),
            cell = %summary.position,
            performance = summary.performance,
            "Turn"
        );

        let belief = game.agent().belief();
        debug!(
            game = self.game_index,
            turn = summary.turn,
            safe = belief.safe().len(),
            unsafe_cells = belief.unsafe_cells().len(),
            unknown = belief.unknown().len(),
            visited = belief.visited().len(),
            wumpus = ?belief.wumpus_sighting(),
            "Beliefs"
        );
    }
}
