//! Per-game results and batch totals for reporting.

use serde::Serialize;
use tracing::info;
use wumpus_core::game::Game;
use wumpus_core::runner::{GameEndReason, GameResult};

/// One finished game and the seed that produced its cave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameReport {
    /// Zero-based position in the batch.
    pub index: u64,
    /// Seed used to generate the cave.
    pub seed: u64,
    /// How the game ended.
    #[serde(flatten)]
    pub result: GameResult,
}

/// Totals over a batch of games.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Number of games played.
    pub games: u64,
    /// Games where the agent climbed out with the gold.
    pub escaped_with_gold: u64,
    /// Games where the agent climbed out empty-handed.
    pub escaped_without_gold: u64,
    /// Games where the agent died.
    pub deaths: u64,
    /// Games stopped by the turn limit.
    pub turn_limits: u64,
    /// Games the player quit.
    pub quits: u64,
    /// Sum of final performance scores.
    pub total_performance: i64,
}

impl BatchSummary {
    /// Tally a batch of reports.
    pub fn tally(reports: &[GameReport]) -> Self {
        let mut summary = Self::default();
        for report in reports {
            summary.games = summary.games.saturating_add(1);
            summary.total_performance = summary
                .total_performance
                .saturating_add(report.result.performance);
            let bucket = match report.result.end_reason {
                GameEndReason::Escaped { with_gold: true } => &mut summary.escaped_with_gold,
                GameEndReason::Escaped { with_gold: false } => &mut summary.escaped_without_gold,
                GameEndReason::Died(_) => &mut summary.deaths,
                GameEndReason::TurnLimit => &mut summary.turn_limits,
                GameEndReason::Quit => &mut summary.quits,
            };
            *bucket = bucket.saturating_add(1);
        }
        summary
    }

    /// Log the totals.
    pub fn log(&self) {
        info!(
            games = self.games,
            escaped_with_gold = self.escaped_with_gold,
            escaped_without_gold = self.escaped_without_gold,
            deaths = self.deaths,
            turn_limits = self.turn_limits,
            quits = self.quits,
            total_performance = self.total_performance,
            "Batch complete"
        );
    }
}

/// The end-of-game banner: what happened, then the whole cave with every
/// hazard revealed, north row first.
pub fn end_banner(game: &Game, reason: GameEndReason) -> String {
    format!("{}\n{}", reason.message(), game.world())
}

/// Log the end-of-game banner.
pub fn reveal_cave(game: &Game, result: &GameResult) {
    info!(
        performance = result.performance,
        "{}",
        end_banner(game, result.end_reason)
    );
}

/// Everything written by `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Per-game results in play order.
    pub games: Vec<GameReport>,
    /// Totals over all games.
    pub summary: BatchSummary,
}
