//! Line-oriented manual play.
//!
//! Each input line is one command: an action name (`n`, `move_east`,
//! `shoot`, `grab`, `climb`, ...), `next` to let the explorer play one
//! turn, or `quit`. Unrecognized lines are logged and skipped. Manual
//! actions bypass the agent's inference, so beliefs only grow on `next`
//! turns.

use std::io::BufRead;
use std::str::FromStr;

use tracing::{info, warn};
use wumpus_core::game::Game;
use wumpus_core::policy::DecisionPolicy;
use wumpus_core::runner::{GameEndReason, GameResult, TurnCallback};
use wumpus_types::{Action, ActionParseError};

use crate::error::EngineError;

/// One line of manual input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Apply this action directly.
    Act(Action),
    /// Play one autonomous turn.
    Next,
    /// Stop the game.
    Quit,
}

impl FromStr for Command {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "next" | "auto" => Ok(Self::Next),
            "quit" | "exit" => Ok(Self::Quit),
            other => other.parse().map(Self::Act),
        }
    }
}

/// Read commands from `input` until the game ends, the input is exhausted,
/// or the player quits.
///
/// # Errors
///
/// Returns [`EngineError::Io`] if reading fails, or [`EngineError::Game`]
/// if a turn fails.
pub fn play_manual<R: BufRead>(
    game: &mut Game,
    policy: &mut dyn DecisionPolicy,
    input: R,
    callback: &mut dyn TurnCallback,
) -> Result<GameResult, EngineError> {
    let mut lines = input.lines();

    loop {
        let percept = game.current_percept()?;
        info!(
            turn = game.turn(),
            cell = %game.agent().position(),
            %percept,
            performance = game.agent().performance(),
            "Awaiting command"
        );

        let Some(line) = lines.next().transpose()? else {
            info!("Input exhausted");
            return Ok(GameResult::capture(game, GameEndReason::Quit, game.turn()));
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                warn!(%err, "Ignoring command");
                continue;
            }
        };

        let summary = match command {
            Command::Quit => {
                return Ok(GameResult::capture(game, GameEndReason::Quit, game.turn()));
            }
            Command::Next => game.next_turn(policy)?,
            Command::Act(action) => game.manual(action)?,
        };
        callback.on_turn(&summary, game);

        if let Some(reason) =
            GameEndReason::from_outcome(&summary.outcome, game.agent().has_gold())
        {
            return Ok(GameResult::capture(game, reason, game.turn()));
        }
    }
}
