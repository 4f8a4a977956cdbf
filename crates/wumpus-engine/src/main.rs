//! Command-line driver for the Wumpus World agent.
//!
//! Plays one or more autonomous games with the explorer policy, or a
//! single game driven line by line from standard input.
//!
//! # Startup Sequence
//!
//! 1. Parse command-line arguments
//! 2. Load configuration from `wumpus-config.yaml` (or `--config`)
//! 3. Initialize structured logging (tracing) on stderr, as text or JSON
//! 4. Apply `--seed` and `--max-turns` overrides and re-validate
//! 5. Play the games, seeding each cave with `seed + index`
//! 6. Reveal each finished cave, log the batch totals, and print them as
//!    JSON with `--json`

mod error;
mod manual;
mod report;
mod turn_log;

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wumpus_core::config::{GameConfig, LogFormat};
use wumpus_core::game::Game;
use wumpus_core::policy::ExplorerPolicy;
use wumpus_core::runner;

use crate::error::EngineError;
use crate::report::{BatchReport, BatchSummary, GameReport};
use crate::turn_log::TurnLogCallback;

#[derive(Parser, Debug)]
#[command(name = "wumpus-engine")]
#[command(about = "Play Wumpus World games with a knowledge-based agent", long_about = None)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "wumpus-config.yaml")]
    config: PathBuf,

    /// Cave seed, overriding the config file and the environment
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of autonomous games to play on consecutive seeds
    #[arg(long, default_value = "1")]
    games: u64,

    /// Turn limit per game, overriding the config file
    #[arg(long)]
    max_turns: Option<u64>,

    /// Read actions from stdin instead of running the explorer
    #[arg(long)]
    manual: bool,

    /// Print results as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Log at debug level unless a filter is set in the environment
    #[arg(short, long)]
    verbose: bool,
}

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid, a game fails, or the
/// results cannot be written.
fn main() -> Result<(), EngineError> {
    // 1. Parse arguments.
    let args = Args::parse();

    // 2. Load configuration.
    let (mut config, found) = load_config(&args.config)?;

    // 3. Initialize structured logging.
    let level = if args.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(true)
        .with_writer(std::io::stderr);
    match config.logging.format {
        LogFormat::Text => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }

    info!("wumpus-engine starting");
    if !found {
        info!(path = %args.config.display(), "Config file not found, using defaults");
    }

    // 4. Apply command-line overrides.
    if let Some(seed) = args.seed {
        config.world.seed = seed;
    }
    if let Some(max_turns) = args.max_turns {
        config.game.max_turns = max_turns;
    }
    config.validate()?;
    info!(
        size = config.world.size,
        pit_count = config.world.pit_count,
        seed = config.world.seed,
        max_turns = config.game.max_turns,
        scream_policy = ?config.inference.scream_policy,
        "Configuration loaded"
    );

    // 5. Play.
    let reports = if args.manual {
        vec![play_manual_game(&config)?]
    } else {
        play_batch(&config, args.games)?
    };

    // 6. Report.
    let summary = BatchSummary::tally(&reports);
    summary.log();
    if args.json {
        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(
            &mut stdout,
            &BatchReport {
                games: reports,
                summary,
            },
        )?;
        writeln!(stdout)?;
    }

    info!("wumpus-engine shutdown complete");
    Ok(())
}

/// Load configuration from `path`, or defaults if the file does not exist.
///
/// The flag is `false` when defaults were used.
fn load_config(path: &Path) -> Result<(GameConfig, bool), EngineError> {
    if path.exists() {
        Ok((GameConfig::from_file(path)?, true))
    } else {
        let mut config = GameConfig::default();
        config.apply_env_overrides();
        Ok((config, false))
    }
}

/// Play `games` autonomous games on consecutive seeds.
fn play_batch(config: &GameConfig, games: u64) -> Result<Vec<GameReport>, EngineError> {
    let mut reports = Vec::new();
    for index in 0..games {
        let seed = config.world.seed.wrapping_add(index);
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut game = Game::new(config, &mut rng)?;
        info!(game = index, seed, "Cave generated");

        let mut callback = TurnLogCallback::new(index);
        let result = runner::run_game(
            &mut game,
            &mut ExplorerPolicy::new(),
            config.game.max_turns,
            &mut callback,
        )?;
        runner::log_game_end(&result);
        report::reveal_cave(&game, &result);
        reports.push(GameReport {
            index,
            seed,
            result,
        });
    }
    Ok(reports)
}

/// Play one game from commands on stdin.
fn play_manual_game(config: &GameConfig) -> Result<GameReport, EngineError> {
    let seed = config.world.seed;
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut game = Game::new(config, &mut rng)?;
    info!(seed, "Manual game started; enter actions, `next`, or `quit`");

    let stdin = std::io::stdin().lock();
    let result = manual::play_manual(
        &mut game,
        &mut ExplorerPolicy::new(),
        stdin,
        &mut TurnLogCallback::new(0),
    )?;
    runner::log_game_end(&result);
    report::reveal_cave(&game, &result);
    Ok(GameReport {
        index: 0,
        seed,
        result,
    })
}
