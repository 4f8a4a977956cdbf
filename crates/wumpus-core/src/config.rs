//! Configuration loading and typed config structures for Wumpus World games.
//!
//! The canonical configuration lives in `wumpus-config.yaml` at the project
//! root. Every section and every field is optional; missing values fall
//! back to the classic 4x4 cave with three pits and the classic scoring.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;
use wumpus_agents::{InferenceConfig, ScoringConfig};
use wumpus_world::{DEFAULT_GRID_SIZE, DEFAULT_PIT_COUNT, GridBounds};

/// Environment variable that overrides `world.seed`.
pub const SEED_ENV_VAR: &str = "WUMPUS_SEED";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The values parsed but describe an unplayable game.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Which value is wrong and why.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game configuration.
///
/// Mirrors the structure of `wumpus-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cave size, pit count, and seed.
    #[serde(default)]
    pub world: WorldConfig,

    /// Performance measure.
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Inference toggles.
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Turn limits.
    #[serde(default)]
    pub game: GameBoundsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GameConfig {
    /// Load and validate configuration from a YAML file at the given path.
    ///
    /// `WUMPUS_SEED` overrides `world.seed` when set to a valid integer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if the values do not describe a playable
    /// game.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty map.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.world
            .apply_seed_override(std::env::var(SEED_ENV_VAR).ok().as_deref());
    }

    /// Check that the configuration describes a playable game.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the grid size is unsupported, the
    /// wumpus, gold, and pits do not fit outside the start cell, or the turn
    /// limit is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds = self.world.bounds()?;
        let available = bounds.cell_count().saturating_sub(1);
        let requested = self.world.pit_count.saturating_add(2);
        if requested > available {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "world.pit_count {} leaves no room for the wumpus and gold on a {}x{} grid",
                    self.world.pit_count,
                    bounds.size(),
                    bounds.size()
                ),
            });
        }
        if self.game.max_turns == 0 {
            return Err(ConfigError::Invalid {
                reason: "game.max_turns must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}

/// Cave configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Side length of the square grid.
    #[serde(default = "default_size")]
    pub size: u32,

    /// Number of pits placed at generation.
    #[serde(default = "default_pit_count")]
    pub pit_count: u32,

    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            pit_count: default_pit_count(),
            seed: default_seed(),
        }
    }
}

impl WorldConfig {
    /// Grid bounds for the configured size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the size is unsupported.
    pub fn bounds(&self) -> Result<GridBounds, ConfigError> {
        GridBounds::new(self.size).map_err(|err| ConfigError::Invalid {
            reason: format!("world.size: {err}"),
        })
    }

    /// Replace the seed with `raw` if it parses as an integer.
    pub fn apply_seed_override(&mut self, raw: Option<&str>) {
        let Some(raw) = raw else {
            return;
        };
        match raw.trim().parse::<u64>() {
            Ok(seed) => self.seed = seed,
            Err(err) => warn!(value = raw, %err, "Ignoring unparseable {SEED_ENV_VAR}"),
        }
    }
}

/// Turn limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameBoundsConfig {
    /// Turns after which an autonomous game is stopped.
    #[serde(default = "default_max_turns")]
    pub max_turns: u64,
}

impl Default for GameBoundsConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) used when `RUST_LOG` is
    /// not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Line format of the log output.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_size() -> u32 {
    DEFAULT_GRID_SIZE
}

const fn default_pit_count() -> u32 {
    DEFAULT_PIT_COUNT
}

const fn default_seed() -> u64 {
    42
}

const fn default_max_turns() -> u64 {
    100
}

fn default_log_level() -> String {
    "info".to_owned()
}
