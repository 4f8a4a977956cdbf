//! The world model: where the hazards and the gold are.
//!
//! [`WorldModel`] holds a sparse map from cell to [`Feature`] over a fixed
//! [`GridBounds`]. It answers percept queries and applies the physics of
//! movement and arrow flight. The layout is generated once per game from an
//! injected random source and never changes afterwards, except that a
//! successful shot removes the wumpus.
//!
//! # Generation
//!
//! [`WorldModel::generate`] shuffles every cell except the start cell and
//! places, in order, the wumpus, the gold, and `pit_count` pits. The same
//! seed always yields the same cave.

use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;
use wumpus_types::{Cell, DeathCause, Direction, Feature, Percept};

use crate::error::WorldError;
use crate::grid::GridBounds;

/// Number of pits in the classic cave.
pub const DEFAULT_PIT_COUNT: u32 = 3;

/// The physical cave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldModel {
    /// Extent of the grid.
    bounds: GridBounds,
    /// Non-empty cells. A missing entry means [`Feature::Empty`].
    features: BTreeMap<Cell, Feature>,
}

impl WorldModel {
    // -------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------

    /// Generate a random cave: one wumpus, one gold, `pit_count` pits, none
    /// of them on the start cell and at most one feature per cell.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::TooManyHazards`] if the grid has fewer free
    /// cells than features to place.
    pub fn generate<R: Rng + ?Sized>(
        bounds: GridBounds,
        pit_count: u32,
        rng: &mut R,
    ) -> Result<Self, WorldError> {
        let mut free: Vec<Cell> = bounds.cells().filter(|&c| c != Cell::START).collect();
        let available = bounds.cell_count().saturating_sub(1);
        let requested = pit_count.saturating_add(2);
        if requested > available {
            return Err(WorldError::TooManyHazards {
                requested,
                available,
            });
        }

        free.shuffle(rng);

        let mut features = BTreeMap::new();
        let mut place = |feature: Feature| -> Result<(), WorldError> {
            let cell = free.pop().ok_or(WorldError::TooManyHazards {
                requested,
                available,
            })?;
            features.insert(cell, feature);
            Ok(())
        };

        place(Feature::Wumpus)?;
        place(Feature::Gold)?;
        for _ in 0..pit_count {
            place(Feature::Pit)?;
        }

        let world = Self { bounds, features };
        debug!(
            size = bounds.size(),
            pits = pit_count,
            wumpus = ?world.wumpus_cell(),
            gold = ?world.gold_cell(),
            "Cave generated"
        );
        Ok(world)
    }

    /// Build a cave from an explicit layout.
    ///
    /// [`Feature::Empty`] entries are ignored. The layout must hold exactly
    /// one wumpus and one gold, any number of pits, nothing on the start
    /// cell, and at most one feature per cell.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] for off-grid cells and
    /// [`WorldError::InvalidLayout`] for any other rule violation.
    pub fn from_features(
        bounds: GridBounds,
        layout: impl IntoIterator<Item = (Cell, Feature)>,
    ) -> Result<Self, WorldError> {
        let mut features = BTreeMap::new();
        for (cell, feature) in layout {
            bounds.check(cell)?;
            if feature == Feature::Empty {
                continue;
            }
            if cell == Cell::START {
                return Err(WorldError::InvalidLayout {
                    reason: format!("{feature:?} placed on the start cell"),
                });
            }
            if let Some(existing) = features.insert(cell, feature) {
                return Err(WorldError::InvalidLayout {
                    reason: format!("cell {cell} holds both {existing:?} and {feature:?}"),
                });
            }
        }

        let count = |wanted: Feature| features.values().filter(|&&f| f == wanted).count();
        if count(Feature::Wumpus) != 1 {
            return Err(WorldError::InvalidLayout {
                reason: format!("expected exactly one wumpus, found {}", count(Feature::Wumpus)),
            });
        }
        if count(Feature::Gold) != 1 {
            return Err(WorldError::InvalidLayout {
                reason: format!("expected exactly one gold, found {}", count(Feature::Gold)),
            });
        }

        Ok(Self { bounds, features })
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// Extent of the grid.
    pub const fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// The feature at a cell. Off-grid cells read as [`Feature::Empty`].
    pub fn feature_at(&self, cell: Cell) -> Feature {
        self.features.get(&cell).copied().unwrap_or(Feature::Empty)
    }

    /// The wumpus's cell, or `None` once it has been shot.
    pub fn wumpus_cell(&self) -> Option<Cell> {
        self.find(Feature::Wumpus)
    }

    /// The gold's cell.
    pub fn gold_cell(&self) -> Option<Cell> {
        self.find(Feature::Gold)
    }

    /// Whether the wumpus is still alive.
    pub fn wumpus_alive(&self) -> bool {
        self.wumpus_cell().is_some()
    }

    /// All pit cells in cell order.
    pub fn pit_cells(&self) -> Vec<Cell> {
        self.features
            .iter()
            .filter(|(_, f)| **f == Feature::Pit)
            .map(|(c, _)| *c)
            .collect()
    }

    fn find(&self, wanted: Feature) -> Option<Cell> {
        self.features
            .iter()
            .find(|(_, f)| **f == wanted)
            .map(|(c, _)| *c)
    }

    /// The sensations at `cell`: breeze if a pit is adjacent, stench if the
    /// wumpus is adjacent, glitter if the gold is here. Feedback flags are
    /// left clear.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if the cell is off-grid.
    pub fn perceive(&self, cell: Cell) -> Result<Percept, WorldError> {
        self.bounds.check(cell)?;
        let mut percept = Percept {
            glitter: self.feature_at(cell) == Feature::Gold,
            ..Percept::default()
        };
        for (neighbor, _) in self.bounds.neighbors(cell) {
            match self.feature_at(neighbor) {
                Feature::Pit => percept.breeze = true,
                Feature::Wumpus => percept.stench = true,
                Feature::Gold | Feature::Empty => {}
            }
        }
        Ok(percept)
    }

    /// Whether `cell` currently holds a wumpus or a pit.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if the cell is off-grid.
    pub fn is_terminal(&self, cell: Cell) -> Result<bool, WorldError> {
        self.bounds.check(cell)?;
        Ok(self.feature_at(cell).is_hazard())
    }

    /// The hazard that kills an agent standing on `cell`, if any.
    pub fn hazard_at(&self, cell: Cell) -> Option<DeathCause> {
        self.feature_at(cell).death_cause()
    }

    // -------------------------------------------------------------------
    // Physics
    // -------------------------------------------------------------------

    /// Attempt a unit step from `cell` in `direction`.
    ///
    /// Returns the new cell and `false`, or the original cell and `true`
    /// when the step would leave the grid (a bump).
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if `cell` itself is off-grid.
    pub fn move_from(&self, cell: Cell, direction: Direction) -> Result<(Cell, bool), WorldError> {
        self.bounds.check(cell)?;
        Ok(self
            .bounds
            .step(cell, direction)
            .map_or((cell, true), |next| (next, false)))
    }

    /// Fire an arrow from `cell` in `direction`.
    ///
    /// The arrow travels one cell at a time until it leaves the grid or
    /// reaches the wumpus. A hit removes the wumpus and returns `true`
    /// (the scream). Since there is only one wumpus, at most one call per
    /// game can ever return `true`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if `cell` is off-grid.
    pub fn shoot(&mut self, cell: Cell, direction: Direction) -> Result<bool, WorldError> {
        self.bounds.check(cell)?;
        let mut current = cell;
        while let Some(next) = self.bounds.step(current, direction) {
            if self.feature_at(next) == Feature::Wumpus {
                self.features.remove(&next);
                debug!(cell = %next, "Arrow hit the wumpus");
                return Ok(true);
            }
            current = next;
        }
        Ok(false)
    }
}

impl core::fmt::Display for WorldModel {
    /// Renders the cave as rows of feature symbols, north row first.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let size = self.bounds.size();
        for y in (1..=size).rev() {
            for x in 1..=size {
                write!(f, "{}", self.feature_at(Cell::new(x, y)).symbol())?;
            }
            if y > 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
