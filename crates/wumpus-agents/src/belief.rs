//! The agent's knowledge about the cave.
//!
//! [`BeliefState`] partitions every cell of the grid into exactly one of
//! `safe`, `unsafe`, or `unknown`. The start cell is safe from the outset;
//! every other cell starts unknown and only ever leaves that set. Cells move
//! `unknown -> safe` or `unknown -> unsafe`, never between `safe` and
//! `unsafe`, with one exception: [`BeliefState::forgive_all`], used by the
//! optimistic scream policy, folds everything into `safe`.
//!
//! Mutators take cells from outside the crate and validate them against the
//! grid bounds before touching any set.

use std::collections::BTreeSet;

use serde::Serialize;
use wumpus_types::{Cell, Direction};
use wumpus_world::{GridBounds, WorldError};

/// A latched deduction about where the wumpus is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WumpusSighting {
    /// The cell believed to hold the wumpus.
    pub cell: Cell,
    /// Direction from the cell where the deduction was made towards `cell`.
    pub direction: Direction,
}

/// What the agent believes about each cell, plus its visit history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BeliefState {
    bounds: GridBounds,
    safe: BTreeSet<Cell>,
    #[serde(rename = "unsafe")]
    unsafe_cells: BTreeSet<Cell>,
    unknown: BTreeSet<Cell>,
    visited: BTreeSet<Cell>,
    /// Visited cells, least recent first. A re-visit moves the cell to the end.
    visit_order: Vec<Cell>,
    wumpus_sighting: Option<WumpusSighting>,
}

impl BeliefState {
    /// Fresh beliefs for a new game: the start cell is safe, every other
    /// cell is unknown, nothing has been visited.
    pub fn new(bounds: GridBounds) -> Self {
        let unknown = bounds.cells().filter(|&c| c != Cell::START).collect();
        Self {
            bounds,
            safe: BTreeSet::from([Cell::START]),
            unsafe_cells: BTreeSet::new(),
            unknown,
            visited: BTreeSet::new(),
            visit_order: Vec::new(),
            wumpus_sighting: None,
        }
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// Extent of the grid these beliefs cover.
    pub const fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Cells proven free of hazards.
    pub const fn safe(&self) -> &BTreeSet<Cell> {
        &self.safe
    }

    /// Cells deduced to hold a pit.
    pub const fn unsafe_cells(&self) -> &BTreeSet<Cell> {
        &self.unsafe_cells
    }

    /// Cells not yet classified.
    pub const fn unknown(&self) -> &BTreeSet<Cell> {
        &self.unknown
    }

    /// Cells the agent has physically occupied.
    pub const fn visited(&self) -> &BTreeSet<Cell> {
        &self.visited
    }

    /// Whether `cell` is believed safe.
    pub fn is_safe(&self, cell: Cell) -> bool {
        self.safe.contains(&cell)
    }

    /// Whether `cell` is believed to hold a hazard.
    pub fn is_unsafe(&self, cell: Cell) -> bool {
        self.unsafe_cells.contains(&cell)
    }

    /// Whether nothing is known about `cell` yet.
    pub fn is_unknown(&self, cell: Cell) -> bool {
        self.unknown.contains(&cell)
    }

    /// Whether the agent has stood on `cell`.
    pub fn is_visited(&self, cell: Cell) -> bool {
        self.visited.contains(&cell)
    }

    /// The latched wumpus deduction, if any.
    pub const fn wumpus_sighting(&self) -> Option<WumpusSighting> {
        self.wumpus_sighting
    }

    /// Whether a wumpus location has been deduced and not yet cleared.
    pub const fn wumpus_inferred(&self) -> bool {
        self.wumpus_sighting.is_some()
    }

    /// Safe cells that have not been visited yet, in cell order.
    pub fn frontier(&self) -> impl Iterator<Item = Cell> + '_ {
        self.safe.difference(&self.visited).copied()
    }

    /// Cells worth a gamble: unknown and not proven unsafe, in cell order.
    pub fn risky_candidates(&self) -> impl Iterator<Item = Cell> + '_ {
        self.unknown.difference(&self.unsafe_cells).copied()
    }

    /// Visited cells, most recent visit first.
    pub fn visits_most_recent_first(&self) -> impl Iterator<Item = Cell> + '_ {
        self.visit_order.iter().rev().copied()
    }

    /// In-bounds neighbors of `cell` that are still unknown, with the
    /// direction leading to each.
    pub fn unknown_neighbors(&self, cell: Cell) -> Vec<(Cell, Direction)> {
        self.bounds
            .neighbors(cell)
            .into_iter()
            .filter(|(n, _)| self.unknown.contains(n))
            .collect()
    }

    /// Whether the planner may step onto `cell`.
    ///
    /// Unsafe cells are never traversable; unknown cells only when
    /// `allow_unknown` is set.
    pub fn is_traversable(&self, cell: Cell, allow_unknown: bool) -> bool {
        self.bounds.contains(cell)
            && !self.unsafe_cells.contains(&cell)
            && (allow_unknown || self.safe.contains(&cell))
    }

    /// Whether `safe`, `unsafe`, and `unknown` together cover every cell
    /// exactly once, with the start cell safe.
    pub fn is_partitioned(&self) -> bool {
        let in_bounds = self
            .safe
            .iter()
            .chain(&self.unsafe_cells)
            .chain(&self.unknown)
            .all(|&c| self.bounds.contains(c));
        let disjoint = self.safe.is_disjoint(&self.unsafe_cells)
            && self.safe.is_disjoint(&self.unknown)
            && self.unsafe_cells.is_disjoint(&self.unknown);
        let total = self
            .safe
            .len()
            .saturating_add(self.unsafe_cells.len())
            .saturating_add(self.unknown.len());
        in_bounds
            && disjoint
            && u32::try_from(total).is_ok_and(|t| t == self.bounds.cell_count())
            && self.safe.contains(&Cell::START)
    }

    // -------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------

    /// Record that the agent is standing on `cell`.
    ///
    /// The cell leaves `unknown` and is filed under `safe`, unless it was
    /// already proven unsafe. Returns `true` on the first visit.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if the cell is off-grid.
    pub fn record_visit(&mut self, cell: Cell) -> Result<bool, WorldError> {
        self.bounds.check(cell)?;
        self.unknown.remove(&cell);
        if !self.unsafe_cells.contains(&cell) {
            self.safe.insert(cell);
        }
        self.visit_order.retain(|&c| c != cell);
        self.visit_order.push(cell);
        Ok(self.visited.insert(cell))
    }

    /// Move an unknown cell to `safe`. Returns `true` if it changed.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if the cell is off-grid.
    pub fn declare_safe(&mut self, cell: Cell) -> Result<bool, WorldError> {
        self.bounds.check(cell)?;
        if self.unknown.remove(&cell) {
            self.safe.insert(cell);
            return Ok(true);
        }
        Ok(false)
    }

    /// Move an unknown cell to `unsafe`. Returns `true` if it changed.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if the cell is off-grid.
    pub fn declare_unsafe(&mut self, cell: Cell) -> Result<bool, WorldError> {
        self.bounds.check(cell)?;
        if self.unknown.remove(&cell) {
            self.unsafe_cells.insert(cell);
            return Ok(true);
        }
        Ok(false)
    }

    /// Latch a wumpus sighting. An existing sighting is never overwritten;
    /// returns `false` in that case.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if the sighted cell is off-grid.
    pub fn latch_wumpus(&mut self, sighting: WumpusSighting) -> Result<bool, WorldError> {
        self.bounds.check(sighting.cell)?;
        if self.wumpus_sighting.is_some() {
            return Ok(false);
        }
        self.wumpus_sighting = Some(sighting);
        Ok(true)
    }

    /// Drop the latched sighting.
    pub const fn clear_wumpus_sighting(&mut self) {
        self.wumpus_sighting = None;
    }

    /// Mark every cell safe, emptying `unknown` and `unsafe`.
    pub fn forgive_all(&mut self) {
        self.unknown.clear();
        self.unsafe_cells.clear();
        self.safe = self.bounds.cells().collect();
    }
}
