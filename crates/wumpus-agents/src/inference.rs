//! Percept-driven belief updates.
//!
//! One call to [`observe`] folds a single percept into the belief state.
//! The steps always run in the same order:
//!
//! 1. **Visit** -- the current cell becomes visited and leaves `unknown`.
//! 2. **Pit** -- a breeze with exactly one unknown neighbor marks that
//!    neighbor unsafe.
//! 3. **Wumpus** -- a stench, while the arrow is held and nothing is latched
//!    yet, with exactly one unknown neighbor latches that neighbor as the
//!    wumpus.
//! 4. **Safe** -- no breeze and no stench: every neighbor that is not
//!    unsafe is declared safe.
//! 5. **Scream** -- the sighting is cleared, and under
//!    [`ScreamPolicy::Optimistic`] every cell becomes safe.
//!
//! Only single-candidate elimination is performed. There is no
//! probabilistic reasoning and no cross-cell constraint solving.

use serde::Serialize;
use tracing::debug;
use wumpus_types::{Cell, Percept};
use wumpus_world::WorldError;

use crate::belief::{BeliefState, WumpusSighting};
use crate::config::ScreamPolicy;

/// What a single observation changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InferenceReport {
    /// The cell had not been visited before.
    pub first_visit: bool,
    /// Neighbor newly deduced to hold a pit.
    pub pit_deduced: Option<Cell>,
    /// Sighting latched during this observation.
    pub wumpus_latched: Option<WumpusSighting>,
    /// Neighbors moved from unknown to safe, in neighbor order.
    pub declared_safe: Vec<Cell>,
    /// A scream was heard and applied.
    pub scream_processed: bool,
}

/// Update `belief` with the percept sensed at `at`.
///
/// `has_arrow` gates the wumpus deduction: once the arrow is gone there is
/// no use in locating the wumpus. Arrow bookkeeping on a scream is left to
/// the caller.
///
/// # Errors
///
/// Returns [`WorldError::OutOfBounds`] if `at` is off-grid. The belief is
/// not modified in that case.
pub fn observe(
    belief: &mut BeliefState,
    at: Cell,
    percept: &Percept,
    has_arrow: bool,
    scream_policy: ScreamPolicy,
) -> Result<InferenceReport, WorldError> {
    let mut report = InferenceReport {
        first_visit: belief.record_visit(at)?,
        ..InferenceReport::default()
    };

    if percept.breeze
        && let [(candidate, _)] = belief.unknown_neighbors(at).as_slice()
        && belief.declare_unsafe(*candidate)?
    {
        debug!(cell = %candidate, from = %at, "Pit deduced");
        report.pit_deduced = Some(*candidate);
    }

    if percept.stench
        && has_arrow
        && !belief.wumpus_inferred()
        && let [(cell, direction)] = belief.unknown_neighbors(at).as_slice()
    {
        let sighting = WumpusSighting {
            cell: *cell,
            direction: *direction,
        };
        if belief.latch_wumpus(sighting)? {
            debug!(cell = %cell, direction = %direction, "Wumpus located");
            report.wumpus_latched = Some(sighting);
        }
    }

    if percept.is_quiet() {
        for (neighbor, _) in belief.bounds().neighbors(at) {
            if belief.declare_safe(neighbor)? {
                report.declared_safe.push(neighbor);
            }
        }
    }

    if percept.scream {
        belief.clear_wumpus_sighting();
        if scream_policy == ScreamPolicy::Optimistic {
            belief.forgive_all();
        }
        debug!(policy = ?scream_policy, "Scream applied to beliefs");
        report.scream_processed = true;
    }

    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wumpus_types::Direction;
    use wumpus_world::GridBounds;

    use super::*;

    fn belief() -> BeliefState {
        BeliefState::new(GridBounds::default())
    }

    fn breeze() -> Percept {
        Percept {
            breeze: true,
            ..Percept::default()
        }
    }

    fn stench() -> Percept {
        Percept {
            stench: true,
            ..Percept::default()
        }
    }

    #[test]
    fn quiet_start_marks_neighbors_safe() {
        let mut b = belief();
        let report = observe(
            &mut b,
            Cell::START,
            &Percept::default(),
            true,
            ScreamPolicy::Optimistic,
        )
        .unwrap();
        assert!(report.first_visit);
        assert_eq!(report.declared_safe, vec![Cell::new(1, 2), Cell::new(2, 1)]);
        assert!(b.is_safe(Cell::new(1, 2)));
        assert!(b.is_safe(Cell::new(2, 1)));
        assert!(b.is_partitioned());
    }

    #[test]
    fn breeze_with_single_unknown_marks_pit() {
        let mut b = belief();
        b.record_visit(Cell::START).unwrap();
        b.declare_safe(Cell::new(2, 1)).unwrap();
        b.declare_safe(Cell::new(1, 2)).unwrap();
        b.declare_safe(Cell::new(2, 2)).unwrap();

        let report =
            observe(&mut b, Cell::new(1, 2), &breeze(), true, ScreamPolicy::Optimistic).unwrap();
        assert_eq!(report.pit_deduced, Some(Cell::new(1, 3)));
        assert!(b.is_unsafe(Cell::new(1, 3)));
        assert!(!b.is_unknown(Cell::new(1, 3)));
        assert!(b.is_partitioned());
    }

    #[test]
    fn breeze_with_several_unknowns_deduces_nothing() {
        let mut b = belief();
        let report =
            observe(&mut b, Cell::START, &breeze(), true, ScreamPolicy::Optimistic).unwrap();
        assert_eq!(report.pit_deduced, None);
        assert!(b.unsafe_cells().is_empty());
        assert!(report.declared_safe.is_empty());
    }

    #[test]
    fn stench_with_single_unknown_latches_wumpus() {
        let mut b = belief();
        b.declare_safe(Cell::new(2, 1)).unwrap();
        let report =
            observe(&mut b, Cell::START, &stench(), true, ScreamPolicy::Optimistic).unwrap();
        let expected = WumpusSighting {
            cell: Cell::new(1, 2),
            direction: Direction::North,
        };
        assert_eq!(report.wumpus_latched, Some(expected));
        assert_eq!(b.wumpus_sighting(), Some(expected));
        // A sighting is not a safety classification.
        assert!(b.is_unknown(Cell::new(1, 2)));
    }

    #[test]
    fn stench_without_arrow_is_ignored() {
        let mut b = belief();
        b.declare_safe(Cell::new(2, 1)).unwrap();
        let report =
            observe(&mut b, Cell::START, &stench(), false, ScreamPolicy::Optimistic).unwrap();
        assert_eq!(report.wumpus_latched, None);
        assert!(!b.wumpus_inferred());
    }

    #[test]
    fn sighting_is_never_overwritten() {
        let mut b = belief();
        b.declare_safe(Cell::new(2, 1)).unwrap();
        observe(&mut b, Cell::START, &stench(), true, ScreamPolicy::Optimistic).unwrap();
        let first = b.wumpus_sighting();

        // (2, 3) is the only unknown neighbor of (2, 2).
        b.declare_safe(Cell::new(3, 2)).unwrap();
        b.declare_safe(Cell::new(1, 2)).unwrap();
        let report =
            observe(&mut b, Cell::new(2, 2), &stench(), true, ScreamPolicy::Optimistic).unwrap();
        assert_eq!(report.wumpus_latched, None);
        assert_eq!(b.wumpus_sighting(), first);
    }

    #[test]
    fn quiet_percept_never_yields_unsafe_neighbors() {
        let mut b = belief();
        b.declare_unsafe(Cell::new(3, 2)).unwrap();
        observe(&mut b, Cell::new(2, 2), &Percept::default(), true, ScreamPolicy::Optimistic)
            .unwrap();
        for (n, _) in b.bounds().neighbors(Cell::new(2, 2)) {
            if n != Cell::new(3, 2) {
                assert!(b.is_safe(n), "{n} should be safe");
            }
        }
        // Already-unsafe cells are left alone.
        assert!(b.is_unsafe(Cell::new(3, 2)));
    }

    #[test]
    fn optimistic_scream_forgives_everything() {
        let mut b = belief();
        b.declare_unsafe(Cell::new(3, 3)).unwrap();
        b.declare_safe(Cell::new(2, 1)).unwrap();
        observe(&mut b, Cell::START, &stench(), true, ScreamPolicy::Optimistic).unwrap();
        assert!(b.wumpus_inferred());

        let scream = Percept::default().with_feedback(false, true);
        let report =
            observe(&mut b, Cell::START, &scream, false, ScreamPolicy::Optimistic).unwrap();
        assert!(report.scream_processed);
        assert!(!b.wumpus_inferred());
        assert_eq!(b.safe().len(), 16);
        assert!(b.is_partitioned());
    }

    #[test]
    fn conservative_scream_keeps_pits() {
        let mut b = belief();
        b.declare_unsafe(Cell::new(3, 3)).unwrap();
        b.declare_safe(Cell::new(2, 1)).unwrap();
        observe(&mut b, Cell::START, &stench(), true, ScreamPolicy::Conservative).unwrap();

        let scream = Percept {
            stench: true,
            scream: true,
            ..Percept::default()
        };
        observe(&mut b, Cell::START, &scream, false, ScreamPolicy::Conservative).unwrap();
        assert!(!b.wumpus_inferred());
        assert!(b.is_unsafe(Cell::new(3, 3)));
        assert!(b.is_unknown(Cell::new(4, 4)));
        assert!(b.is_partitioned());
    }

    #[test]
    fn off_grid_observation_is_rejected() {
        let mut b = belief();
        let before = b.clone();
        let result = observe(
            &mut b,
            Cell::new(5, 5),
            &Percept::default(),
            true,
            ScreamPolicy::Optimistic,
        );
        assert!(result.is_err());
        assert_eq!(b, before);
    }
}
