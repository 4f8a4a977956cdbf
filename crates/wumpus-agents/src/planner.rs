//! A* path planning over the agent's belief state.
//!
//! The open list is a [`BinaryHeap`] of `Reverse((f, seq, g, cell))`, so
//! the entry with the lowest `f = g + h` pops first and equal `f` values
//! pop in insertion order. `h` is the Manhattan distance to the goal, which
//! is admissible and consistent on a unit-cost four-connected grid, so the
//! first time the goal pops its path is shortest.
//!
//! The planner keeps no state between calls.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use wumpus_types::Cell;
use wumpus_world::WorldError;

use crate::belief::BeliefState;

/// Find a shortest path from `start` to `goal`.
///
/// A neighbor may be entered when it is in bounds, not unsafe, and either
/// safe or `allow_unknown` is set. The start cell itself is exempt from
/// that check. Returns the cells after `start` up to and including `goal`,
/// an empty path when `start == goal`, or `None` when the goal cannot be
/// reached under the restriction.
///
/// # Errors
///
/// Returns [`WorldError::OutOfBounds`] if `start` or `goal` is off-grid.
pub fn find_path(
    belief: &BeliefState,
    start: Cell,
    goal: Cell,
    allow_unknown: bool,
) -> Result<Option<Vec<Cell>>, WorldError> {
    let bounds = belief.bounds();
    bounds.check(start)?;
    bounds.check(goal)?;
    if start == goal {
        return Ok(Some(Vec::new()));
    }

    let mut open: BinaryHeap<Reverse<(u32, u64, u32, Cell)>> = BinaryHeap::new();
    let mut best_g: BTreeMap<Cell, u32> = BTreeMap::new();
    let mut came_from: BTreeMap<Cell, Cell> = BTreeMap::new();
    let mut seq: u64 = 0;

    best_g.insert(start, 0);
    open.push(Reverse((start.manhattan(goal), seq, 0, start)));

    while let Some(Reverse((_, _, g, current))) = open.pop() {
        if current == goal {
            return Ok(Some(reconstruct(&came_from, start, goal)));
        }
        // Stale entry: a cheaper route to `current` was queued later.
        if best_g.get(&current).is_some_and(|&best| g > best) {
            continue;
        }
        let next_g = g.saturating_add(1);
        for (neighbor, _) in bounds.neighbors(current) {
            if !belief.is_traversable(neighbor, allow_unknown) {
                continue;
            }
            if best_g.get(&neighbor).is_none_or(|&known| next_g < known) {
                best_g.insert(neighbor, next_g);
                came_from.insert(neighbor, current);
                seq = seq.saturating_add(1);
                let f = next_g.saturating_add(neighbor.manhattan(goal));
                open.push(Reverse((f, seq, next_g, neighbor)));
            }
        }
    }
    Ok(None)
}

fn reconstruct(came_from: &BTreeMap<Cell, Cell>, start: Cell, goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&previous) = came_from.get(&current) {
        if previous == start {
            break;
        }
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}
