//! Collapsing non-branching runs of cells into single weighted edges.

use std::collections::HashMap;

use turnpath_core::{Direction, Point};

use crate::state::State;
use crate::traits::DirectionalPather;

/// One maximal non-branching run of cells, walked from a junction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corridor {
    /// Where the walk stopped and the facing it arrived with.
    pub target: State,
    /// Sum of the per-step costs along the walk.
    pub cost: u64,
    /// Every cell visited, both endpoints included, in walking order.
    pub cells: Vec<Point>,
}

/// Memoizing corridor walker.
///
/// Results are keyed by `(origin cell, incoming facing, outgoing direction)`
/// and never invalidated; the grid behind `pather` is immutable.
pub struct CorridorCollapser<'a, P> {
    pather: &'a P,
    max_len: usize,
    memo: HashMap<(Point, Direction, Direction), Option<Corridor>>,
}

impl<'a, P: DirectionalPather> CorridorCollapser<'a, P> {
    /// `max_len` bounds the number of steps in one walk; the walkable cell
    /// count of the grid is always enough.
    pub fn new(pather: &'a P, max_len: usize) -> Self {
        Self {
            pather,
            max_len,
            memo: HashMap::new(),
        }
    }

    /// Walk from `from` towards `outgoing` until a junction or the end.
    ///
    /// Returns `None` when the walk runs into a dead end, or when `outgoing`
    /// is not a legal move from `from`.
    pub fn collapse(&mut self, from: State, outgoing: Direction) -> Option<&Corridor> {
        let pather = self.pather;
        let max_len = self.max_len;
        self.memo
            .entry((from.cell, from.facing, outgoing))
            .or_insert_with(|| walk(pather, from, outgoing, max_len))
            .as_ref()
    }

    /// Number of memoized walks, dead ends included.
    pub fn cached(&self) -> usize {
        self.memo.len()
    }
}

fn walk<P: DirectionalPather>(
    pather: &P,
    from: State,
    outgoing: Direction,
    max_len: usize,
) -> Option<Corridor> {
    if !pather.outgoing(from.cell, Some(from.facing)).contains(outgoing) {
        return None;
    }

    let mut facing = outgoing;
    let mut cell = from.cell.step(outgoing);
    let mut cost = pather.step_cost(Some(from.facing), outgoing);
    let mut cells = vec![from.cell, cell];

    while !pather.is_anchor(cell) {
        let next = pather.outgoing(cell, Some(facing));
        let Some(dir) = next.single() else {
            if next.is_empty() {
                return None;
            }
            // Branch point.
            break;
        };
        if cells.len() > max_len {
            log::warn!("corridor from {from} towards {outgoing} exceeds {max_len} steps");
            return None;
        }
        cost = cost.saturating_add(pather.step_cost(Some(facing), dir));
        facing = dir;
        cell = cell.step(dir);
        cells.push(cell);
    }

    Some(Corridor {
        target: State::new(cell, facing),
        cost,
        cells,
    })
}
