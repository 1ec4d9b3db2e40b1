//! Cost-to-end values for every node, by relaxation to a fixpoint.
//!
//! The state graph has cycles (a loop of junctions can be walked either
//! way), so values are recomputed sweep after sweep until nothing changes.
//! Each sweep reads the previous sweep's values as an immutable snapshot and
//! writes a fresh buffer; the two are swapped at the end of the sweep.

use std::fmt;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::error::SolveError;
use crate::graph::CompressedGraph;
use crate::state::State;

/// Sentinel value meaning "the end cannot be reached" in a [`ValueTable`].
pub const UNREACHABLE: u64 = u64::MAX;

/// Minimum total cost from the start, or the lack of any path.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MinimumCost {
    Cost(u64),
    Unreachable,
}

impl MinimumCost {
    #[inline]
    fn from_raw(v: u64) -> Self {
        if v == UNREACHABLE {
            MinimumCost::Unreachable
        } else {
            MinimumCost::Cost(v)
        }
    }

    /// The cost, if the end is reachable.
    #[inline]
    pub fn cost(self) -> Option<u64> {
        match self {
            MinimumCost::Cost(c) => Some(c),
            MinimumCost::Unreachable => None,
        }
    }

    #[inline]
    pub fn is_reachable(self) -> bool {
        matches!(self, MinimumCost::Cost(_))
    }
}

impl fmt::Display for MinimumCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinimumCost::Cost(c) => write!(f, "{c}"),
            MinimumCost::Unreachable => f.write_str("unreachable"),
        }
    }
}

// ---------------------------------------------------------------------------
// ValueTable
// ---------------------------------------------------------------------------

/// Minimum cost to the end from every node of a [`CompressedGraph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueTable {
    values: Vec<u64>,
    start: usize,
    sweeps: usize,
}

impl ValueTable {
    /// Raw value of node `idx`; [`UNREACHABLE`] if the end cannot be reached.
    #[inline]
    pub fn get(&self, idx: usize) -> u64 {
        self.values[idx]
    }

    /// Value of `state`, or `None` if it is not a node or cannot reach the
    /// end.
    pub fn value(&self, graph: &CompressedGraph, state: State) -> Option<u64> {
        let v = self.values[graph.index_of(state)?];
        (v != UNREACHABLE).then_some(v)
    }

    /// The value of the start state.
    #[inline]
    pub fn minimum_cost(&self) -> MinimumCost {
        MinimumCost::from_raw(self.values[self.start])
    }

    /// Number of sweeps run, the final unchanged one included.
    #[inline]
    pub fn sweeps(&self) -> usize {
        self.sweeps
    }

    #[inline]
    pub fn as_slice(&self) -> &[u64] {
        &self.values
    }
}

// ---------------------------------------------------------------------------
// RelaxationSolver
// ---------------------------------------------------------------------------

/// Bellman-Ford style solver over a [`CompressedGraph`].
pub struct RelaxationSolver<'a> {
    graph: &'a CompressedGraph,
    max_sweeps: Option<usize>,
}

impl<'a> RelaxationSolver<'a> {
    pub fn new(graph: &'a CompressedGraph) -> Self {
        Self {
            graph,
            max_sweeps: None,
        }
    }

    /// Override the sweep cap.
    pub fn with_max_sweeps(mut self, max_sweeps: Option<usize>) -> Self {
        self.max_sweeps = max_sweeps;
        self
    }

    /// The sweep cap in effect: `node_count × max_out_degree`, and never
    /// less than `node_count + 1`, unless overridden.
    pub fn sweep_cap(&self) -> usize {
        self.max_sweeps.unwrap_or_else(|| {
            let n = self.graph.node_count();
            n.saturating_mul(self.graph.max_out_degree()).max(n + 1)
        })
    }

    /// Relax until a sweep changes nothing.
    pub fn solve(&self) -> Result<ValueTable, SolveError> {
        let graph = self.graph;
        let n = graph.node_count();
        let cap = self.sweep_cap();

        let mut values: Vec<u64> = (0..n)
            .map(|i| if graph.is_end(i) { 0 } else { UNREACHABLE })
            .collect();
        let mut next: Vec<u64> = Vec::with_capacity(n);

        for sweep in 1..=cap {
            sweep_into(graph, &values, &mut next);
            let changed = values.iter().zip(&next).filter(|(a, b)| a != b).count();
            std::mem::swap(&mut values, &mut next);
            log::trace!("sweep {sweep}: {changed} of {n} values changed");
            if changed == 0 {
                log::debug!("relaxation converged after {sweep} sweeps over {n} nodes");
                return Ok(ValueTable {
                    values,
                    start: graph.start_index(),
                    sweeps: sweep,
                });
            }
        }

        log::error!("relaxation over {n} nodes did not converge within {cap} sweeps");
        Err(SolveError::IterationCapExceeded { cap })
    }
}

/// New value of node `idx` given the previous sweep's values.
#[inline]
fn relax_node(graph: &CompressedGraph, prev: &[u64], idx: usize) -> u64 {
    if graph.is_end(idx) {
        return 0;
    }
    graph
        .edges_from(idx)
        .iter()
        .map(|e| e.cost.saturating_add(prev[e.target_index()]))
        .min()
        .unwrap_or(UNREACHABLE)
}

#[cfg(not(feature = "rayon"))]
#[inline]
fn sweep_into(graph: &CompressedGraph, prev: &[u64], next: &mut Vec<u64>) {
    sweep_sequential(graph, prev, next);
}

#[cfg(feature = "rayon")]
#[inline]
fn sweep_into(graph: &CompressedGraph, prev: &[u64], next: &mut Vec<u64>) {
    sweep_parallel(graph, prev, next);
}

fn sweep_sequential(graph: &CompressedGraph, prev: &[u64], next: &mut Vec<u64>) {
    next.clear();
    next.extend((0..prev.len()).map(|i| relax_node(graph, prev, i)));
}

#[cfg(feature = "rayon")]
fn sweep_parallel(graph: &CompressedGraph, prev: &[u64], next: &mut Vec<u64>) {
    (0..prev.len())
        .into_par_iter()
        .map(|i| relax_node(graph, prev, i))
        .collect_into_vec(next);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TURN_PENALTY;
    use crate::state::DirectionalStateGraph;
    use turnpath_core::{Direction, GridModel};

    fn solve(text: &str) -> (GridModel, CompressedGraph, ValueTable) {
        let grid: GridModel = text.parse().unwrap();
        let g = DirectionalStateGraph::new(&grid, TURN_PENALTY);
        let graph = CompressedGraph::build(&grid, &g, Direction::East);
        let values = RelaxationSolver::new(&graph).solve().unwrap();
        (grid, graph, values)
    }

    #[test]
    fn end_values_are_zero() {
        let (grid, graph, values) = solve("#S..E#");
        for d in Direction::ALL {
            assert_eq!(values.value(&graph, State::new(grid.end(), d)), Some(0));
        }
        assert_eq!(values.minimum_cost(), MinimumCost::Cost(3));
    }

    #[test]
    fn unreachable_start_reports_unreachable() {
        let (_, _, values) = solve("#S.#.E#");
        assert_eq!(values.minimum_cost(), MinimumCost::Unreachable);
        assert_eq!(values.minimum_cost().cost(), None);
        assert!(!values.minimum_cost().is_reachable());
        assert!(values.as_slice().contains(&UNREACHABLE));
    }

    #[test]
    fn cycle_converges_to_shortest_way_round() {
        let text = "\
#######
#.....#
#.#.#.#
#S....#
###.###
###E###
#######";
        let (grid, graph, values) = solve(text);
        // East twice, then turn south for two steps onto the end.
        assert_eq!(values.minimum_cost(), MinimumCost::Cost(1004));
        assert!(values.sweeps() >= 2);
        assert!(values.sweeps() <= RelaxationSolver::new(&graph).sweep_cap());
        let start = State::new(grid.start(), Direction::East);
        assert_eq!(values.value(&graph, start), Some(1004));
    }

    #[test]
    fn sweep_cap_is_enforced() {
        let text = "\
#######
#.....#
#.#.#.#
#S....#
###.###
###E###
#######";
        let grid: GridModel = text.parse().unwrap();
        let g = DirectionalStateGraph::new(&grid, TURN_PENALTY);
        let graph = CompressedGraph::build(&grid, &g, Direction::East);
        let solver = RelaxationSolver::new(&graph).with_max_sweeps(Some(1));
        assert_eq!(solver.sweep_cap(), 1);
        assert_eq!(
            solver.solve(),
            Err(SolveError::IterationCapExceeded { cap: 1 })
        );
    }

    #[test]
    fn default_cap_covers_node_count() {
        let (_, graph, _) = solve("#S..E#");
        let cap = RelaxationSolver::new(&graph).sweep_cap();
        assert!(cap > graph.node_count());
    }

    #[test]
    fn minimum_cost_display() {
        assert_eq!(MinimumCost::Cost(7036).to_string(), "7036");
        assert_eq!(MinimumCost::Unreachable.to_string(), "unreachable");
    }
}
