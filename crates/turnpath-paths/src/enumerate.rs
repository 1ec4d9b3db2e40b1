//! Collecting every cell that lies on some minimum-cost path.

use std::collections::BTreeSet;

use turnpath_core::Point;

use crate::error::SolveError;
use crate::graph::CompressedGraph;
use crate::relax::{UNREACHABLE, ValueTable};

/// Follows every tied optimal edge from the start state.
pub struct OptimalPathEnumerator<'a> {
    graph: &'a CompressedGraph,
    values: &'a ValueTable,
}

impl<'a> OptimalPathEnumerator<'a> {
    pub fn new(graph: &'a CompressedGraph, values: &'a ValueTable) -> Self {
        Self { graph, values }
    }

    /// The union of the cells of every minimum-cost path.
    ///
    /// Empty when the end is unreachable. At each node the edges whose
    /// `cost + value(target)` equals the minimum over all edges are taken;
    /// every edge costs at least one step, so this subgraph has no cycles and
    /// each node is expanded once.
    pub fn cells(&self) -> Result<BTreeSet<Point>, SolveError> {
        let graph = self.graph;
        let values = self.values;
        let start = graph.start_index();

        if values.as_slice().len() != graph.node_count() {
            let state = graph.node(start);
            let value = values.as_slice().get(start).copied().unwrap_or(UNREACHABLE);
            log::error!(
                "value table has {} entries for a graph of {} nodes",
                values.as_slice().len(),
                graph.node_count()
            );
            return Err(SolveError::InternalInvariantViolation { state, value });
        }

        let mut cells = BTreeSet::new();
        if values.get(start) == UNREACHABLE {
            return Ok(cells);
        }

        let mut expanded = vec![false; graph.node_count()];
        let mut stack = vec![start];

        while let Some(i) = stack.pop() {
            if std::mem::replace(&mut expanded[i], true) || graph.is_end(i) {
                continue;
            }

            let edges = graph.edges_from(i);
            let best = edges
                .iter()
                .map(|e| e.cost.saturating_add(values.get(e.target_index())))
                .min();
            let value = values.get(i);
            if best != Some(value) {
                let state = graph.node(i);
                log::error!("no optimal edge out of {state} (value {value}, best edge {best:?})");
                return Err(SolveError::InternalInvariantViolation { state, value });
            }

            for e in edges {
                if e.cost.saturating_add(values.get(e.target_index())) == value {
                    cells.extend(e.cells.iter().copied());
                    stack.push(e.target_index());
                }
            }
        }

        log::debug!(
            "{} cells on minimum paths, {} nodes expanded",
            cells.len(),
            expanded.iter().filter(|&&x| x).count()
        );
        Ok(cells)
    }
}
