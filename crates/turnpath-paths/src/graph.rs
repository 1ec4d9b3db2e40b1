//! The compressed junction graph.

use std::collections::HashMap;

use turnpath_core::{Direction, GridModel, Point};

use crate::corridor::CorridorCollapser;
use crate::state::State;
use crate::traits::DirectionalPather;

/// A corridor between two junction states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedEdge {
    pub origin: State,
    /// Direction of the first step out of `origin`.
    pub outgoing: Direction,
    pub target: State,
    pub cost: u64,
    /// Cells walked, both endpoints included.
    pub cells: Vec<Point>,
    pub(crate) target_idx: usize,
}

impl CompressedEdge {
    /// Index of `target` in [`CompressedGraph::nodes`].
    #[inline]
    pub fn target_index(&self) -> usize {
        self.target_idx
    }
}

/// Junction states connected by collapsed corridors.
///
/// Nodes are every junction cell paired with each facing it can be reached
/// with (the cell behind it is walkable), plus the start state and the end
/// cell in all four facings. Node order is deterministic: row-major by cell,
/// then facings in [`Direction::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedGraph {
    nodes: Vec<State>,
    index: HashMap<State, usize>,
    edges: Vec<Vec<CompressedEdge>>,
    start: usize,
    end: Point,
}

impl CompressedGraph {
    /// Collapse every corridor leaving every node of `grid` into one edge.
    pub fn build<P: DirectionalPather>(
        grid: &GridModel,
        pather: &P,
        start_facing: Direction,
    ) -> Self {
        let start_state = State::new(grid.start(), start_facing);

        let mut nodes = Vec::new();
        for cell in grid.open_cells() {
            if cell == grid.end() {
                nodes.extend(Direction::ALL.map(|d| State::new(cell, d)));
                continue;
            }
            if !pather.is_junction(cell) {
                continue;
            }
            for d in Direction::ALL {
                let s = State::new(cell, d);
                if s == start_state || grid.is_open(cell.step(d.opposite())) {
                    nodes.push(s);
                }
            }
        }
        let mut index: HashMap<State, usize> =
            nodes.iter().enumerate().map(|(i, &s)| (s, i)).collect();

        let mut collapser = CorridorCollapser::new(pather, grid.open_count());
        let mut edges: Vec<Vec<CompressedEdge>> = Vec::with_capacity(nodes.len());

        // Targets are junction states already listed above; the loop still
        // picks up any it meets that are not.
        let mut i = 0;
        while i < nodes.len() {
            let from = nodes[i];
            let mut out = Vec::new();
            for dir in pather.outgoing(from.cell, Some(from.facing)).iter() {
                let Some(corridor) = collapser.collapse(from, dir) else {
                    continue;
                };
                let target_idx = *index.entry(corridor.target).or_insert_with(|| {
                    nodes.push(corridor.target);
                    nodes.len() - 1
                });
                out.push(CompressedEdge {
                    origin: from,
                    outgoing: dir,
                    target: corridor.target,
                    cost: corridor.cost,
                    cells: corridor.cells.clone(),
                    target_idx,
                });
            }
            edges.push(out);
            i += 1;
        }

        let start = index[&start_state];
        let graph = Self {
            nodes,
            index,
            edges,
            start,
            end: grid.end(),
        };
        log::debug!(
            "compressed graph: {} nodes, {} edges, {} corridor walks",
            graph.node_count(),
            graph.edge_count(),
            collapser.cached()
        );
        graph
    }

    /// All nodes, in index order.
    #[inline]
    pub fn nodes(&self) -> &[State] {
        &self.nodes
    }

    #[inline]
    pub fn node(&self, idx: usize) -> State {
        self.nodes[idx]
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    /// Largest number of edges leaving any one node.
    pub fn max_out_degree(&self) -> usize {
        self.edges.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Index of `state`, if it is a node.
    #[inline]
    pub fn index_of(&self, state: State) -> Option<usize> {
        self.index.get(&state).copied()
    }

    /// Edges leaving node `idx`.
    #[inline]
    pub fn edges_from(&self, idx: usize) -> &[CompressedEdge] {
        &self.edges[idx]
    }

    /// Index of the start state.
    #[inline]
    pub fn start_index(&self) -> usize {
        self.start
    }

    /// Whether node `idx` stands on the end cell.
    #[inline]
    pub fn is_end(&self, idx: usize) -> bool {
        self.nodes[idx].cell == self.end
    }

    /// Iterate over every edge, grouped by origin in node order.
    pub fn edges(&self) -> impl Iterator<Item = &CompressedEdge> {
        self.edges.iter().flatten()
    }
}
