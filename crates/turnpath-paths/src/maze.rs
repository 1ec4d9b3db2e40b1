use std::collections::BTreeSet;

use turnpath_core::{GridModel, Point};

use crate::config::{STEP_COST, SolverConfig};
use crate::enumerate::OptimalPathEnumerator;
use crate::error::SolveError;
use crate::graph::CompressedGraph;
use crate::relax::{MinimumCost, RelaxationSolver, UNREACHABLE, ValueTable};
use crate::state::DirectionalStateGraph;

/// A solved maze: the state graph, its compressed form and the value table,
/// all derived once from an immutable [`GridModel`].
pub struct Maze<'g> {
    config: SolverConfig,
    states: DirectionalStateGraph<'g>,
    graph: CompressedGraph,
    values: ValueTable,
}

impl<'g> Maze<'g> {
    /// Build and solve with the given configuration.
    ///
    /// Fails with [`SolveError::CostOverflow`] when the turn penalty is so
    /// large that some path cost over `grid` might not fit below
    /// [`UNREACHABLE`].
    pub fn new(grid: &'g GridModel, config: SolverConfig) -> Result<Self, SolveError> {
        check_cost_bound(grid, config.turn_penalty)?;
        let states = DirectionalStateGraph::new(grid, config.turn_penalty);
        let graph = CompressedGraph::build(grid, &states, config.start_facing);
        let values = RelaxationSolver::new(&graph)
            .with_max_sweeps(config.max_sweeps)
            .solve()?;
        Ok(Self {
            config,
            states,
            graph,
            values,
        })
    }

    /// Build and solve with [`SolverConfig::default`].
    pub fn solve(grid: &'g GridModel) -> Result<Self, SolveError> {
        Self::new(grid, SolverConfig::default())
    }

    /// Cost of the cheapest path from the start, facing
    /// [`SolverConfig::start_facing`], to the end.
    #[inline]
    pub fn minimum_cost(&self) -> MinimumCost {
        self.values.minimum_cost()
    }

    /// Every cell on at least one minimum-cost path; empty when the end is
    /// unreachable.
    pub fn cells_on_any_minimum_path(&self) -> Result<BTreeSet<Point>, SolveError> {
        OptimalPathEnumerator::new(&self.graph, &self.values).cells()
    }

    #[inline]
    pub fn grid(&self) -> &'g GridModel {
        self.states.grid()
    }

    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    #[inline]
    pub fn state_graph(&self) -> &DirectionalStateGraph<'g> {
        &self.states
    }

    #[inline]
    pub fn compressed_graph(&self) -> &CompressedGraph {
        &self.graph
    }

    #[inline]
    pub fn values(&self) -> &ValueTable {
        &self.values
    }
}

/// A cheapest path never repeats a (cell, facing) state, so it takes fewer
/// than `4 × open_count` steps of at most `STEP_COST + turn_penalty` each.
fn check_cost_bound(grid: &GridModel, turn_penalty: u64) -> Result<(), SolveError> {
    let states = (grid.open_count() as u64).saturating_mul(4);
    let worst = STEP_COST
        .checked_add(turn_penalty)
        .and_then(|step| step.checked_mul(states));
    if worst.is_none_or(|w| w >= UNREACHABLE) {
        log::error!(
            "turn penalty {turn_penalty} overflows path costs over {} open cells",
            grid.open_count()
        );
        return Err(SolveError::CostOverflow { turn_penalty });
    }
    Ok(())
}
