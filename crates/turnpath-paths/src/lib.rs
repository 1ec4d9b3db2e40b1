//! Directional shortest paths with turn penalties over occupancy grids.
//!
//! Moving one cell forward costs 1; changing facing costs an extra fixed
//! penalty (1000 by default). This crate computes the minimum cost from a
//! start cell and facing to an end cell, and every cell that lies on at
//! least one minimum-cost path.
//!
//! The search runs in stages, each usable on its own:
//!
//! - [`DirectionalStateGraph`] lists legal moves per (cell, facing) state
//! - [`CorridorCollapser`] walks non-branching corridors between junctions
//! - [`CompressedGraph`] joins junction states by collapsed corridors
//! - [`RelaxationSolver`] computes cost-to-end values to a fixpoint
//! - [`OptimalPathEnumerator`] gathers cells along every tied optimum
//!
//! [`Maze`] runs the whole pipeline once over a [`GridModel`].
//!
//! ```
//! use turnpath_core::GridModel;
//! use turnpath_paths::{Maze, MinimumCost};
//!
//! let grid: GridModel = "#####\n#S.##\n##.##\n##E##\n#####".parse().unwrap();
//! let maze = Maze::solve(&grid).unwrap();
//! assert_eq!(maze.minimum_cost(), MinimumCost::Cost(1003));
//! assert_eq!(maze.cells_on_any_minimum_path().unwrap().len(), 4);
//! ```
//!
//! # Cargo features
//!
//! | Feature | Effect |
//! |---|---|
//! | `serde` | `Serialize`/`Deserialize` for configuration, states and results |
//! | `rayon` | relaxation sweeps run in parallel over nodes |

mod config;
mod corridor;
mod enumerate;
mod error;
mod graph;
mod maze;
mod relax;
mod state;
mod traits;

pub use config::{STEP_COST, SolverConfig, TURN_PENALTY};
pub use corridor::{Corridor, CorridorCollapser};
pub use enumerate::OptimalPathEnumerator;
pub use error::SolveError;
pub use graph::{CompressedEdge, CompressedGraph};
pub use maze::Maze;
pub use relax::{MinimumCost, RelaxationSolver, UNREACHABLE, ValueTable};
pub use state::{DirectionalStateGraph, State};
pub use traits::DirectionalPather;
pub use turnpath_core::GridModel;
