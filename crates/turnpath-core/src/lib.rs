//! **turnpath-core**: occupancy grids, facings and geometry for
//! turn-penalised maze search.
//!
//! This crate holds the validated, immutable maze description shared by the
//! search components in `turnpath-paths`: geometry primitives, the four
//! facing directions, and the [`GridModel`] with its start and end cells.

pub mod direction;
pub mod error;
pub mod geom;
pub mod grid;

pub use direction::{Direction, DirectionSet, ParseDirectionError};
pub use error::GridError;
pub use geom::{Point, Range};
pub use grid::{GridModel, Tile};
