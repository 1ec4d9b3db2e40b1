//! Per-cell, per-facing movement rules.

use std::fmt;

use turnpath_core::{Direction, DirectionSet, GridModel, Point};

use crate::config::STEP_COST;
use crate::traits::DirectionalPather;

/// Standing at `cell`, having just arrived facing `facing`.
///
/// States order by cell (row-major), then by facing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct State {
    pub cell: Point,
    pub facing: Direction,
}

impl State {
    #[inline]
    pub const fn new(cell: Point, facing: Direction) -> Self {
        Self { cell, facing }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} facing {}", self.cell, self.facing)
    }
}

// ---------------------------------------------------------------------------
// DirectionalStateGraph
// ---------------------------------------------------------------------------

/// Slot used for "no facing yet".
const FRESH: usize = 4;

/// Legal moves and step costs over a [`GridModel`].
///
/// Outgoing direction sets are computed once for every walkable cell and
/// each of the five incoming options (four facings plus "none"), stored in a
/// flat table indexed like the grid.
#[derive(Debug, Clone)]
pub struct DirectionalStateGraph<'g> {
    grid: &'g GridModel,
    turn_penalty: u64,
    candidates: Vec<[DirectionSet; 5]>,
}

impl<'g> DirectionalStateGraph<'g> {
    pub fn new(grid: &'g GridModel, turn_penalty: u64) -> Self {
        let bounds = grid.bounds();
        let mut candidates = vec![[DirectionSet::EMPTY; 5]; bounds.len()];

        for p in grid.open_cells() {
            // Movement stops at the end cell.
            if p == grid.end() {
                continue;
            }
            let Some(i) = bounds.index_of(p) else {
                continue;
            };
            let open: DirectionSet = Direction::ALL
                .into_iter()
                .filter(|&d| grid.is_open(p.step(d)))
                .collect();
            let slots = &mut candidates[i];
            slots[FRESH] = open;
            // Ahead or a quarter turn either way; never back.
            for incoming in Direction::ALL {
                slots[incoming.index()] = [
                    incoming.counter_clockwise(),
                    incoming,
                    incoming.clockwise(),
                ]
                .into_iter()
                .filter(|&d| open.contains(d))
                .collect();
            }
        }

        Self {
            grid,
            turn_penalty,
            candidates,
        }
    }

    /// The grid this graph was built over.
    #[inline]
    pub fn grid(&self) -> &'g GridModel {
        self.grid
    }

    #[inline]
    pub fn turn_penalty(&self) -> u64 {
        self.turn_penalty
    }
}

impl DirectionalPather for DirectionalStateGraph<'_> {
    #[inline]
    fn outgoing(&self, p: Point, incoming: Option<Direction>) -> DirectionSet {
        let slot = incoming.map_or(FRESH, Direction::index);
        self.grid
            .bounds()
            .index_of(p)
            .map_or(DirectionSet::EMPTY, |i| self.candidates[i][slot])
    }

    #[inline]
    fn step_cost(&self, incoming: Option<Direction>, outgoing: Direction) -> u64 {
        match incoming {
            Some(d) if d != outgoing => STEP_COST.saturating_add(self.turn_penalty),
            _ => STEP_COST,
        }
    }

    #[inline]
    fn is_anchor(&self, p: Point) -> bool {
        self.grid.is_anchor(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TURN_PENALTY;
    use Direction::*;

    const CROSS: &str = "\
#####
##.##
#S.E#
##.##
#####";

    fn dirs(set: DirectionSet) -> Vec<Direction> {
        set.iter().collect()
    }

    #[test]
    fn fresh_start_allows_every_open_direction() {
        let grid: GridModel = CROSS.parse().unwrap();
        let g = DirectionalStateGraph::new(&grid, TURN_PENALTY);
        assert_eq!(
            dirs(g.outgoing(Point::new(2, 2), None)),
            vec![North, East, South, West]
        );
        assert_eq!(dirs(g.outgoing(Point::new(1, 2), None)), vec![East]);
    }

    #[test]
    fn reversal_is_excluded() {
        let grid: GridModel = CROSS.parse().unwrap();
        let g = DirectionalStateGraph::new(&grid, TURN_PENALTY);
        let centre = Point::new(2, 2);
        assert_eq!(dirs(g.outgoing(centre, Some(East))), vec![North, East, South]);
        assert_eq!(dirs(g.outgoing(centre, Some(South))), vec![East, South, West]);
        // Arriving at the start facing West leaves nowhere to go.
        assert!(g.outgoing(Point::new(1, 2), Some(West)).is_empty());
    }

    #[test]
    fn end_is_terminal() {
        let grid: GridModel = CROSS.parse().unwrap();
        let g = DirectionalStateGraph::new(&grid, TURN_PENALTY);
        assert!(g.outgoing(grid.end(), None).is_empty());
        for d in Direction::ALL {
            assert!(g.outgoing(grid.end(), Some(d)).is_empty());
        }
    }

    #[test]
    fn walls_and_outside_have_no_moves() {
        let grid: GridModel = CROSS.parse().unwrap();
        let g = DirectionalStateGraph::new(&grid, TURN_PENALTY);
        assert!(g.outgoing(Point::new(0, 0), None).is_empty());
        assert!(g.outgoing(Point::new(-3, 9), Some(North)).is_empty());
    }

    #[test]
    fn step_cost_charges_turns_once() {
        let grid: GridModel = CROSS.parse().unwrap();
        let g = DirectionalStateGraph::new(&grid, TURN_PENALTY);
        assert_eq!(g.step_cost(Some(East), East), 1);
        assert_eq!(g.step_cost(Some(East), North), 1001);
        assert_eq!(g.step_cost(Some(East), South), 1001);
        assert_eq!(g.step_cost(None, West), 1);

        let cheap = DirectionalStateGraph::new(&grid, 3);
        assert_eq!(cheap.turn_penalty(), 3);
        assert_eq!(cheap.step_cost(Some(North), West), 4);
    }

    #[test]
    fn junctions_are_anchors_or_branch_points() {
        let grid: GridModel = CROSS.parse().unwrap();
        let g = DirectionalStateGraph::new(&grid, TURN_PENALTY);
        assert!(g.is_junction(Point::new(2, 2)));
        assert!(g.is_junction(grid.start()));
        assert!(g.is_junction(grid.end()));
        assert!(!g.is_junction(Point::new(2, 1)));
    }
}
