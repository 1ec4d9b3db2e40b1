use turnpath_core::{Direction, DirectionSet, Point};

/// Movement rules for a search over (cell, facing) states.
pub trait DirectionalPather {
    /// Directions that may be taken from `p` after arriving facing
    /// `incoming`. `None` means no facing yet, so nothing is excluded for
    /// reversal.
    fn outgoing(&self, p: Point, incoming: Option<Direction>) -> DirectionSet;

    /// Cost of one step towards `outgoing` after arriving facing `incoming`.
    fn step_cost(&self, incoming: Option<Direction>, outgoing: Direction) -> u64;

    /// Whether `p` is the start or the end cell.
    fn is_anchor(&self, p: Point) -> bool;

    /// Whether `p` is a decision point: an anchor, or a cell with three or
    /// more walkable neighbours.
    fn is_junction(&self, p: Point) -> bool {
        self.is_anchor(p) || self.outgoing(p, None).len() > 2
    }
}
