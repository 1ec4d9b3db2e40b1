use std::fmt;

use crate::geom::Point;

/// Reasons a maze description is rejected before any search runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The grid has no rows or no columns.
    Empty,
    /// A row's width differs from the first row's.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character outside `# . S E` was found.
    InvalidTile { ch: char, pos: Point },
    /// No start marker.
    MissingStart,
    /// No end marker.
    MissingEnd,
    /// A second start marker.
    DuplicateStart { first: Point, second: Point },
    /// A second end marker.
    DuplicateEnd { first: Point, second: Point },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "malformed grid: no cells"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "malformed grid: row {row} has width {found}, expected {expected}"
            ),
            Self::InvalidTile { ch, pos } => {
                write!(f, "malformed grid: invalid tile \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::MissingStart => write!(f, "malformed grid: no start marker"),
            Self::MissingEnd => write!(f, "malformed grid: no end marker"),
            Self::DuplicateStart { first, second } => {
                write!(f, "malformed grid: start marker at both {first} and {second}")
            }
            Self::DuplicateEnd { first, second } => {
                write!(f, "malformed grid: end marker at both {first} and {second}")
            }
        }
    }
}

impl std::error::Error for GridError {}
