//! Facing directions and small direction sets.

use std::fmt;
use std::str::FromStr;

use crate::geom::Point;

/// One of the four cardinal facings.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions in clockwise order starting at North.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// The unit step for this direction in screen coordinates.
    #[inline]
    pub const fn delta(self) -> Point {
        match self {
            Direction::North => Point::new(0, -1),
            Direction::East => Point::new(1, 0),
            Direction::South => Point::new(0, 1),
            Direction::West => Point::new(-1, 0),
        }
    }

    /// The direction pointing the other way.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Rotate 90° clockwise.
    #[inline]
    pub const fn clockwise(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// Rotate 90° counter-clockwise.
    #[inline]
    pub const fn counter_clockwise(self) -> Self {
        self.clockwise().opposite()
    }

    /// Position in [`Direction::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        })
    }
}

/// Error returned when a string does not name a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError(pub String);

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid direction: {:?}", self.0)
    }
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Accepts full names or their initials, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Direction::North),
            "east" | "e" => Ok(Direction::East),
            "south" | "s" => Ok(Direction::South),
            "west" | "w" => Ok(Direction::West),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// DirectionSet
// ---------------------------------------------------------------------------

/// A set of directions stored as a 4-bit mask.
///
/// Iteration always yields members in [`Direction::ALL`] order.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct DirectionSet(u8);

impl DirectionSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Add `dir` to the set.
    #[inline]
    pub fn insert(&mut self, dir: Direction) {
        self.0 |= dir.bit();
    }

    /// Whether `dir` is a member.
    #[inline]
    pub fn contains(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The only member, if the set has exactly one.
    #[inline]
    pub fn single(self) -> Option<Direction> {
        if self.len() == 1 { self.iter().next() } else { None }
    }

    /// Iterate over the members in clockwise order from North.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for d in iter {
            set.insert(d);
        }
        set
    }
}

impl fmt::Debug for DirectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        for d in Direction::ALL {
            assert_ne!(d, d.opposite());
            assert_eq!(d.opposite().opposite(), d);
            assert_eq!(d.delta() + d.opposite().delta(), Point::ZERO);
        }
    }

    #[test]
    fn rotations_are_inverse() {
        for d in Direction::ALL {
            assert_eq!(d.clockwise().counter_clockwise(), d);
            assert_eq!(d.clockwise().clockwise(), d.opposite());
        }
        assert_eq!(Direction::North.counter_clockwise(), Direction::West);
    }

    #[test]
    fn parse_direction_names() {
        assert_eq!("East".parse::<Direction>(), Ok(Direction::East));
        assert_eq!("w".parse::<Direction>(), Ok(Direction::West));
        assert!("up".parse::<Direction>().is_err());
        for d in Direction::ALL {
            assert_eq!(d.to_string().parse::<Direction>(), Ok(d));
        }
    }

    #[test]
    fn direction_set_iterates_in_fixed_order() {
        let set: DirectionSet = [Direction::West, Direction::North, Direction::South]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 3);
        assert!(!set.contains(Direction::East));
        let members: Vec<_> = set.iter().collect();
        assert_eq!(
            members,
            vec![Direction::North, Direction::South, Direction::West]
        );
        assert_eq!(set.single(), None);
    }

    #[test]
    fn direction_set_single() {
        let mut set = DirectionSet::EMPTY;
        assert!(set.is_empty());
        assert_eq!(set.single(), None);
        set.insert(Direction::South);
        assert_eq!(set.single(), Some(Direction::South));
    }
}
