//! The [`GridModel`] type: an immutable occupancy grid with a start and an
//! end cell.
//!
//! A model is validated once at construction and never mutated afterwards,
//! so every search component can hold a plain shared reference to it.

use std::str::FromStr;

use crate::error::GridError;
use crate::geom::{Point, Range};

/// One cell of a maze description.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    #[default]
    Wall,
    Open,
    Start,
    End,
}

impl Tile {
    /// Map a text character to a tile (`#`, `.`, `S`, `E`).
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '#' => Some(Tile::Wall),
            '.' => Some(Tile::Open),
            'S' => Some(Tile::Start),
            'E' => Some(Tile::End),
            _ => None,
        }
    }

    /// The text character for this tile.
    pub fn to_char(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Open => '.',
            Tile::Start => 'S',
            Tile::End => 'E',
        }
    }

    /// Whether the tile can be walked on.
    #[inline]
    pub fn is_open(self) -> bool {
        !matches!(self, Tile::Wall)
    }
}

// ---------------------------------------------------------------------------
// GridModel
// ---------------------------------------------------------------------------

/// An immutable occupancy grid plus its two distinguished cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridModel {
    open: Vec<bool>,
    bounds: Range,
    start: Point,
    end: Point,
    open_count: usize,
}

impl GridModel {
    /// Build a model from rows of tiles.
    ///
    /// Fails if the grid is empty, non-rectangular, or does not hold exactly
    /// one [`Tile::Start`] and one [`Tile::End`].
    pub fn from_rows<R: AsRef<[Tile]>>(rows: &[R]) -> Result<Self, GridError> {
        if rows.iter().all(|r| r.as_ref().is_empty()) {
            return Err(GridError::Empty);
        }
        let width = rows[0].as_ref().len();

        let mut open = Vec::with_capacity(width * rows.len());
        let mut start: Option<Point> = None;
        let mut end: Option<Point> = None;

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(GridError::Ragged {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &tile) in row.iter().enumerate() {
                let p = Point::new(x as i32, y as i32);
                match tile {
                    Tile::Start => {
                        if let Some(first) = start {
                            return Err(GridError::DuplicateStart { first, second: p });
                        }
                        start = Some(p);
                    }
                    Tile::End => {
                        if let Some(first) = end {
                            return Err(GridError::DuplicateEnd { first, second: p });
                        }
                        end = Some(p);
                    }
                    Tile::Wall | Tile::Open => {}
                }
                open.push(tile.is_open());
            }
        }

        let start = start.ok_or(GridError::MissingStart)?;
        let end = end.ok_or(GridError::MissingEnd)?;
        let open_count = open.iter().filter(|&&o| o).count();

        Ok(Self {
            open,
            bounds: Range::new(0, 0, width as i32, rows.len() as i32),
            start,
            end,
            open_count,
        })
    }

    /// Whether `p` is inside the grid and walkable.
    #[inline]
    pub fn is_open(&self, p: Point) -> bool {
        self.bounds.index_of(p).is_some_and(|i| self.open[i])
    }

    /// The start cell.
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    /// The end cell.
    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    /// Whether `p` is the start or the end cell.
    #[inline]
    pub fn is_anchor(&self, p: Point) -> bool {
        p == self.start || p == self.end
    }

    /// The grid rectangle, anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of walkable cells, anchors included.
    #[inline]
    pub fn open_count(&self) -> usize {
        self.open_count
    }

    /// Row-major iterator over every walkable cell.
    pub fn open_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.bounds.iter().filter(|&p| self.is_open(p))
    }

    /// The tile at `p`; positions outside the grid read as walls.
    pub fn tile(&self, p: Point) -> Tile {
        if p == self.start {
            Tile::Start
        } else if p == self.end {
            Tile::End
        } else if self.is_open(p) {
            Tile::Open
        } else {
            Tile::Wall
        }
    }

    /// Render the model back to its text form.
    pub fn to_text(&self) -> String {
        let mut s = String::with_capacity(self.bounds.len() + self.bounds.height() as usize);
        for y in self.bounds.min.y..self.bounds.max.y {
            if y > self.bounds.min.y {
                s.push('\n');
            }
            for x in self.bounds.min.x..self.bounds.max.x {
                s.push(self.tile(Point::new(x, y)).to_char());
            }
        }
        s
    }
}

impl FromStr for GridModel {
    type Err = GridError;

    /// Parse a text maze: `#` wall, `.` open, `S` start, `E` end.
    ///
    /// Surrounding whitespace is trimmed from the whole string; a trailing
    /// `\r` on each line is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows: Vec<Vec<Tile>> = Vec::new();
        for (y, line) in s.trim().lines().enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let row = line
                .chars()
                .enumerate()
                .map(|(x, ch)| {
                    Tile::from_char(ch).ok_or(GridError::InvalidTile {
                        ch,
                        pos: Point::new(x as i32, y as i32),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Self::from_rows(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORRIDOR: &str = "\
#######
#S...E#
#######";

    #[test]
    fn parse_corridor() {
        let g: GridModel = CORRIDOR.parse().unwrap();
        assert_eq!(g.bounds().size(), Point::new(7, 3));
        assert_eq!(g.start(), Point::new(1, 1));
        assert_eq!(g.end(), Point::new(5, 1));
        assert_eq!(g.open_count(), 5);
        assert!(g.is_open(Point::new(3, 1)));
        assert!(!g.is_open(Point::new(3, 0)));
        assert!(!g.is_open(Point::new(-1, 1)));
        assert!(!g.is_open(Point::new(7, 1)));
        assert!(g.is_anchor(Point::new(5, 1)));
    }

    #[test]
    fn open_cells_are_row_major() {
        let g: GridModel = "S.#\n#.E".parse().unwrap();
        let cells: Vec<Point> = g.open_cells().collect();
        assert_eq!(
            cells,
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(1, 1),
                Point::new(2, 1)
            ]
        );
    }

    #[test]
    fn text_round_trip() {
        let g: GridModel = CORRIDOR.parse().unwrap();
        assert_eq!(g.to_text(), CORRIDOR);
    }

    #[test]
    fn crlf_lines_accepted() {
        let g: GridModel = "###\r\n#S#\r\n#E#\r\n###\r\n".parse().unwrap();
        assert_eq!(g.end(), Point::new(1, 2));
    }

    #[test]
    fn empty_grid_rejected() {
        assert_eq!("".parse::<GridModel>(), Err(GridError::Empty));
        assert_eq!("   \n ".parse::<GridModel>(), Err(GridError::Empty));
        let rows: Vec<Vec<Tile>> = vec![vec![]];
        assert_eq!(GridModel::from_rows(&rows), Err(GridError::Empty));
    }

    #[test]
    fn ragged_grid_rejected() {
        let err = "####\n#SE\n####".parse::<GridModel>().unwrap_err();
        assert_eq!(
            err,
            GridError::Ragged {
                row: 1,
                expected: 4,
                found: 3
            }
        );

        let rows = vec![vec![], vec![Tile::Start, Tile::End]];
        assert_eq!(
            GridModel::from_rows(&rows),
            Err(GridError::Ragged {
                row: 1,
                expected: 0,
                found: 2
            })
        );
    }

    #[test]
    fn markers_must_be_unique() {
        assert_eq!(
            "#.E#".parse::<GridModel>(),
            Err(GridError::MissingStart)
        );
        assert_eq!("#S.#".parse::<GridModel>(), Err(GridError::MissingEnd));
        assert_eq!(
            "SSE".parse::<GridModel>(),
            Err(GridError::DuplicateStart {
                first: Point::new(0, 0),
                second: Point::new(1, 0)
            })
        );
        assert_eq!(
            "SEE".parse::<GridModel>(),
            Err(GridError::DuplicateEnd {
                first: Point::new(1, 0),
                second: Point::new(2, 0)
            })
        );
    }

    #[test]
    fn invalid_tile_rejected() {
        let err = "#S.x.E#".parse::<GridModel>().unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidTile {
                ch: 'x',
                pos: Point::new(3, 0)
            }
        );
        assert!(err.to_string().contains("invalid tile"));
    }

    #[test]
    fn from_rows_matches_text() {
        use Tile::*;
        let rows = [[Start, Open, End]];
        let g = GridModel::from_rows(&rows).unwrap();
        assert_eq!(g, "S.E".parse::<GridModel>().unwrap());
    }
}
