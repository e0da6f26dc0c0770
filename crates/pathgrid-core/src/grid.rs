//! The occupancy [`Grid`] searched by the pathfinder.
//!
//! Every cell holds its own [`Occupancy`] value in a flat row-major buffer,
//! so writing one cell can never affect another.

use std::fmt;
use std::str::FromStr;

use crate::geom::{Point, Range};

/// What a cell contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Occupancy {
    #[default]
    Free,
    Blocked,
}

impl Occupancy {
    /// The character used by the ASCII picture format.
    pub const fn glyph(self) -> char {
        match self {
            Self::Free => '.',
            Self::Blocked => '#',
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A cell query fell outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange {
    pub pos: Point,
    pub bounds: Range,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell {} is outside grid bounds {}", self.pos, self.bounds)
    }
}

impl std::error::Error for OutOfRange {}

/// Errors that can occur when parsing a grid picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseGridError {
    /// The picture has no rows.
    Empty,
    /// Row `row` has `found` cells where `expected` were expected.
    InconsistentWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character other than `.` or `#` was found.
    InvalidChar { ch: char, pos: Point },
}

impl fmt::Display for ParseGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid: empty picture"),
            Self::InconsistentWidth {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid: row {row} has {found} cells, expected {expected}"
            ),
            Self::InvalidChar { ch, pos } => {
                write!(f, "grid contains invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for ParseGridError {}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A rectangular grid of [`Occupancy`] values with origin (0, 0).
///
/// With the `serde` feature a grid serializes as its ASCII picture.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub struct Grid {
    cells: Vec<Occupancy>,
    bounds: Range,
}

impl Grid {
    /// Create a new grid of the given dimensions with every cell free.
    ///
    /// A grid without cells is always 0×0: a zero or negative dimension
    /// collapses both.
    pub fn new(width: i32, height: i32) -> Self {
        let (w, h) = if width > 0 && height > 0 {
            (width, height)
        } else {
            (0, 0)
        };
        let bounds = Range::new(0, 0, w, h);
        Self {
            cells: vec![Occupancy::Free; bounds.len()],
            bounds,
        }
    }

    /// Build a grid from a per-cell function.
    pub fn from_fn(width: i32, height: i32, mut f: impl FnMut(Point) -> Occupancy) -> Self {
        let mut grid = Self::new(width, height);
        for (slot, p) in grid.cells.iter_mut().zip(grid.bounds.iter()) {
            *slot = f(p);
        }
        grid
    }

    /// The bounding range of the grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether `p` addresses a cell of this grid.
    #[inline]
    pub fn in_bounds(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Result<usize, OutOfRange> {
        self.bounds.index(p).ok_or(OutOfRange {
            pos: p,
            bounds: self.bounds,
        })
    }

    /// Occupancy of the cell at `p`.
    pub fn occupancy(&self, p: Point) -> Result<Occupancy, OutOfRange> {
        let i = self.index(p)?;
        Ok(self.cells[i])
    }

    /// Whether the cell at `p` is blocked. Callers must check
    /// [`in_bounds`](Self::in_bounds) first; an outside point is an error.
    #[inline]
    pub fn is_blocked(&self, p: Point) -> Result<bool, OutOfRange> {
        Ok(self.occupancy(p)? == Occupancy::Blocked)
    }

    /// Whether `p` is inside the grid and free.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.bounds
            .index(p)
            .is_some_and(|i| self.cells[i] == Occupancy::Free)
    }

    /// Set the cell at `p`.
    pub fn set(&mut self, p: Point, occ: Occupancy) -> Result<(), OutOfRange> {
        let i = self.index(p)?;
        self.cells[i] = occ;
        Ok(())
    }

    /// Count how many cells hold `occ`.
    pub fn count(&self, occ: Occupancy) -> usize {
        self.cells.iter().filter(|&&c| c == occ).count()
    }

    /// Iterate over `(point, occupancy)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Occupancy)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }
}

impl FromStr for Grid {
    type Err = ParseGridError;

    /// Parse a picture of `.` (free) and `#` (blocked) rows. Blank lines and
    /// surrounding whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(ParseGridError::Empty);
        };
        let width = first.chars().count();

        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(ParseGridError::InconsistentWidth {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let occ = match ch {
                    '.' => Occupancy::Free,
                    '#' => Occupancy::Blocked,
                    _ => {
                        return Err(ParseGridError::InvalidChar {
                            ch,
                            pos: Point::new(x as i32, y as i32),
                        });
                    }
                };
                cells.push(occ);
            }
        }

        Ok(Self {
            cells,
            bounds: Range::new(0, 0, width as i32, rows.len() as i32),
        })
    }
}

impl From<Grid> for String {
    fn from(grid: Grid) -> Self {
        grid.to_string()
    }
}

impl TryFrom<String> for Grid {
    type Error = ParseGridError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Prints one line per row. The empty grid prints nothing and so has no
/// picture that parses back; every other grid round-trips through `FromStr`.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.width().max(1) as usize;
        for row in self.cells.chunks(w) {
            for c in row {
                write!(f, "{}", c.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let g: Grid = "#..\n.#.\n".parse().unwrap();
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, "\"#..\\n.#.\\n\"");
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }
}
