//! The [`CharGrid`] type — a rectangular occupancy grid of characters.
//!
//! Cells are stored row-major. By convention `'0'` marks an open cell and
//! any other character is blocked, but the grid itself attaches no meaning
//! to the characters; searches decide what counts as open.

use std::fmt;

use crate::geom::{Point, Range};

/// Errors that can occur when building a grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// The grid has no rows or no columns.
    #[error("grid: no cells")]
    Empty,
    /// Rows have inconsistent widths.
    #[error("grid: row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        found: usize,
        expected: usize,
    },
    /// Cell storage could not be reserved.
    #[error("grid: could not reserve storage for {0} cells")]
    Alloc(usize),
    /// Bounds that do not start at the origin.
    #[error("grid: bounds must start at [0, 0], not {0}")]
    Offset(Point),
    /// Cell count disagrees with the bounds.
    #[error("grid: {found} cells do not fill {bounds}")]
    Size { found: usize, bounds: Range },
}

/// A rectangular 2D grid of characters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawGrid")
)]
pub struct CharGrid {
    cells: Vec<char>,
    bounds: Range,
}

impl CharGrid {
    /// Build a grid from a slice of rows, one character per cell.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let Some(first) = rows.first() else {
            return Err(GridError::Empty);
        };
        let cols = first.as_ref().chars().count();
        if cols == 0 {
            return Err(GridError::Empty);
        }

        let len = cols * rows.len();
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| GridError::Alloc(len))?;
        for (row, line) in rows.iter().enumerate() {
            let before = cells.len();
            cells.extend(line.as_ref().chars());
            let found = cells.len() - before;
            if found != cols {
                return Err(GridError::Ragged {
                    row,
                    found,
                    expected: cols,
                });
            }
        }

        Ok(Self {
            cells,
            bounds: Range::new(0, 0, cols as i32, rows.len() as i32),
        })
    }

    /// Parse newline-separated rows. Trailing blank lines and `\r` line
    /// endings are ignored.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let mut rows: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
        while rows.last().is_some_and(|l| l.is_empty()) {
            rows.pop();
        }
        Self::from_rows(&rows)
    }

    /// The bounding range, always anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.bounds.height() as usize
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.bounds.width() as usize
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// The character at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<char> {
        self.bounds.index_of(p).map(|i| self.cells[i])
    }

    /// Overwrite the cell at `p`. Returns `false` if `p` is out of bounds.
    #[inline]
    pub fn set(&mut self, p: Point, c: char) -> bool {
        match self.bounds.index_of(p) {
            Some(i) => {
                self.cells[i] = c;
                true
            }
            None => false,
        }
    }

    /// Copy the grid, reporting allocation failure instead of aborting.
    pub fn try_clone(&self) -> Result<Self, GridError> {
        let len = self.cells.len();
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| GridError::Alloc(len))?;
        cells.extend_from_slice(&self.cells);
        Ok(Self {
            cells,
            bounds: self.bounds,
        })
    }
}

/// Unchecked grid fields as they appear in serialized form.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGrid {
    cells: Vec<char>,
    bounds: Range,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGrid> for CharGrid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self, GridError> {
        let RawGrid { cells, bounds } = raw;
        if bounds.min != Point::new(0, 0) {
            return Err(GridError::Offset(bounds.min));
        }
        if bounds.is_empty() {
            return Err(GridError::Empty);
        }
        let expected = (bounds.width() as usize).checked_mul(bounds.height() as usize);
        if expected != Some(cells.len()) {
            return Err(GridError::Size {
                found: cells.len(),
                bounds,
            });
        }
        Ok(Self { cells, bounds })
    }
}

impl fmt::Display for CharGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.cols()).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for c in row {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = "\
0000
0110
0000";

    #[test]
    fn parse_and_size() {
        let g = CharGrid::parse(MAP).unwrap();
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 4);
        assert_eq!(g.bounds(), Range::new(0, 0, 4, 3));
        assert_eq!(g.at(Point::new(1, 1)), Some('1'));
        assert_eq!(g.at(Point::new(0, 2)), Some('0'));
        assert_eq!(g.at(Point::new(4, 0)), None);
    }

    #[test]
    fn parse_ignores_trailing_blank_lines_and_cr() {
        let g = CharGrid::parse("01\r\n10\r\n\n\n").unwrap();
        assert_eq!(g.rows(), 2);
        assert_eq!(g.to_string(), "01\n10");
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = CharGrid::from_rows(&["000", "00", "000"]).unwrap_err();
        assert_eq!(
            err,
            GridError::Ragged {
                row: 1,
                found: 2,
                expected: 3
            }
        );
    }

    #[test]
    fn empty_rejected() {
        assert_eq!(CharGrid::parse("").unwrap_err(), GridError::Empty);
        assert_eq!(CharGrid::from_rows(&["", ""]).unwrap_err(), GridError::Empty);
        assert_eq!(
            CharGrid::from_rows::<&str>(&[]).unwrap_err(),
            GridError::Empty
        );
    }

    #[test]
    fn set_in_and_out_of_bounds() {
        let mut g = CharGrid::parse("00\n00").unwrap();
        assert!(g.set(Point::new(1, 0), '#'));
        assert!(!g.set(Point::new(2, 0), '#'));
        assert_eq!(g.to_string(), "0#\n00");
    }

    #[test]
    fn try_clone_is_independent() {
        let g = CharGrid::parse(MAP).unwrap();
        let mut copy = g.try_clone().unwrap();
        copy.set(Point::new(0, 0), 'x');
        assert_eq!(g.at(Point::new(0, 0)), Some('0'));
        assert_eq!(copy.at(Point::new(0, 0)), Some('x'));
    }
}
