//! The [`Grid`] type — a fixed-size maze of [`Cell`]s.
//!
//! A `Grid` owns its cells outright. The generator mutates it while building
//! a maze; once handed to the search engine it is only ever read through a
//! shared reference.

use std::fmt;

use thiserror::Error;

use crate::cell::{self, Cell};
use crate::geom::{Position, Range};

/// Errors raised while building or parsing a [`Grid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A dimension was below one.
    #[error("grid dimensions must be at least 1x1, got {rows}x{cols}")]
    InvalidDimensions { rows: i32, cols: i32 },
    /// The start or end position lies outside the grid.
    #[error("endpoint {pos} is outside a {rows}x{cols} grid")]
    InvalidEndpoint { pos: Position, rows: i32, cols: i32 },
    /// Lines of an ASCII grid have different widths.
    #[error("grid line {line} has a different width from the first line")]
    InconsistentWidth { line: usize },
    /// A character outside the grid alphabet was found.
    #[error("invalid character \u{201c}{ch}\u{201d} at {pos}")]
    InvalidRune { ch: char, pos: Position },
    /// The ASCII grid has no start (`S`) or no end (`E`).
    #[error("grid has no \u{201c}{0}\u{201d} cell")]
    MissingEndpoint(char),
    /// The ASCII grid has more than one start or end.
    #[error("grid has more than one \u{201c}{0}\u{201d} cell")]
    DuplicateEndpoint(char),
    /// Serialized bounds do not start at the origin.
    #[error("grid bounds {0} do not start at (0, 0)")]
    InvalidBounds(Range),
    /// The cell list does not cover the bounds exactly.
    #[error("grid has {got} cells, expected {expected}")]
    CellCount { expected: usize, got: usize },
    /// A cell's position or endpoint flags disagree with its slot.
    #[error("cell {index} does not match its grid position")]
    MisplacedCell { index: usize },
    /// The start or end cell is a wall.
    #[error("endpoint {0} is a wall")]
    WalledEndpoint(Position),
}

/// A `rows × cols` maze with a distinguished start and end cell.
///
/// Invariant: the start and end cells are never walls.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridRepr"))]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
    start: Position,
    end: Position,
}

/// Unchecked serialized form of a [`Grid`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr {
    cells: Vec<Cell>,
    bounds: Range,
    start: Position,
    end: Position,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> Result<Self, GridError> {
        let GridRepr {
            cells,
            bounds,
            start,
            end,
        } = repr;
        if bounds.min != Position::ZERO {
            return Err(GridError::InvalidBounds(bounds));
        }
        let mut grid = Grid::new(bounds.rows(), bounds.cols(), start, end)?;
        if cells.len() != grid.cells.len() {
            return Err(GridError::CellCount {
                expected: grid.cells.len(),
                got: cells.len(),
            });
        }
        for (index, (c, want)) in cells.iter().zip(&grid.cells).enumerate() {
            if c.pos != want.pos || c.is_start != want.is_start || c.is_end != want.is_end {
                return Err(GridError::MisplacedCell { index });
            }
            if c.is_wall && c.is_endpoint() {
                return Err(GridError::WalledEndpoint(c.pos));
            }
        }
        grid.cells = cells;
        Ok(grid)
    }
}

impl Grid {
    /// Create an all-open grid.
    ///
    /// Fails if either dimension is below one or if an endpoint is out of
    /// bounds. `start` and `end` may coincide.
    pub fn new(rows: i32, cols: i32, start: Position, end: Position) -> Result<Self, GridError> {
        if rows < 1 || cols < 1 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        let bounds = Range::new(0, 0, rows, cols);
        for pos in [start, end] {
            if !bounds.contains(pos) {
                return Err(GridError::InvalidEndpoint { pos, rows, cols });
            }
        }
        let cells = bounds
            .iter()
            .map(|p| Cell {
                is_start: p == start,
                is_end: p == end,
                ..Cell::open(p)
            })
            .collect();
        Ok(Self {
            cells,
            bounds,
            start,
            end,
        })
    }

    /// Parse an ASCII grid: `#` wall, `.` open, `S` start, `E` end.
    ///
    /// Leading and trailing whitespace of the whole text is trimmed; each
    /// remaining line is one row and all rows must have the same width.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let s = s.trim();
        let lines: Vec<&str> = s.lines().collect();
        let rows = lines.len() as i32;
        let cols = lines.first().map_or(0, |l| l.chars().count()) as i32;
        if rows < 1 || cols < 1 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }

        let mut walls = Vec::with_capacity((rows * cols) as usize);
        let mut start = None;
        let mut end = None;
        for (r, line) in lines.iter().enumerate() {
            if line.chars().count() as i32 != cols {
                return Err(GridError::InconsistentWidth { line: r });
            }
            for (c, ch) in line.chars().enumerate() {
                let pos = Position::new(r as i32, c as i32);
                match ch {
                    cell::WALL => walls.push(pos),
                    cell::OPEN => {}
                    cell::START => {
                        if start.replace(pos).is_some() {
                            return Err(GridError::DuplicateEndpoint(ch));
                        }
                    }
                    cell::END => {
                        if end.replace(pos).is_some() {
                            return Err(GridError::DuplicateEndpoint(ch));
                        }
                    }
                    _ => return Err(GridError::InvalidRune { ch, pos }),
                }
            }
        }

        let start = start.ok_or(GridError::MissingEndpoint(cell::START))?;
        let end = end.ok_or(GridError::MissingEndpoint(cell::END))?;
        let mut grid = Self::new(rows, cols, start, end)?;
        for p in walls {
            grid.set_wall(p, true);
        }
        Ok(grid)
    }

    /// The bounding range of the grid, `[(0, 0), (rows, cols))`.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows()
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols()
    }

    #[inline]
    pub fn start(&self) -> Position {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Position {
        self.end
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Position) -> bool {
        self.bounds.contains(p)
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn cell(&self, p: Position) -> Option<&Cell> {
        self.bounds.index(p).map(|i| &self.cells[i])
    }

    /// Whether `p` is an in-bounds wall.
    #[inline]
    pub fn is_wall(&self, p: Position) -> bool {
        self.cell(p).is_some_and(|c| c.is_wall)
    }

    /// Whether `p` is in bounds and not a wall.
    #[inline]
    pub fn is_passable(&self, p: Position) -> bool {
        self.cell(p).is_some_and(|c| !c.is_wall)
    }

    /// Set or clear the wall flag at `p`.
    ///
    /// Out-of-bounds positions and attempts to wall the start or end are
    /// ignored. Returns whether the cell changed.
    pub fn set_wall(&mut self, p: Position, wall: bool) -> bool {
        let Some(i) = self.bounds.index(p) else {
            return false;
        };
        let c = &mut self.cells[i];
        if (wall && c.is_endpoint()) || c.is_wall == wall {
            return false;
        }
        c.is_wall = wall;
        true
    }

    /// Set the wall flag on every cell except the start and end.
    pub fn fill_walls(&mut self, wall: bool) {
        for c in self.cells.iter_mut() {
            c.is_wall = wall && !c.is_endpoint();
        }
    }

    /// Number of wall cells.
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_wall).count()
    }

    /// Iterate over the cells in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Renders the ASCII grid format accepted by [`Grid::parse`].
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cols = self.cols() as usize;
        for (r, row) in self.cells.chunks(cols).enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for c in row {
                write!(f, "{}", c.glyph())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "
S.#.
..#.
....
.#.E";

    #[test]
    fn new_grid_is_open_with_flagged_endpoints() {
        let g = Grid::new(3, 4, Position::new(0, 0), Position::new(2, 3)).unwrap();
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 4);
        assert_eq!(g.wall_count(), 0);
        assert!(g.cell(Position::new(0, 0)).unwrap().is_start);
        assert!(g.cell(Position::new(2, 3)).unwrap().is_end);
        assert_eq!(g.iter().filter(|c| c.is_endpoint()).count(), 2);
    }

    #[test]
    fn new_rejects_bad_dimensions_and_endpoints() {
        assert_eq!(
            Grid::new(0, 4, Position::ZERO, Position::ZERO),
            Err(GridError::InvalidDimensions { rows: 0, cols: 4 })
        );
        let far = Position::new(5, 0);
        assert_eq!(
            Grid::new(5, 5, Position::ZERO, far),
            Err(GridError::InvalidEndpoint {
                pos: far,
                rows: 5,
                cols: 5
            })
        );
    }

    #[test]
    fn set_wall_never_blocks_endpoints() {
        let mut g = Grid::new(2, 2, Position::new(0, 0), Position::new(1, 1)).unwrap();
        assert!(!g.set_wall(Position::new(0, 0), true));
        assert!(!g.set_wall(Position::new(1, 1), true));
        assert!(g.set_wall(Position::new(0, 1), true));
        assert!(!g.set_wall(Position::new(0, 1), true));
        assert!(!g.set_wall(Position::new(9, 9), true));
        assert!(g.is_wall(Position::new(0, 1)));
        assert!(g.is_passable(Position::new(0, 0)));
        assert!(!g.is_passable(Position::new(-1, 0)));

        g.fill_walls(true);
        assert_eq!(g.wall_count(), 2);
        assert!(g.is_passable(g.start()));
        assert!(g.is_passable(g.end()));
    }

    #[test]
    fn parse_and_display_agree() {
        let g = Grid::parse(ROOM).unwrap();
        assert_eq!(g.rows(), 4);
        assert_eq!(g.cols(), 4);
        assert_eq!(g.start(), Position::new(0, 0));
        assert_eq!(g.end(), Position::new(3, 3));
        assert_eq!(g.wall_count(), 3);
        assert!(g.is_wall(Position::new(3, 1)));
        assert_eq!(g.to_string(), ROOM.trim());
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            Grid::parse("S.\n.").unwrap_err(),
            GridError::InconsistentWidth { line: 1 }
        );
        assert_eq!(
            Grid::parse("S.\n.x").unwrap_err(),
            GridError::InvalidRune {
                ch: 'x',
                pos: Position::new(1, 1)
            }
        );
        assert_eq!(Grid::parse("S..").unwrap_err(), GridError::MissingEndpoint('E'));
        assert_eq!(Grid::parse("SSE").unwrap_err(), GridError::DuplicateEndpoint('S'));
        assert!(matches!(
            Grid::parse("   ").unwrap_err(),
            GridError::InvalidDimensions { .. }
        ));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let g = Grid::parse("S#\n.E").unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }

    fn json_with(g: &Grid, edit: impl FnOnce(&mut serde_json::Value)) -> String {
        let mut v = serde_json::to_value(g).unwrap();
        edit(&mut v);
        v.to_string()
    }

    fn rejected(json: &str) -> String {
        serde_json::from_str::<Grid>(json).unwrap_err().to_string()
    }

    #[test]
    fn malformed_grids_are_rejected() {
        let g = Grid::parse("S..\n.#.\n..E").unwrap();

        let json = json_with(&g, |v| v["cells"] = serde_json::json!([]));
        assert!(rejected(&json).contains("grid has 0 cells, expected 9"));

        let json = json_with(&g, |v| v["cells"][0]["is_wall"] = true.into());
        assert!(rejected(&json).contains("endpoint (0, 0) is a wall"));

        let json = json_with(&g, |v| v["cells"][4]["pos"]["row"] = 2.into());
        assert!(rejected(&json).contains("cell 4 does not match"));

        let json = json_with(&g, |v| v["cells"][1]["is_end"] = true.into());
        assert!(rejected(&json).contains("cell 1 does not match"));

        let json = json_with(&g, |v| v["bounds"]["min"]["row"] = 1.into());
        assert!(rejected(&json).contains("do not start at (0, 0)"));

        let json = json_with(&g, |v| v["end"]["row"] = 7.into());
        assert!(rejected(&json).contains("outside a 3x3 grid"));
    }
}
