//! The [`Cell`] type — one square of a maze.

use crate::geom::Position;

/// Glyph for a wall in the ASCII grid format.
pub const WALL: char = '#';
/// Glyph for an open cell.
pub const OPEN: char = '.';
/// Glyph for the start cell.
pub const START: char = 'S';
/// Glyph for the end cell.
pub const END: char = 'E';

/// A single maze cell.
///
/// The start and end flags are owned by the [`Grid`](crate::Grid), which
/// guarantees that a flagged cell is never a wall.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub pos: Position,
    pub is_wall: bool,
    pub is_start: bool,
    pub is_end: bool,
}

impl Cell {
    /// An open, unflagged cell at `pos`.
    #[inline]
    pub const fn open(pos: Position) -> Self {
        Self {
            pos,
            is_wall: false,
            is_start: false,
            is_end: false,
        }
    }

    /// Set the wall flag (builder).
    #[inline]
    pub const fn with_wall(mut self, is_wall: bool) -> Self {
        self.is_wall = is_wall;
        self
    }

    /// Whether the cell is the start or the end.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        self.is_start || self.is_end
    }

    /// The character used for this cell in the ASCII grid format.
    pub const fn glyph(self) -> char {
        if self.is_start {
            START
        } else if self.is_end {
            END
        } else if self.is_wall {
            WALL
        } else {
            OPEN
        }
    }
}
