//! Generation parameters.

use mazer_core::{GridError, Position};
use thiserror::Error;

/// Default maze height.
pub const DEFAULT_ROWS: i32 = 20;
/// Default maze width.
pub const DEFAULT_COLS: i32 = 20;
/// Default chance for each cell to be walled after carving.
pub const DEFAULT_WALL_DENSITY: f64 = 0.3;

/// Errors that can occur when generating a maze.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenError {
    /// Bad dimensions or an endpoint outside the grid.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// The wall density is not a probability.
    #[error("wall density must be within [0, 1], got {0}")]
    InvalidDensity(f64),
}

/// State of the grid before carving starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitialFill {
    /// Every cell starts open; carving only matters for cells that the
    /// later sprinkling walls.
    #[default]
    Open,
    /// Every cell except the endpoints starts as a wall, so carving lays
    /// out corridors.
    Walls,
}

/// Parameters for [`MazeGen::generate`](crate::MazeGen::generate).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenConfig {
    pub rows: i32,
    pub cols: i32,
    pub start: Position,
    pub end: Position,
    /// Probability in `[0, 1]` that a cell is walled after carving.
    pub wall_density: f64,
    pub fill: InitialFill,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl GenConfig {
    /// A `rows × cols` configuration from the top-left to the bottom-right
    /// corner, with the default density.
    pub fn new(rows: i32, cols: i32) -> Self {
        Self {
            rows,
            cols,
            start: Position::ZERO,
            end: Position::new(rows - 1, cols - 1),
            wall_density: DEFAULT_WALL_DENSITY,
            fill: InitialFill::Open,
        }
    }

    /// Set the start and end (builder).
    pub fn with_endpoints(mut self, start: Position, end: Position) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Set the wall density (builder).
    pub fn with_density(mut self, wall_density: f64) -> Self {
        self.wall_density = wall_density;
        self
    }

    /// Set the initial fill (builder).
    pub fn with_fill(mut self, fill: InitialFill) -> Self {
        self.fill = fill;
        self
    }

    /// Check everything [`MazeGen::generate`](crate::MazeGen::generate)
    /// would reject.
    pub fn validate(&self) -> Result<(), GenError> {
        if !(0.0..=1.0).contains(&self.wall_density) {
            return Err(GenError::InvalidDensity(self.wall_density));
        }
        if self.rows < 1 || self.cols < 1 {
            return Err(GridError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            }
            .into());
        }
        for pos in [self.start, self.end] {
            if pos.row < 0 || pos.row >= self.rows || pos.col < 0 || pos.col >= self.cols {
                return Err(GridError::InvalidEndpoint {
                    pos,
                    rows: self.rows,
                    cols: self.cols,
                }
                .into());
            }
        }
        Ok(())
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let c = GenConfig::new(8, 12).with_fill(InitialFill::Walls);
        let json = serde_json::to_string(&c).unwrap();
        let back: GenConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
