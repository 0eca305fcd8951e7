//! Maze generation for mazer.
//!
//! Mazes are carved by a randomized depth-first walk that moves two cells at
//! a time, then sprinkled with random walls. The sprinkling can cut every
//! route from start to end; such a maze is still a valid result and callers
//! that need a solvable one should check and regenerate.

pub mod config;
pub mod mazegen;

use mazer_core::{Grid, Position};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub use config::{GenConfig, GenError, InitialFill};
pub use mazegen::MazeGen;

/// Generate a `rows × cols` maze with the thread-local RNG.
pub fn generate(
    rows: i32,
    cols: i32,
    start: Position,
    end: Position,
    wall_density: f64,
) -> Result<Grid, GenError> {
    let config = GenConfig::new(rows, cols)
        .with_endpoints(start, end)
        .with_density(wall_density);
    MazeGen::generate(&config, rand::rng())
}

/// Like [`generate`], but reproducible: the same seed yields the same maze.
pub fn generate_seeded(
    rows: i32,
    cols: i32,
    start: Position,
    end: Position,
    wall_density: f64,
    seed: u64,
) -> Result<Grid, GenError> {
    let config = GenConfig::new(rows, cols)
        .with_endpoints(start, end)
        .with_density(wall_density);
    MazeGen::generate(&config, StdRng::seed_from_u64(seed))
}
