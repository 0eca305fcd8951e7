//! The maze carver.

use log::debug;
use mazer_core::{Grid, Position};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::config::{GenConfig, GenError, InitialFill};

/// Maze generator operating on a [`Grid`].
pub struct MazeGen<R: Rng> {
    pub rng: R,
    pub grid: Grid,
}

impl<R: Rng> MazeGen<R> {
    /// Create a new MazeGen with the given grid.
    pub fn with_grid(grid: Grid, rng: R) -> Self {
        Self { rng, grid }
    }

    /// Build a maze from `config`: fill, carve from the start, then
    /// sprinkle walls. The start and end are never walls.
    pub fn generate(config: &GenConfig, rng: R) -> Result<Grid, GenError> {
        config.validate()?;
        let mut grid = Grid::new(config.rows, config.cols, config.start, config.end)?;
        if config.fill == InitialFill::Walls {
            grid.fill_walls(true);
        }

        let mut mg = Self::with_grid(grid, rng);
        let carved = mg.carve(config.start);
        if config.fill == InitialFill::Walls {
            mg.join_to_lattice(config.end, config.start);
        }
        let walls = mg.sprinkle_walls(config.wall_density);
        debug!(
            "generated {}x{} maze: carved {carved} cells, sprinkled {walls} walls, {} walls total",
            config.rows,
            config.cols,
            mg.grid.wall_count()
        );
        Ok(mg.grid)
    }

    /// Randomized depth-first carving on the lattice of cells at even
    /// offsets from `from`.
    ///
    /// From the cell on top of the stack, pick uniformly among the unvisited
    /// in-bounds cells two steps away, open it and the cell in between, and
    /// push it. Pop when there is none. Every lattice cell ends up open and
    /// connected to `from`.
    ///
    /// Returns the number of cells pushed after `from`.
    pub fn carve(&mut self, from: Position) -> usize {
        let bounds = self.grid.bounds();
        let Some(si) = bounds.index(from) else {
            return 0;
        };

        let mut visited = vec![false; bounds.len()];
        let mut stack = vec![from];
        let mut options: Vec<Position> = Vec::with_capacity(4);
        visited[si] = true;
        self.grid.set_wall(from, false);

        let mut carved = 0;
        while let Some(&cur) = stack.last() {
            options.clear();
            for d in Position::DIRECTIONS {
                if let Some(ni) = bounds.index(cur + d * 2) {
                    if !visited[ni] {
                        options.push(d);
                    }
                }
            }

            match options.choose(&mut self.rng) {
                Some(&d) => {
                    let next = cur + d * 2;
                    self.grid.set_wall(cur + d, false);
                    self.grid.set_wall(next, false);
                    if let Some(ni) = bounds.index(next) {
                        visited[ni] = true;
                    }
                    stack.push(next);
                    carved += 1;
                }
                None => {
                    stack.pop();
                }
            }
        }
        carved
    }

    /// Open at most two cells linking `p` to the nearest cell of the lattice
    /// carved from `origin`.
    fn join_to_lattice(&mut self, p: Position, origin: Position) {
        let bounds = self.grid.bounds();
        let snap = |v: i32, o: i32, max: i32| {
            if (v - o).rem_euclid(2) == 0 {
                v
            } else if v >= 1 {
                v - 1
            } else {
                (v + 1).min(max - 1)
            }
        };
        let lattice = Position::new(
            snap(p.row, origin.row, bounds.max.row),
            snap(p.col, origin.col, bounds.max.col),
        );
        self.grid.set_wall(Position::new(lattice.row, p.col), false);
        self.grid.set_wall(lattice, false);
    }

    /// Turn each cell into a wall with probability `density`, skipping the
    /// start and end. Returns the number of walls added.
    pub fn sprinkle_walls(&mut self, density: f64) -> usize {
        let bounds = self.grid.bounds();
        let mut added = 0;
        for p in bounds.iter() {
            let r: f64 = self.rng.random();
            if r < density && self.grid.set_wall(p, true) {
                added += 1;
            }
        }
        added
    }
}
