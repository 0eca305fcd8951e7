use mazer_core::{Grid, Position};

use crate::distance::manhattan;

/// Minimal search interface: passability and neighbour enumeration.
pub trait Pather {
    /// Whether a search may stand on `p`.
    fn passable(&self, p: Position) -> bool;

    /// Append the passable neighbours of `p` into `buf`, in expansion order.
    /// The caller clears `buf` before calling.
    fn neighbors(&self, p: Position, buf: &mut Vec<Position>);
}

/// Pather with an admissible heuristic, as required by A*.
pub trait AstarPather: Pather {
    /// Estimate of the number of moves from `from` to `to`.
    /// Must never overestimate the true cost.
    fn estimate(&self, from: Position, to: Position) -> i32;
}

/// Moves are 4-directional onto in-bounds, non-wall cells.
impl Pather for Grid {
    #[inline]
    fn passable(&self, p: Position) -> bool {
        self.is_passable(p)
    }

    fn neighbors(&self, p: Position, buf: &mut Vec<Position>) {
        buf.extend(p.neighbors_4().into_iter().filter(|&n| self.is_passable(n)));
    }
}

impl AstarPather for Grid {
    #[inline]
    fn estimate(&self, from: Position, to: Position) -> i32 {
        manhattan(from, to)
    }
}
