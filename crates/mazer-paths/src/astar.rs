use std::collections::BinaryHeap;

use log::trace;
use mazer_core::Position;

use crate::Searcher;
use crate::error::SearchError;
use crate::result::SearchResult;
use crate::searcher::{NO_PARENT, Prepared};
use crate::stop::StopFlag;
use crate::traits::AstarPather;

/// Frontier entry, ordered for use in `BinaryHeap`.
///
/// Smallest `f` pops first; ties go to the smaller `h` (closer to the goal),
/// then to the earlier push so that runs are reproducible.
#[derive(Clone, Copy, Eq, PartialEq)]
struct NodeRef {
    idx: usize,
    g: i32,
    f: i32,
    h: i32,
    seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest first.
        other
            .f
            .cmp(&self.f)
            .then(other.h.cmp(&self.h))
            .then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Searcher {
    /// A* search from `from` to `to`, guided by [`AstarPather::estimate`].
    ///
    /// Each move costs 1. A neighbour is pushed when it has not been opened
    /// yet or when the new cost beats its best known `g`; outdated heap
    /// entries are skipped when popped. With an admissible, consistent
    /// estimate the returned path is a shortest one.
    pub fn astar<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Position,
        to: Position,
        stop: &StopFlag,
    ) -> Result<SearchResult, SearchError> {
        let (start_idx, goal_idx) = match self.prepare(pather, from, to)? {
            Prepared::Search { start, goal } => (start, goal),
            Prepared::Done(result) => return Ok(result),
        };

        self.begin();
        self.open(start_idx, NO_PARENT, 0);

        let mut seq = 0u64;
        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        let h = pather.estimate(from, to);
        open.push(NodeRef {
            idx: start_idx,
            g: 0,
            f: h,
            h,
            seq,
        });

        let mut visited = Vec::new();
        let mut nbuf = std::mem::take(&mut self.nbuf);

        let outcome = loop {
            let Some(current) = open.pop() else {
                break Ok(false);
            };

            let ci = current.idx;
            // Skip entries superseded by a cheaper push.
            if self.nodes[ci].closed || current.g != self.nodes[ci].g {
                continue;
            }
            if stop.is_stopped() {
                break Err(SearchError::Cancelled {
                    expanded: visited.len(),
                });
            }

            self.nodes[ci].closed = true;
            let cp = self.point(ci);
            visited.push(cp);
            if ci == goal_idx {
                break Ok(true);
            }

            let tentative_g = current.g + 1;
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.is_open(ni) && tentative_g >= self.nodes[ni].g {
                    continue;
                }

                self.open(ni, ci, tentative_g);
                let h = pather.estimate(np, to);
                seq += 1;
                open.push(NodeRef {
                    idx: ni,
                    g: tentative_g,
                    f: tentative_g + h,
                    h,
                    seq,
                });
            }
        };

        self.nbuf = nbuf;
        let found = outcome?;
        trace!("astar: {} heap pushes for {} expansions", seq + 1, visited.len());
        Ok(self.finish(found, goal_idx, visited))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Pather;
    use mazer_core::Grid;

    fn run(g: &Grid) -> SearchResult {
        Searcher::new(g.bounds())
            .astar(g, g.start(), g.end(), &StopFlag::new())
            .unwrap()
    }

    #[test]
    fn open_grid_expands_only_the_corridor() {
        let g = Grid::new(5, 5, Position::new(0, 0), Position::new(4, 4)).unwrap();
        let r = run(&g);
        assert_eq!(r.moves(), Some(8));
        // Ties on f favour smaller h, so no cell off the final path is
        // expanded on an empty grid.
        assert_eq!(r.visited(), r.path());
    }

    #[test]
    fn detour_is_shortest() {
        let g = Grid::parse(
            "
S....
####.
.....
.####
....E",
        )
        .unwrap();
        assert_eq!(run(&g).moves(), Some(16));
    }

    #[test]
    fn enclosed_start_is_not_found() {
        let g = Grid::parse(
            "
.#...
#S#..
.#...
....E",
        )
        .unwrap();
        let r = run(&g);
        assert!(!r.is_found());
        assert_eq!(r.visited(), &[Position::new(1, 1)]);
    }

    /// A pather whose estimate is admissible but inconsistent, so a cell can
    /// be reached again at a lower cost after it was first opened.
    struct Bumpy<'a>(&'a Grid);

    impl Pather for Bumpy<'_> {
        fn passable(&self, p: Position) -> bool {
            self.0.passable(p)
        }

        fn neighbors(&self, p: Position, buf: &mut Vec<Position>) {
            self.0.neighbors(p, buf)
        }
    }

    impl AstarPather for Bumpy<'_> {
        fn estimate(&self, from: Position, to: Position) -> i32 {
            if from == Position::new(0, 1) {
                0
            } else {
                crate::manhattan(from, to) / 2
            }
        }
    }

    #[test]
    fn inconsistent_estimate_still_shortest() {
        let g = Grid::parse(
            "
S...
.##.
...E",
        )
        .unwrap();
        let r = Searcher::new(g.bounds())
            .astar(&Bumpy(&g), g.start(), g.end(), &StopFlag::new())
            .unwrap();
        assert_eq!(r.moves(), Some(5));
    }
}
