use log::debug;
use mazer_core::{Grid, Position, Range};

use crate::error::SearchError;
use crate::result::SearchResult;
use crate::stop::StopFlag;
use crate::strategy::Strategy;
use crate::traits::Pather;

// ---------------------------------------------------------------------------
// Internal node state
// ---------------------------------------------------------------------------

/// Per-cell bookkeeping. A node only counts as opened during the run whose
/// generation it carries.
#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            parent: NO_PARENT,
            generation: 0,
            closed: false,
        }
    }
}

pub(crate) const NO_PARENT: usize = usize::MAX;

/// Outcome of endpoint validation.
pub(crate) enum Prepared {
    /// Run a real search between these node indices.
    Search { start: usize, goal: usize },
    /// The result is known without searching.
    Done(SearchResult),
}

/// Frontier discipline for the uninformed searches.
pub(crate) trait Frontier {
    fn push(&mut self, idx: usize);
    fn pop(&mut self) -> Option<usize>;
}

// ---------------------------------------------------------------------------
// Searcher
// ---------------------------------------------------------------------------

/// Search engine for one grid rectangle.
///
/// `Searcher` owns the node array and scratch buffers so that repeated
/// queries against grids of the same size allocate nothing beyond their
/// results. Each call still behaves as an independent run.
pub struct Searcher {
    pub(crate) rng: Range,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    // flood fill
    pub(crate) cc_seen: Vec<bool>,
    pub(crate) cc_stack: Vec<usize>,
    // shared scratch buffer for neighbour queries
    pub(crate) nbuf: Vec<Position>,
}

impl Searcher {
    /// Create a searcher for the given rectangle.
    pub fn new(rng: Range) -> Self {
        let len = rng.len();
        Self {
            rng,
            nodes: vec![Node::default(); len],
            generation: 0,
            cc_seen: vec![false; len],
            cc_stack: Vec::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Replace the rectangle, growing the caches if needed.
    pub fn set_range(&mut self, rng: Range) {
        let len = rng.len();
        self.rng = rng;
        if len > self.nodes.len() {
            self.nodes.resize(len, Node::default());
            self.cc_seen.resize(len, false);
        }
        self.generation = self.generation.wrapping_add(1);
    }

    /// The rectangle being searched.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Run `strategy` on `grid` from `start` to `end`.
    ///
    /// The grid's bounds must match [`range`](Self::range); the searcher is
    /// retargeted otherwise.
    pub fn solve(
        &mut self,
        grid: &Grid,
        start: Position,
        end: Position,
        strategy: Strategy,
        stop: &StopFlag,
    ) -> Result<SearchResult, SearchError> {
        if grid.bounds() != self.rng {
            self.set_range(grid.bounds());
        }
        let result = match strategy {
            Strategy::Bfs => self.bfs(grid, start, end, stop),
            Strategy::Dfs => self.dfs(grid, start, end, stop),
            Strategy::AStar => self.astar(grid, start, end, stop),
        }?;
        debug!(
            "{strategy}: {start} -> {end}: found={} moves={:?} expanded={}",
            result.is_found(),
            result.moves(),
            result.visited().len()
        );
        Ok(result)
    }

    // -----------------------------------------------------------------------
    // Shared run helpers
    // -----------------------------------------------------------------------

    /// Validate endpoints and settle the trivial cases.
    ///
    /// A walled endpoint cannot be stood on, so it yields "not found" with
    /// nothing visited. Identical endpoints yield a one-cell path.
    pub(crate) fn prepare<P: Pather>(
        &self,
        pather: &P,
        from: Position,
        to: Position,
    ) -> Result<Prepared, SearchError> {
        let start_idx = self.idx(from).ok_or(SearchError::InvalidEndpoint {
            pos: from,
            bounds: self.rng,
        })?;
        let goal_idx = self.idx(to).ok_or(SearchError::InvalidEndpoint {
            pos: to,
            bounds: self.rng,
        })?;

        if !pather.passable(from) || !pather.passable(to) {
            return Ok(Prepared::Done(SearchResult::not_found(Vec::new())));
        }
        if start_idx == goal_idx {
            return Ok(Prepared::Done(SearchResult::found(vec![from], vec![from])));
        }
        Ok(Prepared::Search {
            start: start_idx,
            goal: goal_idx,
        })
    }

    /// Start a new run: every node from earlier runs becomes unopened.
    pub(crate) fn begin(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stale nodes could alias the new generation.
            self.nodes.fill(Node::default());
            self.generation = 1;
        }
        self.generation
    }

    #[inline]
    pub(crate) fn is_open(&self, idx: usize) -> bool {
        self.nodes[idx].generation == self.generation
    }

    /// Record that `idx` was reached from `parent` at cost `g`.
    #[inline]
    pub(crate) fn open(&mut self, idx: usize, parent: usize, g: i32) {
        let generation = self.generation;
        let n = &mut self.nodes[idx];
        n.g = g;
        n.parent = parent;
        n.generation = generation;
        n.closed = false;
    }

    /// Follow parent links back from `goal`.
    pub(crate) fn path_to(&self, goal: usize) -> Vec<Position> {
        let mut path = Vec::new();
        let mut ci = goal;
        while ci != NO_PARENT {
            path.push(self.point(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        path
    }

    /// Build the result of a run that ended with `found`.
    pub(crate) fn finish(&self, found: bool, goal: usize, visited: Vec<Position>) -> SearchResult {
        if found {
            SearchResult::found(self.path_to(goal), visited)
        } else {
            SearchResult::not_found(visited)
        }
    }

    /// Breadth-first or depth-first run, depending on the frontier.
    ///
    /// Cells are marked opened when pushed, so each enters the frontier at
    /// most once. The run stops as soon as the goal is popped.
    pub(crate) fn uninformed<P: Pather, F: Frontier>(
        &mut self,
        pather: &P,
        from: Position,
        to: Position,
        mut frontier: F,
        stop: &StopFlag,
    ) -> Result<SearchResult, SearchError> {
        let (start_idx, goal_idx) = match self.prepare(pather, from, to)? {
            Prepared::Search { start, goal } => (start, goal),
            Prepared::Done(result) => return Ok(result),
        };

        self.begin();
        self.open(start_idx, NO_PARENT, 0);
        frontier.push(start_idx);

        let mut visited = Vec::new();
        let mut nbuf = std::mem::take(&mut self.nbuf);

        let outcome = loop {
            let Some(ci) = frontier.pop() else {
                break Ok(false);
            };
            if stop.is_stopped() {
                break Err(SearchError::Cancelled {
                    expanded: visited.len(),
                });
            }

            let cp = self.point(ci);
            visited.push(cp);
            if ci == goal_idx {
                break Ok(true);
            }

            let g = self.nodes[ci].g;
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);
            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.is_open(ni) {
                    continue;
                }
                self.open(ni, ci, g + 1);
                frontier.push(ni);
            }
        };

        self.nbuf = nbuf;
        let found = outcome?;
        Ok(self.finish(found, goal_idx, visited))
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Position` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Position) -> Option<usize> {
        self.rng.index(p)
    }

    /// Convert a flat index back to a `Position`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Position {
        self.rng.position(idx)
    }
}
