//! Search strategies for grid mazes.
//!
//! Three interchangeable strategies share one contract, [`solve`]:
//!
//! - **BFS** (first-in first-out frontier): shortest path in moves.
//! - **DFS** (last-in first-out frontier): some path, not necessarily short.
//! - **A\*** (frontier ordered by `g + h`, Manhattan `h`): shortest path,
//!   usually after fewer expansions than BFS.
//!
//! Every run returns a [`SearchResult`] holding the path and the order in
//! which cells were expanded. "No path" is an ordinary result, never an
//! error. For repeated queries, [`Searcher`] keeps its node arrays between
//! calls.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS, DFS, reachability |
//! | [`AstarPather`] : [`Pather`] | A* |

mod astar;
mod bfs;
mod cc;
mod dfs;
mod distance;
mod error;
mod result;
mod searcher;
mod stop;
mod strategy;
mod traits;

use mazer_core::{Grid, Position};

pub use distance::manhattan;
pub use error::SearchError;
pub use result::{SearchEvent, SearchResult};
pub use searcher::Searcher;
pub use stop::StopFlag;
pub use strategy::{ParseStrategyError, Strategy};
pub use traits::{AstarPather, Pather};

/// Search `grid` for a route from `start` to `end`.
///
/// Fails only when an endpoint lies outside the grid. A disconnected maze
/// yields `Ok` with [`SearchResult::found`] set to `false`.
pub fn solve(
    grid: &Grid,
    start: Position,
    end: Position,
    strategy: Strategy,
) -> Result<SearchResult, SearchError> {
    solve_with(grid, start, end, strategy, &StopFlag::new())
}

/// Like [`solve`], but abandons the run with [`SearchError::Cancelled`] once
/// `stop` is raised. The flag is checked before every expansion.
pub fn solve_with(
    grid: &Grid,
    start: Position,
    end: Position,
    strategy: Strategy,
    stop: &StopFlag,
) -> Result<SearchResult, SearchError> {
    Searcher::new(grid.bounds()).solve(grid, start, end, strategy, stop)
}

/// Whether `a` and `b` are joined by passable 4-directional moves.
///
/// An independent flood fill, useful for checking a search outcome.
pub fn connected(grid: &Grid, a: Position, b: Position) -> bool {
    if !grid.is_passable(a) || !grid.is_passable(b) {
        return false;
    }
    Searcher::new(grid.bounds()).reachable(grid, a).contains(&b)
}
