use mazer_core::{Position, Range};
use thiserror::Error;

/// Reasons a search run can fail.
///
/// A maze with no route from start to end is *not* an error; see
/// [`SearchResult::is_found`](crate::SearchResult::is_found).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The start or end lies outside the grid. This is a caller bug.
    #[error("endpoint {pos} is outside the grid {bounds}")]
    InvalidEndpoint { pos: Position, bounds: Range },
    /// The run was abandoned through a [`StopFlag`](crate::StopFlag).
    #[error("search cancelled after {expanded} expansions")]
    Cancelled { expanded: usize },
}
