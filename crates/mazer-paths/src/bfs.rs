use std::collections::VecDeque;

use mazer_core::Position;

use crate::Searcher;
use crate::error::SearchError;
use crate::result::SearchResult;
use crate::searcher::Frontier;
use crate::stop::StopFlag;
use crate::traits::Pather;

/// First-in first-out frontier.
struct Queue(VecDeque<usize>);

impl Frontier for Queue {
    #[inline]
    fn push(&mut self, idx: usize) {
        self.0.push_back(idx);
    }

    #[inline]
    fn pop(&mut self) -> Option<usize> {
        self.0.pop_front()
    }
}

impl Searcher {
    /// Breadth-first search from `from` to `to`.
    ///
    /// Cells are expanded in non-decreasing distance from `from`, so the
    /// returned path has the fewest possible moves.
    pub fn bfs<P: Pather>(
        &mut self,
        pather: &P,
        from: Position,
        to: Position,
        stop: &StopFlag,
    ) -> Result<SearchResult, SearchError> {
        let queue = Queue(VecDeque::with_capacity(self.rng.len().min(1024)));
        self.uninformed(pather, from, to, queue, stop)
    }
}
