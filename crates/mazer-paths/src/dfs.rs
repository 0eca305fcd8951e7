use mazer_core::Position;

use crate::Searcher;
use crate::error::SearchError;
use crate::result::SearchResult;
use crate::searcher::Frontier;
use crate::stop::StopFlag;
use crate::traits::Pather;

/// Last-in first-out frontier.
struct Stack(Vec<usize>);

impl Frontier for Stack {
    #[inline]
    fn push(&mut self, idx: usize) {
        self.0.push(idx);
    }

    #[inline]
    fn pop(&mut self) -> Option<usize> {
        self.0.pop()
    }
}

impl Searcher {
    /// Depth-first search from `from` to `to`.
    ///
    /// Returns the first path found while descending; it is usually not the
    /// shortest. Neighbours are pushed in [`Pather::neighbors`] order, so the
    /// last one pushed is explored first.
    pub fn dfs<P: Pather>(
        &mut self,
        pather: &P,
        from: Position,
        to: Position,
        stop: &StopFlag,
    ) -> Result<SearchResult, SearchError> {
        self.uninformed(pather, from, to, Stack(Vec::new()), stop)
    }
}
