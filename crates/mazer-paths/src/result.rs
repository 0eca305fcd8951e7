use mazer_core::Position;

/// Outcome of one search run.
///
/// Built fresh by every run and immutable once returned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    found: bool,
    path: Vec<Position>,
    visited: Vec<Position>,
}

/// One step of a finished search, in the order a presentation layer should
/// replay it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEvent {
    /// A cell was expanded.
    Visit(Position),
    /// A cell lies on the returned path.
    Path(Position),
    /// Emitted once, last.
    Finished { found: bool },
}

impl SearchResult {
    pub(crate) fn found(path: Vec<Position>, visited: Vec<Position>) -> Self {
        Self {
            found: true,
            path,
            visited,
        }
    }

    pub(crate) fn not_found(visited: Vec<Position>) -> Self {
        Self {
            found: false,
            path: Vec::new(),
            visited,
        }
    }

    /// Whether a path from start to end exists.
    #[inline]
    pub fn is_found(&self) -> bool {
        self.found
    }

    /// The path from start to end, both included. Empty if not found.
    #[inline]
    pub fn path(&self) -> &[Position] {
        &self.path
    }

    /// Cells in the order they were expanded.
    #[inline]
    pub fn visited(&self) -> &[Position] {
        &self.visited
    }

    /// Path length in moves, or `None` if no path was found.
    pub fn moves(&self) -> Option<usize> {
        self.found.then(|| self.path.len().checked_sub(1)).flatten()
    }

    /// Replay sequence: every visit, then every path cell, then
    /// [`SearchEvent::Finished`].
    pub fn events(&self) -> impl Iterator<Item = SearchEvent> + '_ {
        self.visited
            .iter()
            .map(|&p| SearchEvent::Visit(p))
            .chain(self.path.iter().map(|&p| SearchEvent::Path(p)))
            .chain(std::iter::once(SearchEvent::Finished { found: self.found }))
    }

    /// Split into `(found, path, visited)`.
    pub fn into_parts(self) -> (bool, Vec<Position>, Vec<Position>) {
        (self.found, self.path, self.visited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_visit_then_path_then_finish() {
        let a = Position::new(0, 0);
        let b = Position::new(0, 1);
        let r = SearchResult::found(vec![a, b], vec![a, b]);
        let ev: Vec<_> = r.events().collect();
        assert_eq!(
            ev,
            vec![
                SearchEvent::Visit(a),
                SearchEvent::Visit(b),
                SearchEvent::Path(a),
                SearchEvent::Path(b),
                SearchEvent::Finished { found: true },
            ]
        );
        assert_eq!(r.moves(), Some(1));
    }

    #[test]
    fn not_found_has_no_path() {
        let r = SearchResult::not_found(vec![Position::ZERO]);
        assert!(!r.is_found());
        assert!(r.path().is_empty());
        assert_eq!(r.moves(), None);
        assert_eq!(r.events().last(), Some(SearchEvent::Finished { found: false }));
    }
}
