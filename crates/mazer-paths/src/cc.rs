//! Reachability flood fill.

use mazer_core::Position;

use crate::Searcher;
use crate::traits::Pather;

impl Searcher {
    /// Flood-fill from `from` and return every position reachable from it,
    /// `from` included. Returns an empty vector if `from` is out of range or
    /// not passable.
    ///
    /// This shares no state with the path searches, so it can be used to
    /// cross-check their outcome.
    pub fn reachable<P: Pather>(&mut self, pather: &P, from: Position) -> Vec<Position> {
        self.cc_seen.fill(false);

        let mut result = Vec::new();
        let Some(si) = self.idx(from) else {
            return result;
        };
        if !pather.passable(from) {
            return result;
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);

        self.cc_stack.clear();
        self.cc_stack.push(si);
        self.cc_seen[si] = true;
        result.push(from);

        while let Some(ci) = self.cc_stack.pop() {
            let cp = self.point(ci);
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                if let Some(ni) = self.idx(np) {
                    if !self.cc_seen[ni] {
                        self.cc_seen[ni] = true;
                        self.cc_stack.push(ni);
                        result.push(np);
                    }
                }
            }
        }

        self.nbuf = nbuf;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazer_core::Grid;

    #[test]
    fn fill_stops_at_walls() {
        let g = Grid::parse(
            "
S.#.
..#.
###E",
        )
        .unwrap();
        let mut s = Searcher::new(g.bounds());
        let mut cells = s.reachable(&g, g.start());
        cells.sort();
        assert_eq!(
            cells,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1),
            ]
        );
        assert_eq!(s.reachable(&g, g.end()).len(), 3);
        assert!(s.reachable(&g, Position::new(0, 2)).is_empty());
        assert!(!crate::connected(&g, g.start(), g.end()));
    }
}
