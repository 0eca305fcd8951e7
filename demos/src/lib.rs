//! Presentation layer for the `mazer` binary.
//!
//! Nothing here searches: [`Playback`] replays the events of a finished
//! [`SearchResult`] one tick at a time, and [`draw`] paints a [`Frame`] to a
//! terminal with crossterm.

use std::io::{self, Write};

use crossterm::{
    cursor, execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use mazer_core::{Grid, Position, Range};
use mazer_paths::{SearchEvent, SearchResult, Strategy};

// Colours
const COL_WALL: Color = Color::Rgb {
    r: 100,
    g: 100,
    b: 130,
};
const COL_OPEN: Color = Color::Rgb {
    r: 60,
    g: 55,
    b: 50,
};
const COL_VISITED: Color = Color::Rgb {
    r: 120,
    g: 120,
    b: 90,
};
const COL_ENDPOINT: Color = Color::Rgb {
    r: 255,
    g: 220,
    b: 80,
};

/// Path colour for each strategy.
pub fn strategy_color(strategy: Strategy) -> Color {
    match strategy {
        Strategy::Bfs => Color::Rgb {
            r: 0x32,
            g: 0xCD,
            b: 0x32,
        },
        Strategy::Dfs => Color::Rgb {
            r: 0x87,
            g: 0xCE,
            b: 0xEB,
        },
        Strategy::AStar => Color::Rgb {
            r: 0xFF,
            g: 0x14,
            b: 0x93,
        },
    }
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// How a cell is highlighted in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mark {
    #[default]
    None,
    Visited,
    Path,
}

/// Highlight state of every cell at one point of a replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bounds: Range,
    marks: Vec<Mark>,
    outcome: Option<bool>,
}

impl Frame {
    /// A frame with nothing highlighted.
    pub fn new(bounds: Range) -> Self {
        Self {
            bounds,
            marks: vec![Mark::None; bounds.len()],
            outcome: None,
        }
    }

    pub fn mark(&self, p: Position) -> Mark {
        self.bounds.index(p).map_or(Mark::None, |i| self.marks[i])
    }

    /// `Some(found)` once the replay reached its end.
    pub fn outcome(&self) -> Option<bool> {
        self.outcome
    }

    fn apply(&mut self, ev: SearchEvent) {
        match ev {
            SearchEvent::Visit(p) => self.set(p, Mark::Visited),
            SearchEvent::Path(p) => self.set(p, Mark::Path),
            SearchEvent::Finished { found } => self.outcome = Some(found),
        }
    }

    fn set(&mut self, p: Position, mark: Mark) {
        if let Some(i) = self.bounds.index(p) {
            self.marks[i] = mark;
        }
    }
}

// ---------------------------------------------------------------------------
// Playback
// ---------------------------------------------------------------------------

/// Staged replay of a finished search.
pub struct Playback {
    events: Vec<SearchEvent>,
    next: usize,
    frame: Frame,
}

impl Playback {
    pub fn new(bounds: Range, result: &SearchResult) -> Self {
        Self {
            events: result.events().collect(),
            next: 0,
            frame: Frame::new(bounds),
        }
    }

    /// Apply the next event and return the updated frame, or `None` when
    /// the replay is over.
    pub fn step(&mut self) -> Option<&Frame> {
        let ev = *self.events.get(self.next)?;
        self.next += 1;
        self.frame.apply(ev);
        Some(&self.frame)
    }

    /// Apply every remaining event and return the final frame.
    pub fn finish(&mut self) -> &Frame {
        while self.step().is_some() {}
        &self.frame
    }

    /// Number of ticks left.
    pub fn remaining(&self) -> usize {
        self.events.len() - self.next
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Character shown for `p`.
pub fn glyph(grid: &Grid, frame: &Frame, p: Position) -> char {
    if p == grid.start() {
        return 'S';
    }
    if p == grid.end() {
        return 'E';
    }
    if grid.is_wall(p) {
        return '#';
    }
    match frame.mark(p) {
        Mark::Path => '*',
        Mark::Visited => '+',
        Mark::None => '.',
    }
}

/// Render a frame as plain text, one line per row.
pub fn render_plain(grid: &Grid, frame: &Frame) -> String {
    let mut s = String::with_capacity(grid.bounds().len() + grid.rows() as usize);
    for row in 0..grid.rows() {
        if row > 0 {
            s.push('\n');
        }
        for col in 0..grid.cols() {
            s.push(glyph(grid, frame, Position::new(row, col)));
        }
    }
    s
}

/// One-line summary of a search outcome.
pub fn outcome_line(strategy: Strategy, result: &SearchResult) -> String {
    match result.moves() {
        Some(moves) => format!(
            "{strategy}: path found ({moves} moves, {} cells expanded)",
            result.visited().len()
        ),
        None => format!(
            "{strategy}: no path exists ({} cells expanded)",
            result.visited().len()
        ),
    }
}

/// Summary across several strategies run on the same maze.
pub fn tally_line(found: usize, total: usize) -> String {
    format!("{found} of {total} strategies found a path")
}

/// Write `frame` on `out`, coloured with crossterm or as plain text.
pub fn paint<W: Write>(
    out: &mut W,
    grid: &Grid,
    frame: &Frame,
    strategy: Strategy,
    color: bool,
) -> io::Result<()> {
    if color {
        draw(out, grid, frame, strategy)
    } else {
        for line in render_plain(grid, frame).lines() {
            write!(out, "{line}\r\n")?;
        }
        Ok(())
    }
}

/// Keeps the terminal cursor hidden on a writer until dropped.
pub struct HiddenCursor<W: Write> {
    out: W,
}

impl<W: Write> HiddenCursor<W> {
    pub fn new(mut out: W) -> io::Result<Self> {
        execute!(out, cursor::Hide)?;
        Ok(Self { out })
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> Drop for HiddenCursor<W> {
    fn drop(&mut self) {
        let _ = execute!(self.out, cursor::Show);
    }
}

/// Queue a coloured rendering of `frame` on `out`. The caller flushes.
pub fn draw<W: Write>(out: &mut W, grid: &Grid, frame: &Frame, strategy: Strategy) -> io::Result<()> {
    let path_color = strategy_color(strategy);
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let p = Position::new(row, col);
            let ch = glyph(grid, frame, p);
            let (fg, bold) = match ch {
                'S' | 'E' => (COL_ENDPOINT, true),
                '#' => (COL_WALL, false),
                '*' => (path_color, true),
                '+' => (COL_VISITED, false),
                _ => (COL_OPEN, false),
            };
            queue!(out, SetForegroundColor(fg))?;
            if bold {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            queue!(out, Print(ch))?;
            if bold {
                queue!(out, SetAttribute(Attribute::Reset))?;
            }
        }
        queue!(out, ResetColor, Print("\r\n"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maze() -> Grid {
        Grid::parse("S.#\n..#\n#.E").unwrap()
    }

    #[test]
    fn playback_marks_visits_then_path() {
        let g = maze();
        let r = mazer_paths::solve(&g, g.start(), g.end(), Strategy::Bfs).unwrap();
        let mut pb = Playback::new(g.bounds(), &r);
        let total = r.visited().len() + r.path().len() + 1;
        assert_eq!(pb.remaining(), total);

        let first = pb.step().unwrap();
        assert_eq!(first.mark(g.start()), Mark::Visited);
        assert_eq!(first.outcome(), None);

        let last = pb.finish().clone();
        assert_eq!(last.outcome(), Some(true));
        assert_eq!(pb.remaining(), 0);
        assert!(pb.step().is_none());
        for &p in r.path() {
            assert_eq!(last.mark(p), Mark::Path);
        }
    }

    #[test]
    fn plain_render_shows_path() {
        let g = maze();
        let r = mazer_paths::solve(&g, g.start(), g.end(), Strategy::AStar).unwrap();
        let frame = Playback::new(g.bounds(), &r).finish().clone();
        let text = render_plain(&g, &frame);
        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with('S'));
        assert!(text.ends_with('E'));
        assert_eq!(text.matches('*').count(), r.path().len() - 2);
    }

    #[test]
    fn outcome_lines() {
        let g = Grid::parse("S#E").unwrap();
        let r = mazer_paths::solve(&g, g.start(), g.end(), Strategy::Dfs).unwrap();
        assert_eq!(outcome_line(Strategy::Dfs, &r), "dfs: no path exists (1 cells expanded)");
        let g = Grid::parse("S.E").unwrap();
        let r = mazer_paths::solve(&g, g.start(), g.end(), Strategy::Bfs).unwrap();
        assert_eq!(
            outcome_line(Strategy::Bfs, &r),
            "bfs: path found (2 moves, 3 cells expanded)"
        );
    }

    #[test]
    fn plain_paint_has_no_escapes() {
        let g = maze();
        let frame = Frame::new(g.bounds());
        let mut buf = Vec::new();
        paint(&mut buf, &g, &frame, Strategy::Dfs, false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "S.#\r\n..#\r\n#.E\r\n");
    }

    #[test]
    fn cursor_is_shown_again_after_an_error() {
        let mut buf = Vec::new();
        let res = (|| -> io::Result<()> {
            let mut hidden = HiddenCursor::new(&mut buf)?;
            write!(hidden.out(), "frame")?;
            Err(io::Error::other("terminal closed"))
        })();
        assert!(res.is_err());
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("\x1b[?25l"));
        assert!(text.ends_with("\x1b[?25h"));
        assert!(text.contains("frame"));
    }

    #[test]
    fn tally() {
        assert_eq!(tally_line(2, 3), "2 of 3 strategies found a path");
    }

    #[test]
    fn draw_writes_every_row() {
        let g = maze();
        let frame = Frame::new(g.bounds());
        let mut buf = Vec::new();
        draw(&mut buf, &g, &frame, Strategy::Bfs).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.matches("\r\n").count(), 3);
    }
}
