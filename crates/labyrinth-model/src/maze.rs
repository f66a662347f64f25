//! The authoritative maze: a dense grid of [`CellKind`]s plus the unique
//! start and end positions.
//!
//! The maze only knows what the user painted. Search progress (frontier,
//! visited, final path) never lives here; it flows to the display as
//! [`Marker`](crate::Marker) events instead.

use std::fmt;

use labyrinth_core::{Point, Range};
use labyrinth_paths::{Pather, push_cardinal};

/// What the user painted on a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    Wall,
    #[default]
    Open,
    Start,
    End,
}

impl CellKind {
    /// Every kind, in tool-palette order.
    pub const ALL: [CellKind; 4] = [Self::Wall, Self::Open, Self::Start, Self::End];

    /// Single-character rendering used by text output.
    pub const fn glyph(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Open => '.',
            Self::Start => 'S',
            Self::End => 'E',
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Wall => "Wall",
            Self::Open => "Open",
            Self::Start => "Start",
            Self::End => "End",
        }
    }
}

/// A fixed-size maze with at most one start and at most one end cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    cells: Vec<CellKind>,
    bounds: Range,
    start: Option<Point>,
    end: Option<Point>,
}

impl Maze {
    /// Create a `width` × `height` maze with every cell open.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            cells: vec![CellKind::Open; bounds.len()],
            bounds,
            start: None,
            end: None,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.y as usize) * (self.bounds.width() as usize) + (p.x as usize))
    }

    /// Kind of the cell at `p`, or `None` outside the maze.
    pub fn kind_at(&self, p: Point) -> Option<CellKind> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Whether `p` is a wall. Cells outside the maze are not walls; bounds
    /// are checked separately.
    pub fn is_wall(&self, p: Point) -> bool {
        self.kind_at(p) == Some(CellKind::Wall)
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// Both endpoints are placed, so a search can run.
    #[inline]
    pub fn has_endpoints(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Paint `kind` onto `p`.
    ///
    /// Placing a start (or end) demotes the previous one to open, so the
    /// maze never holds two. Overwriting the start (or end) with anything
    /// else forgets its position. Out-of-bounds points and repaints with the
    /// current kind change nothing.
    ///
    /// Returns every cell whose kind changed, with its new kind: the demoted
    /// endpoint first, if any, then `p`.
    pub fn set_cell(&mut self, p: Point, kind: CellKind) -> Vec<(Point, CellKind)> {
        let Some(i) = self.index(p) else {
            return Vec::new();
        };
        let current = self.cells[i];
        if current == kind {
            return Vec::new();
        }

        let mut changed = Vec::with_capacity(2);
        let demoted = match kind {
            CellKind::Start => self.start.replace(p),
            CellKind::End => self.end.replace(p),
            CellKind::Wall | CellKind::Open => None,
        };
        if let Some(old) = demoted.and_then(|old| self.index(old).map(|j| (old, j))) {
            self.cells[old.1] = CellKind::Open;
            changed.push((old.0, CellKind::Open));
        }

        match current {
            CellKind::Start => self.start = None,
            CellKind::End => self.end = None,
            CellKind::Wall | CellKind::Open => {}
        }
        // Overwriting the end with a start (or vice versa) cleared it above;
        // restore the position just assigned.
        match kind {
            CellKind::Start => self.start = Some(p),
            CellKind::End => self.end = Some(p),
            CellKind::Wall | CellKind::Open => {}
        }

        self.cells[i] = kind;
        changed.push((p, kind));
        changed
    }

    /// Reset every cell to open and forget both endpoints.
    pub fn clear(&mut self) {
        self.cells.fill(CellKind::Open);
        self.start = None;
        self.end = None;
    }

    /// Number of cells of the given kind.
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&k| k == kind).count()
    }

    /// Row-major iterator over `(Point, CellKind)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, CellKind)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }
}

impl Pather for Maze {
    /// In-bounds, non-wall cardinal neighbours in down/up/right/left order.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        push_cardinal(p, buf, |n| self.contains(n) && !self.is_wall(n));
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            let row: String = (0..self.width())
                .filter_map(|x| self.kind_at(Point::new(x, y)))
                .map(CellKind::glyph)
                .collect();
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn cell_kind_round_trip() {
        for kind in CellKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            let back: CellKind = serde_json::from_str(&json).unwrap();
            assert_eq!(kind, back);
        }
    }
}
