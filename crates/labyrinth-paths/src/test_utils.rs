//! Small text-described grids for tests.

use labyrinth_core::{Point, Range};

use crate::neighbors::push_cardinal;
use crate::traits::Pather;

/// A grid parsed from rows of text: `#` is a wall, anything else is open.
pub(crate) struct AsciiMaze {
    rows: Vec<Vec<bool>>,
}

impl AsciiMaze {
    pub(crate) fn parse(rows: &[&str]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|r| r.chars().map(|c| c == '#').collect())
                .collect(),
        }
    }

    pub(crate) fn bounds(&self) -> Range {
        let w = self.rows.first().map_or(0, |r| r.len()) as i32;
        Range::new(0, 0, w, self.rows.len() as i32)
    }

    pub(crate) fn is_wall(&self, p: Point) -> bool {
        self.bounds().contains(p) && self.rows[p.y as usize][p.x as usize]
    }
}

impl Pather for AsciiMaze {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        let bounds = self.bounds();
        push_cardinal(p, buf, |n| bounds.contains(n) && !self.is_wall(n));
    }
}
