//! The display side of a session: one [`Marker`] per maze cell, kept up to
//! date from observer events.

use labyrinth_core::{Cell, Grid, Point};
use labyrinth_model::{Marker, Maze, Observer};

use crate::palette;

/// Screen columns used per maze cell. Two keeps cells roughly square.
pub const CELL_WIDTH: i32 = 2;

/// Observer that mirrors what every maze cell should look like.
#[derive(Clone, Debug)]
pub struct Canvas {
    width: i32,
    height: i32,
    markers: Vec<Marker>,
}

impl Canvas {
    /// A canvas showing `maze` as painted.
    pub fn new(maze: &Maze) -> Self {
        Self {
            width: maze.width(),
            height: maze.height(),
            markers: maze.iter().map(|(_, kind)| kind.into()).collect(),
        }
    }

    fn index(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
            return None;
        }
        Some((p.y * self.width + p.x) as usize)
    }

    pub fn marker_at(&self, p: Point) -> Option<Marker> {
        self.index(p).map(|i| self.markers[i])
    }

    /// Paint the maze into `grid` with its top-left corner at `origin`.
    pub fn draw(&self, grid: &mut Grid, origin: Point) {
        for y in 0..self.height {
            for x in 0..self.width {
                let Some(marker) = self.marker_at(Point::new(x, y)) else {
                    continue;
                };
                let (ch, style) = palette::marker_style(marker);
                let left = origin.shift(x * CELL_WIDTH, y);
                grid.set(left, Cell::painted(ch, style));
                for dx in 1..CELL_WIDTH {
                    grid.set(left.shift(dx, 0), Cell::fill(style));
                }
            }
        }
    }

    /// One text row per maze row, using the marker glyphs.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.markers.len() + self.height as usize);
        for row in self.markers.chunks(self.width.max(1) as usize) {
            out.extend(row.iter().map(|&m| palette::marker_glyph(m)));
            out.push('\n');
        }
        out
    }
}

impl Observer for Canvas {
    fn cell_changed(&mut self, pos: Point, marker: Marker) {
        if let Some(i) = self.index(pos) {
            self.markers[i] = marker;
        }
    }
}
