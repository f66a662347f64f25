//! The display [`Grid`]: a 2D buffer of styled [`Cell`]s, plus [`Frame`]
//! diffing between two successive grids.

use crate::geom::{Point, Range};
use crate::style::Style;

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// One screen position: a glyph and the style it is painted with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Cell {
    /// An unstyled space, what a fresh grid holds.
    pub const BLANK: Cell = Cell::fill(Style::PLAIN);

    #[inline]
    pub const fn painted(ch: char, style: Style) -> Self {
        Self { ch, style }
    }

    /// A space carrying `style`, for bars and cell padding.
    #[inline]
    pub const fn fill(style: Style) -> Self {
        Self::painted(' ', style)
    }
}

impl Default for Cell {
    #[inline]
    fn default() -> Self {
        Self::BLANK
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A 2D grid of [`Cell`]s, the surface a [`Model`](crate::app::Model) draws
/// into each frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
}

impl Grid {
    /// Create a new grid of the given dimensions, filled with default cells.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            cells: vec![Cell::default(); bounds.len()],
            bounds,
        }
    }

    /// The bounding range of this grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Width.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether `p` is inside this grid's bounds.
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

    /// Read the cell at `p`. Returns `Cell::default()` if `p` is outside
    /// bounds.
    pub fn at(&self, p: Point) -> Cell {
        self.index(p).map(|i| self.cells[i]).unwrap_or_default()
    }

    /// Set the cell at `p`. No-op if `p` is outside bounds.
    pub fn set(&mut self, p: Point, cell: Cell) {
        if let Some(i) = self.index(p) {
            self.cells[i] = cell;
        }
    }

    /// Fill every cell in the grid with `cell`.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Write `text` starting at `p`, one character per cell, clipped at the
    /// right edge. Returns the number of cells written.
    pub fn print(&mut self, p: Point, text: &str, style: Style) -> usize {
        let mut written = 0;
        for (i, ch) in text.chars().enumerate() {
            let q = p.shift(i as i32, 0);
            if !self.contains(q) {
                break;
            }
            self.set(q, Cell::painted(ch, style));
            written += 1;
        }
        written
    }

    /// Copy every cell of a same-sized `src` into `self`.
    pub fn copy_from(&mut self, src: &Grid) {
        if self.bounds == src.bounds {
            self.cells.copy_from_slice(&src.cells);
        } else {
            for p in self.bounds.intersect(src.bounds).iter() {
                self.set(p, src.at(p));
            }
        }
    }

    /// Row-major iterator over `(Point, Cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameCell / compute_frame
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub cell: Cell,
    pub pos: Point,
}

/// A set of cell changes (a diff frame).
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub width: i32,
    pub height: i32,
}

/// Compute the difference between two same-sized grids.
///
/// Returns a [`Frame`] containing only the cells that differ.
pub fn compute_frame(prev: &Grid, curr: &Grid) -> Frame {
    let cells = curr
        .iter()
        .filter(|&(p, c)| prev.at(p) != c)
        .map(|(pos, cell)| FrameCell { cell, pos })
        .collect();
    Frame {
        cells,
        width: curr.width(),
        height: curr.height(),
    }
}
