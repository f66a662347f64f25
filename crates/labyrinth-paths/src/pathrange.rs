use labyrinth_core::{Point, Range};

/// A position with an associated cost, returned from BFS map queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Point,
    pub cost: i32,
}

/// Sentinel value meaning "unreachable" in BFS maps.
pub const UNREACHABLE: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// PathRange
// ---------------------------------------------------------------------------

/// Whole-grid distance queries over a fixed rectangle.
///
/// `PathRange` owns its caches (distance map, result list, neighbour buffer)
/// so repeated queries incur no allocations after the first use. It runs a
/// search to completion in one call, unlike the incremental
/// [`BfsSearch`](crate::BfsSearch).
pub struct PathRange {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    pub(crate) bfs_map: Vec<i32>,
    pub(crate) bfs_results: Vec<PathNode>,
    pub(crate) nbuf: Vec<Point>,
}

impl PathRange {
    /// Create a new `PathRange` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            width: rng.width().max(0) as usize,
            bfs_map: vec![UNREACHABLE; rng.len()],
            bfs_results: Vec::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }
}
