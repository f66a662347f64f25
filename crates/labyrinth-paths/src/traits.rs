use labyrinth_core::Point;

/// Minimal pathfinding interface: neighbour enumeration.
///
/// Implementors report only the cells a search may step onto from `p`
/// (inside the grid and not blocked), in a fixed order. That order decides
/// discovery order among equally distant cells and therefore the exact
/// animation, never the length of the shortest path.
pub trait Pather {
    /// Append neighbours of `p` into `buf`. The caller clears `buf` before
    /// calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}
