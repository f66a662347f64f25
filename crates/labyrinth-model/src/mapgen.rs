//! Random maze furnishing.

use labyrinth_core::Point;
use rand::Rng;

use crate::maze::{CellKind, Maze};

/// Turn each open cell into a wall with probability `density`.
///
/// Start, end, and existing walls are left alone. `density` is clamped to
/// `0.0..=1.0`. Returns the new walls in row-major order.
pub fn scatter_walls<R: Rng + ?Sized>(maze: &mut Maze, rng: &mut R, density: f64) -> Vec<Point> {
    let density = density.clamp(0.0, 1.0);
    let candidates: Vec<Point> = maze
        .iter()
        .filter(|&(_, kind)| kind == CellKind::Open)
        .map(|(p, _)| p)
        .collect();

    let mut walls = Vec::new();
    for p in candidates {
        let r: f64 = rng.random();
        if r < density {
            maze.set_cell(p, CellKind::Wall);
            walls.push(p);
        }
    }
    log::debug!("scattered {} walls at density {density:.2}", walls.len());
    walls
}
