use std::collections::VecDeque;

use labyrinth_core::Point;

use crate::PathRange;
use crate::pathrange::{PathNode, UNREACHABLE};
use crate::traits::Pather;

impl PathRange {
    /// Compute a multi-source breadth-first search distance map in one go.
    ///
    /// Each step has cost 1. Expansion stops when the distance exceeds
    /// `max_dist`. Returns a slice of all reached nodes in discovery order.
    pub fn bfs_map<P: Pather>(
        &mut self,
        pather: &P,
        sources: &[Point],
        max_dist: i32,
    ) -> &[PathNode] {
        self.bfs_map.fill(UNREACHABLE);
        self.bfs_results.clear();

        let mut queue: VecDeque<usize> = VecDeque::new();

        for &src in sources {
            if let Some(si) = self.idx(src) {
                if self.bfs_map[si] != UNREACHABLE {
                    continue;
                }
                self.bfs_map[si] = 0;
                queue.push_back(si);
                self.bfs_results.push(PathNode { pos: src, cost: 0 });
            }
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(ci) = queue.pop_front() {
            let current_dist = self.bfs_map[ci];
            let cp = self.point(ci);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.bfs_map[ni] != UNREACHABLE {
                    continue;
                }
                let nd = current_dist + 1;
                if nd > max_dist {
                    continue;
                }
                self.bfs_map[ni] = nd;
                queue.push_back(ni);
                self.bfs_results.push(PathNode { pos: np, cost: nd });
            }
        }

        self.nbuf = nbuf;
        &self.bfs_results
    }

    /// Query the BFS distance at a specific point.
    ///
    /// Returns [`UNREACHABLE`] if the point is outside the range or was not
    /// reached by the last `bfs_map` call.
    pub fn bfs_at(&self, p: Point) -> i32 {
        match self.idx(p) {
            Some(i) => self.bfs_map[i],
            None => UNREACHABLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::AsciiMaze;

    #[test]
    fn distances_on_open_grid_are_manhattan() {
        let maze = AsciiMaze::parse(&["....", "....", "...."]);
        let mut pr = PathRange::new(maze.bounds());
        pr.bfs_map(&maze, &[Point::new(0, 0)], UNREACHABLE);
        for p in maze.bounds() {
            assert_eq!(pr.bfs_at(p), crate::manhattan(Point::new(0, 0), p));
        }
    }

    #[test]
    fn walls_force_detours_and_block() {
        let maze = AsciiMaze::parse(&[
            ".#.", //
            ".#.",
            "...",
        ]);
        let mut pr = PathRange::new(maze.bounds());
        pr.bfs_map(&maze, &[Point::new(0, 0)], UNREACHABLE);
        assert_eq!(pr.bfs_at(Point::new(2, 0)), 6);
        assert_eq!(pr.bfs_at(Point::new(1, 0)), UNREACHABLE);

        let sealed = AsciiMaze::parse(&[".#."]);
        let mut pr = PathRange::new(sealed.bounds());
        pr.bfs_map(&sealed, &[Point::new(0, 0)], UNREACHABLE);
        assert_eq!(pr.bfs_at(Point::new(2, 0)), UNREACHABLE);
    }

    #[test]
    fn results_come_in_discovery_order() {
        let maze = AsciiMaze::parse(&["...", ".#.", "..."]);
        let mut pr = PathRange::new(maze.bounds());
        let nodes = pr.bfs_map(&maze, &[Point::new(0, 0)], UNREACHABLE).to_vec();
        assert_eq!(nodes.len(), 8);
        assert_eq!(
            nodes[0],
            PathNode {
                pos: Point::new(0, 0),
                cost: 0
            }
        );
        assert!(nodes.windows(2).all(|w| w[0].cost <= w[1].cost));
        for node in &nodes {
            assert_eq!(pr.bfs_at(node.pos), node.cost);
        }
        assert_eq!(nodes.last().map(|n| n.cost), Some(4));
    }

    #[test]
    fn max_dist_limits_expansion() {
        let maze = AsciiMaze::parse(&["......"]);
        let mut pr = PathRange::new(maze.bounds());
        let reached = pr.bfs_map(&maze, &[Point::new(0, 0)], 2).len();
        assert_eq!(reached, 3);
        assert_eq!(pr.bfs_at(Point::new(3, 0)), UNREACHABLE);
        assert_eq!(pr.bfs_at(Point::new(-1, 0)), UNREACHABLE);
    }
}
