//! Incremental breadth-first search.
//!
//! [`BfsSearch`] advances one dequeued cell per [`step`](BfsSearch::step) so
//! the caller can render the expanding wave between calls, pause, or drop
//! the search entirely. Discovery order is FIFO, so the first time a cell is
//! reached is also the shortest distance to it.

use std::collections::{HashMap, HashSet, VecDeque};

use labyrinth_core::{Point, Range};

use crate::error::SearchError;
use crate::traits::Pather;

/// Lifecycle of a [`BfsSearch`]. `Found` and `Exhausted` are final.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    Running,
    Found,
    Exhausted,
}

impl SearchStatus {
    /// Whether the search reached a final state.
    #[inline]
    pub fn is_finished(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// A display-relevant change produced while stepping.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Wave {
    /// The cell was dequeued and expanded.
    Visited(Point),
    /// The cell was discovered and queued.
    Frontier(Point),
}

/// What a single [`BfsSearch::step`] concluded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// More work is queued; call `step` again.
    Continue,
    /// The end cell was dequeued. Holds the path from start to end,
    /// both included.
    Found(Vec<Point>),
    /// The frontier ran dry without reaching the end cell.
    Exhausted,
}

/// Breadth-first search state for one start/end pair.
#[derive(Clone, Debug)]
pub struct BfsSearch {
    bounds: Range,
    start: Point,
    end: Point,
    frontier: VecDeque<Point>,
    visited: HashSet<Point>,
    predecessor: HashMap<Point, Point>,
    status: SearchStatus,
    nbuf: Vec<Point>,
}

impl BfsSearch {
    /// Begin a search inside `bounds`, seeded with `start` in both the
    /// frontier and the visited set.
    ///
    /// Even when `start == end` the search starts out `Running`; the first
    /// [`step`](Self::step) detects the trivial path.
    pub fn start(bounds: Range, start: Point, end: Point) -> Self {
        let mut visited = HashSet::with_capacity(bounds.len());
        visited.insert(start);
        Self {
            bounds,
            start,
            end,
            frontier: VecDeque::from([start]),
            visited,
            predecessor: HashMap::new(),
            status: SearchStatus::Running,
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Advance the search by one dequeued cell.
    ///
    /// `emit` receives, in order, a [`Wave::Visited`] for the dequeued cell
    /// (unless it is the start or end) and a [`Wave::Frontier`] for every
    /// newly queued neighbour other than the end cell. Neighbours come from
    /// `pather` in its fixed order; cells outside the search bounds or
    /// already visited are skipped.
    pub fn step<P: Pather>(
        &mut self,
        pather: &P,
        mut emit: impl FnMut(Wave),
    ) -> Result<StepOutcome, SearchError> {
        if self.status.is_finished() {
            return Err(SearchError::Finished(self.status));
        }

        let Some(c) = self.frontier.pop_front() else {
            self.status = SearchStatus::Exhausted;
            log::debug!("search exhausted after visiting {} cells", self.visited.len());
            return Ok(StepOutcome::Exhausted);
        };

        if c != self.start && c != self.end {
            emit(Wave::Visited(c));
        }

        if c == self.end {
            self.status = SearchStatus::Found;
            let path = self.reconstruct_path()?;
            log::debug!(
                "search reached {} in {} steps, {} cells visited",
                self.end,
                path.len() - 1,
                self.visited.len()
            );
            return Ok(StepOutcome::Found(path));
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        pather.neighbors(c, &mut nbuf);
        for &n in &nbuf {
            if !self.bounds.contains(n) || !self.visited.insert(n) {
                continue;
            }
            self.predecessor.insert(n, c);
            self.frontier.push_back(n);
            if n != self.end {
                emit(Wave::Frontier(n));
            }
        }
        self.nbuf = nbuf;

        Ok(StepOutcome::Continue)
    }

    /// Step until the search finishes, forwarding every [`Wave`] to `emit`.
    /// Returns the path if the end cell was reached.
    pub fn run<P: Pather>(
        &mut self,
        pather: &P,
        mut emit: impl FnMut(Wave),
    ) -> Result<Option<Vec<Point>>, SearchError> {
        loop {
            match self.step(pather, &mut emit)? {
                StepOutcome::Continue => continue,
                StepOutcome::Found(path) => return Ok(Some(path)),
                StepOutcome::Exhausted => return Ok(None),
            }
        }
    }

    /// Follow predecessors back from the end cell and return the path
    /// start → … → end. Its length minus one is the shortest distance.
    ///
    /// Only a `Found` search has a path. A chain that stops anywhere but the
    /// start cell yields [`SearchError::BrokenChain`].
    pub fn reconstruct_path(&self) -> Result<Vec<Point>, SearchError> {
        if self.status != SearchStatus::Found {
            return Err(SearchError::NotFound(self.status));
        }
        let mut path = vec![self.end];
        let mut current = self.end;
        while current != self.start {
            // A chain longer than the visited set would be a cycle.
            if path.len() > self.visited.len() {
                return Err(SearchError::BrokenChain { at: current });
            }
            match self.predecessor.get(&current) {
                Some(&prev) => {
                    path.push(prev);
                    current = prev;
                }
                None => return Err(SearchError::BrokenChain { at: current }),
            }
        }
        path.reverse();
        Ok(path)
    }

    /// Current lifecycle state.
    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    #[inline]
    pub fn start_pos(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end_pos(&self) -> Point {
        self.end
    }

    /// Number of cells ever queued (including the start cell).
    #[inline]
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    /// Number of cells discovered but not yet expanded.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Frontier in dequeue order.
    pub fn frontier(&self) -> impl Iterator<Item = Point> + '_ {
        self.frontier.iter().copied()
    }

    #[inline]
    pub fn is_visited(&self, p: Point) -> bool {
        self.visited.contains(&p)
    }

    /// The cell from which `p` was first discovered. The start cell has none.
    #[inline]
    pub fn predecessor(&self, p: Point) -> Option<Point> {
        self.predecessor.get(&p).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathrange::UNREACHABLE;
    use crate::test_utils::AsciiMaze;
    use crate::{PathRange, manhattan};

    fn search(maze: &AsciiMaze, start: Point, end: Point) -> BfsSearch {
        BfsSearch::start(maze.bounds(), start, end)
    }

    fn collect_run(maze: &AsciiMaze, start: Point, end: Point) -> (Option<Vec<Point>>, Vec<Wave>) {
        let mut waves = Vec::new();
        let path = search(maze, start, end)
            .run(maze, |w| waves.push(w))
            .unwrap();
        (path, waves)
    }

    fn assert_connected(path: &[Point]) {
        for pair in path.windows(2) {
            assert_eq!(manhattan(pair[0], pair[1]), 1, "gap between {} and {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn start_seeds_frontier_and_visited() {
        let maze = AsciiMaze::parse(&["..."]);
        let s = search(&maze, Point::new(0, 0), Point::new(2, 0));
        assert_eq!(s.status(), SearchStatus::Running);
        assert_eq!(s.frontier().collect::<Vec<_>>(), vec![Point::new(0, 0)]);
        assert_eq!(s.frontier_len(), 1);
        assert!(s.is_visited(Point::new(0, 0)));
        assert_eq!(s.visited_len(), 1);
        assert_eq!(s.predecessor(Point::new(0, 0)), None);
    }

    #[test]
    fn three_by_three_open_grid() {
        let maze = AsciiMaze::parse(&["...", "...", "..."]);
        let (path, _) = collect_run(&maze, Point::new(0, 0), Point::new(2, 2));
        let path = path.expect("path exists");
        assert_eq!(path.len(), 5);
        assert_eq!(path.first(), Some(&Point::new(0, 0)));
        assert_eq!(path.last(), Some(&Point::new(2, 2)));
        assert_connected(&path);
    }

    #[test]
    fn wall_between_endpoints_exhausts() {
        let maze = AsciiMaze::parse(&[".#."]);
        let mut s = search(&maze, Point::new(0, 0), Point::new(2, 0));
        let mut waves = Vec::new();
        assert_eq!(s.step(&maze, |w| waves.push(w)).unwrap(), StepOutcome::Continue);
        assert_eq!(s.step(&maze, |w| waves.push(w)).unwrap(), StepOutcome::Exhausted);
        assert_eq!(s.status(), SearchStatus::Exhausted);
        assert!(waves.is_empty());
        assert_eq!(s.reconstruct_path(), Err(SearchError::NotFound(SearchStatus::Exhausted)));
    }

    #[test]
    fn start_equal_to_end_is_found_on_first_step() {
        let maze = AsciiMaze::parse(&["..", ".."]);
        let p = Point::new(1, 1);
        let mut s = search(&maze, p, p);
        assert_eq!(s.status(), SearchStatus::Running);
        let mut waves = Vec::new();
        assert_eq!(s.step(&maze, |w| waves.push(w)).unwrap(), StepOutcome::Found(vec![p]));
        assert!(waves.is_empty());
    }

    #[test]
    fn first_step_emits_frontier_in_cardinal_order() {
        let maze = AsciiMaze::parse(&["...", "...", "..."]);
        let mut s = search(&maze, Point::new(1, 1), Point::new(0, 0));
        let mut waves = Vec::new();
        s.step(&maze, |w| waves.push(w)).unwrap();
        assert_eq!(
            waves,
            vec![
                Wave::Frontier(Point::new(1, 2)),
                Wave::Frontier(Point::new(1, 0)),
                Wave::Frontier(Point::new(2, 1)),
                Wave::Frontier(Point::new(0, 1)),
            ]
        );
        for n in [Point::new(1, 2), Point::new(1, 0), Point::new(2, 1), Point::new(0, 1)] {
            assert_eq!(s.predecessor(n), Some(Point::new(1, 1)));
        }
    }

    #[test]
    fn endpoints_never_get_display_waves() {
        let maze = AsciiMaze::parse(&["....", "....", "...."]);
        let start = Point::new(0, 0);
        let end = Point::new(3, 2);
        let (_, waves) = collect_run(&maze, start, end);
        assert!(!waves.is_empty());
        for w in waves {
            let (Wave::Visited(p) | Wave::Frontier(p)) = w;
            assert_ne!(p, start);
            assert_ne!(p, end);
        }
    }

    #[test]
    fn every_visited_cell_but_start_has_a_predecessor() {
        let maze = AsciiMaze::parse(&["..#..", ".##..", "....."]);
        let start = Point::new(0, 0);
        let mut s = search(&maze, start, Point::new(4, 0));
        while s.step(&maze, |_| {}).unwrap() == StepOutcome::Continue {
            for p in maze.bounds() {
                if s.is_visited(p) && p != start {
                    let prev = s.predecessor(p).expect("predecessor");
                    assert_eq!(manhattan(prev, p), 1);
                    assert!(s.is_visited(prev));
                } else if !s.is_visited(p) {
                    assert_eq!(s.predecessor(p), None);
                }
            }
        }
        assert_eq!(s.status(), SearchStatus::Found);
    }

    #[test]
    fn visited_grows_monotonically_within_bounds() {
        let maze = AsciiMaze::parse(&["......", ".####.", "......", "#.##.#"]);
        let bounds = maze.bounds();
        let mut s = search(&maze, Point::new(0, 0), Point::new(4, 3));
        let mut last = s.visited_len();
        loop {
            let outcome = s.step(&maze, |_| {}).unwrap();
            assert!(s.visited_len() >= last);
            assert!(s.visited_len() <= bounds.len());
            last = s.visited_len();
            if outcome != StepOutcome::Continue {
                break;
            }
        }
    }

    #[test]
    fn path_length_matches_reference_distance() {
        let maze = AsciiMaze::parse(&[
            "..........",
            ".########.",
            ".#......#.",
            ".#.####.#.",
            "...#..#...",
            "####.##.##",
            "..........",
        ]);
        let bounds = maze.bounds();
        let start = Point::new(0, 0);
        let mut reference = PathRange::new(bounds);
        reference.bfs_map(&maze, &[start], UNREACHABLE);

        for end in bounds {
            if maze.is_wall(end) {
                continue;
            }
            let (path, _) = collect_run(&maze, start, end);
            match (path, reference.bfs_at(end)) {
                (None, d) => assert_eq!(d, UNREACHABLE, "missed reachable {end}"),
                (Some(path), d) => {
                    assert_eq!(path.len() as i32 - 1, d, "wrong length to {end}");
                    assert_connected(&path);
                    assert!(path.iter().all(|&p| !maze.is_wall(p)));
                }
            }
        }
    }

    #[test]
    fn identical_runs_emit_identical_waves() {
        let maze = AsciiMaze::parse(&["....#...", "..#.#.#.", "..#...#."]);
        let a = collect_run(&maze, Point::new(0, 2), Point::new(7, 0));
        let b = collect_run(&maze, Point::new(0, 2), Point::new(7, 0));
        assert_eq!(a, b);
    }

    #[test]
    fn stepping_a_finished_search_is_an_error() {
        let maze = AsciiMaze::parse(&[".."]);
        let mut s = search(&maze, Point::new(0, 0), Point::new(1, 0));
        assert!(s.run(&maze, |_| {}).unwrap().is_some());
        assert_eq!(
            s.step(&maze, |_| {}),
            Err(SearchError::Finished(SearchStatus::Found))
        );
    }

    #[test]
    fn broken_predecessor_chain_is_reported() {
        let maze = AsciiMaze::parse(&["...."]);
        let mut s = search(&maze, Point::new(0, 0), Point::new(3, 0));
        s.run(&maze, |_| {}).unwrap();
        s.predecessor.remove(&Point::new(2, 0));
        assert_eq!(
            s.reconstruct_path(),
            Err(SearchError::BrokenChain { at: Point::new(2, 0) })
        );
    }

    #[test]
    fn predecessor_cycle_is_reported() {
        let maze = AsciiMaze::parse(&["...."]);
        let mut s = search(&maze, Point::new(0, 0), Point::new(3, 0));
        s.run(&maze, |_| {}).unwrap();
        s.predecessor.insert(Point::new(1, 0), Point::new(2, 0));
        assert!(matches!(
            s.reconstruct_path(),
            Err(SearchError::BrokenChain { .. })
        ));
    }

    #[test]
    fn out_of_bounds_neighbours_are_ignored() {
        // A pather that happily reports cells beyond the grid.
        struct Leaky;
        impl Pather for Leaky {
            fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
                crate::push_cardinal(p, buf, |_| true);
            }
        }
        let bounds = Range::new(0, 0, 2, 1);
        let mut s = BfsSearch::start(bounds, Point::new(0, 0), Point::new(5, 5));
        assert_eq!(s.run(&Leaky, |_| {}).unwrap(), None);
        assert_eq!(s.visited_len(), 2);
    }
}
