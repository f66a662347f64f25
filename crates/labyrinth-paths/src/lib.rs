//! Breadth-first pathfinding on 4-connected grids.
//!
//! - **Incremental BFS** ([`BfsSearch`]): one dequeued cell per
//!   [`step`](BfsSearch::step), emitting [`Wave`] events for animation, with
//!   shortest-path reconstruction from the predecessor map.
//! - **Distance maps** ([`PathRange::bfs_map`]): a whole-grid BFS in one call,
//!   handy as an independent reference.
//!
//! Grids plug in through the [`Pather`] trait; [`push_cardinal`] provides
//! the fixed down/up/right/left neighbour order.

mod bfs;
mod distance;
mod error;
mod neighbors;
mod pathrange;
mod search;
mod traits;

#[cfg(test)]
mod test_utils;

pub use distance::manhattan;
pub use error::SearchError;
pub use neighbors::{CARDINAL, push_cardinal};
pub use pathrange::{PathNode, PathRange, UNREACHABLE};
pub use search::{BfsSearch, SearchStatus, StepOutcome, Wave};
pub use traits::Pather;
