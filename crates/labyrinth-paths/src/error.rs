use labyrinth_core::Point;
use thiserror::Error;

use crate::search::SearchStatus;

/// Errors raised by [`BfsSearch`](crate::BfsSearch).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// `step` was called on a search that already terminated.
    #[error("search already finished ({0:?})")]
    Finished(SearchStatus),
    /// Path reconstruction was requested before the end cell was reached.
    #[error("no path to reconstruct: search is {0:?}")]
    NotFound(SearchStatus),
    /// The predecessor chain from the end cell stops short of the start
    /// cell. Breadth-first search never produces this; it marks a bug.
    #[error("predecessor chain broken at {at}: cell has no predecessor and is not the start")]
    BrokenChain { at: Point },
}
