use labyrinth_paths::SearchError;
use thiserror::Error;

/// A request the session refused. The maze and state are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Set both a start (S) and an end (E) before searching.")]
    MissingEndpoints,
    #[error("A search is already running.")]
    SearchInProgress,
}

/// Errors surfaced by [`Session`](crate::Session) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The search engine broke an internal guarantee. The run was abandoned.
    #[error("internal search error: {0}")]
    Internal(#[from] SearchError),
}

impl SessionError {
    /// Whether the user can fix this by editing the maze.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
