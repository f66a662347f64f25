//! The maze editing and search session.
//!
//! - [`Maze`]: the painted grid, with at most one start and one end.
//! - [`Session`]: gates edits, runs one breadth-first step per timer tick,
//!   and reports [`Marker`] changes and the final [`Outcome`] to an
//!   [`Observer`].
//! - [`Timer`]: how the session asks its host for the next tick;
//!   [`ManualTimer`] fires on demand.

mod error;
pub mod mapgen;
mod marker;
mod maze;
mod session;
mod timer;

pub use error::{SessionError, ValidationError};
pub use marker::{Event, EventLog, Marker, Observer, Outcome};
pub use maze::{CellKind, Maze};
pub use session::{Session, SessionState};
pub use timer::{ManualTimer, TickId, Timer};
