//! The session controller: owns the maze, gates edits, and drives one
//! search step per timer tick.

use std::time::Duration;

use labyrinth_core::Point;
use labyrinth_paths::{BfsSearch, StepOutcome, Wave};
use rand::Rng;

use crate::error::{SessionError, ValidationError};
use crate::mapgen;
use crate::marker::{Marker, Observer, Outcome};
use crate::maze::{CellKind, Maze};
use crate::timer::{TickId, Timer};

/// Where the session is in its edit → search → result cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionState {
    /// The maze accepts edits; no search is shown.
    Editing,
    /// A search is animating. Edits are ignored.
    Searching,
    /// The last search ended. Edits are ignored until a reset.
    Finished(Outcome),
}

impl SessionState {
    #[inline]
    pub fn is_editing(self) -> bool {
        self == Self::Editing
    }

    #[inline]
    pub fn is_searching(self) -> bool {
        self == Self::Searching
    }

    /// The outcome of the last search, when finished.
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Self::Finished(outcome) => Some(outcome),
            Self::Editing | Self::Searching => None,
        }
    }
}

/// An editing and searching session over one [`Maze`].
///
/// Display changes go to the observer `O` as they happen; the next search
/// step is requested from the timer `T` and runs when the matching
/// [`TickId`] comes back through [`on_tick`](Self::on_tick).
pub struct Session<O: Observer, T: Timer> {
    maze: Maze,
    engine: Option<BfsSearch>,
    state: SessionState,
    pending: Option<TickId>,
    delay: Duration,
    observer: O,
    timer: T,
}

impl<O: Observer, T: Timer> Session<O, T> {
    /// Start editing `maze`, waiting `delay` between search steps.
    pub fn new(maze: Maze, delay: Duration, observer: O, timer: T) -> Self {
        Self {
            maze,
            engine: None,
            state: SessionState::Editing,
            pending: None,
            delay,
            observer,
            timer,
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[inline]
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn kind_at(&self, p: Point) -> Option<CellKind> {
        self.maze.kind_at(p)
    }

    pub fn has_endpoints(&self) -> bool {
        self.maze.has_endpoints()
    }

    /// The engine of the current or last search. `None` while editing.
    pub fn engine(&self) -> Option<&BfsSearch> {
        self.engine.as_ref()
    }

    /// The tick the session is waiting for, if any.
    pub fn pending_tick(&self) -> Option<TickId> {
        self.pending
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Change the step delay. Takes effect from the next scheduled tick.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    /// Paint `kind` onto `p`. Only honoured while editing; returns whether
    /// any cell changed.
    pub fn edit_cell(&mut self, p: Point, kind: CellKind) -> bool {
        if !self.state.is_editing() {
            log::debug!("edit at {p} ignored while {:?}", self.state);
            return false;
        }
        let changed = self.maze.set_cell(p, kind);
        if changed.is_empty() {
            log::debug!("edit at {p} to {kind:?} changed nothing");
            return false;
        }
        for (q, k) in changed {
            self.observer.cell_changed(q, k.into());
        }
        true
    }

    /// Randomly wall off open cells with probability `density`. Only
    /// honoured while editing; returns the number of new walls.
    pub fn scatter_walls<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) -> usize {
        if !self.state.is_editing() {
            log::debug!("wall scatter ignored while {:?}", self.state);
            return 0;
        }
        let walls = mapgen::scatter_walls(&mut self.maze, rng, density);
        for &p in &walls {
            self.observer.cell_changed(p, Marker::Wall);
        }
        walls.len()
    }

    /// Wipe the maze back to all open cells, forgetting both endpoints.
    /// Refused while a search runs.
    pub fn clear_all(&mut self) -> Result<(), ValidationError> {
        if self.state.is_searching() {
            return Err(ValidationError::SearchInProgress);
        }
        self.reset_search();
        self.maze.clear();
        for p in self.maze.bounds().iter() {
            self.observer.cell_changed(p, Marker::Open);
        }
        log::info!("maze cleared");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Searching
    // -----------------------------------------------------------------------

    /// Begin a new search and run its first step right away.
    ///
    /// A finished search is reset first. Fails without side effects when a
    /// search is already running or an endpoint is missing.
    pub fn start_search(&mut self) -> Result<(), SessionError> {
        if self.state.is_searching() {
            return Err(ValidationError::SearchInProgress.into());
        }
        let (Some(start), Some(end)) = (self.maze.start(), self.maze.end()) else {
            return Err(ValidationError::MissingEndpoints.into());
        };
        if !self.state.is_editing() {
            self.reset_search();
        }

        log::info!(
            "search from {start} to {end} on a {}x{} maze",
            self.maze.width(),
            self.maze.height()
        );
        self.engine = Some(BfsSearch::start(self.maze.bounds(), start, end));
        self.state = SessionState::Searching;
        self.advance_one_step()
    }

    /// Run one search step and forward its display events. Does nothing
    /// unless a search is running.
    ///
    /// When the search ends, the inner path cells are marked, the observer
    /// hears the outcome once, and the session becomes finished. Otherwise
    /// the next tick is scheduled.
    pub fn advance_one_step(&mut self) -> Result<(), SessionError> {
        if !self.state.is_searching() {
            return Ok(());
        }
        self.pending = None;
        let Some(engine) = self.engine.as_mut() else {
            return Ok(());
        };

        let observer = &mut self.observer;
        let stepped = engine.step(&self.maze, |wave| {
            let (Wave::Visited(p) | Wave::Frontier(p)) = wave;
            observer.cell_changed(p, wave.into());
        });

        match stepped {
            Ok(StepOutcome::Continue) => {
                self.pending = Some(self.timer.schedule(self.delay));
            }
            Ok(StepOutcome::Found(path)) => {
                let last = path.len().saturating_sub(1);
                for &p in path.iter().take(last).skip(1) {
                    self.observer.cell_changed(p, Marker::PathFinal);
                }
                self.finish(Outcome::Found { length: last });
            }
            Ok(StepOutcome::Exhausted) => self.finish(Outcome::NoPath),
            Err(err) => {
                log::error!("search abandoned: {err}");
                self.engine = None;
                self.state = SessionState::Editing;
                return Err(err.into());
            }
        }
        Ok(())
    }

    /// Timer entry point. Ticks other than the pending one are stale and
    /// ignored.
    pub fn on_tick(&mut self, id: TickId) -> Result<(), SessionError> {
        if self.pending != Some(id) {
            log::debug!("stale tick {id:?} ignored");
            return Ok(());
        }
        self.advance_one_step()
    }

    /// Abandon any search, restore the plain maze display, and go back to
    /// editing. Walls keep their look and are not re-sent.
    pub fn reset_search(&mut self) {
        if let Some(id) = self.pending.take() {
            self.timer.cancel(id);
        }
        self.engine = None;
        self.state = SessionState::Editing;
        for (p, kind) in self.maze.iter() {
            if kind != CellKind::Wall {
                self.observer.cell_changed(p, kind.into());
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        log::info!("{outcome}");
        self.state = SessionState::Finished(outcome);
        self.observer.search_finished(outcome);
    }
}
