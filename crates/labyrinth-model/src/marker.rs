//! Display events: what a cell should currently look like, and how a run
//! ended.
//!
//! The session never draws. It reports [`Marker`] changes and the final
//! [`Outcome`] to an [`Observer`], which owns the rendering.

use std::fmt;

use labyrinth_core::Point;
use labyrinth_paths::Wave;

use crate::maze::CellKind;

/// The visual state of a cell. The first four mirror [`CellKind`]; the
/// rest only exist while a search is shown.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Marker {
    Wall,
    Open,
    Start,
    End,
    Frontier,
    Visited,
    PathFinal,
}

impl From<CellKind> for Marker {
    fn from(kind: CellKind) -> Self {
        match kind {
            CellKind::Wall => Self::Wall,
            CellKind::Open => Self::Open,
            CellKind::Start => Self::Start,
            CellKind::End => Self::End,
        }
    }
}

impl From<Wave> for Marker {
    fn from(wave: Wave) -> Self {
        match wave {
            Wave::Visited(_) => Self::Visited,
            Wave::Frontier(_) => Self::Frontier,
        }
    }
}

/// How a finished search ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// A shortest path exists; `length` counts steps, i.e. cells minus one.
    Found { length: usize },
    NoPath,
}

impl Outcome {
    pub fn is_found(self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found { length } => write!(f, "Path found! Length: {length} steps."),
            Self::NoPath => f.write_str("No path found."),
        }
    }
}

/// Receives display events from a [`Session`](crate::Session).
pub trait Observer {
    /// The cell at `pos` should now be shown as `marker`.
    fn cell_changed(&mut self, pos: Point, marker: Marker);

    /// The running search ended. Called once per run.
    fn search_finished(&mut self, _outcome: Outcome) {}
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn cell_changed(&mut self, pos: Point, marker: Marker) {
        (**self).cell_changed(pos, marker);
    }

    fn search_finished(&mut self, outcome: Outcome) {
        (**self).search_finished(outcome);
    }
}

/// One recorded observer call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    Cell(Point, Marker),
    Finished(Outcome),
}

/// An [`Observer`] that keeps every call in order. Used by the headless
/// runner and by tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Positions that received `marker`, in event order.
    pub fn cells_marked(&self, marker: Marker) -> Vec<Point> {
        self.events
            .iter()
            .filter_map(|e| match *e {
                Event::Cell(p, m) if m == marker => Some(p),
                _ => None,
            })
            .collect()
    }

    /// The most recent outcome, if any search finished.
    pub fn last_outcome(&self) -> Option<Outcome> {
        self.events.iter().rev().find_map(|e| match *e {
            Event::Finished(o) => Some(o),
            Event::Cell(..) => None,
        })
    }
}

impl Observer for EventLog {
    fn cell_changed(&mut self, pos: Point, marker: Marker) {
        self.events.push(Event::Cell(pos, marker));
    }

    fn search_finished(&mut self, outcome: Outcome) {
        self.events.push(Event::Finished(outcome));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_messages() {
        assert_eq!(
            Outcome::Found { length: 4 }.to_string(),
            "Path found! Length: 4 steps."
        );
        assert_eq!(Outcome::NoPath.to_string(), "No path found.");
        assert!(!Outcome::NoPath.is_found());
    }

    #[test]
    fn markers_from_kinds_and_waves() {
        assert_eq!(Marker::from(CellKind::Wall), Marker::Wall);
        assert_eq!(Marker::from(CellKind::End), Marker::End);
        assert_eq!(Marker::from(Wave::Visited(Point::ZERO)), Marker::Visited);
        assert_eq!(Marker::from(Wave::Frontier(Point::ZERO)), Marker::Frontier);
    }

    #[test]
    fn event_log_queries() {
        let mut log = EventLog::new();
        log.cell_changed(Point::new(1, 0), Marker::Frontier);
        log.cell_changed(Point::new(2, 0), Marker::Visited);
        log.cell_changed(Point::new(3, 0), Marker::Frontier);
        log.search_finished(Outcome::NoPath);
        assert_eq!(
            log.cells_marked(Marker::Frontier),
            vec![Point::new(1, 0), Point::new(3, 0)]
        );
        assert_eq!(log.last_outcome(), Some(Outcome::NoPath));
        log.clear();
        assert!(log.events().is_empty());
        assert_eq!(log.last_outcome(), None);
    }
}
