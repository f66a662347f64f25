//! Solve a generated maze without a terminal UI.
//!
//! Start and end sit in opposite corners, walls are scattered at the
//! configured density, and the search runs to completion on a
//! [`ManualTimer`].

use labyrinth_core::Point;
use labyrinth_model::{CellKind, ManualTimer, Maze, Outcome, Session, SessionError};
use rand::Rng;

use crate::canvas::Canvas;
use crate::config::Settings;

/// The solved maze and how the search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub grid: String,
    pub outcome: Outcome,
    pub visited: usize,
}

pub fn run<R: Rng + ?Sized>(settings: &Settings, rng: &mut R) -> Result<Report, SessionError> {
    let mut maze = Maze::new(settings.width, settings.height);
    maze.set_cell(Point::ZERO, CellKind::Start);
    maze.set_cell(Point::new(settings.width - 1, settings.height - 1), CellKind::End);

    let canvas = Canvas::new(&maze);
    let mut session = Session::new(maze, settings.delay(), canvas, ManualTimer::new());
    let walls = session.scatter_walls(rng, settings.wall_density);
    log::info!(
        "headless {}x{} maze with {walls} walls",
        settings.width,
        settings.height
    );

    session.start_search()?;
    while let Some(id) = session.timer_mut().fire() {
        session.on_tick(id)?;
    }

    let visited = session.engine().map_or(0, |e| e.visited_len());
    let outcome = session.state().outcome().unwrap_or(Outcome::NoPath);
    Ok(Report {
        grid: session.observer().to_ascii(),
        outcome,
        visited,
    })
}
