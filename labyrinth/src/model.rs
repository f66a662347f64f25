//! Elm-architecture Model for the interactive maze editor.

use std::time::Instant;

use labyrinth_core::{
    AttrMask, Cell, Effect, Grid, Key, Model, MouseAction, Msg, Point, Range, Style,
};
use labyrinth_model::{CellKind, Maze, Session, SessionError, SessionState};
use rand::rngs::StdRng;

use crate::canvas::{CELL_WIDTH, Canvas};
use crate::clock::FrameTimer;
use crate::config::Settings;
use crate::palette::{self, BG_BAR, FG_BAR, FG_DIM, FG_ERROR, FG_TEXT};

/// Narrowest screen, so the header and key lines fit.
const MIN_SCREEN_WIDTH: i32 = 60;
/// Header above the maze, status and key lines below.
const CHROME_ROWS: i32 = 3;

const INTRO: &str = "Paint with the mouse, place S and E, then press Enter.";
const EDIT_LOCKED: &str = "Press r to reset the search before editing.";
const KEYS_LINE: &str = "Enter search  r reset  c clear  x walls  ? help  q quit";

const HELP_TEXT: &str = "\
Tools:   1/w wall   2/o open   3/s start   4/e end
Paint:   click or drag on the maze with the active tool

Enter    run breadth-first search from S to E
r        reset the search and edit again
c        clear the whole maze
x        scatter random walls
?        show this help
q / Esc  quit

Light blue cells wait in the queue, pale cells are done,
gold cells form the shortest path.

Press any key to return.";

/// Screen size needed for the configured maze.
pub fn screen_size(settings: &Settings) -> (i32, i32) {
    (
        (settings.width * CELL_WIDTH).max(MIN_SCREEN_WIDTH),
        settings.height + CHROME_ROWS,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Status {
    text: String,
    error: bool,
}

pub struct LabyrinthModel {
    session: Session<Canvas, FrameTimer>,
    tool: CellKind,
    mode: Mode,
    status: Status,
    painting: bool,
    rng: StdRng,
    wall_density: f64,
}

impl LabyrinthModel {
    pub fn new(settings: &Settings, rng: StdRng) -> Self {
        let maze = Maze::new(settings.width, settings.height);
        let canvas = Canvas::new(&maze);
        Self {
            session: Session::new(maze, settings.delay(), canvas, FrameTimer::new()),
            tool: CellKind::Wall,
            mode: Mode::Normal,
            status: Status {
                text: String::new(),
                error: false,
            },
            painting: false,
            rng,
            wall_density: settings.wall_density,
        }
    }

    pub fn session(&self) -> &Session<Canvas, FrameTimer> {
        &self.session
    }

    pub fn tool(&self) -> CellKind {
        self.tool
    }

    pub fn status(&self) -> &str {
        &self.status.text
    }

    fn info(&mut self, text: impl Into<String>) {
        self.status = Status {
            text: text.into(),
            error: false,
        };
    }

    fn error(&mut self, text: impl Into<String>) {
        self.status = Status {
            text: text.into(),
            error: true,
        };
    }

    /// Screen area covered by the maze.
    fn maze_area(&self) -> Range {
        let maze = self.session.maze();
        Range::new(0, 1, maze.width() * CELL_WIDTH, maze.height() + 1)
    }

    /// Maze cell under a maze-relative screen position.
    fn maze_pos(&self, rel: Point) -> Option<Point> {
        if rel.x < 0 {
            return None;
        }
        let p = Point::new(rel.x / CELL_WIDTH, rel.y);
        self.session.maze().contains(p).then_some(p)
    }

    // -------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------

    fn handle_key(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Char('1' | 'w') => self.tool = CellKind::Wall,
            Key::Char('2' | 'o') => self.tool = CellKind::Open,
            Key::Char('3' | 's') => self.tool = CellKind::Start,
            Key::Char('4' | 'e') => self.tool = CellKind::End,
            Key::Enter => return self.start_search(),
            Key::Char('r') => {
                self.session.reset_search();
                self.info("Search reset.");
            }
            Key::Char('c') => match self.session.clear_all() {
                Ok(()) => self.info("Maze cleared."),
                Err(err) => self.error(err.to_string()),
            },
            Key::Char('x') => {
                if self.session.state().is_editing() {
                    let n = self.session.scatter_walls(&mut self.rng, self.wall_density);
                    self.info(format!("Added {n} walls."));
                } else {
                    self.error(EDIT_LOCKED);
                }
            }
            Key::Char('?') => self.mode = Mode::Help,
            Key::Char('q') | Key::Escape => return Some(Effect::End),
            _ => {}
        }
        None
    }

    fn start_search(&mut self) -> Option<Effect> {
        match self.session.start_search() {
            Ok(()) => {
                self.info("Searching...");
                self.show_outcome();
                None
            }
            Err(SessionError::Validation(err)) => {
                self.error(err.to_string());
                None
            }
            Err(err) => Some(Effect::Fail(Box::new(err))),
        }
    }

    fn handle_mouse(&mut self, action: MouseAction, pos: Point) {
        match action {
            MouseAction::Main => {
                self.painting = self.maze_pos(pos).is_some();
                if self.painting && !self.session.state().is_editing() {
                    self.error(EDIT_LOCKED);
                    return;
                }
            }
            MouseAction::Drag if self.painting => {}
            MouseAction::Release => {
                self.painting = false;
                return;
            }
            _ => return,
        }
        if let Some(p) = self.maze_pos(pos) {
            self.session.edit_cell(p, self.tool);
        }
    }

    /// Run every tick due at `now`.
    fn tick(&mut self, now: Instant) -> Option<Effect> {
        let mut fired = false;
        while let Some(id) = self.session.timer_mut().pop_due(now) {
            fired = true;
            if let Err(err) = self.session.on_tick(id) {
                return Some(Effect::Fail(Box::new(err)));
            }
        }
        if fired {
            self.show_outcome();
        }
        None
    }

    fn show_outcome(&mut self) {
        if let SessionState::Finished(outcome) = self.session.state() {
            self.info(outcome.to_string());
        }
    }

    // -------------------------------------------------------------------
    // Drawing
    // -------------------------------------------------------------------

    fn draw_header(&self, grid: &mut Grid) {
        let mut x = grid.print(Point::ZERO, " Tool: ", Style::default());
        for kind in CellKind::ALL {
            let label = format!("[{}] {}", palette::tool_key(kind), kind.label());
            let (_, swatch) = palette::marker_style(kind.into());
            let style = if kind == self.tool {
                swatch.with_attrs(AttrMask::BOLD)
            } else {
                Style::default().with_fg(FG_DIM)
            };
            x += grid.print(Point::new(x as i32, 0), &label, style);
            x += grid.print(Point::new(x as i32, 0), " ", Style::default());
        }
    }

    fn draw_help(&self, grid: &mut Grid) {
        for (y, line) in HELP_TEXT.lines().enumerate() {
            grid.print(Point::new(1, y as i32 + 1), line, Style::default().with_fg(FG_TEXT));
        }
    }

    fn draw_footer(&self, grid: &mut Grid) {
        let y = self.session.maze().height() + 1;
        let bar = Style::default().with_fg(FG_BAR).with_bg(BG_BAR);
        for x in 0..grid.width() {
            grid.set(Point::new(x, y), Cell::fill(bar));
        }
        let style = if self.status.error {
            bar.with_fg(FG_ERROR)
        } else {
            bar
        };
        grid.print(Point::new(1, y), &self.status.text, style);
        grid.print(Point::new(1, y + 1), KEYS_LINE, Style::default().with_fg(FG_DIM));
    }
}

impl Model for LabyrinthModel {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => {
                self.info(INTRO);
                None
            }
            Msg::Tick { time } => self.tick(time),
            Msg::Quit => Some(Effect::End),
            Msg::KeyDown { .. } if self.mode == Mode::Help => {
                self.mode = Mode::Normal;
                None
            }
            Msg::KeyDown { key, .. } => self.handle_key(key),
            Msg::Mouse { .. } if self.mode == Mode::Help => None,
            msg @ Msg::Mouse { .. } => {
                if let Msg::Mouse { action, pos, .. } = self.maze_area().rel_msg(msg) {
                    self.handle_mouse(action, pos);
                }
                None
            }
            Msg::Screen { .. } => None,
        }
    }

    fn draw(&self, grid: &mut Grid) {
        grid.fill(Cell::default());
        self.draw_header(grid);
        match self.mode {
            Mode::Help => self.draw_help(grid),
            Mode::Normal => self.session.observer().draw(grid, Point::new(0, 1)),
        }
        self.draw_footer(grid);
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.session.timer().next_deadline()
    }
}
