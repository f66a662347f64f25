//! The Elm-architecture application loop: [`Model`], [`Driver`], [`Effect`],
//! [`App`].

use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::grid::{compute_frame, Frame, Grid};
use crate::messages::Msg;

/// Longest time a single driver poll may block.
const POLL_INTERVAL: Duration = Duration::from_millis(16);

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A simple cooperative-cancellation token backed by an [`AtomicBool`].
#[derive(Clone, Debug)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    /// Create a new, non-cancelled context.
    pub fn new() -> Self {
        Self {
            done: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
#[derive(Debug)]
pub enum Effect {
    /// Stop the application loop normally.
    End,
    /// Stop the application loop and make [`App::run`] return this error.
    Fail(Box<dyn Error>),
}

// ---------------------------------------------------------------------------
// Model trait
// ---------------------------------------------------------------------------

/// The application model (Elm architecture).
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `grid`.
    fn draw(&self, grid: &mut Grid);

    /// The next instant at which the model wants a [`Msg::Tick`].
    fn next_deadline(&self) -> Option<Instant> {
        None
    }
}

// ---------------------------------------------------------------------------
// Driver trait
// ---------------------------------------------------------------------------

/// Back-end driver (e.g. a terminal).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn Error>>;

    /// Wait up to `timeout` for input, sending any messages through `tx`.
    /// The implementation should honour `ctx.is_done()` and return when it
    /// becomes `true`.
    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: &Sender<Msg>,
        timeout: Duration,
    ) -> Result<(), Box<dyn Error>>;

    /// Flush a computed frame to the screen.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn Error>>;

    /// Clean up / restore the screen.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub width: i32,
    pub height: i32,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    width: i32,
    height: i32,
}

impl<M: Model, D: Driver> App<M, D> {
    /// Create a new application from a configuration.
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            width: config.width,
            height: config.height,
        }
    }

    /// Access the model, e.g. after [`run`](Self::run) returns.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run the main Model-View-Update loop.
    ///
    /// 1. Initialises the driver.
    /// 2. Sends `Msg::Init` through the model.
    /// 3. Loops: poll (bounded by the model's next deadline) → tick if due →
    ///    update → draw → diff → flush.
    /// 4. Stops when the model returns an [`Effect`] or the driver fails.
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        self.driver.init()?;
        let result = self.event_loop();
        self.driver.close();
        result
    }

    fn event_loop(&mut self) -> Result<(), Box<dyn Error>> {
        let ctx = Context::new();
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();

        tx.send(Msg::Init).ok();

        let mut prev_grid = Grid::new(self.width, self.height);
        let mut curr_grid = Grid::new(self.width, self.height);

        self.process_pending(&rx, &ctx, &mut prev_grid, &mut curr_grid)?;

        while !ctx.is_done() {
            let timeout = match self.model.next_deadline() {
                Some(deadline) => deadline
                    .saturating_duration_since(Instant::now())
                    .min(POLL_INTERVAL),
                None => POLL_INTERVAL,
            };
            self.driver.poll_msgs(&ctx, &tx, timeout)?;

            if ctx.is_done() {
                break;
            }

            let now = Instant::now();
            if self.model.next_deadline().is_some_and(|d| d <= now) {
                tx.send(Msg::Tick { time: now }).ok();
            }

            self.process_pending(&rx, &ctx, &mut prev_grid, &mut curr_grid)?;
        }

        Ok(())
    }

    /// Drain queued messages, update the model, draw, diff, and flush.
    fn process_pending(
        &mut self,
        rx: &Receiver<Msg>,
        ctx: &Context,
        prev_grid: &mut Grid,
        curr_grid: &mut Grid,
    ) -> Result<(), Box<dyn Error>> {
        let mut needs_draw = false;

        while let Ok(msg) = rx.try_recv() {
            match self.model.update(msg) {
                Some(Effect::End) => {
                    ctx.cancel();
                    return Ok(());
                }
                Some(Effect::Fail(err)) => {
                    ctx.cancel();
                    return Err(err);
                }
                None => needs_draw = true,
            }
        }

        if needs_draw {
            self.model.draw(curr_grid);
            let frame = compute_frame(prev_grid, curr_grid);
            if !frame.cells.is_empty() {
                self.driver.flush(frame)?;
            }
            prev_grid.copy_from(curr_grid);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use crate::geom::Point;
    use crate::messages::Key;
    use std::collections::VecDeque;

    /// Replays a fixed script of messages, one per poll.
    struct ScriptDriver {
        script: VecDeque<Msg>,
        flushed: Vec<Frame>,
        closed: bool,
    }

    impl Driver for ScriptDriver {
        fn init(&mut self) -> Result<(), Box<dyn Error>> {
            Ok(())
        }

        fn poll_msgs(
            &mut self,
            _ctx: &Context,
            tx: &Sender<Msg>,
            _timeout: Duration,
        ) -> Result<(), Box<dyn Error>> {
            if let Some(msg) = self.script.pop_front() {
                tx.send(msg).ok();
            }
            Ok(())
        }

        fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn Error>> {
            self.flushed.push(frame);
            Ok(())
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    /// Counts key presses, wants one tick right away, fails on 'f'.
    struct Counter {
        presses: i32,
        ticks: i32,
        deadline: Option<Instant>,
    }

    impl Model for Counter {
        fn update(&mut self, msg: Msg) -> Option<Effect> {
            match msg {
                Msg::KeyDown { key: Key::Char('q'), .. } => Some(Effect::End),
                Msg::KeyDown { key: Key::Char('f'), .. } => Some(Effect::Fail("boom".into())),
                Msg::KeyDown { .. } => {
                    self.presses += 1;
                    None
                }
                Msg::Tick { .. } => {
                    self.ticks += 1;
                    self.deadline = None;
                    None
                }
                _ => None,
            }
        }

        fn draw(&self, grid: &mut Grid) {
            let ch = char::from_digit(self.presses as u32, 10).unwrap_or('?');
            grid.set(Point::new(0, 0), Cell::painted(ch, Default::default()));
        }

        fn next_deadline(&self) -> Option<Instant> {
            self.deadline
        }
    }

    fn app(script: Vec<Msg>) -> App<Counter, ScriptDriver> {
        App::new(AppConfig {
            model: Counter {
                presses: 0,
                ticks: 0,
                deadline: Some(Instant::now()),
            },
            driver: ScriptDriver {
                script: script.into(),
                flushed: Vec::new(),
                closed: false,
            },
            width: 2,
            height: 1,
        })
    }

    #[test]
    fn run_updates_draws_and_stops_on_end() {
        let mut app = app(vec![
            Msg::key(Key::Char('a')),
            Msg::key(Key::Char('b')),
            Msg::key(Key::Char('q')),
        ]);
        app.run().unwrap();
        assert_eq!(app.model().presses, 2);
        assert_eq!(app.model().ticks, 1);
        assert!(app.driver.closed);
        // Frames only carry changed cells.
        let last = app.driver.flushed.last().unwrap();
        assert_eq!(last.cells.len(), 1);
        assert_eq!(last.cells[0].cell.ch, '2');
    }

    #[test]
    fn fail_effect_surfaces_as_error() {
        let mut app = app(vec![Msg::key(Key::Char('f'))]);
        let err = app.run().unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert!(app.driver.closed);
    }
}
