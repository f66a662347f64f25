//! **labyrinth-core**: grid-based terminal application framework (core types).
//!
//! This crate provides the foundational types used across the *labyrinth*
//! workspace: geometry primitives, styled display cells, a display grid with
//! frame diffing, input messages, a deadline timer queue, and the
//! Elm-architecture application loop.

pub mod app;
pub mod geom;
pub mod grid;
pub mod messages;
pub mod style;
pub mod timer;

pub use app::{App, AppConfig, Context, Driver, Effect, Model};
pub use geom::{Point, Range};
pub use grid::{Cell, Frame, FrameCell, Grid, compute_frame};
pub use messages::*;
pub use style::{AttrMask, Color, Style};
pub use timer::{TimerId, TimerQueue};
