//! Labyrinth: paint a maze in the terminal and watch breadth-first search
//! solve it.

pub mod canvas;
pub mod cli;
pub mod clock;
pub mod config;
pub mod headless;
pub mod logging;
pub mod model;
pub mod palette;

pub use canvas::Canvas;
pub use cli::Cli;
pub use config::{ConfigError, Settings};
pub use model::{LabyrinthModel, screen_size};
