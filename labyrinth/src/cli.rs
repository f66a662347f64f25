//! Command-line flags.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;

/// Paint a maze in the terminal and watch breadth-first search solve it.
#[derive(Parser, Debug)]
#[command(name = "labyrinth", version, about)]
pub struct Cli {
    /// TOML settings file (defaults to ./labyrinth.toml when present).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Maze width in cells.
    #[arg(long)]
    pub width: Option<i32>,
    /// Maze height in cells.
    #[arg(long)]
    pub height: Option<i32>,
    /// Pause between search steps, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,
    /// Do not capture the mouse.
    #[arg(long)]
    pub no_mouse: bool,
    /// Write logs to this file.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
    /// Solve a generated maze without a terminal UI and print it.
    #[arg(long)]
    pub headless: bool,
    /// Wall density for headless mode (defaults to the configured density).
    #[arg(long, value_name = "DENSITY", requires = "headless")]
    pub walls: Option<f64>,
    /// Seed for random walls.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    /// Overlay the flags that were given onto `settings`.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(delay_ms) = self.delay_ms {
            settings.delay_ms = delay_ms;
        }
        if self.no_mouse {
            settings.mouse = false;
        }
        if let Some(path) = &self.log_file {
            settings.log_file = Some(path.clone());
        }
        if let Some(density) = self.walls {
            settings.wall_density = density;
        }
    }
}
