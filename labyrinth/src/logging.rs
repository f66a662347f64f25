//! Log output for the binary.
//!
//! The library crates log through the `log` facade. The interactive UI owns
//! the terminal, so records only go somewhere when a log file is set.

use std::error::Error;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Install a subscriber writing to `path`, filtered by `RUST_LOG`
/// (default `info`). Does nothing without a path.
pub fn init(path: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| -> Box<dyn Error> { err })?;
    log::info!("logging to {}", path.display());
    Ok(())
}
