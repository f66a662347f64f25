use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use labyrinth_core::{App, AppConfig};
use labyrinth_crossterm::CrosstermDriver;
use rand::SeedableRng;
use rand::rngs::StdRng;

use labyrinth_lib::{Cli, LabyrinthModel, Settings, headless, logging, screen_size};

/// Exit status of a headless run whose maze has no path.
const EXIT_NO_PATH: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            log::error!("{err}");
            eprintln!("labyrinth: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    cli.apply(&mut settings);
    settings.validate()?;
    logging::init(settings.log_file.as_deref())?;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    if cli.headless {
        let report = headless::run(&settings, &mut rng)?;
        print!("{}", report.grid);
        println!("{}", report.outcome);
        return Ok(if report.outcome.is_found() {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(EXIT_NO_PATH)
        });
    }

    let (width, height) = screen_size(&settings);
    let driver = CrosstermDriver::new().with_mouse(settings.mouse);
    let mut app = App::new(AppConfig {
        model: LabyrinthModel::new(&settings, rng),
        driver,
        width,
        height,
    });
    app.run()?;
    Ok(ExitCode::SUCCESS)
}
