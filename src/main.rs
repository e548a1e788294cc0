use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::app::App;
use grid_snake::config::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_START_LENGTH, DEFAULT_TICK_INTERVAL_MS,
    EFFECT_FRAME_INTERVAL, GridSize, Settings, default_log_path, default_scores_path,
};
use grid_snake::game::GridSimulation;
use grid_snake::input::poll_input;
use grid_snake::logging;
use grid_snake::renderer;
use grid_snake::score::{JsonFileBackend, ScoreStore};
use grid_snake::terminal_runtime::{TerminalGuard, install_panic_hook};
use log::{LevelFilter, info};

const FRAME_POLL_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Board width in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_WIDTH, value_parser = clap::value_parser!(u16).range(1..))]
    width: u16,

    /// Board height in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_HEIGHT, value_parser = clap::value_parser!(u16).range(1..))]
    height: u16,

    /// Segments the snake starts with.
    #[arg(long, default_value_t = DEFAULT_START_LENGTH, value_parser = clap::value_parser!(u16).range(1..))]
    start_length: u16,

    /// Milliseconds between simulation steps.
    #[arg(long, default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_ms: u64,

    /// Seed for food placement, for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,

    /// Path of the player/high-score file.
    #[arg(long)]
    scores_file: Option<PathBuf>,

    /// Path of the log file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log verbosity: off, error, warn, info, debug or trace.
    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

impl Cli {
    fn into_settings(self) -> Settings {
        Settings {
            grid: GridSize::new(self.width, self.height),
            start_length: self.start_length,
            tick_interval: Duration::from_millis(self.tick_ms.max(1)),
            seed: self.seed,
            scores_path: self.scores_file.unwrap_or_else(default_scores_path),
            log_path: self.log_file.unwrap_or_else(default_log_path),
            log_level: self.log_level,
        }
    }
}

fn main() -> io::Result<()> {
    let settings = Cli::parse().into_settings();

    // Must happen before raw mode so the warning stays readable.
    if let Err(error) = logging::init(&settings.log_path, settings.log_level) {
        eprintln!(
            "Logging disabled, could not open {}: {error}",
            settings.log_path.display()
        );
    }
    info!("starting with {settings:?}");

    install_panic_hook();
    run(&settings)
}

fn run(settings: &Settings) -> io::Result<()> {
    let simulation = match settings.seed {
        Some(seed) => GridSimulation::new_with_seed(settings.grid, settings.start_length, seed),
        None => GridSimulation::new(settings.grid, settings.start_length),
    };
    let store = ScoreStore::new(JsonFileBackend::new(&settings.scores_path));
    let mut app = App::new(simulation, store);

    let mut terminal = TerminalGuard::enter()?;
    let mut last_tick = Instant::now();
    let mut last_effect_frame = Instant::now();

    while !app.should_quit() {
        terminal.draw(|frame| renderer::render(frame, &app))?;

        if let Some(input) = poll_input(FRAME_POLL_INTERVAL, app.input_mode())? {
            app.handle_input(input);
        }

        if last_tick.elapsed() >= settings.tick_interval {
            app.tick();
            last_tick = Instant::now();
        }

        if last_effect_frame.elapsed() >= EFFECT_FRAME_INTERVAL {
            app.advance_effects();
            last_effect_frame = Instant::now();
        }
    }

    info!("quitting");
    Ok(())
}
