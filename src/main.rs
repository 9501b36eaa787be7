mod terminal_runtime;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use frame_snake::config::{ConfigError, GameConfig, default_config_path};
use frame_snake::input::{InputEvent, InputHandler};
use frame_snake::window::SnakeWindow;

use crate::terminal_runtime::{TerminalSession, install_panic_hook};

const LOG_FILTER_ENV: &str = "FRAME_SNAKE_LOG";

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to set up logging: {0}")]
    Logging(String),
}

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON settings file (defaults to the platform config directory).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Window width in cells, frame included.
    #[arg(long)]
    width: Option<u16>,
    /// Window height in cells, frame included.
    #[arg(long)]
    height: Option<u16>,
    /// Column of the window's top-left corner.
    #[arg(long)]
    x: Option<u16>,
    /// Row of the window's top-left corner.
    #[arg(long)]
    y: Option<u16>,
    /// Milliseconds between timer pulses.
    #[arg(long = "pulse-ms")]
    pulse_ms: Option<u64>,
    /// Seed for food placement.
    #[arg(long)]
    seed: Option<u64>,
    /// Write logs to this file.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn resolve_config(&self) -> Result<GameConfig, ConfigError> {
        let path = self.config.clone().unwrap_or_else(default_config_path);
        let mut config = GameConfig::load(&path)?;

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(x) = self.x {
            config.x = x;
        }
        if let Some(y) = self.y {
            config.y = y;
        }
        if let Some(pulse_ms) = self.pulse_ms {
            config.pulse_ms = pulse_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.resolve_config()?;
    info!(?config, "starting");

    install_panic_hook();
    run(&config)
}

fn init_logging(path: &Path) -> Result<(), AppError> {
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|error| AppError::Logging(error.to_string()))
}

fn run(config: &GameConfig) -> Result<(), AppError> {
    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let mut window = SnakeWindow::from_config(config);

    let pulse = Duration::from_millis(config.pulse_ms);
    let mut last_pulse = Instant::now();

    loop {
        session.draw(&window)?;

        let timeout = pulse.saturating_sub(last_pulse.elapsed());
        match input.poll(timeout)? {
            Some(InputEvent::Interrupt) => break,
            Some(InputEvent::Key(key)) => {
                if !window.handle_key(key) && key.is_quit() {
                    break;
                }
            }
            None => {}
        }

        if last_pulse.elapsed() >= pulse {
            window.tick();
            last_pulse = Instant::now();
        }
    }

    info!(score = window.game.score, "quitting");
    Ok(())
}
