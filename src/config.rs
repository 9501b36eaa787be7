use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Window size in cells, border included.
///
/// The playable interior is the open rectangle `[1, width - 2] × [1, height - 2]`;
/// the outermost ring belongs to the window frame.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the number of playable cells inside the frame.
    #[must_use]
    pub fn interior_cells(self) -> u32 {
        u32::from(self.width.saturating_sub(2)) * u32::from(self.height.saturating_sub(2))
    }

    /// Rightmost playable column.
    #[must_use]
    pub fn max_x(self) -> i32 {
        i32::from(self.width) - 2
    }

    /// Bottom playable row.
    #[must_use]
    pub fn max_y(self) -> i32 {
        i32::from(self.height) - 2
    }
}

/// Ticks per move right after a restart.
pub const INITIAL_SPEED: u32 = 40;

/// Ticks-per-move removed for each food eaten.
pub const SPEED_STEP: u32 = 5;

/// Fastest allowed speed, in ticks per move.
pub const MIN_SPEED: u32 = 5;

pub const GLYPH_HEAD: char = '*';
pub const GLYPH_BODY: char = '+';
pub const GLYPH_FOOD: char = 'O';

/// Head cell of a freshly reset snake; the body trails to the left of it.
pub const INITIAL_HEAD: (i32, i32) = (5, 2);

/// Number of segments of a freshly reset snake.
pub const INITIAL_LENGTH: i32 = 3;

/// Smallest window whose interior still holds the initial body.
pub const MIN_WINDOW_WIDTH: u16 = 7;
pub const MIN_WINDOW_HEIGHT: u16 = 4;

const APP_DIR_NAME: &str = "frame-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Failures while loading or validating [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(
        "window {width}x{height} is too small, need at least {}x{}",
        MIN_WINDOW_WIDTH,
        MIN_WINDOW_HEIGHT
    )]
    WindowTooSmall { width: u16, height: u16 },
    #[error("timer pulse must be at least 1 ms")]
    ZeroPulse,
}

/// Session settings, read from JSON and overridable from the command line.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    /// Column of the window's top-left corner.
    pub x: u16,
    /// Row of the window's top-left corner. Row `y - 1` carries the score line.
    pub y: u16,
    /// Interval between timer pulses.
    pub pulse_ms: u64,
    /// Fixed RNG seed for reproducible food placement.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 20,
            x: 2,
            y: 2,
            pulse_ms: 10,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Loads settings from `path`.
    ///
    /// A missing file yields the defaults; a file that exists but cannot be
    /// read or parsed is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks that the settings describe a playable session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_WINDOW_WIDTH || self.height < MIN_WINDOW_HEIGHT {
            return Err(ConfigError::WindowTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.pulse_ms == 0 {
            return Err(ConfigError::ZeroPulse);
        }
        Ok(())
    }

    #[must_use]
    pub fn grid_size(&self) -> GridSize {
        GridSize {
            width: self.width,
            height: self.height,
        }
    }
}

/// Returns the platform-correct default config file path.
#[must_use]
pub fn default_config_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    base
}
