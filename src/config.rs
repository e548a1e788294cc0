use std::path::PathBuf;
use std::time::Duration;

use log::LevelFilter;
use ratatui::style::Color;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Creates a grid size, raising zero dimensions to one cell.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Default board width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 30;

/// Default board height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Default number of segments a fresh snake starts with.
pub const DEFAULT_START_LENGTH: u16 = 4;

/// Default interval between simulation steps in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 130;

/// Points granted for each food eaten.
pub const FOOD_REWARD: u32 = 10;

/// Longest accepted username, in characters.
pub const MAX_USERNAME_CHARS: usize = 20;

/// Interval between growth-effect animation frames.
pub const EFFECT_FRAME_INTERVAL: Duration = Duration::from_millis(40);

/// Number of frames a growth effect lives for.
pub const EFFECT_FRAME_COUNT: u8 = 8;

/// Frames during which a growth effect also shows sparkles.
pub const EFFECT_SPARKLE_FRAMES: u8 = 5;

const APP_DIR_NAME: &str = "grid-snake";
const SCORE_FILE_NAME: &str = "users.json";
const LOG_FILE_NAME: &str = "grid-snake.log";

/// Color palette for the board and overlays.
#[derive(Debug)]
pub struct Palette {
    pub grass_light: Color,
    pub grass_dark: Color,
    pub snake_head: Color,
    pub snake_body_start: Color,
    pub snake_body_end: Color,
    pub food: Color,
    pub border: Color,
    pub score: Color,
    pub muted: Color,
    pub danger: Color,
    /// Ring colors indexed by effect frame.
    pub effect: [Color; EFFECT_FRAME_COUNT as usize],
    pub sparkle: Color,
}

pub const PALETTE: Palette = Palette {
    grass_light: Color::Rgb(0x2a, 0x5e, 0x2a),
    grass_dark: Color::Rgb(0x27, 0x62, 0x27),
    snake_head: Color::Rgb(0x78, 0x36, 0xe2),
    snake_body_start: Color::Rgb(0x78, 0x36, 0xe2),
    snake_body_end: Color::Rgb(0x49, 0x23, 0x86),
    food: Color::Rgb(0xef, 0x44, 0x44),
    border: Color::Rgb(0x0f, 0x34, 0x60),
    score: Color::Rgb(0x00, 0xd4, 0xaa),
    muted: Color::Rgb(0x6b, 0x72, 0x80),
    danger: Color::Rgb(0xef, 0x44, 0x44),
    effect: [
        Color::Rgb(0xfe, 0xf0, 0x8a),
        Color::Rgb(0xfd, 0xe0, 0x47),
        Color::Rgb(0xfa, 0xcc, 0x15),
        Color::Rgb(0xea, 0xb3, 0x08),
        Color::Rgb(0xca, 0x8a, 0x04),
        Color::Rgb(0xa1, 0x62, 0x07),
        Color::Rgb(0x85, 0x4d, 0x0e),
        Color::Rgb(0x71, 0x3f, 0x12),
    ],
    sparkle: Color::Rgb(0xfe, 0xf0, 0x8a),
};

/// Glyph drawn for food.
pub const GLYPH_FOOD: &str = "●";

/// Head glyphs by heading.
pub const GLYPH_SNAKE_HEAD_UP: &str = "▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶";

/// Glyph drawn for growth-effect rings and sparkles.
pub const GLYPH_EFFECT_RING: &str = "·";
pub const GLYPH_EFFECT_SPARKLE: &str = "*";

/// Runtime settings resolved from the command line.
#[derive(Debug, Clone)]
pub struct Settings {
    pub grid: GridSize,
    pub start_length: u16,
    pub tick_interval: Duration,
    pub seed: Option<u64>,
    pub scores_path: PathBuf,
    pub log_path: PathBuf,
    pub log_level: LevelFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridSize::new(DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT),
            start_length: DEFAULT_START_LENGTH,
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            seed: None,
            scores_path: default_scores_path(),
            log_path: default_log_path(),
            log_level: LevelFilter::Info,
        }
    }
}

/// Returns the platform-correct directory for persisted game data.
#[must_use]
pub fn data_dir() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base
}

/// Returns the default user/high-score store path.
#[must_use]
pub fn default_scores_path() -> PathBuf {
    data_dir().join(SCORE_FILE_NAME)
}

/// Returns the default log file path.
#[must_use]
pub fn default_log_path() -> PathBuf {
    data_dir().join(LOG_FILE_NAME)
}
