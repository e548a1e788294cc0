use std::fs::{self, File};
use std::io;
use std::path::Path;

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

/// Routes `log` output to `path`; stdout belongs to the terminal UI.
///
/// Creates the parent directory when needed and truncates an existing log.
pub fn init(path: &Path, level: LevelFilter) -> io::Result<()> {
    if level == LevelFilter::Off {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_location_level(LevelFilter::Debug)
        .build();

    WriteLogger::init(level, config, File::create(path)?).map_err(io::Error::other)
}
