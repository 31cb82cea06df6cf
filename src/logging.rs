//! File logging.
//!
//! The TUI owns the terminal, so log lines go to `~/.daybook/daybook.log`.
//! The logger starts before the config file is read (so config loading can
//! log) and the configured level is applied once it is known.

use std::fs::{self, File};
use std::path::Path;

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

use crate::core::config::{DEFAULT_LOG_LEVEL, LOG_FILE_NAME};

/// Start logging into `<config_dir>/daybook.log` at the default level.
///
/// Returns `false` if the file could not be created or a logger is already
/// installed; the application then runs without logging.
pub fn init(config_dir: &Path) -> bool {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    let _ = fs::create_dir_all(config_dir);
    let Ok(log_file) = File::create(config_dir.join(LOG_FILE_NAME)) else {
        return false;
    };
    // Accept everything here; `set_level` does the filtering
    if WriteLogger::init(LevelFilter::Trace, log_config, log_file).is_err() {
        return false;
    }
    set_level(DEFAULT_LOG_LEVEL);
    true
}

/// Apply the level from the resolved config.
pub fn set_level(level: LevelFilter) {
    log::set_max_level(level);
}
