use std::{
    io::{self, Write as _},
    sync::{OnceLock, RwLock},
};

use colored::{ColoredString, Colorize as _};
use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::error::AppError;

static LOGGER: OnceLock<AppLogger> = OnceLock::new();

pub fn get_logger() -> &'static AppLogger {
    LOGGER.get_or_init(|| AppLogger::new(LevelFilter::Warn))
}

/// Installs the logger, `verbosity` is the number of `-v` flags.
pub fn init(verbosity: u8) -> Result<(), AppError> {
    let logger = get_logger();
    logger.set_min_level(level_from_verbosity(verbosity));

    log::set_logger(logger).map_err(AppError::Logger)?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}

pub fn level_from_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Writes records to stderr, one per line.
pub struct AppLogger {
    min_level: RwLock<LevelFilter>,
}

impl AppLogger {
    fn new(min_level: LevelFilter) -> Self {
        Self {
            min_level: RwLock::new(min_level),
        }
    }

    pub fn min_level(&self) -> LevelFilter {
        self.min_level
            .read()
            .map(|level| *level)
            .unwrap_or(LevelFilter::Warn)
    }

    pub fn set_min_level(&self, level: LevelFilter) {
        if let Ok(mut min_level) = self.min_level.write() {
            *min_level = level;
        }
    }

    pub fn format(record: &Record) -> String {
        format!(
            "[{} {}] {}",
            paint_level(record.level()),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    }
}

fn paint_level(level: Level) -> ColoredString {
    let name = format!("{:<5}", level);
    match level {
        Level::Error => name.red().bold(),
        Level::Warn => name.yellow(),
        Level::Info => name.green(),
        Level::Debug => name.blue(),
        Level::Trace => name.dimmed(),
    }
}

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(io::stderr().lock(), "{}", Self::format(record));
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}
