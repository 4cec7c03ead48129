use std::io;

use gridmaze_core::GenerationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error; {0}")]
    Io(#[from] io::Error),
    #[error("Invalid settings file; {0}")]
    Settings(#[from] ron::error::SpannedError),
    #[error("Could not serialize settings; {0}")]
    SettingsWrite(#[from] ron::Error),
    #[error("Unknown maze preset `{0}`")]
    UnknownPreset(String),
    #[error("Maze generation failed; {0}")]
    Generation(#[from] GenerationError),
    #[error("Logger already set")]
    Logger(log::SetLoggerError),
}
