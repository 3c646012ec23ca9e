use crate::config::LogConfig;
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::path::PathBuf;
use thiserror::Error;

/// Start writing log messages to the file named in `cfg`.  Messages cannot go
/// to the terminal, as that is occupied by the game.
///
/// Returns the path of the log file, or `None` if logging is disabled.
pub(crate) fn init(cfg: &LogConfig) -> Result<Option<PathBuf>, LogError> {
    if cfg.level == LevelFilter::Off {
        return Ok(None);
    }
    let path = cfg.log_file().ok_or(LogError::NoPath)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).map_err(LogError::Mkdir)?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(LogError::Open)?;
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    WriteLogger::init(cfg.level, config, file)?;
    Ok(Some(path))
}

#[derive(Debug, Error)]
pub(crate) enum LogError {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to create log directory")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to open log file")]
    Open(#[source] std::io::Error),
    #[error("failed to install logger")]
    Install(#[from] log::SetLoggerError),
}
