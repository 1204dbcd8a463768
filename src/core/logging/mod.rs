//=========================================================================
// Logging
//=========================================================================
//
// Installs the process-wide `log` backend.
//
// Targets:
//   File   → AsyncLogger (bounded queue + worker thread), returns LogGuard
//   Stderr → env_logger, initialized once
//
// Call early in `main` and keep the guard alive until shutdown.
//
//=========================================================================

//=== Module Declarations =================================================

mod async_logger;

//=== Public API ==========================================================

pub use async_logger::{AsyncLogger, LogGuard};

//=== External Dependencies ===============================================

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::str::FromStr;

use log::LevelFilter;
use thiserror::Error;

//=== LogTarget ===========================================================

/// Where log records are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogTarget {
    /// Asynchronous file logger.
    #[default]
    File,

    /// Synchronous `env_logger` on stderr.
    Stderr,
}

impl FromStr for LogTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "stderr" => Ok(Self::Stderr),
            other => Err(format!("unknown log target '{}'", other)),
        }
    }
}

//=== LoggingConfig =======================================================

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub target: LogTarget,
    pub level: LevelFilter,
    /// Log file, truncated on every run. Only used by [`LogTarget::File`].
    pub file: PathBuf,
    /// Maximum records queued for the worker thread.
    pub queue_capacity: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            target: LogTarget::File,
            level: LevelFilter::Debug,
            file: PathBuf::from("logs/app.log"),
            queue_capacity: 1024,
        }
    }
}

//=== LoggingError ========================================================

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("cannot open log file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot start log worker: {0}")]
    Spawn(#[source] io::Error),

    #[error("a global logger is already installed")]
    AlreadySet(#[from] log::SetLoggerError),
}

//=== Initialization ======================================================

/// Installs the global logger described by `config`.
///
/// Returns a [`LogGuard`] for the file target; dropping it flushes and
/// stops the worker. The stderr target needs no guard.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<LogGuard>, LoggingError> {
    match config.target {
        LogTarget::File => init_file(config).map(Some),
        LogTarget::Stderr => init_stderr(config).map(|()| None),
    }
}

fn init_file(config: &LoggingConfig) -> Result<LogGuard, LoggingError> {
    let open_err = |source| LoggingError::Open {
        path: config.file.clone(),
        source,
    };

    if let Some(parent) = config.file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(open_err)?;
    }
    let file = File::create(&config.file).map_err(open_err)?;

    let (logger, guard) =
        AsyncLogger::spawn(config.level, config.queue_capacity, BufWriter::new(file))
            .map_err(LoggingError::Spawn)?;

    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(config.level);

    log::debug!("File logging initialized at {}", config.file.display());
    Ok(guard)
}

fn init_stderr(config: &LoggingConfig) -> Result<(), LoggingError> {
    let mut builder = env_logger::Builder::new();

    if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else {
        builder.filter_level(config.level);
    }

    builder.try_init()?;

    log::debug!("Stderr logging initialized");
    Ok(())
}

//=========================================================================
// Test Support
//=========================================================================


//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_targets_case_insensitively() {
        assert_eq!("file".parse::<LogTarget>(), Ok(LogTarget::File));
        assert_eq!("STDERR".parse::<LogTarget>(), Ok(LogTarget::Stderr));
        assert!("syslog".parse::<LogTarget>().is_err());
    }

    #[test]
    fn defaults_write_debug_to_app_log() {
        let config = LoggingConfig::default();
        assert_eq!(config.target, LogTarget::File);
        assert_eq!(config.level, LevelFilter::Debug);
        assert_eq!(config.file, PathBuf::from("logs/app.log"));
        assert_eq!(config.queue_capacity, 1024);
    }

    #[test]
    fn unwritable_log_path_is_reported() {
        let dir = tempfile::TempDir::new().unwrap();
        // A directory cannot be opened as the log file.
        let config = LoggingConfig {
            file: dir.path().to_path_buf(),
            ..LoggingConfig::default()
        };

        assert!(matches!(init_logging(&config), Err(LoggingError::Open { .. })));
    }
}
