//! Global tracing subscriber for binaries.

use std::io;
use std::path::PathBuf;
use std::sync::OnceLock;

use thiserror::Error;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{self, Rotation};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Where and how verbosely to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Filter directive used when `RUST_LOG` is unset, e.g. `"info"` or `"dehaze=debug"`.
    pub level: String,
    pub dir: PathBuf,
    /// Log files are named `<file_prefix>.<date>.log`.
    pub file_prefix: String,
    /// Rotated files kept on disk.
    pub max_files: usize,
}

impl LogSettings {
    pub fn new(level: &str, dir: impl Into<PathBuf>, file_prefix: &str) -> Self {
        Self {
            level: level.to_string(),
            dir: dir.into(),
            file_prefix: file_prefix.to_string(),
            ..Default::default()
        }
    }

    fn filter(&self) -> Result<EnvFilter, LogSetupError> {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .map_err(|source| LogSetupError::Filter {
                directive: self.level.clone(),
                source,
            })
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: PathBuf::from("logs"),
            file_prefix: "app".to_string(),
            max_files: 5,
        }
    }
}

#[derive(Debug, Error)]
pub enum LogSetupError {
    #[error("Invalid log filter '{directive}': {source}")]
    Filter {
        directive: String,
        #[source]
        source: ParseError,
    },

    #[error("Failed to create log directory '{}': {source}", .dir.display())]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create log file appender: {0}")]
    Appender(#[from] rolling::InitError),

    #[error("Logging already initialized")]
    AlreadyInitialized,

    #[error("Logger initialization failed: {0}")]
    Init(#[from] TryInitError),
}

/// Installs the global subscriber: console output (everything on stdout,
/// warnings and errors repeated on stderr) plus a daily rolling file in
/// `settings.dir`.
///
/// `RUST_LOG` overrides `settings.level` when set. Can succeed once per process.
pub fn setup_logging(settings: &LogSettings) -> Result<(), LogSetupError> {
    if LOG_GUARD.get().is_some() {
        return Err(LogSetupError::AlreadyInitialized);
    }

    let env_filter = settings.filter()?;

    std::fs::create_dir_all(&settings.dir).map_err(|source| LogSetupError::CreateDir {
        dir: settings.dir.clone(),
        source,
    })?;

    let file_appender = rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .filename_prefix(&settings.file_prefix)
        .filename_suffix("log")
        .max_log_files(settings.max_files.max(1))
        .build(&settings.dir)?;
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let console_writer = io::stdout.and(io::stderr.with_max_level(Level::WARN));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_ansi(true)
        .with_writer(console_writer);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(file_writer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    LOG_GUARD
        .set(guard)
        .map_err(|_| LogSetupError::AlreadyInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_default_retention() {
        let settings = LogSettings::new("debug", "out/logs", "dehaze");
        assert_eq!(settings.level, "debug");
        assert_eq!(settings.dir, PathBuf::from("out/logs"));
        assert_eq!(settings.file_prefix, "dehaze");
        assert_eq!(settings.max_files, LogSettings::default().max_files);
    }

    #[test]
    fn test_unwritable_log_dir_is_an_error() {
        // A regular file where the directory should go.
        let blocker = crate::test_utils::test_output_path("log_setup_blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let settings = LogSettings {
            dir: blocker.join("logs"),
            ..Default::default()
        };
        let err = setup_logging(&settings).unwrap_err();
        assert!(matches!(err, LogSetupError::CreateDir { .. }), "{}", err);
    }
}
