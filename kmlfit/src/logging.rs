//! Logging setup.
//!
//! Installs a `tracing` subscriber writing to stderr, or to a file when
//! `[logging] file` is set. The filter is chosen in this order:
//!
//! 1. `RUST_LOG`, when set and valid
//! 2. `debug`, when verbose output was requested
//! 3. `[logging] level`

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Errors that can occur while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter '{directive}': {reason}")]
    InvalidFilter { directive: String, reason: String },

    /// The log file path has no file name.
    #[error("log file path has no file name: {}", .0.display())]
    InvalidPath(PathBuf),

    /// The log directory could not be created.
    #[error("failed to create log directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A global subscriber is already installed.
    #[error("failed to install subscriber: {0}")]
    Install(String),
}

/// Keeps the file writer flushing until dropped.
///
/// Hold this for the lifetime of the program; logs buffered for a file may be
/// lost if it is dropped early.
#[derive(Debug)]
pub struct LoggingGuard {
    _worker: Option<WorkerGuard>,
}

/// Filter directive implied by the settings, ignoring `RUST_LOG`.
pub fn filter_directive(settings: &LoggingSettings, verbose: bool) -> String {
    if verbose {
        "debug".to_string()
    } else {
        settings.level.clone()
    }
}

/// Install the global subscriber.
pub fn init_logging(settings: &LoggingSettings, verbose: bool) -> Result<LoggingGuard, LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directive = filter_directive(settings, verbose);
            EnvFilter::try_new(&directive).map_err(|e| LoggingError::InvalidFilter {
                directive,
                reason: e.to_string(),
            })?
        }
    };

    match &settings.file {
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init()
                .map_err(|e| LoggingError::Install(e.to_string()))?;
            Ok(LoggingGuard { _worker: None })
        }
        Some(path) => {
            let (dir, file_name) = split_log_path(path)?;
            fs::create_dir_all(&dir).map_err(|source| LoggingError::CreateDir {
                path: dir.clone(),
                source,
            })?;

            let appender = tracing_appender::rolling::never(&dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init()
                .map_err(|e| LoggingError::Install(e.to_string()))?;
            Ok(LoggingGuard {
                _worker: Some(guard),
            })
        }
    }
}

/// Split a log file path into its directory and file name.
fn split_log_path(path: &Path) -> Result<(PathBuf, PathBuf), LoggingError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| LoggingError::InvalidPath(path.to_path_buf()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, PathBuf::from(file_name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        let settings = LoggingSettings {
            level: "warn".to_string(),
            file: None,
        };
        assert_eq!(filter_directive(&settings, false), "warn");
        assert_eq!(filter_directive(&settings, true), "debug");
    }

    #[test]
    fn test_split_log_path() {
        let (dir, name) = split_log_path(Path::new("/var/log/kmlfit.log")).unwrap();
        assert_eq!(dir, PathBuf::from("/var/log"));
        assert_eq!(name, PathBuf::from("kmlfit.log"));

        let (dir, name) = split_log_path(Path::new("kmlfit.log")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, PathBuf::from("kmlfit.log"));
    }

    #[test]
    fn test_split_log_path_rejects_directory_like_path() {
        let err = split_log_path(Path::new("/")).unwrap_err();
        assert!(matches!(err, LoggingError::InvalidPath(_)));
    }
}
