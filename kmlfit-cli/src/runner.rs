//! Shared startup for commands that process documents.

use kmlfit::config::{config_file_path, ConfigFile};
use kmlfit::logging::{init_logging, LoggingGuard};
use tracing::info;

use crate::error::CliError;

/// Loads configuration and installs logging before a command runs.
pub struct CliRunner {
    config: ConfigFile,
    _logging: LoggingGuard,
}

impl CliRunner {
    /// Load the config file and start logging.
    pub fn new(verbose: bool) -> Result<Self, CliError> {
        let config = ConfigFile::load()?;
        let logging = init_logging(&config.logging, verbose)?;
        Ok(Self {
            config,
            _logging: logging,
        })
    }

    /// The loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log the command being run and where its settings came from.
    pub fn log_startup(&self, command: &str) {
        info!(
            command,
            version = env!("CARGO_PKG_VERSION"),
            config = %config_file_path().display(),
            "kmlfit starting"
        );
    }
}
