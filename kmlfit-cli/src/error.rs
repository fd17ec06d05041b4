//! CLI error type.

use std::fmt;
use std::path::PathBuf;

use kmlfit::catalog::CatalogError;
use kmlfit::config::ConfigError;
use kmlfit::document::DocumentError;
use kmlfit::logging::LoggingError;

/// Errors reported by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Configuration could not be loaded, validated or saved.
    Config(String),
    /// Logging could not be set up.
    Logging(LoggingError),
    /// An input document could not be loaded.
    Document(DocumentError),
    /// A catalog could not be built.
    Catalog(CatalogError),
    /// The document holds nothing to frame.
    NoCoordinates(PathBuf),
    /// Output could not be produced or written.
    Output(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Logging(e) => write!(f, "Logging error: {}", e),
            CliError::Document(e) => write!(f, "{}", e),
            CliError::Catalog(e) => write!(f, "{}", e),
            CliError::NoCoordinates(path) => write!(
                f,
                "{} has no coordinates and no authored view to frame",
                path.display()
            ),
            CliError::Output(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Logging(e) => Some(e),
            CliError::Document(e) => Some(e),
            CliError::Catalog(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e)
    }
}

impl From<DocumentError> for CliError {
    fn from(e: DocumentError) -> Self {
        CliError::Document(e)
    }
}

impl From<CatalogError> for CliError {
    fn from(e: CatalogError) -> Self {
        CliError::Catalog(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Output(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message() {
        let err: CliError = ConfigError::UnknownKey("fit.zoom".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: unknown configuration key: fit.zoom"
        );
    }

    #[test]
    fn test_no_coordinates_message() {
        let err = CliError::NoCoordinates(PathBuf::from("empty.json"));
        assert!(err.to_string().starts_with("empty.json has no coordinates"));
    }
}
