//! Configuration file support.
//!
//! Settings live in an INI file at `~/.kmlfit/config.ini`:
//!
//! ```ini
//! [fit]
//! pad_factor = 1.5
//! single_point_range = 1000
//! aspect_ratio =
//!
//! [logging]
//! level = info
//! file =
//! ```
//!
//! Missing files and missing keys fall back to defaults. Every value read from
//! disk goes through the same validation as `kmlfit config set`.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;
use tracing::debug;

use crate::fit::{FitConfig, DEFAULT_ASPECT_RATIO, DEFAULT_PAD_FACTOR, DEFAULT_SINGLE_POINT_RANGE};

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while reading or changing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read or parsed.
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    /// The file could not be written.
    #[error("failed to write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value failed validation.
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    /// No such `section.key`.
    #[error("unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Log levels accepted by `[logging] level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// `[fit]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct FitSettings {
    pub pad_factor: f64,
    pub single_point_range: f64,
    /// Viewport aspect ratio used when none is given on the command line.
    pub aspect_ratio: Option<f64>,
}

impl Default for FitSettings {
    fn default() -> Self {
        Self {
            pad_factor: DEFAULT_PAD_FACTOR,
            single_point_range: DEFAULT_SINGLE_POINT_RANGE,
            aspect_ratio: None,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub level: String,
    /// Log to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub fit: FitSettings,
    pub logging: LoggingSettings,
}

/// Directory holding the configuration file.
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".kmlfit")
}

/// Path of the configuration file.
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.ini")
}

impl ConfigFile {
    /// Load the configuration from the default path.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> ConfigResult<Self> {
        let path = config_file_path();
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load the configuration from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let ini = Ini::load_from_file(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ini(&ini)
    }

    /// Build a configuration from parsed INI data.
    pub fn from_ini(ini: &Ini) -> ConfigResult<Self> {
        let mut config = Self::default();
        for key in ConfigKey::all() {
            if let Some(value) = ini.get_from(Some(key.section()), key.key_name()) {
                key.set(&mut config, value)?;
            }
        }
        Ok(config)
    }

    /// The configuration as INI data.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            ini.with_section(Some(key.section()))
                .set(key.key_name(), key.get(self));
        }
        ini
    }

    /// Save the configuration to the default path.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&config_file_path())
    }

    /// Save the configuration to a specific file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        self.to_ini().write_to_file(path).map_err(write_err)
    }

    /// Fit constants described by the `[fit]` section.
    pub fn fit_config(&self) -> FitConfig {
        FitConfig::default()
            .with_pad_factor(self.fit.pad_factor)
            .with_single_point_range(self.fit.single_point_range)
            .with_default_aspect_ratio(self.fit.aspect_ratio.unwrap_or(DEFAULT_ASPECT_RATIO))
    }
}

/// A settable configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    FitPadFactor,
    FitSinglePointRange,
    FitAspectRatio,
    LoggingLevel,
    LoggingFile,
}

impl ConfigKey {
    /// Every key, in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::FitPadFactor,
            ConfigKey::FitSinglePointRange,
            ConfigKey::FitAspectRatio,
            ConfigKey::LoggingLevel,
            ConfigKey::LoggingFile,
        ]
    }

    /// Full `section.key` name.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::FitPadFactor => "fit.pad_factor",
            ConfigKey::FitSinglePointRange => "fit.single_point_range",
            ConfigKey::FitAspectRatio => "fit.aspect_ratio",
            ConfigKey::LoggingLevel => "logging.level",
            ConfigKey::LoggingFile => "logging.file",
        }
    }

    /// INI section name.
    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::FitPadFactor | ConfigKey::FitSinglePointRange | ConfigKey::FitAspectRatio => {
                "fit"
            }
            ConfigKey::LoggingLevel | ConfigKey::LoggingFile => "logging",
        }
    }

    /// Key name within the section.
    pub fn key_name(&self) -> &'static str {
        let name = self.name();
        &name[self.section().len() + 1..]
    }

    /// Current value as a string; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::FitPadFactor => config.fit.pad_factor.to_string(),
            ConfigKey::FitSinglePointRange => config.fit.single_point_range.to_string(),
            ConfigKey::FitAspectRatio => config
                .fit
                .aspect_ratio
                .map(|r| r.to_string())
                .unwrap_or_default(),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
            ConfigKey::LoggingFile => config
                .logging
                .file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        }
    }

    /// Validate `value` and store it.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> ConfigResult<()> {
        let value = value.trim();
        match self {
            ConfigKey::FitPadFactor => config.fit.pad_factor = self.parse_positive(value)?,
            ConfigKey::FitSinglePointRange => {
                config.fit.single_point_range = self.parse_positive(value)?
            }
            ConfigKey::FitAspectRatio => {
                config.fit.aspect_ratio = if value.is_empty() {
                    None
                } else {
                    Some(self.parse_positive(value)?)
                }
            }
            ConfigKey::LoggingLevel => {
                let level = value.to_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(self.invalid(format!(
                        "expected one of {}, got '{}'",
                        LOG_LEVELS.join(", "),
                        value
                    )));
                }
                config.logging.level = level;
            }
            ConfigKey::LoggingFile => {
                config.logging.file = (!value.is_empty()).then(|| PathBuf::from(value));
            }
        }
        Ok(())
    }

    fn parse_positive(&self, value: &str) -> ConfigResult<f64> {
        let parsed: f64 = value
            .parse()
            .map_err(|_| self.invalid(format!("'{}' is not a number", value)))?;
        if !parsed.is_finite() || parsed <= 0.0 {
            return Err(self.invalid(format!("must be a positive number, got {}", value)));
        }
        Ok(parsed)
    }

    fn invalid(&self, reason: String) -> ConfigError {
        ConfigError::InvalidValue {
            key: self.name(),
            reason,
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == s)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}
