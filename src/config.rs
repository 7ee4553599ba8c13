//! Configuration for spatial game runs.
//!
//! Supports YAML configuration files with sensible defaults.

use crate::render::{Palette, DEFAULT_CELL_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Image output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Side length of each cell block in pixels
    pub cell_size: u32,
    /// Output image path
    pub output: PathBuf,
    /// Transition colours
    pub palette: Palette,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Generations between stats snapshots
    pub stats_interval: u64,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            output: PathBuf::from("Prisoners.png"),
            palette: Palette::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 10,
            log_level: "info".to_string(),
        }
    }
}

/// Errors that can occur while loading or saving configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render.cell_size == 0 || self.render.cell_size > 64 {
            return Err(ConfigError::Invalid(
                "render.cell_size must be between 1 and 64".to_string(),
            ));
        }
        if self.render.output.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("render.output must not be empty".to_string()));
        }
        if !self.render.palette.is_distinct() {
            return Err(ConfigError::Invalid(
                "render.palette colours must be distinct".to_string(),
            ));
        }
        if self.logging.stats_interval == 0 {
            return Err(ConfigError::Invalid(
                "logging.stats_interval must be > 0".to_string(),
            ));
        }
        if !LOG_LEVELS.contains(&self.logging.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "unknown logging.log_level {:?}",
                self.logging.log_level
            )));
        }
        Ok(())
    }
}
