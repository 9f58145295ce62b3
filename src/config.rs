//! Run configuration, loadable from a JSON file or assembled from
//! command-line flags.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{animations, backends, filters};

fn default_animation() -> String {
    "life".to_owned()
}

fn default_backend() -> String {
    "term".to_owned()
}

fn default_console_lines() -> usize {
    4
}

fn default_headless_cols() -> usize {
    80
}

fn default_headless_rows() -> usize {
    24
}

/// Top-level playback configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Animation registry name.
    #[serde(default = "default_animation")]
    pub animation: String,
    /// Backend registry name.
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Optional filter registry name.
    #[serde(default)]
    pub filter: Option<String>,
    /// Target frame rate override. Negative plays backward; when absent
    /// the animation's default rate is used.
    #[serde(default)]
    pub fps: Option<f64>,
    /// Console overlay height in lines.
    #[serde(default = "default_console_lines")]
    pub console_lines: usize,
    /// Grid width for the headless backend.
    #[serde(default = "default_headless_cols")]
    pub cols: usize,
    /// Grid height for the headless backend.
    #[serde(default = "default_headless_rows")]
    pub rows: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            animation: default_animation(),
            backend: default_backend(),
            filter: None,
            fps: None,
            console_lines: default_console_lines(),
            cols: default_headless_cols(),
            rows: default_headless_rows(),
        }
    }
}

impl RunConfig {
    /// Load and validate a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the registry names and numeric ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !animations::NAMES.contains(&self.animation.as_str()) {
            return Err(ConfigError::UnknownAnimation(self.animation.clone()));
        }
        if !backends::NAMES.contains(&self.backend.as_str()) {
            return Err(ConfigError::UnknownBackend(self.backend.clone()));
        }
        if let Some(filter) = &self.filter {
            if !filters::NAMES.contains(&filter.as_str()) {
                return Err(ConfigError::UnknownFilter(filter.clone()));
            }
        }
        if self.cols == 0 || self.rows == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown animation '{0}'")]
    UnknownAnimation(String),
    #[error("unknown backend '{0}'")]
    UnknownBackend(String),
    #[error("unknown filter '{0}'")]
    UnknownFilter(String),
    #[error("grid dimensions must be non-zero")]
    InvalidDimensions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        RunConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: RunConfig =
            serde_json::from_str(r#"{"animation": "fire", "fps": -12.5}"#).unwrap();
        config.validate().unwrap();

        assert_eq!(config.animation, "fire");
        assert_eq!(config.fps, Some(-12.5));
        assert_eq!(config.backend, "term");
        assert_eq!(config.console_lines, 4);
    }

    #[test]
    fn test_unknown_names_are_rejected() {
        let mut config = RunConfig::default();
        config.animation = "plasma".to_owned();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownAnimation(_))
        ));

        let mut config = RunConfig::default();
        config.filter = Some("sharpen".to_owned());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownFilter(_))
        ));
    }

    #[test]
    fn test_zero_grid_is_rejected() {
        let mut config = RunConfig::default();
        config.cols = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimensions)
        ));
    }
}
