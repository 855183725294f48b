//! Startup configuration for the window shell.
//!
//! The config object is built once in `main` and handed to the app
//! constructor; nothing reads configuration ambiently after startup.

use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const DEFAULT_WIDTH: u32 = 1280;
pub const DEFAULT_HEIGHT: u32 = 800;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub resolution: Resolution,
}

/// Initial canvas size in pixels.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Resolution {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load `path`, falling back to built-in defaults when the file is
    /// absent or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "config not loaded, using defaults"
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_missing() {
        let config = AppConfig::load_or_default(Path::new("/nonexistent/aquaflow.yaml"));
        assert_eq!(config.resolution.width, DEFAULT_WIDTH);
        assert_eq!(config.resolution.height, DEFAULT_HEIGHT);
    }

    #[test]
    fn parses_resolution() {
        let path = std::env::temp_dir().join("aq_core_config_test.yaml");
        std::fs::write(&path, "resolution:\n  width: 1024\n  height: 768\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.resolution.width, 1024);
        assert_eq!(config.resolution.height, 768);
    }

    #[test]
    fn partial_resolution_fills_defaults() {
        let path = std::env::temp_dir().join("aq_core_config_partial.yaml");
        std::fs::write(&path, "resolution:\n  width: 640\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.resolution.width, 640);
        assert_eq!(config.resolution.height, DEFAULT_HEIGHT);
    }
}
