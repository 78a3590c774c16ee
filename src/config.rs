//! User-tunable settings, read from `config.json` in the platform config
//! directory. Every field is optional in the file.

use crate::constants::{DEFAULT_MAX_LABEL_LEN, DEFAULT_REVEAL_RADIUS, DEFAULT_THROTTLE_DELAY_MS};
use crate::paths::AppPaths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggerConfig {
    /// Pointer distance, in image pixels, within which a tag is revealed.
    pub reveal_radius: f32,
    /// Minimum time between two proximity checks while the pointer moves.
    pub throttle_delay_ms: u64,
    /// Longest label accepted, in characters.
    pub max_label_len: usize,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            reveal_radius: DEFAULT_REVEAL_RADIUS,
            throttle_delay_ms: DEFAULT_THROTTLE_DELAY_MS,
            max_label_len: DEFAULT_MAX_LABEL_LEN,
        }
    }
}

impl TaggerConfig {
    /// Loads the config file if there is one. Problems are logged and the
    /// defaults are used instead; a bad config never stops the app.
    pub fn load(paths: Option<&AppPaths>) -> Self {
        let Some(paths) = paths else {
            log::warn!("No config directory available, using default settings");
            return Self::default();
        };

        let path = paths.config_file();
        if !path.exists() {
            log::debug!("{} not found, using default settings", path.display());
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => {
                log::info!("Loaded settings from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if !self.reveal_radius.is_finite() || self.reveal_radius <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "reveal_radius must be a positive number, got {}",
                self.reveal_radius
            )));
        }
        if self.throttle_delay_ms == 0 {
            return Err(ConfigError::Invalid(
                "throttle_delay_ms must be greater than zero".to_owned(),
            ));
        }
        if self.max_label_len == 0 {
            return Err(ConfigError::Invalid(
                "max_label_len must be greater than zero".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn throttle_delay(&self) -> Duration {
        Duration::from_millis(self.throttle_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TaggerConfig::default();
        assert_eq!(config.reveal_radius, 70.0);
        assert_eq!(config.throttle_delay(), Duration::from_millis(1000));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = TaggerConfig::from_json(r#"{ "reveal_radius": 40 }"#);
        assert!(matches!(
            config,
            Ok(TaggerConfig {
                reveal_radius,
                throttle_delay_ms: 1000,
                ..
            }) if reveal_radius == 40.0
        ));
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            TaggerConfig::from_json(r#"{ "reveal_radius": -1 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            TaggerConfig::from_json(r#"{ "throttle_delay_ms": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            TaggerConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("image-tagger-missing-config.json");
        assert!(matches!(
            TaggerConfig::from_file(&path),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let paths = AppPaths {
            config: std::env::temp_dir().join("image-tagger-no-such-dir"),
        };
        assert_eq!(TaggerConfig::load(Some(&paths)), TaggerConfig::default());
        assert_eq!(TaggerConfig::load(None), TaggerConfig::default());
    }
}
