//! # Engine Configuration
//!
//! Everything the engine needs at construction time.
//! Defaults match a long-running generator writing `binary_codes.json`
//! in the working directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from building or validating an [`EngineConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("checkpoint interval must be greater than zero")]
    ZeroCheckpointInterval,

    #[error("progress interval must be greater than zero")]
    ZeroProgressInterval,

    #[error("storage location must not be empty")]
    EmptyStorageLocation,

    #[error("cannot read configuration file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration for a prime generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum verdicts held by the recency cache (0 disables caching)
    pub cache_capacity: usize,

    /// Emitted results between persistence flushes
    pub checkpoint_interval: u64,

    /// Emitted results between progress log lines
    pub progress_interval: u64,

    /// First candidate to test
    pub starting_position: u64,

    /// Stop after this many primes (None = run until cancelled)
    pub max_results: Option<u64>,

    /// Path of the persisted registry and statistics
    pub storage_location: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 10_000,
            checkpoint_interval: 1_000,
            progress_interval: 100,
            starting_position: 1,
            max_results: None,
            storage_location: PathBuf::from("binary_codes.json"),
        }
    }
}

impl EngineConfig {
    /// Create a config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the recency cache capacity
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Set the checkpoint interval
    pub fn with_checkpoint_interval(mut self, interval: u64) -> Self {
        self.checkpoint_interval = interval;
        self
    }

    /// Set the progress log interval
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Set the first candidate
    pub fn with_starting_position(mut self, start: u64) -> Self {
        self.starting_position = start;
        self
    }

    /// Cap the number of emitted primes
    pub fn with_max_results(mut self, max: u64) -> Self {
        self.max_results = Some(max);
        self
    }

    /// Set where state is persisted
    pub fn with_storage_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_location = path.into();
        self
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> ConfigResult<()> {
        if self.checkpoint_interval == 0 {
            return Err(ConfigError::ZeroCheckpointInterval);
        }
        if self.progress_interval == 0 {
            return Err(ConfigError::ZeroProgressInterval);
        }
        if self.storage_location.as_os_str().is_empty() {
            return Err(ConfigError::EmptyStorageLocation);
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cache_capacity, 10_000);
        assert_eq!(config.checkpoint_interval, 1_000);
        assert_eq!(config.max_results, None);
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new()
            .with_cache_capacity(0)
            .with_checkpoint_interval(2)
            .with_starting_position(10)
            .with_max_results(3)
            .with_storage_location("state.json");

        assert_eq!(config.cache_capacity, 0);
        assert_eq!(config.checkpoint_interval, 2);
        assert_eq!(config.starting_position, 10);
        assert_eq!(config.max_results, Some(3));
        assert_eq!(config.storage_location, PathBuf::from("state.json"));
    }

    #[test]
    fn test_zero_intervals_rejected() {
        let config = EngineConfig::new().with_checkpoint_interval(0);
        assert!(matches!(config.validate(), Err(ConfigError::ZeroCheckpointInterval)));

        let config = EngineConfig::new().with_progress_interval(0);
        assert!(matches!(config.validate(), Err(ConfigError::ZeroProgressInterval)));
    }

    #[test]
    fn test_empty_storage_rejected() {
        let config = EngineConfig::new().with_storage_location("");
        assert!(matches!(config.validate(), Err(ConfigError::EmptyStorageLocation)));
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            EngineConfig::from_json_str(r#"{"cache_capacity": 64, "max_results": 5}"#).unwrap();

        assert_eq!(config.cache_capacity, 64);
        assert_eq!(config.max_results, Some(5));
        assert_eq!(config.checkpoint_interval, 1_000);
    }

    #[test]
    fn test_from_json_rejects_negative_capacity() {
        let result = EngineConfig::from_json_str(r#"{"cache_capacity": -1}"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_json_missing_file() {
        let result = EngineConfig::from_json_file("/nonexistent/engine.json");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
