//! Sensor configuration and its JSON file manager

use crate::core::{
    HeadingMode, DEFAULT_MAX_WAIT_SECONDS, DEFAULT_PERMISSION_POLL_INTERVAL_MS, METERS_PER_DEGREE,
    MOVEMENT_THRESHOLD,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Sensor facade configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Budget for the location hardware to leave `Initializing` (seconds)
    pub max_wait_seconds: u32,
    /// Heading mode a new manager starts with
    pub heading_mode: HeadingMode,
    /// Angular-rate change that counts as movement
    pub movement_threshold: f32,
    /// Flat-earth scale applied to coordinate deltas (meters per degree)
    pub meters_per_degree: f64,
    /// Delay between permission re-checks for the wall-clock driver (milliseconds)
    pub permission_poll_interval_ms: u64,
    /// Give up waiting for permission after this many scheduler ticks.
    /// `None` waits forever.
    pub permission_wait_limit: Option<u32>,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            max_wait_seconds: DEFAULT_MAX_WAIT_SECONDS,
            heading_mode: HeadingMode::True,
            movement_threshold: MOVEMENT_THRESHOLD,
            meters_per_degree: METERS_PER_DEGREE,
            permission_poll_interval_ms: DEFAULT_PERMISSION_POLL_INTERVAL_MS,
            permission_wait_limit: None,
        }
    }
}

impl SensorConfig {
    pub fn permission_poll_interval(&self) -> Duration {
        Duration::from_millis(self.permission_poll_interval_ms)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {parameter} = {value}: {reason}")]
    InvalidParameter { parameter: String, value: String, reason: String },
    #[error("failed to access config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to (de)serialize config: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("no file path set for saving configuration")]
    NoFilePath,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Owns the active configuration and its backing file
#[derive(Debug, Default)]
pub struct ConfigurationManager {
    config: SensorConfig,
    config_file_path: Option<String>,
    is_modified: bool,
}

impl ConfigurationManager {
    /// Create a configuration manager with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration manager and load from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    pub fn get_config(&self) -> &SensorConfig {
        &self.config
    }

    /// Replace the configuration after validating it
    pub fn update_config(&mut self, config: SensorConfig) -> ConfigResult<()> {
        validate_config(&config)?;
        self.config = config;
        self.is_modified = true;
        Ok(())
    }

    /// Load configuration from a JSON file. Missing fields take their defaults.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> ConfigResult<()> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path_str.clone(),
            source,
        })?;
        let config: SensorConfig = serde_json::from_str(&content)?;

        validate_config(&config)?;

        tracing::debug!(path = %path_str, "loaded sensor config");
        self.config = config;
        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> ConfigResult<()> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let content = serde_json::to_string_pretty(&self.config)?;

        fs::write(&path, content).map_err(|source| ConfigError::Io {
            path: path_str.clone(),
            source,
        })?;

        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save to the file the configuration was last loaded from or saved to
    pub fn save(&mut self) -> ConfigResult<()> {
        match self.config_file_path.clone() {
            Some(path) => self.save_to_file(path),
            None => Err(ConfigError::NoFilePath),
        }
    }

    /// Check if configuration has been modified since last load/save
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }
}

fn invalid(parameter: &str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::InvalidParameter {
        parameter: parameter.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Reject values the sensors cannot work with
pub fn validate_config(config: &SensorConfig) -> ConfigResult<()> {
    if !config.movement_threshold.is_finite() || config.movement_threshold <= 0.0 {
        return Err(invalid(
            "movement_threshold",
            config.movement_threshold,
            "must be a positive finite number",
        ));
    }
    if !config.meters_per_degree.is_finite() || config.meters_per_degree <= 0.0 {
        return Err(invalid(
            "meters_per_degree",
            config.meters_per_degree,
            "must be a positive finite number",
        ));
    }
    if config.permission_poll_interval_ms == 0 {
        return Err(invalid(
            "permission_poll_interval_ms",
            config.permission_poll_interval_ms,
            "must be at least 1ms",
        ));
    }
    if config.max_wait_seconds > 3600 {
        tracing::warn!(
            max_wait_seconds = config.max_wait_seconds,
            "very long location startup budget"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("sensor_facade_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_default_config() {
        let config = SensorConfig::default();
        assert_eq!(config.max_wait_seconds, 20);
        assert_eq!(config.heading_mode, HeadingMode::True);
        assert_eq!(config.movement_threshold, 0.1);
        assert_eq!(config.meters_per_degree, 111_000.0);
        assert!(config.permission_wait_limit.is_none());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_configuration_manager_creation() {
        let manager = ConfigurationManager::new();
        assert_eq!(manager.get_config(), &SensorConfig::default());
        assert!(!manager.is_modified());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut manager = ConfigurationManager::new();

        let config = SensorConfig { movement_threshold: -1.0, ..Default::default() };
        let err = manager.update_config(config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { ref parameter, .. } if parameter == "movement_threshold"));

        let config = SensorConfig { meters_per_degree: f64::NAN, ..Default::default() };
        assert!(manager.update_config(config).is_err());

        let config = SensorConfig { permission_poll_interval_ms: 0, ..Default::default() };
        assert!(manager.update_config(config).is_err());

        assert!(!manager.is_modified());
    }

    #[test]
    fn test_update_marks_modified() {
        let mut manager = ConfigurationManager::new();
        let config = SensorConfig { max_wait_seconds: 5, ..Default::default() };
        manager.update_config(config).unwrap();
        assert!(manager.is_modified());
        assert_eq!(manager.get_config().max_wait_seconds, 5);
    }

    #[test]
    fn test_config_file_round_trip() {
        let path = temp_path("round_trip");
        let mut manager = ConfigurationManager::new();
        manager
            .update_config(SensorConfig {
                heading_mode: HeadingMode::Magnetic,
                permission_wait_limit: Some(50),
                ..Default::default()
            })
            .unwrap();
        manager.save_to_file(&path).unwrap();
        assert!(!manager.is_modified());

        let loaded = ConfigurationManager::from_file(&path).unwrap();
        assert_eq!(loaded.get_config().heading_mode, HeadingMode::Magnetic);
        assert_eq!(loaded.get_config().permission_wait_limit, Some(50));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let path = temp_path("partial");
        fs::write(&path, r#"{ "max_wait_seconds": 3 }"#).unwrap();

        let manager = ConfigurationManager::from_file(&path).unwrap();
        assert_eq!(manager.get_config().max_wait_seconds, 3);
        assert_eq!(manager.get_config().movement_threshold, 0.1);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_errors() {
        let missing = temp_path("missing_file_does_not_exist");
        assert!(matches!(ConfigurationManager::from_file(&missing), Err(ConfigError::Io { .. })));

        let path = temp_path("garbage");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(ConfigurationManager::from_file(&path), Err(ConfigError::Serialization(_))));
        let _ = fs::remove_file(&path);

        let mut manager = ConfigurationManager::new();
        assert!(matches!(manager.save(), Err(ConfigError::NoFilePath)));
    }
}
