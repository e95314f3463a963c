//! CLI configuration loading and merging.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default service endpoint when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// CLI configuration structure.
///
/// Configuration precedence:
/// 1. CLI arguments (handled by clap)
/// 2. Environment variables (`WAYPOINT_API_BASE`, `WAYPOINT_LOG_LEVEL`)
/// 3. Local config file (`./.waypointrc`)
/// 4. Global config file (`~/.waypoint/config.toml`)
/// 5. Defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaypointConfig {
    /// Base URL of the generation service.
    #[serde(default)]
    pub api_base: Option<String>,

    /// Log level
    #[serde(default)]
    pub log_level: Option<String>,
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(String),

    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(String),
}

impl WaypointConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))
    }

    /// Get default global configuration file path.
    pub fn default_global_path() -> PathBuf {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(".waypoint")
            .join("config.toml")
    }

    /// Get default local configuration file path.
    pub fn default_local_path() -> PathBuf {
        PathBuf::from(".waypointrc")
    }

    /// Discover and load configuration with standard precedence.
    pub fn discover_and_load() -> Self {
        let mut config = Self::default();

        if let Ok(global) = Self::load_from_file(&Self::default_global_path()) {
            config.merge(global);
        }
        if let Ok(local) = Self::load_from_file(&Self::default_local_path()) {
            config.merge(local);
        }

        if let Ok(api_base) = std::env::var("WAYPOINT_API_BASE") {
            config.api_base = Some(api_base);
        }
        if let Ok(log_level) = std::env::var("WAYPOINT_LOG_LEVEL") {
            config.log_level = Some(log_level);
        }

        config
    }

    /// The service endpoint to use, falling back to the default.
    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    /// Overlays `other`'s set fields onto `self`.
    fn merge(&mut self, other: Self) {
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
    }
}
