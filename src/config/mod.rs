//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Dashboard behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Rows in each leaderboard
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,

    /// Flag image base URL; `<base>/<iso2>.png` is appended
    #[serde(default = "default_flag_cdn_base")]
    pub flag_cdn_base: String,

    #[serde(default = "default_session_idle_minutes")]
    pub session_idle_minutes: u64,

    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_leaderboard_size() -> usize {
    crate::calculate::LEADERBOARD_SIZE
}

fn default_flag_cdn_base() -> String {
    crate::lookup::DEFAULT_FLAG_CDN_BASE.to_string()
}

/// Upper bound for `session_idle_minutes` (one year).
pub const MAX_SESSION_IDLE_MINUTES: u64 = 525_600;

fn default_session_idle_minutes() -> u64 {
    60
}

fn default_max_sessions() -> usize {
    1000
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            leaderboard_size: default_leaderboard_size(),
            flag_cdn_base: default_flag_cdn_base(),
            session_idle_minutes: default_session_idle_minutes(),
            max_sessions: default_max_sessions(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the three CSV files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            server: ServerConfig::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`AppConfig::from_file`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            info!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.dashboard.leaderboard_size == 0 {
            return Err(ConfigError::ValidationError(
                "Leaderboard size must be greater than 0".to_string(),
            ));
        }

        if self.dashboard.max_sessions == 0 {
            return Err(ConfigError::ValidationError(
                "max_sessions must be greater than 0".to_string(),
            ));
        }

        if !(1..=MAX_SESSION_IDLE_MINUTES).contains(&self.dashboard.session_idle_minutes) {
            return Err(ConfigError::ValidationError(format!(
                "session_idle_minutes must be between 1 and {}, got {}",
                MAX_SESSION_IDLE_MINUTES, self.dashboard.session_idle_minutes
            )));
        }

        if !self.dashboard.flag_cdn_base.starts_with("http") {
            return Err(ConfigError::ValidationError(format!(
                "flag_cdn_base must be an http(s) URL, got '{}'",
                self.dashboard.flag_cdn_base
            )));
        }

        Ok(())
    }
}
