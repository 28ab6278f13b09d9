//! Application configuration.
//!
//! Loaded once at startup from a TOML file
//! (`~/.config/beifi-dashboard/config.toml` by default) with environment
//! variable overrides, and never mutated afterwards.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default signing secret used outside production. Unsafe for any real
/// deployment; production mode refuses to start with it.
pub const DEV_JWT_SECRET: &str = "beifi-demo-secret-change-in-production";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
    pub project: ProjectConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Token signing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Signing secret for session tokens. Required when `production` is set;
    /// otherwise falls back to [`DEV_JWT_SECRET`] with a warning.
    pub jwt_secret: Option<String>,
    /// Session token lifetime in hours.
    pub jwt_expiration_hours: i64,
    /// Production mode. Disables the dev secret fallback and detailed errors.
    pub production: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            jwt_expiration_hours: 8,
            production: false,
        }
    }
}

/// Cross-origin settings for the dashboard frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins. `["*"]` allows any origin (demo default).
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "dashboard_api=debug").
    pub level: String,
    /// Output format: "plain" or "json".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "plain".to_string(),
        }
    }
}

/// Project identification returned by the public demo dashboard.
///
/// Sample data; deployments substitute their own institution details.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub institution: String,
    pub center: String,
    pub director: String,
    pub project: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            institution: "Beifi Institute of Technology".to_string(),
            center: "Smart City Research Center".to_string(),
            director: "Dr. Wei Chen".to_string(),
            project: "Beifi Smart City Dashboard".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file and apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: AppConfig =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides, for when no config file exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            if !secret.is_empty() {
                self.security.jwt_secret = Some(secret);
            }
        }
        if let Ok(origins) = std::env::var("ALLOWED_ORIGINS") {
            self.cors.allowed_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
    }

    /// Reject configurations that must not reach production: a production
    /// deployment without an explicit signing secret fails startup instead
    /// of silently falling back to the dev default.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.production && self.security.jwt_secret.is_none() {
            return Err(ConfigError::Invalid(
                "security.jwt_secret is required in production mode".to_string(),
            ));
        }
        if self.security.jwt_expiration_hours <= 0 {
            return Err(ConfigError::Invalid(
                "security.jwt_expiration_hours must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Effective signing secret: the configured one, or the dev fallback.
    pub fn jwt_secret(&self) -> &str {
        self.security
            .jwt_secret
            .as_deref()
            .unwrap_or(DEV_JWT_SECRET)
    }
}

/// Default config file location: `~/.config/beifi-dashboard/config.toml`.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("beifi-dashboard")
        .join("config.toml")
}
