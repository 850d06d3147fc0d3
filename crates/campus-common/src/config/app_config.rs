//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use campus_core::OrphanPolicy;
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub toggle: ToggleConfig,
    pub comments: CommentConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Optimistic toggle settings
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleConfig {
    /// Abandon a toggle request after this many milliseconds; unset waits forever
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

impl ToggleConfig {
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            timeout_ms: None,
            event_capacity: default_event_capacity(),
        }
    }
}

/// Comment threading settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentConfig {
    #[serde(default)]
    pub orphan_policy: OrphanPolicy,
}

// Default value functions
fn default_app_name() -> String {
    "campus".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_event_capacity() -> usize {
    256
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_or(
                    &lookup,
                    "DATABASE_MAX_CONNECTIONS",
                    default_max_connections,
                )?,
                min_connections: parse_or(
                    &lookup,
                    "DATABASE_MIN_CONNECTIONS",
                    default_min_connections,
                )?,
            },
            toggle: ToggleConfig {
                timeout_ms: lookup("TOGGLE_TIMEOUT_MS")
                    .map(|s| {
                        s.parse()
                            .map_err(|_| ConfigError::InvalidValue("TOGGLE_TIMEOUT_MS", s))
                    })
                    .transpose()?,
                event_capacity: parse_or(&lookup, "TOGGLE_EVENT_CAPACITY", default_event_capacity)?,
            },
            comments: CommentConfig {
                orphan_policy: lookup("COMMENT_ORPHAN_POLICY")
                    .map(|s| {
                        s.parse()
                            .map_err(|_| ConfigError::InvalidValue("COMMENT_ORPHAN_POLICY", s))
                    })
                    .transpose()?
                    .unwrap_or_default(),
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: fn() -> T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default()),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
