//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, CommentConfig, ConfigError, DatabaseConfig, Environment,
    ToggleConfig,
};
