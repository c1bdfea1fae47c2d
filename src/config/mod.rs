//! Application configuration

mod app_config;

pub use app_config::{
    AiConfig, AppConfig, AuthConfig, LogFormat, LoggingConfig, ServerConfig, UsageLogBackend,
    UsageLogConfig,
};
