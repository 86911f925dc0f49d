//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, BackendConfig, BackendKind, LogFormat, LoggingConfig, ServerConfig,
    WorkbenchConfig,
};
