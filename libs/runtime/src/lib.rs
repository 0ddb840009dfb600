//! Shared runtime pieces for the time-tracker server: layered configuration
//! loading and tracing initialization.

pub mod config;
pub mod logging;

pub use config::{
    AppConfig, AppInfo, CliArgs, DatabaseConfig, LoggingConfig, ServerConfig,
};
