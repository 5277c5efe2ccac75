//! Application configuration
//!
//! Layered configuration loaded from optional files and `BANTER__`-prefixed
//! environment variables, with working defaults when neither is present.

mod app_config;

pub use app_config::{AppConfig, LogFormat, LoggingConfig};
