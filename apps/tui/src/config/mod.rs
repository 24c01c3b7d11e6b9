// Configuration module for radioactive-tui
// Environment-driven settings, with CLI overrides applied as env vars

mod config;

pub use config::{init_app_config, AppConfig, DEFAULT_MODEL};
