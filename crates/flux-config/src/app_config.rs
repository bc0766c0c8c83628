//! Application configuration
//!
//! Configuration loaded from .flux-counter.toml:
//!
//! ```toml
//! log_level = "debug"
//! initial_count = 10
//!
//! [store]
//! automatically_skips_repeats = false
//! ```

use anyhow::{Context, Result};
use flux_store::StoreOptions;
use serde::{Deserialize, Serialize};

/// Application configuration loaded from .flux-counter.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Log level used when RUST_LOG is not set (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Count the store starts with
    #[serde(default)]
    pub initial_count: i64,

    /// Store behavior
    #[serde(default)]
    pub store: StoreOptions,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            initial_count: 0,
            store: StoreOptions::default(),
        }
    }
}

impl AppConfig {
    /// Load config from the first config file found, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match Self::from_toml(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("{:#}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    /// The configured log level, `Info` if it is not a valid level name
    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
