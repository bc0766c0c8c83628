//! Configuration for flux-store applications
//!
//! This crate provides:
//! - Config directory paths
//! - Configuration file discovery (TOML)
//! - Application configuration (AppConfig), including the store options

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::AppConfig;
pub use config_file::load_config_file;
