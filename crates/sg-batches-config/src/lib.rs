//! Configuration and file management for sg-batches-tui
//!
//! This crate provides:
//! - Configuration file loading (TOML, CWD then home directory)
//! - Application configuration (AppConfig)
//! - Cache directory paths for log files

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::AppConfig;
pub use config_file::load_config_file;
pub use paths::cache_dir;
