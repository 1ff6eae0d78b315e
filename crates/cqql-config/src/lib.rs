//! Configuration management for CQQL projects.
//!
//! This crate handles discovering `.cqql/` directories, loading
//! `.cqql/config.yaml` (layered with `CQQL_*` environment variables) and
//! writing it back.

pub mod config;
pub mod config_dir;

pub use config::{ConfigError, CqqlConfig, load_config, load_with_defaults, save_config};
pub use config_dir::{ensure_config_dir, find_config_dir, find_config_dir_or_error};
