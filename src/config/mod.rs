//! Command file loading

#[allow(clippy::module_inception)]
mod config;

pub use config::{default_config_path, CommandFile, ConfigFormat};
