//! Server registry and configuration paths

mod registry;
mod server;

pub use registry::Registry;
pub use server::{ServerDefinition, DEFAULT_KEY_PATH, DEFAULT_LOG_PATH, DEFAULT_USER};

use std::path::PathBuf;

/// Get the default configuration directory
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("banwatch")
}

/// Get the default registry file path
pub fn default_registry_path() -> PathBuf {
    default_config_dir().join("servers.json")
}
