//! Server definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Remote account used when a definition does not name one.
pub const DEFAULT_USER: &str = "adam";

/// Log file tailed when a definition does not name one.
pub const DEFAULT_LOG_PATH: &str = "/var/log/fail2ban.log";

/// Private key used when a definition does not name one.
pub const DEFAULT_KEY_PATH: &str = "~/.ssh/id_rsa";

/// One monitored host: identity plus connection parameters.
///
/// A definition is immutable once a session has started against it.
/// Registry edits only take effect on the next start of the watcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDefinition {
    /// Unique display name, used as the registry key
    pub name: String,

    /// Hostname or address of the remote machine
    pub host: String,

    /// Remote account for key-based authentication
    #[serde(default = "default_user")]
    pub user: String,

    /// Absolute path of the remote log file to tail
    #[serde(default = "default_log_path")]
    pub path: String,

    /// Local path of the private key credential
    #[serde(default = "default_key_path")]
    pub key: String,
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

fn default_log_path() -> String {
    DEFAULT_LOG_PATH.to_string()
}

fn default_key_path() -> String {
    DEFAULT_KEY_PATH.to_string()
}

impl ServerDefinition {
    /// Create a definition for `name`/`host` with default user, log path
    /// and key.
    pub fn new(name: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            user: default_user(),
            path: default_log_path(),
            key: default_key_path(),
        }
    }

    /// Check the fields that must be present before a session can start
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("name must not be empty".to_string()));
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }
        Ok(())
    }

    /// Private key path with a leading `~` expanded to the home directory
    pub fn key_path(&self) -> PathBuf {
        expand_home(&self.key)
    }
}

impl fmt::Display for ServerDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.host)
    }
}

/// Expand a leading `~` against the user's home directory
fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
