//! Core error types for banwatch

use thiserror::Error;

/// Registry and configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Server definition failed validation
    #[error("Invalid server definition: {0}")]
    Invalid(String),

    /// Another definition already uses this name
    #[error("Duplicate server name: {0}")]
    DuplicateName(String),

    /// Index does not refer to a registry entry
    #[error("No server at index {0}")]
    IndexOutOfRange(usize),

    /// JSON serialize error
    #[error("JSON serialize error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// I/O error while writing the registry
    #[error("Registry write failed: {0}")]
    Write(#[from] std::io::Error),
}
