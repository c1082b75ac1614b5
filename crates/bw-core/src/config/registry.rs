//! Persisted server registry
//!
//! The registry is an ordered JSON list of server definitions stored at a
//! fixed per-user location. A missing or malformed file reads as an empty
//! registry; only writes can fail.

use std::path::{Path, PathBuf};

use crate::config::server::ServerDefinition;
use crate::error::ConfigError;

/// Ordered collection of server definitions, tied to its backing file.
#[derive(Debug, Clone)]
pub struct Registry {
    path: PathBuf,
    servers: Vec<ServerDefinition>,
}

impl Registry {
    /// Load the registry from `path`.
    ///
    /// Absence or a parse failure yields an empty registry; corruption is
    /// reported in the log, never to the caller.
    pub fn load(path: &Path) -> Self {
        let servers = match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(servers) => servers,
                Err(e) => {
                    tracing::warn!("Malformed registry {}: {}", path.display(), e);
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };

        Self {
            path: path.to_path_buf(),
            servers,
        }
    }

    /// Registry backed by `path` with no entries. Does not touch the disk.
    pub fn empty(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            servers: Vec::new(),
        }
    }

    /// Ordered view of all definitions
    pub fn servers(&self) -> &[ServerDefinition] {
        &self.servers
    }

    /// Definition at `index`, if any
    pub fn get(&self, index: usize) -> Option<&ServerDefinition> {
        self.servers.get(index)
    }

    /// Number of definitions
    pub fn len(&self) -> usize {
        self.servers.len()
    }

    /// Check if the registry has no definitions
    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist the current sequence as pretty-printed JSON
    pub fn save(&self) -> Result<(), ConfigError> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(&self.servers)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Append a definition after validating it and checking name uniqueness
    pub fn add(&mut self, server: ServerDefinition) -> Result<(), ConfigError> {
        server.validate()?;
        if self.servers.iter().any(|s| s.name == server.name) {
            return Err(ConfigError::DuplicateName(server.name));
        }
        self.servers.push(server);
        Ok(())
    }

    /// Replace the definition at `index`.
    ///
    /// The new name must not collide with any other entry.
    pub fn update(&mut self, index: usize, server: ServerDefinition) -> Result<(), ConfigError> {
        if index >= self.servers.len() {
            return Err(ConfigError::IndexOutOfRange(index));
        }
        server.validate()?;
        if self
            .servers
            .iter()
            .enumerate()
            .any(|(i, s)| i != index && s.name == server.name)
        {
            return Err(ConfigError::DuplicateName(server.name));
        }
        self.servers[index] = server;
        Ok(())
    }

    /// Remove and return the definition at `index`, preserving the order of
    /// the rest.
    pub fn remove(&mut self, index: usize) -> Result<ServerDefinition, ConfigError> {
        if index >= self.servers.len() {
            return Err(ConfigError::IndexOutOfRange(index));
        }
        Ok(self.servers.remove(index))
    }
}
