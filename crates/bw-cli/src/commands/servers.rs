//! Registry management commands

use std::path::Path;

use anyhow::Result;

use bw_core::config::{DEFAULT_KEY_PATH, DEFAULT_LOG_PATH, DEFAULT_USER};
use bw_core::{Registry, ServerDefinition};

use crate::output::{format_servers, print_success, print_warning};

/// Execute the list command
pub fn list_command(registry_path: &Path) -> Result<()> {
    let registry = Registry::load(registry_path);
    println!("{}", format_servers(registry.servers()));
    Ok(())
}

/// Execute the add command
pub fn add_command(
    registry_path: &Path,
    name: String,
    host: String,
    user: Option<String>,
    path: Option<String>,
    key: Option<String>,
) -> Result<()> {
    let mut registry = Registry::load(registry_path);

    let server = ServerDefinition {
        name,
        host,
        user: user.unwrap_or_else(|| DEFAULT_USER.to_string()),
        path: path.unwrap_or_else(|| DEFAULT_LOG_PATH.to_string()),
        key: key.unwrap_or_else(|| DEFAULT_KEY_PATH.to_string()),
    };
    let label = server.to_string();

    registry.add(server)?;
    registry.save()?;

    print_success(&format!("Added {label}"));
    Ok(())
}

/// Execute the edit command
pub fn edit_command(
    registry_path: &Path,
    index: usize,
    name: Option<String>,
    host: Option<String>,
    user: Option<String>,
    path: Option<String>,
    key: Option<String>,
) -> Result<()> {
    let mut registry = Registry::load(registry_path);

    let mut server = registry
        .get(index)
        .ok_or_else(|| anyhow::anyhow!("No server at index {index}"))?
        .clone();
    if let Some(name) = name {
        server.name = name;
    }
    if let Some(host) = host {
        server.host = host;
    }
    if let Some(user) = user {
        server.user = user;
    }
    if let Some(path) = path {
        server.path = path;
    }
    if let Some(key) = key {
        server.key = key;
    }
    let label = server.to_string();

    registry.update(index, server)?;
    registry.save()?;

    print_success(&format!("Updated {label}"));
    print_warning("Running watchers keep the old definition; restart to apply");
    Ok(())
}

/// Execute the remove command
pub fn remove_command(registry_path: &Path, index: usize) -> Result<()> {
    let mut registry = Registry::load(registry_path);

    let removed = registry.remove(index)?;
    registry.save()?;

    print_success(&format!("Removed {removed}"));
    Ok(())
}

/// Execute the path command
pub fn path_command(registry_path: &Path) -> Result<()> {
    println!("{}", registry_path.display());
    Ok(())
}
