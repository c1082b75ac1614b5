//! CLI command implementations

mod servers;
mod watch;

pub use servers::{add_command, edit_command, list_command, path_command, remove_command};
pub use watch::watch_command;
