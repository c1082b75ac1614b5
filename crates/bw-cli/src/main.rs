//! banwatch CLI
//!
//! Watches the fail2ban log of every configured server over SSH, one
//! session per server, and prints classified lines as they arrive. The
//! registry commands manage the persisted server list; edits apply on the
//! next start of the watcher.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use banwatch::commands;
use bw_core::config;

#[derive(Parser)]
#[command(name = "banwatch")]
#[command(author, version, about = "Concurrent fail2ban log monitor over SSH")]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the server registry (defaults to the per-user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream classified log lines from every configured server
    Watch {
        /// Directory to write per-server log snapshots into on exit
        #[arg(long)]
        save_dir: Option<PathBuf>,
    },

    /// List configured servers
    List,

    /// Add a server to the registry
    Add {
        /// Unique display name
        #[arg(long)]
        name: String,
        /// Hostname or address of the remote machine
        #[arg(long)]
        host: String,
        /// Remote account (default: adam)
        #[arg(long)]
        user: Option<String>,
        /// Remote log file path (default: /var/log/fail2ban.log)
        #[arg(long)]
        path: Option<String>,
        /// Private key path (default: ~/.ssh/id_rsa)
        #[arg(long)]
        key: Option<String>,
    },

    /// Edit the server at the given index
    Edit {
        /// Registry index shown by `list`
        index: usize,
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New hostname or address
        #[arg(long)]
        host: Option<String>,
        /// New remote account
        #[arg(long)]
        user: Option<String>,
        /// New remote log file path
        #[arg(long)]
        path: Option<String>,
        /// New private key path
        #[arg(long)]
        key: Option<String>,
    },

    /// Remove the server at the given index
    Remove {
        /// Registry index shown by `list`
        index: usize,
    },

    /// Show the registry file location
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let registry_path = cli
        .config
        .clone()
        .unwrap_or_else(config::default_registry_path);

    match cli.command.unwrap_or(Commands::Watch { save_dir: None }) {
        Commands::Watch { save_dir } => commands::watch_command(&registry_path, save_dir).await,
        Commands::List => commands::list_command(&registry_path),
        Commands::Add {
            name,
            host,
            user,
            path,
            key,
        } => commands::add_command(&registry_path, name, host, user, path, key),
        Commands::Edit {
            index,
            name,
            host,
            user,
            path,
            key,
        } => commands::edit_command(&registry_path, index, name, host, user, path, key),
        Commands::Remove { index } => commands::remove_command(&registry_path, index),
        Commands::Path => commands::path_command(&registry_path),
    }
}
