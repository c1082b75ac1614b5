//! Watch command: run the streaming core against every configured server

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use bw_core::{export, EventSink, Registry};
use bw_monitor::Supervisor;

use crate::output::{print_event, print_info, print_warning};
use crate::sink::{ForwardSink, TaggedEvent};

/// Execute the watch command.
///
/// Starts one session per registry entry and prints classified lines as
/// they arrive, until Ctrl-C. With `save_dir` set, each server's buffer is
/// snapshotted into that directory before returning.
pub async fn watch_command(registry_path: &Path, save_dir: Option<PathBuf>) -> Result<()> {
    let registry = Registry::load(registry_path);
    tracing::debug!(
        "Loaded {} server definition(s) from {}",
        registry.len(),
        registry_path.display()
    );
    if registry.is_empty() {
        print_warning(&format!(
            "No servers configured; add one with `banwatch add` (registry: {})",
            registry_path.display()
        ));
        return Ok(());
    }

    let (tx, mut rx) = mpsc::unbounded_channel::<TaggedEvent>();
    let supervisor = Supervisor::new();
    let started = supervisor.start_all(registry.servers(), |server| {
        Arc::new(ForwardSink::new(&server.name, tx.clone())) as Arc<dyn EventSink>
    });
    drop(tx);

    print_info(&format!("Watching {started} server(s); Ctrl-C to stop"));

    loop {
        tokio::select! {
            received = rx.recv() => match received {
                Some(tagged) => print_event(&tagged.server, &tagged.event),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }

    if let Some(dir) = save_dir {
        save_snapshots(&supervisor, &dir).await?;
    }

    Ok(())
}

/// Write each session's buffer to `<dir>/fail2ban_<name>.txt`
async fn save_snapshots(supervisor: &Supervisor, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    for handle in supervisor.list() {
        let name = &handle.definition().name;
        let contents = handle.sink().contents().await;
        let path = dir.join(format!("fail2ban_{name}.txt"));
        export::write_snapshot(&path, &contents)
            .with_context(|| format!("Failed to save {}", path.display()))?;
        print_info(&format!("Saved {}", path.display()));
    }

    Ok(())
}
