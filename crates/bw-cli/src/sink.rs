//! Terminal sink
//!
//! Each session gets one `ForwardSink`. Events are buffered locally for
//! the shutdown snapshot and forwarded to the single printer task, so
//! terminal state is never touched from a session task.

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};

use bw_core::{EventSink, LogEvent};

/// A classified event tagged with the server it came from
#[derive(Debug, Clone)]
pub struct TaggedEvent {
    /// Server name the event belongs to
    pub server: String,
    /// The classified line
    pub event: LogEvent,
}

/// Per-server sink that buffers lines and forwards them to the printer
pub struct ForwardSink {
    server: String,
    tx: mpsc::UnboundedSender<TaggedEvent>,
    buffer: Mutex<String>,
}

impl ForwardSink {
    /// Create a sink for `server`, forwarding into `tx`
    pub fn new(server: impl Into<String>, tx: mpsc::UnboundedSender<TaggedEvent>) -> Self {
        Self {
            server: server.into(),
            tx,
            buffer: Mutex::new(String::new()),
        }
    }
}

#[async_trait]
impl EventSink for ForwardSink {
    async fn append(&self, event: LogEvent) {
        {
            let mut buffer = self.buffer.lock().await;
            buffer.push_str(&event.text);
            buffer.push('\n');
        }
        // A gone receiver means shutdown is in progress; drop the event
        let _ = self.tx.send(TaggedEvent {
            server: self.server.clone(),
            event,
        });
    }

    async fn contents(&self) -> String {
        self.buffer.lock().await.clone()
    }
}
