//! Event sink contract
//!
//! A sink is the display destination for one session's classified events.
//! Each sink instance has exactly one writing session; implementations only
//! need to make `append` safe to call from that session's task.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::classify::LogEvent;

/// Destination for classified log events
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Deliver one classified event
    async fn append(&self, event: LogEvent);

    /// Full text of the buffer so far, one line per event
    async fn contents(&self) -> String;
}

/// In-memory sink: the simplest display buffer, also used as a test double
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<LogEvent>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events received so far
    pub async fn events(&self) -> Vec<LogEvent> {
        self.events.lock().await.clone()
    }
}

#[async_trait]
impl EventSink for MemorySink {
    async fn append(&self, event: LogEvent) {
        self.events.lock().await.push(event);
    }

    async fn contents(&self) -> String {
        let events = self.events.lock().await;
        let mut out = String::new();
        for event in events.iter() {
            out.push_str(&event.text);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;

    #[tokio::test]
    async fn test_append_keeps_order() {
        let sink = MemorySink::new();
        sink.append(classify("one".to_string())).await;
        sink.append(classify("Ban two".to_string())).await;

        let events = sink.events().await;
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].text, "one");
        assert!(!events[0].alert);
        assert_eq!(events[1].text, "Ban two");
        assert!(events[1].alert);
    }

    #[tokio::test]
    async fn test_contents_is_one_line_per_event() {
        let sink = MemorySink::new();
        sink.append(classify("one".to_string())).await;
        sink.append(classify("two".to_string())).await;
        assert_eq!(sink.contents().await, "one\ntwo\n");
    }

    #[tokio::test]
    async fn test_empty_contents() {
        let sink = MemorySink::new();
        assert_eq!(sink.contents().await, "");
    }
}
