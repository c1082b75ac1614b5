//! Session supervision
//!
//! The supervisor owns the set of sessions: one per configured server,
//! started once at startup and never reconfigured. Registry edits apply on
//! the next start, not to running sessions. There is no concurrency limit
//! and no per-session stop; sessions run until the remote stream ends or
//! the process exits.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use bw_core::{EventSink, ServerDefinition};

use crate::session::{SessionRunner, SessionState};

/// Handle to one running (or finished) session
pub struct SessionHandle {
    definition: ServerDefinition,
    sink: Arc<dyn EventSink>,
    state: Arc<Mutex<SessionState>>,
}

impl SessionHandle {
    /// The definition this session serves
    pub fn definition(&self) -> &ServerDefinition {
        &self.definition
    }

    /// The sink this session writes to
    pub fn sink(&self) -> &Arc<dyn EventSink> {
        &self.sink
    }

    /// Current lifecycle state
    pub async fn state(&self) -> SessionState {
        *self.state.lock().await
    }
}

/// Owns all sessions, one per server definition
pub struct Supervisor {
    /// Sessions indexed by server name
    sessions: DashMap<String, Arc<SessionHandle>>,
}

impl Supervisor {
    /// Create a supervisor with no sessions
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Start one session for `definition`, writing to `sink`.
    ///
    /// Returns the new handle, or `None` if a session with the same name
    /// already exists; the first session keeps the name.
    pub fn spawn(
        &self,
        definition: ServerDefinition,
        sink: Arc<dyn EventSink>,
    ) -> Option<Arc<SessionHandle>> {
        if self.sessions.contains_key(&definition.name) {
            tracing::warn!("Session {} already exists, skipping", definition.name);
            return None;
        }

        let runner = SessionRunner::new(definition.clone(), Arc::clone(&sink));
        let handle = Arc::new(SessionHandle {
            definition,
            sink,
            state: runner.state_cell(),
        });
        self.sessions
            .insert(handle.definition.name.clone(), Arc::clone(&handle));

        tokio::spawn(async move {
            // Failures are already reported on the session's own sink
            let _ = runner.run().await;
        });

        Some(handle)
    }

    /// Start one session per definition, in registry order.
    ///
    /// Each session gets a freshly created sink from `make_sink`. Returns
    /// the number of sessions started.
    pub fn start_all<F>(&self, servers: &[ServerDefinition], mut make_sink: F) -> usize
    where
        F: FnMut(&ServerDefinition) -> Arc<dyn EventSink>,
    {
        let mut started = 0;
        for server in servers {
            let sink = make_sink(server);
            if self.spawn(server.clone(), sink).is_some() {
                started += 1;
            }
        }
        started
    }

    /// Get a session by server name
    pub fn get(&self, name: &str) -> Option<Arc<SessionHandle>> {
        self.sessions.get(name).map(|r| Arc::clone(&r))
    }

    /// List all sessions
    pub fn list(&self) -> Vec<Arc<SessionHandle>> {
        self.sessions.iter().map(|r| Arc::clone(&r)).collect()
    }

    /// Number of sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Check if no sessions exist
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new()
    }
}
