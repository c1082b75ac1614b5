//! SSH tail session
//!
//! A session runner owns one authenticated connection to one server, runs
//! a single `tail -f` over the configured log file, and streams its output
//! into the session's sink until the remote end goes away. There is no
//! reconnect and no timeout: a failed session reports once on its own sink
//! and stops.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use russh::client::{self, Config};
use russh_keys::key::PublicKey;
use thiserror::Error;
use tokio::io::BufReader;
use tokio::sync::Mutex;

use bw_core::{EventSink, LogEvent, ServerDefinition};

use crate::stream::forward_lines;

/// Number of historical lines requested when a session attaches
pub const TAIL_BACKLOG_LINES: usize = 500;

/// Definitions carry no port field; every connection uses the SSH default.
const SSH_PORT: u16 = 22;

/// Errors that end a session
#[derive(Debug, Error)]
pub enum SessionError {
    /// Private key file not found
    #[error("Private key not found at {path}")]
    KeyNotFound { path: PathBuf },

    /// Private key could not be loaded
    #[error("Failed to load private key {path}: {source}")]
    KeyInvalid {
        path: PathBuf,
        #[source]
        source: russh_keys::Error,
    },

    /// TCP/SSH connection could not be established
    #[error("Failed to connect to {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: russh::Error,
    },

    /// Authentication handshake failed
    #[error("Authentication failed for {user}@{host}: {source}")]
    Auth {
        user: String,
        host: String,
        #[source]
        source: russh::Error,
    },

    /// Server rejected the offered key
    #[error("Authentication rejected for {user}@{host}")]
    AuthRejected { user: String, host: String },

    /// Remote command could not be started
    #[error("Failed to start remote command: {0}")]
    Exec(#[source] russh::Error),

    /// Stream broke while reading
    #[error("Log stream read failed: {0}")]
    StreamRead(#[source] std::io::Error),
}

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Connection and authentication in progress
    Connecting,
    /// Tail output is being streamed
    Streaming,
    /// Session ended with a failure, reported on its sink
    Failed,
    /// Remote stream ended cleanly
    Closed,
}

/// Build the remote tail command for `path`.
///
/// `stdbuf -oL` keeps the remote tail line-buffered so lines arrive as
/// they are written instead of in block-sized batches.
pub fn tail_command(path: &str) -> String {
    format!("stdbuf -oL tail -n {TAIL_BACKLOG_LINES} -f {path}")
}

/// Runs one tail session against one server
pub struct SessionRunner {
    definition: ServerDefinition,
    sink: Arc<dyn EventSink>,
    state: Arc<Mutex<SessionState>>,
}

impl SessionRunner {
    /// Create a runner for `definition`, delivering into `sink`
    pub fn new(definition: ServerDefinition, sink: Arc<dyn EventSink>) -> Self {
        Self {
            definition,
            sink,
            state: Arc::new(Mutex::new(SessionState::Connecting)),
        }
    }

    /// The definition this runner serves
    pub fn definition(&self) -> &ServerDefinition {
        &self.definition
    }

    /// Current lifecycle state
    pub async fn state(&self) -> SessionState {
        *self.state.lock().await
    }

    /// Shared view of the state cell, for the supervisor's handle
    pub(crate) fn state_cell(&self) -> Arc<Mutex<SessionState>> {
        Arc::clone(&self.state)
    }

    async fn set_state(&self, state: SessionState) {
        *self.state.lock().await = state;
    }

    /// Run the session to completion.
    ///
    /// Any failure is converted into a single diagnostic alert on the sink
    /// and also returned, so callers can record the terminal state. A clean
    /// remote EOF returns `Ok(())`.
    pub async fn run(&self) -> Result<(), SessionError> {
        match self.stream().await {
            Ok(()) => {
                self.set_state(SessionState::Closed).await;
                tracing::info!(
                    "Session {} closed: remote stream ended",
                    self.definition.name
                );
                Ok(())
            }
            Err(e) => {
                self.set_state(SessionState::Failed).await;
                tracing::warn!("Session {} failed: {}", self.definition.name, e);
                self.sink.append(LogEvent::diagnostic(e.to_string())).await;
                Err(e)
            }
        }
    }

    async fn stream(&self) -> Result<(), SessionError> {
        let server = &self.definition;

        // Check if key file exists first
        let key_path = server.key_path();
        if !key_path.exists() {
            return Err(SessionError::KeyNotFound { path: key_path });
        }

        // Load the private key
        let key = russh_keys::load_secret_key(&key_path, None).map_err(|source| {
            SessionError::KeyInvalid {
                path: key_path,
                source,
            }
        })?;

        // Connect and authenticate with the public-key method only
        let config = Arc::new(Config::default());
        let address = format!("{}:{}", server.host, SSH_PORT);
        tracing::debug!("Connecting to {}", address);
        let mut handle = client::connect(config, (server.host.as_str(), SSH_PORT), AcceptingHandler)
            .await
            .map_err(|source| SessionError::Connect { address, source })?;

        tracing::debug!("Authenticating as user '{}'", server.user);
        let authenticated = handle
            .authenticate_publickey(&server.user, Arc::new(key))
            .await
            .map_err(|source| SessionError::Auth {
                user: server.user.clone(),
                host: server.host.clone(),
                source,
            })?;

        if !authenticated {
            return Err(SessionError::AuthRejected {
                user: server.user.clone(),
                host: server.host.clone(),
            });
        }

        // One channel, one command, for the whole session lifetime
        let channel = handle
            .channel_open_session()
            .await
            .map_err(SessionError::Exec)?;
        let command = tail_command(&server.path);
        channel
            .exec(true, command.as_str())
            .await
            .map_err(SessionError::Exec)?;

        self.set_state(SessionState::Streaming).await;
        tracing::info!("Session {} streaming {}", server.name, server.path);

        let reader = BufReader::new(channel.into_stream());
        forward_lines(reader, self.sink.as_ref()).await
    }
}

/// Client handler that accepts any server host key.
///
/// Trust comes from the operator distributing the right private keys, not
/// from known_hosts; an unknown host key never blocks a session.
struct AcceptingHandler;

#[async_trait]
impl client::Handler for AcceptingHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        _server_public_key: &PublicKey,
    ) -> Result<bool, Self::Error> {
        Ok(true)
    }
}
