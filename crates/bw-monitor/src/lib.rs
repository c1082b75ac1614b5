//! bw-monitor: the banwatch streaming core
//!
//! One SSH session per configured server, each tailing the remote fail2ban
//! log and pushing classified lines into its own sink. Sessions are fully
//! independent: a failure is reported inline on the failing session's sink
//! and never reaches the others.

pub mod session;
pub mod stream;
pub mod supervisor;

pub use session::{SessionError, SessionRunner, SessionState};
pub use supervisor::{SessionHandle, Supervisor};
