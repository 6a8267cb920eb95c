//! REPL Session Model
//!
//! Names, handles and lifecycle state of host-managed REPL processes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name prefix that marks a session as a GHCi REPL
pub const GHCI_SESSION_PREFIX: &str = "GHCi - ";

/// Session name for a command line, e.g. `GHCi - stack ghci`
pub fn session_name(words: &[String]) -> String {
    format!("{}{}", GHCI_SESSION_PREFIX, words.join(" "))
}

/// Handle to a host-managed session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionHandle {
    /// Unique identifier for this session
    pub id: String,
    /// Display name; GHCi sessions carry [`GHCI_SESSION_PREFIX`]
    pub name: String,
}

impl SessionHandle {
    /// Create a handle with a fresh identifier
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
        }
    }

    /// Whether the name follows the GHCi naming convention
    pub fn has_ghci_name(&self) -> bool {
        self.name.starts_with(GHCI_SESSION_PREFIX)
    }
}

/// Lifecycle of a session process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SessionState {
    /// Process has been created but not started
    #[default]
    Created,
    /// Process is running
    Running,
    /// Process has exited
    Exited,
}

/// Bookkeeping for a spawned REPL process
#[derive(Debug, Clone)]
pub struct SessionProcess {
    /// OS process identifier
    pub pid: Option<u32>,
    /// Current state
    pub state: SessionState,
    /// When the process was started
    pub start_time: Option<DateTime<Utc>>,
    /// Exit code once exited
    pub exit_code: Option<u32>,
    /// Command words the process was launched with
    pub words: Vec<String>,
}

impl SessionProcess {
    pub fn new(words: Vec<String>) -> Self {
        Self {
            pid: None,
            state: SessionState::Created,
            start_time: None,
            exit_code: None,
            words,
        }
    }

    pub fn mark_started(&mut self, pid: Option<u32>) {
        self.pid = pid;
        self.state = SessionState::Running;
        self.start_time = Some(Utc::now());
    }

    pub fn mark_exited(&mut self, exit_code: u32) {
        self.state = SessionState::Exited;
        self.exit_code = Some(exit_code);
    }

    /// The process can no longer be observed; its exit code is unknown
    pub fn mark_lost(&mut self) {
        self.state = SessionState::Exited;
        self.exit_code = None;
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, SessionState::Running)
    }
}

/// Snapshot of a session for display
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub handle: SessionHandle,
    pub pid: Option<u32>,
    pub state: SessionState,
    pub start_time: Option<DateTime<Utc>>,
    pub exit_code: Option<u32>,
}
