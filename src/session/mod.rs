//! REPL session selection
//!
//! The host environment owns the REPL processes; this module only observes
//! and selects them through [`SessionHost`], and asks the user which command
//! to start through [`CommandPrompt`].
//!
//! - [`locator`] - reuse the active/first GHCi session or start one
//! - [`launcher`] - the "start new session" flow
//! - [`prompt`] - a line-based [`CommandPrompt`] for terminals

pub mod launcher;
pub mod locator;
pub mod prompt;

pub use launcher::{default_options, parse_cmd_line, Launch, SessionLauncher};
pub use locator::{Locate, SessionLocator};
pub use prompt::TerminalPrompt;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::SessionHandle;

/// Process host that owns REPL sessions
#[async_trait]
pub trait SessionHost: Send + Sync {
    /// Spawn `words` as a new session named after them.
    /// The session must show up in later [`list_sessions`](Self::list_sessions) calls.
    async fn create_session(&self, words: &[String]) -> Result<SessionHandle>;

    /// All sessions known to the host, in creation order
    async fn list_sessions(&self) -> Vec<SessionHandle>;

    /// The session that currently has focus
    async fn active_session(&self) -> Option<SessionHandle>;

    /// Whether the session's process has not exited
    async fn is_alive(&self, handle: &SessionHandle) -> bool;

    /// Write text to the session
    async fn send_text(&self, handle: &SessionHandle, text: &str, append_newline: bool)
        -> Result<()>;
}

/// A GHCi session is one named with the GHCi prefix whose process still runs
pub async fn is_ghci_session<H: SessionHost + ?Sized>(host: &H, handle: &SessionHandle) -> bool {
    handle.has_ghci_name() && host.is_alive(handle).await
}

/// One entry offered by the command chooser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOption {
    pub label: String,
    pub description: String,
}

impl CommandOption {
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
        }
    }
}

/// What the chooser shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub title: String,
    /// Command used when the user accepts without typing anything
    pub default_command: String,
    pub options: Vec<CommandOption>,
}

/// What the user picked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptChoice {
    /// An option label or free text; empty means the default command
    Chosen(String),
    /// The chooser was dismissed
    Cancelled,
}

/// Interactive chooser for the command that starts a session.
/// Implementations must accept free text besides the listed options.
#[async_trait]
pub trait CommandPrompt: Send + Sync {
    async fn choose(&self, request: &PromptRequest) -> Result<PromptChoice>;
}
