//! Pseudoterminal (PTY) REPL hosting
//!
//! Runs GHCi under a pseudoterminal so it behaves exactly as it would in
//! an interactive terminal, and exposes it as a [`SessionHost`](crate::session::SessionHost).

pub mod host;
pub mod process;
pub mod streams;

// Re-exports for convenience
pub use host::PtyHost;
pub use process::{build_command, spawn_session_process, SpawnedSession};
pub use streams::SessionStreams;
