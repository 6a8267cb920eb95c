//! Error types and Result aliases for ghci-cells

use std::path::PathBuf;

/// Result type alias for ghci-cells operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ghci-cells
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // === PTY-related errors ===
    /// Failed to create PTY
    #[error("Failed to create PTY for command '{command}': {reason}")]
    PtyCreationFailed { command: String, reason: String },

    /// Failed to spawn command in PTY
    #[error("Failed to spawn command '{command}': {reason}")]
    CommandSpawnFailed { command: String, reason: String },

    /// Failed to clone PTY reader
    #[error("Failed to clone PTY reader: {reason}")]
    PtyReaderCloneFailed { reason: String },

    /// Failed to take PTY writer
    #[error("Failed to take PTY writer: {reason}")]
    PtyWriterTakeFailed { reason: String },

    /// Failed to send input to PTY
    #[error("Failed to send input to PTY: {reason}")]
    PtyInputSendFailed { reason: String },

    // === Session errors ===
    /// Session handle not known to the host
    #[error("Session '{session_id}' not found")]
    SessionNotFound { session_id: String },

    /// Session command line had no words
    #[error("Session command cannot be empty")]
    EmptyCommand,

    // === Configuration errors ===
    /// Failed to read a configuration file
    #[error("Failed to load config from '{}': {reason}", path.display())]
    ConfigLoadFailed { path: PathBuf, reason: String },

    /// Configuration file was read but could not be understood
    #[error("Failed to parse config '{}': {reason}", path.display())]
    ConfigParseFailed { path: PathBuf, reason: String },

    // === Prompt errors ===
    /// Interactive chooser failed for a reason other than cancellation
    #[error("Prompt failed: {0}")]
    Prompt(String),

    // === I/O and serialization errors ===
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
