//! ghci-cells - Cell-based evaluation of Haskell source in GHCi
//!
//! This library splits a Haskell source file into runnable "cells" marked
//! with line comments and turns any range of lines into input a running
//! GHCi session accepts, wrapping declarations and statement runs in
//! `:{` / `:}` where GHCi needs them.
//!
//! ## Cell Markers
//!
//! ```haskell
//! -- %% a cell
//! x = 1
//! -- %{ a block, sent as one unit
//! data Shape = Circle Double | Square Double
//!   deriving Show
//! -- %}
//! -- %:type x      -- sent to GHCi as ":type x"
//! -- %- a separator with no action
//! ```
//!
//! ## Module Organization
//!
//! - [`document`] - Read-only document access (`Document`, `TextDocument`)
//! - [`cells`] - Line classification, the cell [`scan`]ner and the block [`compose`]r
//! - [`models`] - Data structures (`CellRange`, `SessionHandle`)
//! - [`session`] - Session host/prompt traits, locator and new-session flow
//! - [`pty`] - PTY-backed session host
//! - [`config`] - Workspace `ghci.json` loading
//! - [`commands`] - "Start new session" and "send to session"
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```
//! use ghci_cells::{compose, scan, CellAction, TextDocument};
//!
//! let doc = TextDocument::from_text("-- %%\nmain = do\n  print 1\n");
//! let ranges = scan(&doc);
//! assert_eq!(ranges[0].action, CellAction::RunCell);
//!
//! let text = compose(&doc, ranges[0].since, ranges[0].before).unwrap();
//! assert_eq!(text, "main = do\n:{\ndo\n  print 1\n\n:}\n");
//! ```
//!
//! ## Architecture
//!
//! Scanning and composing are pure functions of a document snapshot.
//! Everything that talks to the outside world (spawning GHCi, asking the
//! user for a command, reading workspace files) is async on `tokio` and sits
//! behind the [`SessionHost`] and [`CommandPrompt`] traits.

#[macro_use]
extern crate tracing;

pub mod cells;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod models;
pub mod pty;
pub mod session;

// Re-exports for core functionality
pub use cells::{classify, compose, scan, LineKind};
pub use commands::{GhciCommands, SendOutcome, SendRequest};
pub use config::{WorkspaceConfig, WorkspaceConfigLoader};
pub use document::{Document, Line, Position, Selection, TextDocument};
pub use error::{Error, Result};
pub use models::{CellAction, CellRange, LineBound, SessionHandle};
pub use pty::PtyHost;
pub use session::{
    CommandPrompt, Launch, Locate, PromptChoice, SessionHost, SessionLocator, TerminalPrompt,
};

// Version information
/// The current version of ghci-cells from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The package name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");
