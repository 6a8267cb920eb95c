//! Core data models for ghci-cells
//!
//! Cell ranges produced by the scanner and the session records kept by
//! REPL hosts.

pub mod cell_range;
pub mod session;

// Re-exports for convenience
pub use cell_range::{Anchor, CellAction, CellRange, LineBound};
pub use session::{
    session_name, SessionHandle, SessionInfo, SessionProcess, SessionState, GHCI_SESSION_PREFIX,
};
