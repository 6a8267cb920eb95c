//! Workspace configuration for ghci-cells
//!
//! A workspace may carry a `ghci.json` file suggesting the command lines
//! used to start GHCi:
//!
//! ```json
//! { "ghci.terminal.cmdl": ["stack ghci", "cabal repl exe:app"] }
//! ```
//!
//! The value may also be a single string. Anything else is ignored.

pub mod loader;

pub use loader::WorkspaceConfigLoader;

use serde::Deserialize;
use serde_json::Value;

/// File name looked up in every workspace root
pub const CONFIG_FILE_NAME: &str = "ghci.json";

/// Key holding the suggested command line(s)
pub const COMMAND_LINE_KEY: &str = "ghci.terminal.cmdl";

/// Parsed contents of one `ghci.json`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WorkspaceConfig {
    /// Raw value of `ghci.terminal.cmdl`, kept loose so a wrongly typed
    /// entry does not reject the whole file
    #[serde(rename = "ghci.terminal.cmdl", default)]
    pub command_lines: Option<Value>,
}

impl WorkspaceConfig {
    /// Parse a config file body
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Command lines in file order
    pub fn command_lines(&self) -> Vec<String> {
        match &self.command_lines {
            Some(Value::String(cmdl)) => vec![cmdl.clone()],
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(cmdl) => Some(cmdl.clone()),
                    other => {
                        debug!("Ignoring non-string {} entry: {}", COMMAND_LINE_KEY, other);
                        None
                    }
                })
                .collect(),
            Some(other) => {
                debug!("Ignoring {} of unexpected type: {}", COMMAND_LINE_KEY, other);
                Vec::new()
            }
            None => Vec::new(),
        }
    }
}
