//! Workspace configuration loading
//!
//! Collects suggested GHCi command lines from every workspace root.
//! Loading is best effort: a missing, unreadable or malformed file is
//! logged and skipped without affecting the others.

use super::{WorkspaceConfig, CONFIG_FILE_NAME};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Loader over a fixed set of workspace roots
#[derive(Debug, Clone, Default)]
pub struct WorkspaceConfigLoader {
    roots: Vec<PathBuf>,
}

impl WorkspaceConfigLoader {
    /// Create a loader for the given workspace roots
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Workspace roots searched by this loader
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Config file candidates, one per root
    pub fn config_paths(&self) -> Vec<PathBuf> {
        self.roots
            .iter()
            .map(|root| root.join(CONFIG_FILE_NAME))
            .collect()
    }

    /// Load every readable config file, skipping failures
    pub async fn load_all(&self) -> Vec<(PathBuf, WorkspaceConfig)> {
        let mut configs = Vec::new();
        for path in self.config_paths() {
            match Self::load_file(&path).await {
                Ok(Some(config)) => configs.push((path, config)),
                Ok(None) => trace!("No {} at {}", CONFIG_FILE_NAME, path.display()),
                Err(e) => warn!("Skipping workspace config: {}", e),
            }
        }
        configs
    }

    /// All suggested command lines, in root order then file order
    pub async fn command_lines(&self) -> Vec<String> {
        let cmdls: Vec<String> = self
            .load_all()
            .await
            .iter()
            .flat_map(|(_, config)| config.command_lines())
            .collect();
        debug!("Collected {} workspace command line(s)", cmdls.len());
        cmdls
    }

    /// Load one file; `Ok(None)` when it does not exist
    pub async fn load_file(path: &Path) -> Result<Option<WorkspaceConfig>> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::ConfigLoadFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        };

        let text = String::from_utf8_lossy(&bytes);
        WorkspaceConfig::from_json(&text)
            .map(Some)
            .map_err(|e| Error::ConfigParseFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }
}
