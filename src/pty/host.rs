//! PTY Session Host
//!
//! Owns GHCi processes running under pseudoterminals and implements
//! [`SessionHost`] for them. Each session sits behind its own lock, so
//! writing to one REPL never waits on another.

use async_trait::async_trait;
use portable_pty::{Child, ChildKiller};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::process::spawn_session_process;
use super::streams::SessionStreams;
use crate::error::{Error, Result};
use crate::models::{session_name, SessionHandle, SessionInfo, SessionProcess};
use crate::session::SessionHost;

/// A single session entry with its own lock
struct SessionEntry {
    handle: SessionHandle,
    process: SessionProcess,
    streams: SessionStreams,
    child: Box<dyn Child + Send + Sync>,
}

impl SessionEntry {
    /// Refresh exit state from the child and report liveness
    fn poll_alive(&mut self) -> bool {
        if !self.process.is_running() {
            return false;
        }
        match self.child.try_wait() {
            Ok(Some(status)) => {
                debug!(
                    "Session '{}' exited with code {}",
                    self.handle.name,
                    status.exit_code()
                );
                self.process.mark_exited(status.exit_code());
                false
            }
            Ok(None) => true,
            Err(e) => {
                warn!(
                    "Failed to poll session '{}', treating it as gone: {}",
                    self.handle.name, e
                );
                self.process.mark_lost();
                false
            }
        }
    }

    fn info(&self) -> SessionInfo {
        SessionInfo {
            handle: self.handle.clone(),
            pid: self.process.pid,
            state: self.process.state,
            start_time: self.process.start_time,
            exit_code: self.process.exit_code,
        }
    }
}

#[derive(Default)]
struct SessionTable {
    entries: HashMap<String, Arc<RwLock<SessionEntry>>>,
    /// Session ids in creation order
    order: Vec<String>,
    active: Option<String>,
}

/// [`SessionHost`] backed by local PTY processes
#[derive(Default)]
pub struct PtyHost {
    sessions: RwLock<SessionTable>,
    working_directory: Option<PathBuf>,
}

impl PtyHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start sessions in `dir`, typically the workspace root
    pub fn with_working_directory(dir: impl Into<PathBuf>) -> Self {
        Self {
            sessions: RwLock::default(),
            working_directory: Some(dir.into()),
        }
    }

    async fn entry(&self, handle: &SessionHandle) -> Result<Arc<RwLock<SessionEntry>>> {
        let table = self.sessions.read().await;
        table
            .entries
            .get(&handle.id)
            .cloned()
            .ok_or_else(|| Error::SessionNotFound {
                session_id: handle.id.clone(),
            })
    }

    /// Give focus to a session
    pub async fn set_active(&self, handle: &SessionHandle) -> Result<()> {
        let mut table = self.sessions.write().await;
        if !table.entries.contains_key(&handle.id) {
            return Err(Error::SessionNotFound {
                session_id: handle.id.clone(),
            });
        }
        table.active = Some(handle.id.clone());
        Ok(())
    }

    /// Snapshot of a session
    pub async fn info(&self, handle: &SessionHandle) -> Result<SessionInfo> {
        let entry = self.entry(handle).await?;
        let mut entry = entry.write().await;
        entry.poll_alive();
        Ok(entry.info())
    }

    /// Wait up to `timeout_ms` for REPL output.
    ///
    /// Returns an empty chunk when nothing arrived in time and `None` once
    /// the REPL has closed its output, typically after the process exited.
    pub async fn read_output(
        &self,
        handle: &SessionHandle,
        timeout_ms: u64,
    ) -> Result<Option<Vec<u8>>> {
        let entry = self.entry(handle).await?;
        let mut entry = entry.write().await;
        Ok(if timeout_ms == 0 {
            entry.streams.try_read_now()
        } else {
            entry.streams.read_with_timeout(timeout_ms).await
        })
    }

    /// Kill a session and forget it
    pub async fn terminate(&self, handle: &SessionHandle) -> Result<()> {
        let entry = {
            let mut table = self.sessions.write().await;
            table.order.retain(|id| id != &handle.id);
            if table.active.as_deref() == Some(handle.id.as_str()) {
                table.active = None;
            }
            table.entries.remove(&handle.id)
        };

        if let Some(entry) = entry {
            let mut entry = entry.write().await;
            if entry.poll_alive() {
                if let Err(e) = entry.child.kill() {
                    warn!("Failed to kill session '{}': {}", handle.name, e);
                }
                entry.process.mark_exited(0);
            }
            info!("Terminated session '{}'", handle.name);
        }
        Ok(())
    }

    /// Drop exited sessions, returning how many were removed
    pub async fn cleanup_exited(&self) -> usize {
        let snapshot: Vec<(String, Arc<RwLock<SessionEntry>>)> = {
            let table = self.sessions.read().await;
            table
                .entries
                .iter()
                .map(|(id, entry)| (id.clone(), entry.clone()))
                .collect()
        };

        let mut exited = Vec::new();
        for (id, entry) in snapshot {
            if !entry.write().await.poll_alive() {
                exited.push(id);
            }
        }

        if !exited.is_empty() {
            let mut table = self.sessions.write().await;
            for id in &exited {
                table.entries.remove(id);
                table.order.retain(|other| other != id);
                if table.active.as_ref() == Some(id) {
                    table.active = None;
                }
            }
        }
        exited.len()
    }

    /// Number of sessions tracked, alive or not
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.entries.len()
    }
}

#[async_trait]
impl SessionHost for PtyHost {
    async fn create_session(&self, words: &[String]) -> Result<SessionHandle> {
        if words.is_empty() {
            return Err(Error::EmptyCommand);
        }

        let spawned = spawn_session_process(words, self.working_directory.as_deref())?;
        let handle = SessionHandle::new(session_name(words));
        let entry = SessionEntry {
            handle: handle.clone(),
            process: spawned.process,
            streams: spawned.streams,
            child: spawned.child,
        };

        let mut table = self.sessions.write().await;
        table
            .entries
            .insert(handle.id.clone(), Arc::new(RwLock::new(entry)));
        table.order.push(handle.id.clone());
        table.active = Some(handle.id.clone());
        info!("Created session '{}'", handle.name);
        Ok(handle)
    }

    async fn list_sessions(&self) -> Vec<SessionHandle> {
        let table = self.sessions.read().await;
        let mut handles = Vec::with_capacity(table.order.len());
        for id in &table.order {
            if let Some(entry) = table.entries.get(id) {
                handles.push(entry.read().await.handle.clone());
            }
        }
        handles
    }

    async fn active_session(&self) -> Option<SessionHandle> {
        let entry = {
            let table = self.sessions.read().await;
            let id = table.active.as_ref()?;
            table.entries.get(id).cloned()?
        };
        let handle = entry.read().await.handle.clone();
        Some(handle)
    }

    async fn is_alive(&self, handle: &SessionHandle) -> bool {
        match self.entry(handle).await {
            Ok(entry) => entry.write().await.poll_alive(),
            Err(_) => false,
        }
    }

    async fn send_text(
        &self,
        handle: &SessionHandle,
        text: &str,
        append_newline: bool,
    ) -> Result<()> {
        let entry = self.entry(handle).await?;
        let entry = entry.read().await;
        entry.streams.write(text.as_bytes())?;
        if append_newline {
            entry.streams.write(b"\n")?;
        }
        debug!("Sent {} bytes to '{}'", text.len(), handle.name);
        Ok(())
    }
}
