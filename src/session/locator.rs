//! Session Locator
//!
//! Finds the session a send should go to. The focused session wins when it
//! is a live GHCi session; otherwise the first live GHCi session is reused;
//! otherwise the user is asked to start one and the search repeats. Only an
//! explicit cancel ends the search without a session.

use super::launcher::{Launch, SessionLauncher};
use super::{is_ghci_session, CommandPrompt, SessionHost};
use crate::config::WorkspaceConfigLoader;
use crate::error::Result;
use crate::models::SessionHandle;

/// Result of locating a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locate {
    Found(SessionHandle),
    Cancelled,
}

#[derive(Debug)]
enum LocateState {
    Searching,
    NeedsCreate,
    Created(SessionHandle),
}

pub struct SessionLocator<'a, H: ?Sized, P: ?Sized> {
    host: &'a H,
    launcher: SessionLauncher<'a, H, P>,
}

impl<'a, H, P> SessionLocator<'a, H, P>
where
    H: SessionHost + ?Sized,
    P: CommandPrompt + ?Sized,
{
    pub fn new(host: &'a H, prompt: &'a P, config: &'a WorkspaceConfigLoader) -> Self {
        Self {
            host,
            launcher: SessionLauncher::new(host, prompt, config),
        }
    }

    /// Locate or create the target session
    pub async fn locate(&self) -> Result<Locate> {
        let mut state = LocateState::Searching;
        loop {
            state = match state {
                LocateState::Searching => match self.find_existing().await {
                    Some(handle) => {
                        debug!("Using GHCi session '{}'", handle.name);
                        return Ok(Locate::Found(handle));
                    }
                    None => LocateState::NeedsCreate,
                },
                LocateState::NeedsCreate => match self.launcher.launch(None).await? {
                    Launch::Started(handle) => LocateState::Created(handle),
                    Launch::Cancelled => return Ok(Locate::Cancelled),
                },
                LocateState::Created(handle) => {
                    debug!("Created session '{}', searching again", handle.name);
                    LocateState::Searching
                }
            };
        }
    }

    /// The active session if it qualifies, else the first one that does.
    /// Enumeration only happens when the active session does not qualify.
    pub async fn find_existing(&self) -> Option<SessionHandle> {
        if let Some(active) = self.host.active_session().await {
            if is_ghci_session(self.host, &active).await {
                return Some(active);
            }
        }

        for handle in self.host.list_sessions().await {
            if is_ghci_session(self.host, &handle).await {
                return Some(handle);
            }
        }
        None
    }
}
