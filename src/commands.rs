//! User-facing commands
//!
//! The two commands an editor binds: start a new GHCi session, and send
//! a range, selection or whole document to the session.

use crate::cells::compose;
use crate::config::WorkspaceConfigLoader;
use crate::document::{Document, Selection};
use crate::error::Result;
use crate::models::{LineBound, SessionHandle};
use crate::session::{CommandPrompt, Launch, Locate, SessionHost, SessionLauncher, SessionLocator};

/// What to send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendRequest {
    /// A scanned range, composed into GHCi input
    Range { since: usize, before: LineBound },
    /// An editor selection, sent as is; an empty one means the whole document
    Selection(Selection),
    /// The whole document, sent as is
    Document,
}

/// Result of a send
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Sent { session: SessionHandle, bytes: usize },
    /// The computed text was empty
    NothingToSend,
    /// The user dismissed the session prompt
    Cancelled,
}

/// Text a request resolves to, `None` when there is nothing to send
pub fn source_text<D: Document + ?Sized>(document: &D, request: &SendRequest) -> Option<String> {
    let text = match request {
        SendRequest::Range { since, before } => return compose(document, *since, *before),
        SendRequest::Selection(selection) => {
            let selected = document.text_in(selection);
            if selected.is_empty() {
                document.text()
            } else {
                selected
            }
        }
        SendRequest::Document => document.text(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Command entry points bound to a host, a prompt and the workspace config
pub struct GhciCommands<'a, H: ?Sized, P: ?Sized> {
    host: &'a H,
    prompt: &'a P,
    config: &'a WorkspaceConfigLoader,
}

impl<'a, H, P> GhciCommands<'a, H, P>
where
    H: SessionHost + ?Sized,
    P: CommandPrompt + ?Sized,
{
    pub fn new(host: &'a H, prompt: &'a P, config: &'a WorkspaceConfigLoader) -> Self {
        Self {
            host,
            prompt,
            config,
        }
    }

    /// "Start new session", optionally with a raw command line
    pub async fn new_session(&self, cmdl: Option<&str>) -> Result<Launch> {
        SessionLauncher::new(self.host, self.prompt, self.config)
            .launch(cmdl)
            .await
    }

    /// Locate the target session without sending anything
    pub async fn locate(&self) -> Result<Locate> {
        SessionLocator::new(self.host, self.prompt, self.config)
            .locate()
            .await
    }

    /// "Send to session"
    pub async fn send<D: Document + ?Sized>(
        &self,
        document: &D,
        request: &SendRequest,
    ) -> Result<SendOutcome> {
        let Some(text) = source_text(document, request) else {
            warn!("No GHCi source to send.");
            return Ok(SendOutcome::NothingToSend);
        };

        let session = match self.locate().await? {
            Locate::Found(session) => session,
            Locate::Cancelled => return Ok(SendOutcome::Cancelled),
        };

        self.host.send_text(&session, &text, true).await?;
        Ok(SendOutcome::Sent {
            bytes: text.len(),
            session,
        })
    }
}
