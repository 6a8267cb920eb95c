//! New-session flow
//!
//! Starts a GHCi session either from an explicit command line or by asking
//! the user, seeding the choices from workspace `ghci.json` files.

use super::{CommandOption, CommandPrompt, PromptChoice, PromptRequest, SessionHost};
use crate::config::WorkspaceConfigLoader;
use crate::error::{Error, Result};
use crate::models::SessionHandle;

/// Title of the command chooser
pub const PROMPT_TITLE: &str = "New GHCi Terminal running command:";

/// Command used when nothing else is configured
pub const FALLBACK_COMMAND: &str = "ghci";

/// Split a command line on whitespace. Quoting is not supported.
pub fn parse_cmd_line(cmdl: &str) -> Vec<String> {
    cmdl.split_whitespace().map(str::to_string).collect()
}

/// Built-in options offered after the workspace ones
pub fn default_options() -> Vec<CommandOption> {
    vec![
        CommandOption::new("stack ghci", "Run with default target of stack"),
        CommandOption::new("cabal repl all", "Run with single target of cabal"),
        CommandOption::new("ghci", "Run bare GHCi"),
    ]
}

/// Outcome of the new-session flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launch {
    Started(SessionHandle),
    Cancelled,
}

impl Launch {
    pub fn is_started(&self) -> bool {
        matches!(self, Launch::Started(_))
    }
}

/// Runs the "start new session" command against a host
pub struct SessionLauncher<'a, H: ?Sized, P: ?Sized> {
    host: &'a H,
    prompt: &'a P,
    config: &'a WorkspaceConfigLoader,
}

impl<'a, H, P> SessionLauncher<'a, H, P>
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

    /// Start a session from `cmdl`, or ask the user when it is `None`
    pub async fn launch(&self, cmdl: Option<&str>) -> Result<Launch> {
        if let Some(cmdl) = cmdl {
            return self.start(parse_cmd_line(cmdl)).await.map(Launch::Started);
        }

        let request = self.build_request().await;
        match self.prompt.choose(&request).await? {
            PromptChoice::Cancelled => {
                debug!("New GHCi session cancelled");
                Ok(Launch::Cancelled)
            }
            PromptChoice::Chosen(label) => {
                let words = if label.trim().is_empty() {
                    parse_cmd_line(&request.default_command)
                } else {
                    parse_cmd_line(&label)
                };
                self.start(words).await.map(Launch::Started)
            }
        }
    }

    /// Chooser contents: workspace command lines first, then the built-ins
    pub async fn build_request(&self) -> PromptRequest {
        let ws_cmdls = self.config.command_lines().await;

        let default_command = ws_cmdls
            .first()
            .map(|cmdl| parse_cmd_line(cmdl).join(" "))
            .unwrap_or_else(|| FALLBACK_COMMAND.to_string());

        let mut options: Vec<CommandOption> = ws_cmdls
            .iter()
            .map(|cmdl| CommandOption::new(cmdl.clone(), format!("Run: {}", cmdl)))
            .collect();
        options.extend(default_options());

        PromptRequest {
            title: PROMPT_TITLE.to_string(),
            default_command,
            options,
        }
    }

    async fn start(&self, words: Vec<String>) -> Result<SessionHandle> {
        if words.is_empty() {
            return Err(Error::EmptyCommand);
        }
        info!("Starting GHCi session: {}", words.join(" "));
        self.host.create_session(&words).await
    }
}
