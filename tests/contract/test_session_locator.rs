//! Contract Tests for Session Location
//!
//! The focused GHCi session short-circuits enumeration; other live GHCi
//! sessions are reused in order; otherwise the user is asked until a
//! session appears or the prompt is dismissed.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use ghci_cells::session::PromptChoice;
use ghci_cells::Error;
use ghci_cells::{Locate, SessionLocator, WorkspaceConfigLoader};
use test_utils::{FailingPrompt, MockHost, ScriptedPrompt};

fn no_config() -> WorkspaceConfigLoader {
    WorkspaceConfigLoader::default()
}

#[tokio::test]
async fn test_active_ghci_session_skips_enumeration() {
    let host = MockHost::new();
    host.add_session("GHCi - cabal repl", true);
    let focused = host.add_session("GHCi - stack ghci", true);
    host.set_active(&focused);
    let prompt = ScriptedPrompt::cancelling();
    let config = no_config();

    let found = SessionLocator::new(&host, &prompt, &config).locate().await.unwrap();
    assert_eq!(found, Locate::Found(focused));
    assert_eq!(host.list_calls(), 0);
    assert!(prompt.requests().is_empty());
}

#[tokio::test]
async fn test_first_recognized_session_when_focus_is_elsewhere() {
    let host = MockHost::new();
    let shell = host.add_session("bash", true);
    host.add_session("GHCi - ghci", false);
    let first = host.add_session("GHCi - stack ghci", true);
    host.add_session("GHCi - cabal repl", true);
    host.set_active(&shell);
    let prompt = ScriptedPrompt::cancelling();
    let config = no_config();

    let found = SessionLocator::new(&host, &prompt, &config).locate().await.unwrap();
    assert_eq!(found, Locate::Found(first));
    assert_eq!(host.list_calls(), 1);
}

#[tokio::test]
async fn test_dead_active_session_is_skipped() {
    let host = MockHost::new();
    let dead = host.add_session("GHCi - ghci", false);
    host.set_active(&dead);
    let prompt = ScriptedPrompt::cancelling();
    let config = no_config();

    let found = SessionLocator::new(&host, &prompt, &config).locate().await.unwrap();
    assert_eq!(found, Locate::Cancelled);
    assert!(host.created().is_empty());
    assert_eq!(prompt.requests().len(), 1);
}

#[tokio::test]
async fn test_creates_then_finds_new_session() {
    let host = MockHost::new();
    host.add_session("zsh", true);
    let prompt = ScriptedPrompt::choosing("cabal repl all");
    let config = no_config();

    let found = SessionLocator::new(&host, &prompt, &config).locate().await.unwrap();
    let Locate::Found(session) = found else {
        panic!("expected a session, got {:?}", found);
    };
    assert_eq!(session.name, "GHCi - cabal repl all");
    assert_eq!(host.created(), vec![vec!["cabal", "repl", "all"]]);
    // One enumeration before creating, none after since the new session has focus
    assert_eq!(host.list_calls(), 1);
}

#[tokio::test]
async fn test_empty_choice_uses_default_command() {
    let host = MockHost::new();
    let prompt = ScriptedPrompt::choosing("");
    let config = no_config();

    let found = SessionLocator::new(&host, &prompt, &config).locate().await.unwrap();
    assert!(matches!(found, Locate::Found(ref s) if s.name == "GHCi - ghci"));
}

#[tokio::test]
async fn test_keeps_asking_until_session_appears() {
    let mut host = MockHost::new();
    host.register_created = false;
    let prompt = ScriptedPrompt::new([
        PromptChoice::Chosen("stack ghci".to_string()),
        PromptChoice::Chosen("ghci".to_string()),
    ]);
    let config = no_config();

    // Created sessions never show up, so the loop only ends on cancel
    let found = SessionLocator::new(&host, &prompt, &config).locate().await.unwrap();
    assert_eq!(found, Locate::Cancelled);
    assert_eq!(host.created().len(), 2);
    assert_eq!(prompt.requests().len(), 3);
}

#[tokio::test]
async fn test_create_failure_is_reported() {
    let mut host = MockHost::new();
    host.fail_create = true;
    let prompt = ScriptedPrompt::choosing("ghci");
    let config = no_config();

    let result = SessionLocator::new(&host, &prompt, &config).locate().await;
    assert!(result.is_err());
    assert_eq!(prompt.requests().len(), 1);
}

#[tokio::test]
async fn test_find_existing_does_not_prompt() {
    let host = MockHost::new();
    let prompt = ScriptedPrompt::choosing("ghci");
    let config = no_config();

    let locator = SessionLocator::new(&host, &prompt, &config);
    assert!(locator.find_existing().await.is_none());
    assert!(prompt.requests().is_empty());
    assert!(host.created().is_empty());
}

#[tokio::test]
async fn test_prompt_failure_reaches_caller() {
    let host = MockHost::new();
    host.add_session("bash", true);
    let prompt = FailingPrompt;
    let config = no_config();

    let result = SessionLocator::new(&host, &prompt, &config).locate().await;
    assert!(matches!(result, Err(Error::Prompt(_))));
    assert!(host.created().is_empty());
}
