//! Integration Tests for the Send and New-Session Commands
//!
//! Drives `GhciCommands` end to end against an in-memory host.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use ghci_cells::{
    GhciCommands, Launch, LineBound, Position, Selection, SendOutcome, SendRequest,
    TextDocument, WorkspaceConfigLoader,
};
use test_utils::{notebook, MockHost, ScriptedPrompt};

#[tokio::test]
async fn test_send_cell_to_active_session() {
    let host = MockHost::new();
    let session = host.add_session("GHCi - stack ghci", true);
    host.set_active(&session);
    let prompt = ScriptedPrompt::cancelling();
    let config = WorkspaceConfigLoader::default();
    let commands = GhciCommands::new(&host, &prompt, &config);

    let request = SendRequest::Range {
        since: 5,
        before: LineBound::Line(8),
    };
    let outcome = commands.send(&notebook(), &request).await.unwrap();

    let expected = ":{\ndata Shape = Circle Double\n  deriving Show\n:}\n";
    assert_eq!(
        outcome,
        SendOutcome::Sent {
            session: session.clone(),
            bytes: expected.len(),
        }
    );
    let sent = host.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].session, "GHCi - stack ghci");
    assert_eq!(sent[0].text, expected);
    assert!(sent[0].append_newline);
}

#[tokio::test]
async fn test_nothing_to_send_never_locates() {
    let host = MockHost::new();
    let prompt = ScriptedPrompt::choosing("ghci");
    let config = WorkspaceConfigLoader::default();
    let commands = GhciCommands::new(&host, &prompt, &config);

    let empty = TextDocument::from_text("");
    let outcome = commands.send(&empty, &SendRequest::Document).await.unwrap();
    assert_eq!(outcome, SendOutcome::NothingToSend);

    let request = SendRequest::Range {
        since: 4,
        before: LineBound::Line(2),
    };
    let outcome = commands.send(&notebook(), &request).await.unwrap();
    assert_eq!(outcome, SendOutcome::NothingToSend);

    assert_eq!(host.active_calls(), 0);
    assert!(prompt.requests().is_empty());
    assert!(host.sent().is_empty());
}

#[tokio::test]
async fn test_cancelled_prompt_sends_nothing() {
    let host = MockHost::new();
    let prompt = ScriptedPrompt::cancelling();
    let config = WorkspaceConfigLoader::default();
    let commands = GhciCommands::new(&host, &prompt, &config);

    let outcome = commands
        .send(&notebook(), &SendRequest::Document)
        .await
        .unwrap();
    assert_eq!(outcome, SendOutcome::Cancelled);
    assert!(host.sent().is_empty());
    assert!(host.created().is_empty());
}

#[tokio::test]
async fn test_send_creates_session_on_demand() {
    let host = MockHost::new();
    let prompt = ScriptedPrompt::choosing("stack ghci --no-load");
    let config = WorkspaceConfigLoader::default();
    let commands = GhciCommands::new(&host, &prompt, &config);

    let doc = TextDocument::from_lines(["x = 1", "y = 2"]);
    let selection = Selection::new(Position::new(1, 0), Position::new(1, 5));
    let outcome = commands
        .send(&doc, &SendRequest::Selection(selection))
        .await
        .unwrap();

    assert!(matches!(outcome, SendOutcome::Sent { bytes: 5, .. }));
    assert_eq!(host.created(), vec![vec!["stack", "ghci", "--no-load"]]);
    let sent = host.sent();
    assert_eq!(sent[0].session, "GHCi - stack ghci --no-load");
    assert_eq!(sent[0].text, "y = 2");
}

#[tokio::test]
async fn test_new_session_with_command_line_skips_prompt() {
    let host = MockHost::new();
    let prompt = ScriptedPrompt::cancelling();
    let config = WorkspaceConfigLoader::default();
    let commands = GhciCommands::new(&host, &prompt, &config);

    let launch = commands.new_session(Some("  cabal   repl  ")).await.unwrap();
    let Launch::Started(session) = launch else {
        panic!("expected a started session");
    };
    assert_eq!(session.name, "GHCi - cabal repl");
    assert!(prompt.requests().is_empty());
    assert!(commands.new_session(Some("   ")).await.is_err());
}

#[tokio::test]
async fn test_new_session_always_creates() {
    let host = MockHost::new();
    let existing = host.add_session("GHCi - ghci", true);
    host.set_active(&existing);
    let prompt = ScriptedPrompt::choosing("ghci");
    let config = WorkspaceConfigLoader::default();
    let commands = GhciCommands::new(&host, &prompt, &config);

    let launch = commands.new_session(None).await.unwrap();
    assert!(launch.is_started());
    assert_eq!(host.created().len(), 1);
    assert_eq!(prompt.requests().len(), 1);
}
