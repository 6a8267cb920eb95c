//! ghci-cells - run Haskell cells in a GHCi session from the command line
//!
//! Editors that can shell out use `lenses` to place run actions and
//! `compose` to get the text for a range; `run` and `new-session` drive a
//! GHCi process directly.

use std::env;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt};
use tracing::{debug, info};

use ghci_cells::{
    compose, scan, GhciCommands, Launch, LineBound, PtyHost, SendOutcome, SendRequest,
    SessionHandle, SessionHost, TerminalPrompt, TextDocument, WorkspaceConfigLoader,
};

#[derive(Debug, Parser)]
#[command(name = "ghci-cells", version, about = "Run Haskell cells in GHCi")]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the runnable ranges of a file
    Lenses {
        file: PathBuf,
        /// Print JSON instead of one range per line
        #[arg(long)]
        json: bool,
    },
    /// Print the GHCi input for a range of a file
    Compose {
        file: PathBuf,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Send a file, or a range of it, to a GHCi session and show the reply
    Run {
        file: PathBuf,
        #[command(flatten)]
        range: RangeArgs,
        #[command(flatten)]
        session: SessionArgs,
        /// Stop reading output after this much silence
        #[arg(long, default_value_t = 1500)]
        settle_ms: u64,
    },
    /// Start a GHCi session and attach stdin/stdout to it
    NewSession {
        /// Raw command line, e.g. "stack ghci"; prompts when omitted
        cmdline: Option<String>,
        /// Workspace root searched for ghci.json
        #[arg(long)]
        workspace: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct RangeArgs {
    /// First line to send (zero-based)
    #[arg(long)]
    since: Option<usize>,
    /// Line to stop before; -1 means end of file
    #[arg(long, allow_negative_numbers = true)]
    before: Option<i64>,
}

impl RangeArgs {
    fn is_empty(&self) -> bool {
        self.since.is_none() && self.before.is_none()
    }

    fn bounds(&self) -> (usize, LineBound) {
        (
            self.since.unwrap_or(0),
            self.before.map_or(LineBound::End, LineBound::from_i64),
        )
    }
}

#[derive(Debug, Args)]
struct SessionArgs {
    /// Command line used to start GHCi instead of prompting
    #[arg(long = "cmd")]
    cmdline: Option<String>,
    /// Workspace root searched for ghci.json; defaults to the file's directory
    #[arg(long)]
    workspace: Option<PathBuf>,
}

fn init_logging(debug: bool) {
    let log_level = if debug { "debug" } else { "info" };
    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from(env_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn open_document(path: &Path) -> Result<TextDocument> {
    TextDocument::open(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn workspace_root(explicit: Option<PathBuf>, file: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    match file.and_then(Path::parent).filter(|dir| !dir.as_os_str().is_empty()) {
        Some(dir) => Ok(dir.to_path_buf()),
        None => env::current_dir().context("Failed to resolve current directory"),
    }
}

/// Print REPL output until it has been quiet for `settle` or the REPL exits
async fn pump_output(host: &PtyHost, session: &SessionHandle, settle: Duration) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut last_output = Instant::now();
    while last_output.elapsed() < settle {
        let Some(chunk) = host.read_output(session, 50).await? else {
            debug!("Session '{}' closed its output", session.name);
            break;
        };
        if !chunk.is_empty() {
            stdout.write_all(&chunk).await?;
            stdout.flush().await?;
            last_output = Instant::now();
        }
    }
    Ok(())
}

fn print_lenses(file: &Path, json: bool) -> Result<()> {
    let doc = open_document(file)?;
    let ranges = scan(&doc);
    if json {
        println!("{}", serde_json::to_string_pretty(&ranges)?);
    } else {
        for range in &ranges {
            println!("{}", range);
        }
    }
    Ok(())
}

fn print_transcript(file: &Path, range: &RangeArgs) -> Result<()> {
    let doc = open_document(file)?;
    let (since, before) = range.bounds();
    match compose(&doc, since, before) {
        Some(text) => print!("{}", text),
        None => info!("Nothing to send for lines [{}, {})", since, before),
    }
    Ok(())
}

async fn run_file(
    file: &Path,
    range: &RangeArgs,
    session: SessionArgs,
    settle: Duration,
) -> Result<()> {
    let doc = open_document(file)?;
    let root = workspace_root(session.workspace, Some(file))?;
    let config = WorkspaceConfigLoader::new([root.clone()]);
    let host = PtyHost::with_working_directory(root);
    let prompt = TerminalPrompt::stdio();
    let commands = GhciCommands::new(&host, &prompt, &config);

    if let Some(cmdline) = session.cmdline.as_deref() {
        commands.new_session(Some(cmdline)).await?;
    }

    let request = if range.is_empty() {
        SendRequest::Document
    } else {
        let (since, before) = range.bounds();
        SendRequest::Range { since, before }
    };

    match commands.send(&doc, &request).await? {
        SendOutcome::Sent { session, bytes } => {
            debug!("Sent {} bytes to '{}'", bytes, session.name);
            pump_output(&host, &session, settle).await?;
            host.terminate(&session).await?;
        }
        SendOutcome::NothingToSend => {}
        SendOutcome::Cancelled => info!("Cancelled"),
    }
    Ok(())
}

async fn attach_session(cmdline: Option<String>, workspace: Option<PathBuf>) -> Result<()> {
    let root = workspace_root(workspace, None)?;
    let config = WorkspaceConfigLoader::new([root.clone()]);
    let host = PtyHost::with_working_directory(root);
    let prompt = TerminalPrompt::stdio();
    let commands = GhciCommands::new(&host, &prompt, &config);

    let session = match commands.new_session(cmdline.as_deref()).await? {
        Launch::Started(session) => session,
        Launch::Cancelled => {
            info!("Cancelled");
            return Ok(());
        }
    };
    info!("Attached to '{}' (Ctrl-D to quit)", session.name);

    // Keep reading through the prompt's buffer so piped input is not lost
    let (stdin, _) = prompt.into_inner();
    let mut stdin = stdin.lines();
    let mut stdout = tokio::io::stdout();
    loop {
        tokio::select! {
            line = stdin.next_line() => match line? {
                Some(line) => host.send_text(&session, &line, true).await?,
                None => break,
            },
            chunk = host.read_output(&session, 100) => match chunk? {
                Some(chunk) => {
                    if !chunk.is_empty() {
                        stdout.write_all(&chunk).await?;
                        stdout.flush().await?;
                    }
                }
                None => {
                    info!("Session '{}' exited", session.name);
                    break;
                }
            }
        }
    }

    host.terminate(&session).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);
    debug!("Starting {} v{}", ghci_cells::NAME, ghci_cells::VERSION);

    match cli.command {
        Command::Lenses { file, json } => print_lenses(&file, json),
        Command::Compose { file, range } => print_transcript(&file, &range),
        Command::Run {
            file,
            range,
            session,
            settle_ms,
        } => run_file(&file, &range, session, Duration::from_millis(settle_ms)).await,
        Command::NewSession { cmdline, workspace } => attach_session(cmdline, workspace).await,
    }
}
