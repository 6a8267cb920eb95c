//! REPL Process Spawning
//!
//! Launches a REPL command under a pseudoterminal with `portable-pty` and
//! bridges its blocking I/O onto channels.

use portable_pty::{native_pty_system, Child, CommandBuilder, PtyPair, PtySize};
use std::io::{Read, Write};
use std::path::Path;
use std::sync::mpsc::channel;
use std::thread;
use tokio::sync::mpsc::unbounded_channel;

use super::streams::SessionStreams;
use crate::error::{Error, Result};
use crate::models::SessionProcess;

/// Launcher used to resolve the REPL command through `PATH`
#[cfg(unix)]
pub const ENV_LAUNCHER: &str = "/usr/bin/env";

/// Terminal size given to new sessions
pub const DEFAULT_SIZE: PtySize = PtySize {
    rows: 24,
    cols: 80,
    pixel_width: 0,
    pixel_height: 0,
};

/// A spawned REPL: bookkeeping, I/O and the child used for liveness checks
pub struct SpawnedSession {
    pub process: SessionProcess,
    pub streams: SessionStreams,
    pub child: Box<dyn Child + Send + Sync>,
}

/// Build the PTY command for `words`
pub fn build_command(words: &[String], working_directory: Option<&Path>) -> Result<CommandBuilder> {
    let (program, args) = words.split_first().ok_or(Error::EmptyCommand)?;

    #[cfg(unix)]
    let mut cmd = {
        let mut cmd = CommandBuilder::new(ENV_LAUNCHER);
        cmd.arg(program);
        cmd
    };
    #[cfg(not(unix))]
    let mut cmd = CommandBuilder::new(program);

    cmd.args(args);
    if let Some(dir) = working_directory {
        cmd.cwd(dir);
    }
    Ok(cmd)
}

/// Spawn `words` in a new PTY
pub fn spawn_session_process(
    words: &[String],
    working_directory: Option<&Path>,
) -> Result<SpawnedSession> {
    let command = words.join(" ");
    let cmd = build_command(words, working_directory)?;

    let pair = native_pty_system()
        .openpty(DEFAULT_SIZE)
        .map_err(|e| Error::PtyCreationFailed {
            command: command.clone(),
            reason: e.to_string(),
        })?;

    let child = pair
        .slave
        .spawn_command(cmd)
        .map_err(|e| Error::CommandSpawnFailed {
            command: command.clone(),
            reason: e.to_string(),
        })?;

    let mut process = SessionProcess::new(words.to_vec());
    process.mark_started(child.process_id());
    debug!("Spawned '{}' with pid {:?}", command, process.pid);

    let streams = create_session_streams(pair)?;
    Ok(SpawnedSession {
        process,
        streams,
        child,
    })
}

/// Wire the PTY master to reader/writer threads
fn create_session_streams(pair: PtyPair) -> Result<SessionStreams> {
    let mut master_reader =
        pair.master
            .try_clone_reader()
            .map_err(|e| Error::PtyReaderCloneFailed {
                reason: e.to_string(),
            })?;
    let mut master_writer = pair
        .master
        .take_writer()
        .map_err(|e| Error::PtyWriterTakeFailed {
            reason: e.to_string(),
        })?;

    // PTY output -> async consumer
    let (tx_async_out, rx_async_out) = unbounded_channel::<Vec<u8>>();
    // async producer -> PTY writer thread
    let (tx_stdin, rx_stdin) = channel::<Vec<u8>>();

    thread::spawn(move || {
        let mut buf = [0u8; 4096];
        let mut consecutive_errors = 0;
        const MAX_CONSECUTIVE_ERRORS: u32 = 5;

        loop {
            match master_reader.read(&mut buf) {
                Ok(0) => {
                    debug!("REPL read EOF - process terminated");
                    break;
                }
                Ok(n) => {
                    consecutive_errors = 0;
                    if tx_async_out.send(buf[..n].to_vec()).is_err() {
                        debug!("REPL read: receiver dropped, stopping reader thread");
                        break;
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(std::time::Duration::from_millis(10));
                }
                Err(e) => {
                    consecutive_errors += 1;
                    warn!(
                        "REPL read error ({}): {} (attempt {}/{})",
                        e.kind(),
                        e,
                        consecutive_errors,
                        MAX_CONSECUTIVE_ERRORS
                    );
                    if consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                        error!("REPL read: too many consecutive errors, stopping reader thread");
                        break;
                    }
                    thread::sleep(std::time::Duration::from_millis(50));
                }
            }
        }
        debug!("REPL reader thread exiting");
    });

    thread::spawn(move || {
        while let Ok(data) = rx_stdin.recv() {
            let written = master_writer
                .write_all(&data)
                .and_then(|()| master_writer.flush());
            if let Err(e) = written {
                error!("REPL write error ({}): {}, stopping writer thread", e.kind(), e);
                return;
            }
        }
        debug!("REPL writer thread exiting");
    });

    Ok(SessionStreams::from_channels(rx_async_out, tx_stdin))
}
