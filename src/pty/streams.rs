//! Session Streams
//!
//! Async-friendly access to a REPL's PTY. Blocking master reads and writes
//! live on background threads; this side only sees channels.

use crate::error::{Error, Result};
use std::sync::mpsc::Sender as StdSender;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;

/// PTY I/O channels of one session
pub struct SessionStreams {
    /// Output bytes from the REPL
    output_rx: UnboundedReceiver<Vec<u8>>,
    /// Input bytes to the REPL
    input_tx: StdSender<Vec<u8>>,
}

impl SessionStreams {
    pub fn from_channels(
        output_rx: UnboundedReceiver<Vec<u8>>,
        input_tx: StdSender<Vec<u8>>,
    ) -> Self {
        Self {
            output_rx,
            input_tx,
        }
    }

    /// Queue bytes for the writer thread
    pub fn write(&self, data: &[u8]) -> Result<()> {
        self.input_tx
            .send(data.to_vec())
            .map_err(|e| Error::PtyInputSendFailed {
                reason: e.to_string(),
            })
    }

    /// Wait for the next output chunk; `None` once the reader thread is gone
    pub async fn read(&mut self) -> Option<Vec<u8>> {
        self.output_rx.recv().await
    }

    /// Wait at most `timeout_ms` for output. An elapsed wait yields an
    /// empty chunk; `None` means the REPL closed its output.
    pub async fn read_with_timeout(&mut self, timeout_ms: u64) -> Option<Vec<u8>> {
        use tokio::time::{timeout, Duration};
        timeout(Duration::from_millis(timeout_ms), self.read())
            .await
            .unwrap_or_else(|_| Some(Vec::new()))
    }

    /// Everything already buffered, without waiting; `None` when the
    /// output is closed and fully consumed
    pub fn try_read_now(&mut self) -> Option<Vec<u8>> {
        let mut out = Vec::new();
        loop {
            match self.output_rx.try_recv() {
                Ok(bytes) => out.extend_from_slice(&bytes),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) if out.is_empty() => return None,
                Err(TryRecvError::Disconnected) => break,
            }
        }
        Some(out)
    }
}
