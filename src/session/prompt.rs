//! Line-based command chooser
//!
//! Renders the options as a numbered list and reads one line:
//! a number picks an option, an empty line takes the default command,
//! anything else is used as typed, and end of input cancels.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

use super::{CommandPrompt, PromptChoice, PromptRequest};
use crate::error::{Error, Result};

/// [`CommandPrompt`] over any async line reader and writer
pub struct TerminalPrompt<R, W> {
    io: Mutex<(R, W)>,
}

impl TerminalPrompt<tokio::io::BufReader<tokio::io::Stdin>, tokio::io::Stderr> {
    /// Prompt on stdin, rendering to stderr so stdout stays clean
    pub fn stdio() -> Self {
        Self::new(tokio::io::BufReader::new(tokio::io::stdin()), tokio::io::stderr())
    }
}

impl<R, W> TerminalPrompt<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: Mutex::new((reader, writer)),
        }
    }

    /// Give back the reader and writer
    pub fn into_inner(self) -> (R, W) {
        self.io.into_inner()
    }

    async fn render(writer: &mut W, request: &PromptRequest) -> std::io::Result<()> {
        let mut out = format!("{}\n", request.title);
        out.push_str(&format!("  [Enter] Run: {}\n", request.default_command));
        for (idx, option) in request.options.iter().enumerate() {
            out.push_str(&format!(
                "  {:>3}) {:<20} {}\n",
                idx + 1,
                option.label,
                option.description
            ));
        }
        out.push_str("> ");
        writer.write_all(out.as_bytes()).await?;
        writer.flush().await
    }

    async fn read_choice(reader: &mut R, request: &PromptRequest) -> std::io::Result<PromptChoice> {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(PromptChoice::Cancelled);
        }

        let entered = line.trim();
        if let Ok(number) = entered.parse::<usize>() {
            if let Some(option) = number.checked_sub(1).and_then(|i| request.options.get(i)) {
                return Ok(PromptChoice::Chosen(option.label.clone()));
            }
        }
        Ok(PromptChoice::Chosen(entered.to_string()))
    }
}

#[async_trait]
impl<R, W> CommandPrompt for TerminalPrompt<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn choose(&self, request: &PromptRequest) -> Result<PromptChoice> {
        let mut guard = self.io.lock().await;
        let (reader, writer) = &mut *guard;

        let result = match Self::render(writer, request).await {
            Ok(()) => Self::read_choice(reader, request).await,
            Err(e) => Err(e),
        };

        // Always end the prompt line, whatever the outcome
        if let Err(e) = writer.write_all(b"\n").await {
            debug!("Failed to close prompt: {}", e);
        }

        result.map_err(|e| Error::Prompt(e.to_string()))
    }
}
