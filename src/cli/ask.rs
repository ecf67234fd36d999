//! Prompt command: send one prompt and stream the reply to stdout.

use std::io::{self, Write};

use color_eyre::Result;

use super::args::AskArgs;
use crate::client::ChatClient;
use crate::config::ClientConfig;
use crate::decoder::DecodeOutcome;
use crate::models::ChatRequest;
use crate::traits::{Completion, StreamSink};

/// Sink writing reply text to a terminal as it arrives.
///
/// Error completions are reported on stderr.
pub struct TerminalSink<W> {
    out: W,
    write_failed: bool,
}

impl TerminalSink<io::Stdout> {
    /// Sink writing to the process stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            write_failed: false,
        }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> StreamSink for TerminalSink<W> {
    fn on_chunk(&mut self, text: &str) {
        let result = self
            .out
            .write_all(text.as_bytes())
            .and_then(|_| self.out.flush());
        if let Err(e) = result {
            // Keep decoding; only the first failure is worth reporting
            if !self.write_failed {
                tracing::warn!("Failed to write reply text: {}", e);
                self.write_failed = true;
            }
        }
    }

    fn on_done(&mut self, completion: Completion) {
        if let Some(message) = completion.error_message() {
            eprintln!("\nassistant error: {}", message);
        } else if completion.is_error() {
            eprintln!("\nassistant error");
        }
    }
}

/// Process exit code for a decode outcome.
pub fn exit_code(outcome: DecodeOutcome) -> i32 {
    match outcome {
        DecodeOutcome::Completed => 0,
        DecodeOutcome::Failed | DecodeOutcome::Exhausted => 1,
        DecodeOutcome::Cancelled => 130,
    }
}

/// Handle a prompt: stream the reply, cancelling on Ctrl-C.
pub async fn handle_ask_command(args: AskArgs) -> Result<DecodeOutcome> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = args.url {
        config = config.with_base_url(url);
        config.validate()?;
    }

    let client = ChatClient::from_config(config)?;
    let request = ChatRequest::from_prompt(args.prompt);
    let handle = client.stream_reply(&request, TerminalSink::stdout()).await?;

    let cancel = handle.cancel_handle();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, cancelling stream");
            cancel.cancel();
        }
    });

    let result = handle.join().await;
    interrupt.abort();
    println!();

    let outcome = result?;
    if outcome == DecodeOutcome::Exhausted {
        eprintln!("reply ended before the assistant finished");
    }
    Ok(outcome)
}
