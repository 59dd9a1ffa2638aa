//! Worker and session lifecycle around an [`Assistant`].

use crate::assistant::Assistant;
use crate::error::Result;
use crate::protocol::{decode_call, encode_reply, ToolCall, ToolReply};
use crate::vad::{VADConfig, VadModel};
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

/// Process-level state shared by every session this worker runs.
///
/// The VAD is loaded on first use and the same handle is given to each
/// session afterwards.
#[derive(Debug, Default)]
pub struct WorkerContext {
    vad_config: VADConfig,
    vad: OnceCell<Arc<VadModel>>,
}

impl WorkerContext {
    pub fn new(vad_config: VADConfig) -> Self {
        Self {
            vad_config,
            vad: OnceCell::new(),
        }
    }

    /// Load shared models ahead of the first session.
    pub fn prewarm(&self) {
        self.vad();
    }

    pub fn vad(&self) -> Arc<VadModel> {
        Arc::clone(
            self.vad
                .get_or_init(|| Arc::new(VadModel::load(self.vad_config.clone()))),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageSummary {
    pub tool_calls: u32,
    pub failures: u32,
    pub per_tool: BTreeMap<String, u32>,
    pub tool_time: Duration,
}

impl fmt::Display for UsageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tool call(s), {} failed, {:.1}ms in tools",
            self.tool_calls,
            self.failures,
            self.tool_time.as_secs_f64() * 1000.0
        )?;
        for (name, count) in &self.per_tool {
            write!(f, ", {}={}", name, count)?;
        }
        Ok(())
    }
}

/// Accumulates per-call metrics over a session.
#[derive(Debug, Default)]
pub struct UsageCollector {
    summary: UsageSummary,
}

impl UsageCollector {
    pub fn collect(&mut self, tool: &str, ok: bool, elapsed: Duration) {
        self.summary.tool_calls += 1;
        if !ok {
            self.summary.failures += 1;
        }
        *self.summary.per_tool.entry(tool.to_string()).or_insert(0) += 1;
        self.summary.tool_time += elapsed;
    }

    pub fn summary(&self) -> UsageSummary {
        self.summary.clone()
    }
}

type ShutdownCallback = Box<dyn FnOnce(&UsageSummary) + Send>;

/// One conversation in one room, driving one assistant.
pub struct Session<A: Assistant> {
    room: String,
    assistant: A,
    vad: Arc<VadModel>,
    usage: UsageCollector,
    shutdown_callbacks: Vec<ShutdownCallback>,
    cancel_token: CancellationToken,
}

impl<A: Assistant> Session<A> {
    pub fn new(worker: &WorkerContext, room: impl Into<String>, assistant: A) -> Self {
        let room = room.into();
        log::info!("[{}] Starting {} session", room, assistant.kind());

        Self {
            room,
            assistant,
            vad: worker.vad(),
            usage: UsageCollector::default(),
            shutdown_callbacks: Vec::new(),
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn assistant(&self) -> &A {
        &self.assistant
    }

    pub fn vad(&self) -> &Arc<VadModel> {
        &self.vad
    }

    /// Token cancelling every tool call of this session.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Register a callback run once when the session shuts down.
    pub fn add_shutdown_callback<F>(&mut self, callback: F)
    where
        F: FnOnce(&UsageSummary) + Send + 'static,
    {
        self.shutdown_callbacks.push(Box::new(callback));
    }

    pub async fn handle_tool_call(&mut self, call: ToolCall) -> ToolReply {
        log::info!("[{}] Tool call: {} {}", self.room, call.name, call.arguments);

        let started = Instant::now();
        let result = self
            .assistant
            .call_tool(&call.name, call.arguments, self.cancel_token.child_token())
            .await;
        self.usage
            .collect(&call.name, result.is_ok(), started.elapsed());

        match result {
            Ok(text) => {
                log::debug!("[{}] {} -> {}", self.room, call.name, text);
                ToolReply::success(call.id, text)
            }
            Err(e) => {
                log::error!("[{}] {} failed: {}", self.room, call.name, e);
                ToolReply::failure(call.id, e)
            }
        }
    }

    /// Answer one JSON-lines frame. Malformed frames get an error reply
    /// rather than ending the session.
    pub async fn respond_line(&mut self, line: &str) -> Result<String> {
        let reply = match decode_call(line) {
            Ok(call) => self.handle_tool_call(call).await,
            Err(e) => {
                log::warn!("[{}] Rejected frame: {}", self.room, e);
                ToolReply::failure(None, e)
            }
        };
        Ok(encode_reply(&reply)?)
    }

    /// Answer JSON-lines tool calls from `input` until EOF or cancellation.
    ///
    /// Shutdown callbacks run whether the loop ends cleanly or on an I/O
    /// error; the error is returned after them.
    pub async fn serve<R, W>(mut self, input: R, mut output: W) -> Result<UsageSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let served = self.pump(input, &mut output).await;
        let summary = self.shutdown();
        served.map(|()| summary)
    }

    async fn pump<R, W>(&mut self, input: R, output: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let cancel = self.cancel_token.clone();
        let mut lines = input.lines();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        log::info!("[{}] Input closed, shutting down...", self.room);
                        return Ok(());
                    };
                    if line.trim().is_empty() {
                        continue;
                    }

                    let mut frame = self.respond_line(&line).await?;
                    frame.push('\n');
                    output.write_all(frame.as_bytes()).await?;
                    output.flush().await?;
                }

                _ = cancel.cancelled() => {
                    log::info!("[{}] Session cancelled, shutting down...", self.room);
                    return Ok(());
                }
            }
        }
    }

    /// End the session, running shutdown callbacks in registration order.
    pub fn shutdown(self) -> UsageSummary {
        self.cancel_token.cancel();
        let summary = self.usage.summary();
        log::info!("[{}] Usage: {}", self.room, summary);

        for callback in self.shutdown_callbacks {
            callback(&summary);
        }
        summary
    }
}
