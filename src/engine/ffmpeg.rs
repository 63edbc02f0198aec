//! Tokio-process implementation of the execution facade

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use crate::config::ToolPaths;
use crate::engine::progress::StatsTimeParser;
use crate::engine::{Completion, ProcessRunner, RunEvent};
use crate::error::{TrimPlanError, TrimPlanResult};
use crate::planner::{CommandKind, PlannedCommand};

/// Runs planned commands against the real `ffprobe`/`ffmpeg` binaries.
///
/// Probe kinds go to `ffprobe`, transcodes to `ffmpeg`. Both output pipes
/// are streamed line by line into the event channel; for transcodes the
/// periodic stats lines additionally yield progress events.
pub struct FfmpegRunner {
    tools: ToolPaths,
    cancel_tx: watch::Sender<()>,
}

impl FfmpegRunner {
    /// Create a runner using the given tool locations
    pub fn new(tools: ToolPaths) -> Self {
        let (cancel_tx, _) = watch::channel(());
        Self { tools, cancel_tx }
    }

    fn tool_for(&self, kind: CommandKind) -> &str {
        match kind {
            CommandKind::Probe | CommandKind::KeyframeProbe => &self.tools.ffprobe,
            CommandKind::Transcode => &self.tools.ffmpeg,
        }
    }
}

#[async_trait]
impl ProcessRunner for FfmpegRunner {
    async fn run(
        &self,
        command: &PlannedCommand,
        events: mpsc::Sender<RunEvent>,
    ) -> TrimPlanResult<Completion> {
        let tool = self.tool_for(command.kind).to_string();
        debug!("Spawning {} {}", tool, command.display_line());

        let mut child = Command::new(&tool)
            .args(&command.argv)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| TrimPlanError::ToolSpawn {
                tool: tool.clone(),
                source,
            })?;

        // Stats only appear on the transcode's diagnostic stream.
        let stats = match command.kind {
            CommandKind::Transcode => Some(StatsTimeParser::new()),
            _ => None,
        };

        let mut pumps = Vec::new();
        if let Some(stdout) = child.stdout.take() {
            pumps.push(tokio::spawn(pump_lines(stdout, events.clone(), None)));
        }
        if let Some(stderr) = child.stderr.take() {
            pumps.push(tokio::spawn(pump_lines(stderr, events.clone(), stats)));
        }

        let mut cancel_rx = self.cancel_tx.subscribe();
        let status = tokio::select! {
            status = child.wait() => status?,
            _ = cancel_rx.changed() => {
                warn!("Cancel requested; terminating {}", tool);
                child.start_kill().ok();
                child.wait().await?
            }
        };

        // Drain the pumps so trailing lines are delivered before completion.
        for pump in pumps {
            let _ = pump.await;
        }

        debug!("{} exited with {:?}", tool, status.code());
        Ok(Completion {
            code: status.code(),
        })
    }

    async fn cancel_all(&self) {
        let _ = self.cancel_tx.send(());
    }
}

/// Forward lines from one output pipe into the event channel, emitting a
/// progress event first whenever a stats line carries a processed-time
/// counter
async fn pump_lines<R>(reader: R, events: mpsc::Sender<RunEvent>, stats: Option<StatsTimeParser>)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if let Some(parser) = &stats {
            if let Some(processed_ms) = parser.processed_ms(&line) {
                if events
                    .send(RunEvent::Progress { processed_ms })
                    .await
                    .is_err()
                {
                    return;
                }
            }
        }
        if events.send(RunEvent::Log(line)).await.is_err() {
            return;
        }
    }
}
