//! Per-session trim orchestration
//!
//! One session covers one source file. All parser state lives in locals
//! scoped to a single probe, so nothing accumulated here can leak into the
//! next session. Probes and the transcode run single-flight: each step is
//! awaited before the next command is issued.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::engine::{Completion, ProcessRunner, ProgressMapper, ProgressObserver, RunEvent};
use crate::error::{TrimPlanError, TrimPlanResult};
use crate::planner::{snap, CommandSynthesizer, PlannedCommand, ResolvedTrim, TrimRequest};
use crate::probe::{classify, MediaKind, MediaProbeResult, ProbeLogParser};

/// One requested trim: a source, a destination, and the raw markers
#[derive(Debug, Clone)]
pub struct TrimJob {
    /// Source file reference
    pub input: String,
    /// Destination file reference
    pub output: String,
    /// Raw user-selected markers
    pub request: TrimRequest,
}

/// Everything the planner decided for a job, before execution
#[derive(Debug, Clone)]
pub struct TrimPlan {
    /// Classification of the source
    pub kind: MediaKind,
    /// Markers after snapping (video) or pass-through (audio)
    pub resolved: ResolvedTrim,
    /// The transcode invocation to run
    pub command: PlannedCommand,
}

/// Result of a completed trim
#[derive(Debug, Clone)]
pub struct TrimOutcome {
    /// The plan that was executed
    pub plan: TrimPlan,
    /// Terminal state of the transcode
    pub completion: Completion,
}

/// Orchestrates probe, snap, and transcode for one source file
pub struct TrimSession {
    runner: Arc<dyn ProcessRunner>,
}

impl TrimSession {
    /// Create a session backed by the given runner
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }

    /// Classify the source file via the stream-enumeration probe
    pub async fn classify_input(&self, input: &str) -> TrimPlanResult<MediaKind> {
        let command = CommandSynthesizer::classification_probe(input);
        let (completion, lines) = self.run_collecting(&command).await?;
        if !completion.is_success() {
            return Err(TrimPlanError::ProbeFailed {
                code: completion.code_or_killed(),
            });
        }

        let kind = classify(&lines.join("\n"));
        debug!("Classified {} as {:?}", input, kind);
        Ok(kind)
    }

    /// Probe classification and duration for display purposes
    pub async fn inspect(&self, input: &str) -> TrimPlanResult<MediaProbeResult> {
        let kind = self.classify_input(input).await?;

        // Duration comes from the keyframe probe's log header; the
        // audio-only path has no such probe and reports zero.
        let duration_secs = if kind.is_video() {
            let (duration, _) = self.keyframe_probe(input, false, &crate::engine::NullObserver).await?;
            duration
        } else {
            0
        };

        Ok(MediaProbeResult {
            kind,
            duration_secs,
        })
    }

    /// Run the probes and synthesize the transcode command without
    /// executing it
    pub async fn plan(
        &self,
        job: &TrimJob,
        observer: &dyn ProgressObserver,
    ) -> TrimPlanResult<TrimPlan> {
        job.request.validate()?;

        let kind = self.classify_input(&job.input).await?;

        let (resolved, command) = if kind.is_video() {
            let (duration, keyframes) = self
                .keyframe_probe(&job.input, job.request.any_mark_set(), observer)
                .await?;
            let resolved = snap(&job.request, &keyframes, duration);
            if let Some(from) = resolved.from {
                observer.on_log(&format!("Fixing from = {:.2}", from));
            }
            if let Some(to) = resolved.to {
                observer.on_log(&format!("Fixing to = {:.2}", to));
            }
            let command = CommandSynthesizer::video_transcode(&resolved, &job.input, &job.output);
            (resolved, command)
        } else {
            let resolved = ResolvedTrim::unsnapped(&job.request, 0);
            let command = CommandSynthesizer::audio_transcode(&job.request, &job.input, &job.output);
            (resolved, command)
        };

        Ok(TrimPlan {
            kind,
            resolved,
            command,
        })
    }

    /// Plan and execute a trim, streaming progress to the observer
    pub async fn trim(
        &self,
        job: &TrimJob,
        observer: &dyn ProgressObserver,
    ) -> TrimPlanResult<TrimOutcome> {
        let plan = self.plan(job, observer).await?;

        info!("Executing {}", plan.command.display_line());
        observer.on_log(&format!("Executing {}", plan.command.display_line()));

        let mapper = ProgressMapper::new(plan.resolved.from);
        let total_ms = i64::from(plan.resolved.adjusted_duration) * 1000;

        let (tx, mut rx) = mpsc::channel(64);
        let runner = Arc::clone(&self.runner);
        let command = plan.command.clone();
        let run = tokio::spawn(async move { runner.run(&command, tx).await });

        while let Some(event) = rx.recv().await {
            match event {
                // The raw per-frame stats spam stays out of the user log.
                RunEvent::Log(line) => {
                    if !line.starts_with("frame ") {
                        observer.on_log(&line);
                    }
                }
                RunEvent::Progress { processed_ms } => {
                    observer.on_progress(mapper.map(processed_ms), total_ms);
                }
            }
        }

        let completion = run
            .await
            .map_err(|_| TrimPlanError::EventStreamClosed)??;

        if !completion.is_success() {
            return Err(TrimPlanError::TranscodeFailed {
                code: completion.code_or_killed(),
            });
        }

        info!("Transcode finished with code {:?}", completion.code);
        Ok(TrimOutcome { plan, completion })
    }

    /// Terminate any in-flight invocation for this session
    pub async fn cancel(&self) {
        self.runner.cancel_all().await;
    }

    /// Run the keyframe-listing probe, folding its log into a fresh parser
    async fn keyframe_probe(
        &self,
        input: &str,
        any_mark_set: bool,
        observer: &dyn ProgressObserver,
    ) -> TrimPlanResult<(u32, crate::probe::KeyframeIndex)> {
        let command = CommandSynthesizer::keyframe_probe(input, any_mark_set);
        observer.on_log(&format!("Executing {}", command.display_line()));

        let mut parser = ProbeLogParser::new();

        let (tx, mut rx) = mpsc::channel(64);
        let runner = Arc::clone(&self.runner);
        let probe = command.clone();
        let run = tokio::spawn(async move { runner.run(&probe, tx).await });

        while let Some(event) = rx.recv().await {
            if let RunEvent::Log(line) = event {
                parser.feed_line(&line);
            }
        }

        let completion = run
            .await
            .map_err(|_| TrimPlanError::EventStreamClosed)??;

        // Parsed facts are only trusted once the probe reports success.
        if !completion.is_success() {
            return Err(TrimPlanError::ProbeFailed {
                code: completion.code_or_killed(),
            });
        }

        let (duration, keyframes) = parser.into_parts();
        debug!(
            "Keyframe probe: duration {}s, {} keyframes",
            duration,
            keyframes.len()
        );
        Ok((duration, keyframes))
    }

    /// Run a command to completion, collecting its log lines
    async fn run_collecting(
        &self,
        command: &PlannedCommand,
    ) -> TrimPlanResult<(Completion, Vec<String>)> {
        let (tx, mut rx) = mpsc::channel(64);
        let runner = Arc::clone(&self.runner);
        let cmd = command.clone();
        let run = tokio::spawn(async move { runner.run(&cmd, tx).await });

        let mut lines = Vec::new();
        while let Some(event) = rx.recv().await {
            if let RunEvent::Log(line) = event {
                lines.push(line);
            }
        }

        let completion = run
            .await
            .map_err(|_| TrimPlanError::EventStreamClosed)??;
        Ok((completion, lines))
    }
}
