//! Execution facade over the external media tools
//!
//! The planner is pure; everything that actually spawns a process lives
//! behind [`ProcessRunner`] so the orchestration in [`session`] can be
//! exercised against a scripted runner in tests.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::TrimPlanResult;
use crate::planner::PlannedCommand;

pub mod ffmpeg;
pub mod progress;
pub mod session;

pub use ffmpeg::FfmpegRunner;
pub use progress::ProgressMapper;
pub use session::{TrimJob, TrimOutcome, TrimPlan, TrimSession};

/// One item streamed back from a running external invocation
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// A log line, in arrival order
    Log(String),
    /// Processed-time counter from the transcode stats stream
    Progress {
        /// Milliseconds of input processed so far
        processed_ms: i64,
    },
}

/// Terminal state of an external invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// Process exit code; `None` when killed by a signal or cancel
    pub code: Option<i32>,
}

impl Completion {
    /// Whether the invocation finished successfully
    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    /// Exit code for error reporting, with killed processes mapped to -1
    pub fn code_or_killed(&self) -> i32 {
        self.code.unwrap_or(-1)
    }
}

/// Runs planned commands asynchronously, streaming events back.
///
/// At most one invocation is in flight per session; the caller awaits
/// completion before issuing the next command.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run a planned command to completion, streaming [`RunEvent`]s into
    /// `events` in arrival order
    async fn run(
        &self,
        command: &PlannedCommand,
        events: mpsc::Sender<RunEvent>,
    ) -> TrimPlanResult<Completion>;

    /// Terminate any in-flight invocation
    async fn cancel_all(&self);
}

/// Presentation-layer hook for session output.
///
/// `on_progress` receives the mapped counter and the progress bound in
/// milliseconds; the observer is responsible for clamping to the bound,
/// since the external tool's timestamps may overshoot at stream ends.
pub trait ProgressObserver: Send + Sync {
    /// A log line worth showing to the user
    fn on_log(&self, line: &str);

    /// Mapped progress counter update
    fn on_progress(&self, done_ms: i64, total_ms: i64);
}

/// Observer that discards everything, for headless callers
pub struct NullObserver;

impl ProgressObserver for NullObserver {
    fn on_log(&self, _line: &str) {}
    fn on_progress(&self, _done_ms: i64, _total_ms: i64) {}
}
