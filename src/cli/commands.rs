//! Command execution for the CLI front end
//!
//! The CLI plays the role of the surrounding application: it feeds the
//! session with a file and marks, and renders the streamed log and the
//! mapped progress counter.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::cli::args::{InspectArgs, PlanArgs, TrimArgs};
use crate::config::ToolPaths;
use crate::engine::{FfmpegRunner, NullObserver, ProgressObserver, TrimJob, TrimSession};
use crate::planner::TrimRequest;

/// Renders session output on the terminal.
///
/// Clamping to the progress bound happens here, not in the mapper: the
/// tool's counters may overshoot slightly at stream boundaries.
struct ConsoleObserver {
    quiet: bool,
}

impl ProgressObserver for ConsoleObserver {
    fn on_log(&self, line: &str) {
        if !self.quiet {
            eprintln!("{}", line);
        }
    }

    fn on_progress(&self, done_ms: i64, total_ms: i64) {
        if total_ms > 0 {
            let clamped = done_ms.clamp(0, total_ms);
            let percent = clamped as f64 / total_ms as f64 * 100.0;
            eprint!("\rProcessing: {:>5.1}%", percent);
        }
    }
}

fn session_for(config: Option<&std::path::Path>) -> Result<TrimSession> {
    let tools = ToolPaths::load_or_default(config)?;
    let runner = Arc::new(FfmpegRunner::new(tools));
    Ok(TrimSession::new(runner))
}

/// Execute the trim command
pub async fn execute_trim(args: TrimArgs, config: Option<&std::path::Path>) -> Result<()> {
    let session = session_for(config)?;
    let job = TrimJob {
        input: args.input,
        output: args.output,
        request: TrimRequest::new(args.from, args.to),
    };

    let observer = ConsoleObserver { quiet: args.quiet };
    let outcome = session.trim(&job, &observer).await?;
    eprintln!();

    info!(
        "Wrote {} ({:?} path)",
        job.output, outcome.plan.kind
    );
    println!("{}", job.output);
    Ok(())
}

/// Execute the inspect command
pub async fn execute_inspect(args: InspectArgs, config: Option<&std::path::Path>) -> Result<()> {
    let session = session_for(config)?;
    let result = session.inspect(&args.input).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("kind: {:?}", result.kind);
        println!("duration: {}s", result.duration_secs);
    }
    Ok(())
}

/// Execute the plan command
pub async fn execute_plan(args: PlanArgs, config: Option<&std::path::Path>) -> Result<()> {
    let session = session_for(config)?;
    let job = TrimJob {
        input: args.input,
        output: args.output,
        request: TrimRequest::new(args.from, args.to),
    };

    let plan = session.plan(&job, &NullObserver).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan.command)?);
    } else {
        println!("{}", plan.command.display_line());
    }
    Ok(())
}
