//! TrimPlan Library
//!
//! Plans keyframe-aware trims of local audio/video files and drives the
//! external `ffprobe`/`ffmpeg` binaries to carry them out: probe a file to
//! classify it, snap user trim marks to keyframe boundaries, synthesize the
//! minimal command line, and map the tool's progress counters back to a
//! bounded display value.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod planner;
pub mod probe;

// Re-export commonly used types
pub use config::ToolPaths;
pub use engine::{FfmpegRunner, ProcessRunner, ProgressMapper, TrimJob, TrimSession};
pub use error::{TrimPlanError, TrimPlanResult};
pub use planner::{CommandKind, PlannedCommand, ResolvedTrim, TrimRequest};
pub use probe::{KeyframeIndex, MediaKind, MediaProbeResult};
