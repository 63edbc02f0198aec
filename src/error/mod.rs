//! Error handling module for TrimPlan

use thiserror::Error;

/// Main error type for TrimPlan operations
#[derive(Error, Debug)]
pub enum TrimPlanError {
    /// Trim marker ordering error
    #[error("Invalid trim range: from ({from}) must be less than to ({to})")]
    InvalidTrimRange { from: f64, to: f64 },

    /// Negative trim marker
    #[error("Trim marker cannot be negative: {value}")]
    NegativeMark { value: f64 },

    /// Probe invocation reported a non-success exit code
    #[error("Probe failed with exit code {code}")]
    ProbeFailed { code: i32 },

    /// Transcode invocation reported a non-success exit code
    #[error("Transcode failed with exit code {code}")]
    TranscodeFailed { code: i32 },

    /// External tool could not be spawned
    #[error("Failed to spawn {tool}: {source}")]
    ToolSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// Event channel to the caller closed mid-run
    #[error("Event stream closed before the external tool completed")]
    EventStreamClosed,

    /// Configuration file read/parse error
    #[error("Failed to load configuration from {path}: {message}")]
    ConfigError { path: String, message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for TrimPlan operations
pub type TrimPlanResult<T> = std::result::Result<T, TrimPlanError>;
