//! Trim planning module
//!
//! Pure logic that turns user trim marks plus probed media facts into the
//! exact command lines handed to the external tools.

use serde::{Deserialize, Serialize};

use crate::error::{TrimPlanError, TrimPlanResult};

pub mod command;
pub mod snapper;

pub use command::CommandSynthesizer;
pub use snapper::snap;

/// Raw user-selected trim markers, in seconds.
///
/// Either marker may be unset. Values come straight from the player
/// position at click time and are not keyframe-aligned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrimRequest {
    /// In-point, seconds from the start of the file
    pub from: Option<f64>,
    /// Out-point, seconds from the start of the file
    pub to: Option<f64>,
}

impl TrimRequest {
    /// Create a request from optional markers
    pub fn new(from: Option<f64>, to: Option<f64>) -> Self {
        Self { from, to }
    }

    /// True when at least one marker is set
    pub fn any_mark_set(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    /// Reject negative markers and `from >= to`.
    ///
    /// The ordering check is deliberate: passing an inverted range through
    /// would hand the external tool a negative implied duration and fail
    /// there with a much worse message.
    pub fn validate(&self) -> TrimPlanResult<()> {
        for value in [self.from, self.to].into_iter().flatten() {
            if value < 0.0 || !value.is_finite() {
                return Err(TrimPlanError::NegativeMark { value });
            }
        }
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from >= to {
                return Err(TrimPlanError::InvalidTrimRange { from, to });
            }
        }
        Ok(())
    }
}

/// Trim markers after keyframe snapping, plus the progress-bound duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTrim {
    /// In-point snapped down to the nearest keyframe
    pub from: Option<f64>,
    /// Out-point snapped up to the nearest keyframe
    pub to: Option<f64>,
    /// Seconds used to size the progress bound.
    ///
    /// Starts at the probed duration; when an out-point is set and the
    /// duration exceeds `round(to)`, it is reduced by `round(to)`. This is
    /// a "remaining tail after the cut" approximation carried over from the
    /// source system, not an exact post-trim duration.
    pub adjusted_duration: u32,
}

impl ResolvedTrim {
    /// Pass-through resolution for the audio path, where no keyframe
    /// snapping applies
    pub fn unsnapped(request: &TrimRequest, duration_secs: u32) -> Self {
        Self {
            from: request.from,
            to: request.to,
            adjusted_duration: duration_secs,
        }
    }
}

/// Kind of external invocation a planned command drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    /// Stream-classification probe (ffprobe)
    Probe,
    /// Keyframe-listing probe (ffprobe)
    KeyframeProbe,
    /// Final transcode (ffmpeg)
    Transcode,
}

/// An ordered token sequence for one external invocation.
///
/// Pure value object; building it has no side effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedCommand {
    /// What this invocation does
    pub kind: CommandKind,
    /// Argument list, input-before-output ordering preserved
    pub argv: Vec<String>,
}

impl PlannedCommand {
    /// Render the argv as a single shell-style line for logging
    pub fn display_line(&self) -> String {
        self.argv.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_unset_marks() {
        assert!(TrimRequest::default().validate().is_ok());
        assert!(TrimRequest::new(Some(1.0), None).validate().is_ok());
        assert!(TrimRequest::new(None, Some(2.0)).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let request = TrimRequest::new(Some(10.0), Some(5.0));
        assert!(matches!(
            request.validate(),
            Err(TrimPlanError::InvalidTrimRange { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_length_range() {
        let request = TrimRequest::new(Some(5.0), Some(5.0));
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_mark() {
        let request = TrimRequest::new(Some(-1.0), None);
        assert!(matches!(
            request.validate(),
            Err(TrimPlanError::NegativeMark { .. })
        ));
    }

    #[test]
    fn test_any_mark_set() {
        assert!(!TrimRequest::default().any_mark_set());
        assert!(TrimRequest::new(None, Some(3.0)).any_mark_set());
    }
}
