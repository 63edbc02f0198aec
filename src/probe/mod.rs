//! Media classification and keyframe index types

use serde::{Deserialize, Serialize};

pub mod parser;

pub use parser::{classify, ProbeLogParser};

/// Broad media classification derived from the stream-enumeration probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// No video stream present; trimmed by direct time offsets
    Audio,
    /// At least one video stream; trims snap to keyframe boundaries
    Video,
}

impl MediaKind {
    /// Whether the video trim path (keyframe probe + snapping) applies
    pub fn is_video(&self) -> bool {
        matches!(self, MediaKind::Video)
    }
}

/// Facts recovered from probing an opened file, immutable once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaProbeResult {
    /// Stream classification
    pub kind: MediaKind,
    /// Total duration in whole seconds
    pub duration_secs: u32,
}

/// Ordered set of keyframe timestamps in seconds.
///
/// Strictly increasing, no duplicates. Built from a keyframe-listing probe
/// and only populated when trimming is requested on a video. Values are
/// stored as reported by the probe tool; out-of-range timestamps are not
/// filtered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyframeIndex {
    timestamps: Vec<f64>,
}

impl KeyframeIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a timestamp, keeping the set sorted and deduplicated
    pub fn insert(&mut self, secs: f64) {
        match self.timestamps.binary_search_by(|probe| probe.total_cmp(&secs)) {
            Ok(_) => {}
            Err(pos) => self.timestamps.insert(pos, secs),
        }
    }

    /// Largest indexed timestamp less than or equal to `secs`
    pub fn floor(&self, secs: f64) -> Option<f64> {
        let pos = self.timestamps.partition_point(|&t| t <= secs);
        if pos == 0 {
            None
        } else {
            Some(self.timestamps[pos - 1])
        }
    }

    /// Smallest indexed timestamp greater than or equal to `secs`
    pub fn ceiling(&self, secs: f64) -> Option<f64> {
        let pos = self.timestamps.partition_point(|&t| t < secs);
        self.timestamps.get(pos).copied()
    }

    /// Number of indexed keyframes
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// True when no keyframe-listing probe has populated the index
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Indexed timestamps in ascending order
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }
}

impl FromIterator<f64> for KeyframeIndex {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut index = Self::new();
        for t in iter {
            index.insert(t);
        }
        index
    }
}
