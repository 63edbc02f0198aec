//! Line-oriented parsing of probe tool output
//!
//! The probe tools stream their findings as log lines. Two shapes matter
//! here: the container `Duration:` header and one `pts_time=` line per
//! keyframe when frame listing was requested. Everything else is noise and
//! is ignored.

use regex::Regex;
use tracing::debug;

use crate::probe::{KeyframeIndex, MediaKind};

/// Classify a stream-enumeration listing (one codec-type token per line).
///
/// Any line whose token is exactly `video` marks the file as video;
/// otherwise it is treated as audio. There is no error case.
pub fn classify(raw_stream_list: &str) -> MediaKind {
    if raw_stream_list.lines().any(|line| line.trim() == "video") {
        MediaKind::Video
    } else {
        MediaKind::Audio
    }
}

/// Incremental accumulator for one keyframe-probe session.
///
/// Lines arrive one at a time as the external tool produces them; state
/// persists across calls within a session. A new session gets a new parser,
/// so partially accumulated state is never reused.
#[derive(Debug)]
pub struct ProbeLogParser {
    duration_re: Regex,
    frame_re: Regex,
    duration_secs: u32,
    keyframes: KeyframeIndex,
}

impl ProbeLogParser {
    /// Create a fresh parser for a new probe session
    pub fn new() -> Self {
        Self {
            duration_re: Regex::new(r"^\s*Duration: (.*), start: (.*), bitrate: (.*)$")
                .expect("invalid duration pattern"),
            frame_re: Regex::new(r"^pts_time=(.*)$").expect("invalid pts_time pattern"),
            duration_secs: 0,
            keyframes: KeyframeIndex::new(),
        }
    }

    /// Fold one received line into the parser state.
    ///
    /// Unrecognized lines are ignored. A repeated duration line overwrites
    /// the previous value (last one wins).
    pub fn feed_line(&mut self, line: &str) {
        if let Some(caps) = self.duration_re.captures(line) {
            if let Some(secs) = parse_clock(&caps[1]) {
                self.duration_secs = secs;
            } else {
                debug!("Ignoring malformed duration field: {}", &caps[1]);
            }
        } else if let Some(caps) = self.frame_re.captures(line) {
            match caps[1].trim().parse::<f64>() {
                Ok(ts) if ts.is_finite() => self.keyframes.insert(ts),
                _ => debug!("Ignoring malformed pts_time field: {}", &caps[1]),
            }
        }
    }

    /// Fold a multi-line chunk, line by line, in arrival order
    pub fn feed_chunk(&mut self, chunk: &str) {
        for line in chunk.lines() {
            self.feed_line(line);
        }
    }

    /// Best duration seen so far, in whole seconds
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    /// Keyframe timestamps collected so far
    pub fn keyframes(&self) -> &KeyframeIndex {
        &self.keyframes
    }

    /// Consume the parser, yielding the accumulated facts
    pub fn into_parts(self) -> (u32, KeyframeIndex) {
        (self.duration_secs, self.keyframes)
    }
}

impl Default for ProbeLogParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Decompose an `H:MM:SS.ms` clock value into total whole seconds.
///
/// Hours and minutes truncate as integers; the seconds component rounds to
/// the nearest whole second.
fn parse_clock(clock: &str) -> Option<u32> {
    let mut parts = clock.trim().split(':');
    let hours: u32 = parts.next()?.parse().ok()?;
    let minutes: u32 = parts.next()?.parse().ok()?;
    let seconds: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Some(hours * 3600 + minutes * 60 + seconds.round() as u32)
}
