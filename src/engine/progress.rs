//! Progress mapping for the transcode stats stream

use regex::Regex;

/// Maps the tool's raw processed-time counter to a display value relative
/// to the trim offset.
///
/// The mapper does not clamp: the tool's own timestamp reporting can
/// overshoot slightly at stream boundaries, and the presentation layer
/// clamps to `[0, adjusted_duration * 1000]` when rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressMapper {
    from_offset_secs: Option<f64>,
}

impl ProgressMapper {
    /// Create a mapper for a session with an optional in-point offset
    pub fn new(from_offset_secs: Option<f64>) -> Self {
        Self { from_offset_secs }
    }

    /// Convert a processed-time counter into the offset-relative value
    pub fn map(&self, processed_ms: i64) -> i64 {
        match self.from_offset_secs {
            Some(offset) => processed_ms - (offset * 1000.0).round() as i64,
            None => processed_ms,
        }
    }
}

/// Extracts the processed-time counter from transcode stats lines.
///
/// The tool interleaves periodic stats like
/// `frame=  120 fps= 30 q=28.0 size=... time=00:00:04.05 bitrate=...`
/// with its regular log output; only the clock field matters here.
#[derive(Debug)]
pub struct StatsTimeParser {
    time_re: Regex,
}

impl StatsTimeParser {
    /// Create a stats parser
    pub fn new() -> Self {
        Self {
            time_re: Regex::new(r"time=(\d+):(\d{2}):(\d{2}(?:\.\d+)?)")
                .expect("invalid stats time pattern"),
        }
    }

    /// Processed milliseconds from a stats line, if the line carries one
    pub fn processed_ms(&self, line: &str) -> Option<i64> {
        let caps = self.time_re.captures(line)?;
        let hours: i64 = caps[1].parse().ok()?;
        let minutes: i64 = caps[2].parse().ok()?;
        let seconds: f64 = caps[3].parse().ok()?;
        Some(hours * 3_600_000 + minutes * 60_000 + (seconds * 1000.0).round() as i64)
    }
}

impl Default for StatsTimeParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_subtracts_rounded_offset() {
        let mapper = ProgressMapper::new(Some(2.0));
        assert_eq!(mapper.map(12000), 10000);
    }

    #[test]
    fn test_map_without_offset_is_identity() {
        let mapper = ProgressMapper::new(None);
        assert_eq!(mapper.map(12000), 12000);
    }

    #[test]
    fn test_map_offset_rounds_to_millis() {
        let mapper = ProgressMapper::new(Some(1.2345));
        assert_eq!(mapper.map(5000), 5000 - 1235);
    }

    #[test]
    fn test_map_does_not_clamp_negative_results() {
        let mapper = ProgressMapper::new(Some(10.0));
        assert_eq!(mapper.map(2000), -8000);
    }

    #[test]
    fn test_stats_line_time_extraction() {
        let parser = StatsTimeParser::new();
        let line = "frame=  120 fps= 30 q=28.0 size=     512KiB time=00:00:04.05 bitrate=1034.5kbits/s speed=1.2x";
        assert_eq!(parser.processed_ms(line), Some(4050));
    }

    #[test]
    fn test_stats_line_with_hours() {
        let parser = StatsTimeParser::new();
        assert_eq!(
            parser.processed_ms("time=01:02:03.50 bitrate=1k"),
            Some(3_723_500)
        );
    }

    #[test]
    fn test_non_stats_lines_yield_nothing() {
        let parser = StatsTimeParser::new();
        assert_eq!(parser.processed_ms("Press [q] to stop"), None);
        assert_eq!(parser.processed_ms("time=N/A"), None);
    }
}
