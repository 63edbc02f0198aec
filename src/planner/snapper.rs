//! Keyframe snapping for the video trim path

use tracing::{debug, warn};

use crate::planner::{ResolvedTrim, TrimRequest};
use crate::probe::KeyframeIndex;

/// Snap requested trim markers to usable keyframe boundaries.
///
/// The in-point moves down to the largest keyframe at or before it, the
/// out-point up to the smallest keyframe at or after it, so the cut region
/// always covers the requested range. When the index offers no candidate
/// (empty index, or a mark outside the indexed span) the raw mark passes
/// through unsnapped and the tool seeks as best it can.
///
/// Audio trims never come through here; they cut by direct time offsets.
pub fn snap(requested: &TrimRequest, index: &KeyframeIndex, duration_secs: u32) -> ResolvedTrim {
    let from = requested.from.map(|mark| match index.floor(mark) {
        Some(snapped) => {
            debug!("Snapped from mark {:.2} down to keyframe {:.2}", mark, snapped);
            snapped
        }
        None => {
            warn!("No keyframe at or before {:.2}; using unsnapped mark", mark);
            mark
        }
    });

    let to = requested.to.map(|mark| match index.ceiling(mark) {
        Some(snapped) => {
            debug!("Snapped to mark {:.2} up to keyframe {:.2}", mark, snapped);
            snapped
        }
        None => {
            warn!("No keyframe at or after {:.2}; using unsnapped mark", mark);
            mark
        }
    });

    // Progress bound: the pre-trim duration loses the rounded out-point as
    // a proxy for the tail that will not be processed. Kept as-is from the
    // source system; see ResolvedTrim::adjusted_duration.
    let adjusted_duration = match to {
        Some(to) if duration_secs > to.round() as u32 => duration_secs - to.round() as u32,
        _ => duration_secs,
    };

    ResolvedTrim {
        from,
        to,
        adjusted_duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> KeyframeIndex {
        [0.0, 2.0, 4.0, 6.5, 9.0].into_iter().collect()
    }

    #[test]
    fn test_from_snaps_down_to_snaps_up() {
        let request = TrimRequest::new(Some(2.7), Some(5.1));
        let resolved = snap(&request, &index(), 60);
        assert_eq!(resolved.from, Some(2.0));
        assert_eq!(resolved.to, Some(6.5));
    }

    #[test]
    fn test_marks_on_keyframes_are_unchanged() {
        let request = TrimRequest::new(Some(4.0), Some(6.5));
        let resolved = snap(&request, &index(), 60);
        assert_eq!(resolved.from, Some(4.0));
        assert_eq!(resolved.to, Some(6.5));
    }

    #[test]
    fn test_snapping_is_idempotent() {
        let first = snap(&TrimRequest::new(Some(3.9), Some(5.0)), &index(), 60);
        let again = snap(&TrimRequest::new(first.from, first.to), &index(), 60);
        assert_eq!(first.from, again.from);
        assert_eq!(first.to, again.to);
    }

    #[test]
    fn test_unset_marks_stay_unset() {
        let resolved = snap(&TrimRequest::default(), &index(), 60);
        assert_eq!(resolved.from, None);
        assert_eq!(resolved.to, None);
        assert_eq!(resolved.adjusted_duration, 60);
    }

    #[test]
    fn test_empty_index_passes_marks_through() {
        let empty = KeyframeIndex::new();
        let resolved = snap(&TrimRequest::new(Some(2.7), Some(5.1)), &empty, 60);
        assert_eq!(resolved.from, Some(2.7));
        assert_eq!(resolved.to, Some(5.1));
    }

    #[test]
    fn test_adjusted_duration_drops_rounded_out_point() {
        let resolved = snap(&TrimRequest::new(None, Some(6.5)), &index(), 60);
        // ceiling(6.5) = 6.5, round = 7, 60 > 7 so 53 remains
        assert_eq!(resolved.adjusted_duration, 53);
    }

    #[test]
    fn test_adjusted_duration_unchanged_when_out_point_past_duration() {
        let resolved = snap(&TrimRequest::new(None, Some(9.0)), &index(), 8);
        assert_eq!(resolved.adjusted_duration, 8);
    }

    #[test]
    fn test_adjusted_duration_unchanged_without_out_point() {
        let resolved = snap(&TrimRequest::new(Some(2.0), None), &index(), 60);
        assert_eq!(resolved.adjusted_duration, 60);
    }
}
