//! Synthesis of external tool argument lists
//!
//! Argument order matters: the tools require seek flags before the input
//! reference and the output reference last.

use crate::planner::{CommandKind, PlannedCommand, ResolvedTrim, TrimRequest};

/// Fixed audio codec for the video path
const VIDEO_AUDIO_CODEC: &str = "aac";
/// Fixed audio bitrate for the video path
const VIDEO_AUDIO_BITRATE: &str = "192k";
/// Fixed output width; height follows proportionally
const VIDEO_SCALE_FILTER: &str = "scale=540:-1";
/// Fixed audio codec for the audio-only path
const AUDIO_CODEC: &str = "libmp3lame";

/// Builds the argument lists for the probe and transcode invocations
pub struct CommandSynthesizer;

impl CommandSynthesizer {
    /// Stream-classification probe: error-only logging, one codec-type
    /// token per stream as a bare CSV field
    pub fn classification_probe(source: &str) -> PlannedCommand {
        PlannedCommand {
            kind: CommandKind::Probe,
            argv: vec![
                "-loglevel".into(),
                "error".into(),
                "-show_entries".into(),
                "stream=codec_type".into(),
                "-of".into(),
                "csv=p=0".into(),
                source.into(),
            ],
        }
    }

    /// Keyframe-listing probe over the video stream.
    ///
    /// Frame inspection is only requested when a trim mark is set; without
    /// marks the probe still runs so its log yields the duration header.
    pub fn keyframe_probe(source: &str, any_mark_set: bool) -> PlannedCommand {
        let mut argv: Vec<String> = vec![
            "-hide_banner".into(),
            "-select_streams".into(),
            "v".into(),
        ];
        if any_mark_set {
            argv.extend([
                "-show_frames".into(),
                "-skip_frame".into(),
                "nokey".into(),
                "-show_entries".into(),
                "frame=pts_time".into(),
            ]);
        }
        argv.push(source.into());

        PlannedCommand {
            kind: CommandKind::KeyframeProbe,
            argv,
        }
    }

    /// Transcode for the video path, fed snapped markers.
    ///
    /// When any marker is set the inexact-seek flag is added: the cut
    /// jumps to the nearest keyframe instead of decoding up from the prior
    /// one, trading frame accuracy for speed to match the snapping above.
    pub fn video_transcode(trim: &ResolvedTrim, source: &str, dest: &str) -> PlannedCommand {
        let mut argv: Vec<String> = vec!["-y".into(), "-hide_banner".into()];

        if let Some(from) = trim.from {
            argv.push("-ss".into());
            argv.push(format_secs(from));
        }
        if let Some(to) = trim.to {
            argv.push("-to".into());
            argv.push(format_secs(to));
        }
        if trim.from.is_some() || trim.to.is_some() {
            argv.push("-noaccurate_seek".into());
        }

        argv.extend([
            "-i".into(),
            source.into(),
            "-c:a".into(),
            VIDEO_AUDIO_CODEC.into(),
            "-b:a".into(),
            VIDEO_AUDIO_BITRATE.into(),
            "-vf".into(),
            VIDEO_SCALE_FILTER.into(),
            "-y".into(),
            "-f".into(),
            "mp4".into(),
            dest.into(),
        ]);

        PlannedCommand {
            kind: CommandKind::Transcode,
            argv,
        }
    }

    /// Transcode for the audio-only path, fed the raw (unsnapped) request.
    ///
    /// The out-point becomes a *duration* argument relative to the
    /// in-point, not an end-time argument. That asymmetry with the video
    /// path is part of the wire contract.
    pub fn audio_transcode(request: &TrimRequest, source: &str, dest: &str) -> PlannedCommand {
        let mut argv: Vec<String> = vec!["-y".into(), "-hide_banner".into()];

        if let Some(from) = request.from {
            argv.push("-ss".into());
            argv.push(format_secs(from));
        }

        argv.extend(["-i".into(), source.into(), "-acodec".into(), AUDIO_CODEC.into()]);

        if let Some(to) = request.to {
            argv.push("-t".into());
            argv.push(format_secs(to - request.from.unwrap_or(0.0)));
        }

        argv.extend(["-y".into(), "-f".into(), "mp3".into(), dest.into()]);

        PlannedCommand {
            kind: CommandKind::Transcode,
            argv,
        }
    }
}

/// Fixed-point seconds formatting; the tools do not accept scientific
/// notation for time arguments
fn format_secs(value: f64) -> String {
    format!("{:.6}", value)
}
