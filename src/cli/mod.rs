//! CLI module for TrimPlan
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// TrimPlan
///
/// Keyframe-aware trimming of audio/video files by driving the external
/// ffprobe/ffmpeg binaries.
#[derive(Parser)]
#[command(name = "trimplan")]
#[command(about = "Keyframe-aware media trimming via external ffmpeg/ffprobe")]
#[command(version)]
pub struct Cli {
    /// Logging level
    #[arg(long, default_value = "info", global = true, env = "TRIMPLAN_LOG")]
    pub log_level: String,

    /// Optional TOML file naming the ffmpeg/ffprobe binaries
    #[arg(long, global = true, env = "TRIMPLAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Trim a media file between the given marks
    Trim(args::TrimArgs),
    /// Probe a media file and report its classification and duration
    Inspect(args::InspectArgs),
    /// Print the transcode command that a trim would run, without running it
    Plan(args::PlanArgs),
}
