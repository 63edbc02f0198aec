//! Command-line argument definitions

use clap::Args;

/// Arguments for the trim command
#[derive(Args, Debug)]
pub struct TrimArgs {
    /// Input media file
    #[arg(short, long)]
    pub input: String,

    /// Output file
    #[arg(short, long)]
    pub output: String,

    /// In-point in seconds (keyframe-snapped for video)
    #[arg(long)]
    pub from: Option<f64>,

    /// Out-point in seconds (keyframe-snapped for video)
    #[arg(long)]
    pub to: Option<f64>,

    /// Suppress the streamed tool log, showing progress only
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input media file
    #[arg(short, long)]
    pub input: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Input media file
    #[arg(short, long)]
    pub input: String,

    /// Output file the planned command would write
    #[arg(short, long)]
    pub output: String,

    /// In-point in seconds
    #[arg(long)]
    pub from: Option<f64>,

    /// Out-point in seconds
    #[arg(long)]
    pub to: Option<f64>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
