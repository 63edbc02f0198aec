//! TrimPlan CLI
//!
//! Keyframe-aware trimming of audio/video files by driving the external
//! ffprobe/ffmpeg binaries.
//!
//! # Usage
//!
//! ```bash
//! trimplan trim --input talk.mp4 --from 12.5 --to 73.0 --output clip.mp4
//! trimplan inspect --input talk.mp4 --json
//! trimplan plan --input talk.mp4 --from 12.5 --output clip.mp4
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use trimplan::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    debug!("Starting TrimPlan");

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Trim(args) => commands::execute_trim(args, config).await?,
        Commands::Inspect(args) => commands::execute_inspect(args, config).await?,
        Commands::Plan(args) => commands::execute_plan(args, config).await?,
    }

    Ok(())
}
