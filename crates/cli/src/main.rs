mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use convertino_core::{load_config, load_config_from_env, BatchRunner, FfmpegConverter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("CONVERTINO_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("convertino.toml"));

    // Load configuration, falling back to environment overrides and
    // defaults when no file is present
    let config = if config_path.exists() {
        info!("Loading configuration from {:?}", config_path);
        load_config(&config_path)
            .with_context(|| format!("Failed to load config from {:?}", config_path))?
    } else {
        info!(
            "No configuration file at {:?}, using defaults and environment overrides",
            config_path
        );
        load_config_from_env().context("Failed to load config from environment")?
    };

    let converter = FfmpegConverter::new(config.converter);
    let runner = BatchRunner::new(config.workspace, converter);

    let summary = runner.run().await.map_err(|e| {
        if e.is_engine_unavailable() {
            error!(
                "FFmpeg with libx264 and AAC encoders is required. \
                 Install instructions: https://ffmpeg.org/download.html"
            );
        }
        e
    })?;

    println!("{}", report::render(&summary));

    Ok(())
}
