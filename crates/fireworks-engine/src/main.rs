//! # Fireworks
//!
//! Runs a scripted firework show headlessly and reports what happened.
//!
//! Usage: `fireworks [config.toml]`. Without an argument `fireworks.toml`
//! in the working directory is used; a missing file means defaults.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use anyhow::{Context, Result};
use fireworks_engine::config::CONFIG_FILE;
use fireworks_engine::{Show, ShowConfig};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Main entry point.
fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("fireworks=info".parse()?))
        .init();

    info!("Fireworks starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| CONFIG_FILE.to_string());
    let mut config = ShowConfig::load_from(&config_path);
    config.validate();
    let report_path = config.report_path.clone();

    let summary = Show::new(config).run().context("show failed")?;
    info!(
        "{} frames, {} rockets, {} spawned, {} expired, {} left",
        summary.frames,
        summary.rockets,
        summary.spawned,
        summary.expired,
        summary.final_particles
    );

    if let Some(path) = report_path {
        summary
            .write_json(&path)
            .with_context(|| format!("writing report to {}", path.display()))?;
    }

    info!("Fireworks shutdown complete");
    Ok(())
}
