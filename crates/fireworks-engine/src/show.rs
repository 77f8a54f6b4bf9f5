//! Scripted show runner.
//!
//! A [`Show`] drives the simulation at a fixed frame time for the configured
//! duration, firing each scheduled launch on the first frame at or after its
//! time, and sums the per-step reports into a [`ShowSummary`].

use fireworks_common::{FireworksError, FireworksResult};
use fireworks_kernel::{FrameDriver, RuleTable, Simulation};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use crate::config::ShowConfig;
use crate::sink::StagingSink;
use crate::timing::{FrameSample, FrameStats};

/// Totals for a finished show.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShowSummary {
    /// Frames simulated
    pub frames: u64,
    /// Simulated seconds
    pub simulated_secs: f32,
    /// Scheduled launches fired
    pub launches: usize,
    /// Rockets admitted by those launches
    pub rockets: usize,
    /// Most particles alive after any frame
    pub peak_particles: usize,
    /// Particles spawned by rules and admitted
    pub spawned: usize,
    /// Particles spawned by rules but dropped at capacity
    pub dropped: usize,
    /// Particles that expired
    pub expired: usize,
    /// Particles alive at the end
    pub final_particles: usize,
    /// Last frame statistics sample, if any interval completed
    pub last_sample: Option<FrameSample>,
}

impl ShowSummary {
    /// Write the summary as pretty JSON, creating parent directories.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> FireworksResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| FireworksError::Serialization(e.to_string()))?;
        fs::write(path, json)?;

        info!("Wrote show report to {}", path.display());
        Ok(())
    }
}

/// A configured show, ready to run.
#[derive(Debug)]
pub struct Show {
    config: ShowConfig,
    driver: FrameDriver<StagingSink>,
    stats: FrameStats,
}

impl Show {
    /// Build the simulation and sink described by `config`.
    ///
    /// `config` is expected to be validated.
    #[must_use]
    pub fn new(config: ShowConfig) -> Self {
        let mut simulation = Simulation::with_capacity(config.max_particles)
            .with_rules(RuleTable::builtin(&config.tuning))
            .with_gravity(config.gravity);
        if let Some(seed) = config.seed {
            simulation = simulation.with_seed(seed);
        }

        let sink = StagingSink::new(config.max_particles);
        let stats = FrameStats::new(config.stats_interval_secs);
        Self {
            driver: FrameDriver::new(simulation, sink),
            stats,
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ShowConfig {
        &self.config
    }

    /// Run the show to the end.
    ///
    /// # Errors
    /// Fails if a simulation step fails.
    pub fn run(mut self) -> FireworksResult<ShowSummary> {
        let frame_time = self.config.frame_time;
        let total_frames = (self.config.duration_secs / frame_time).ceil() as u64;
        let mut summary = ShowSummary::default();
        let mut next_launch = 0;

        info!(
            "Starting show: {} frames of {:.4}s, {} scheduled launches",
            total_frames,
            frame_time,
            self.config.schedule.len()
        );

        for frame in 0..total_frames {
            let show_time = frame as f32 * frame_time;

            while let Some(launch) = self.config.schedule.get(next_launch) {
                if launch.at_secs > show_time {
                    break;
                }
                let admitted = self
                    .driver
                    .simulation_mut()
                    .launch(launch.kind, &self.config.launch);
                debug!("{:.2}s: launched {:?}", show_time, launch.kind);
                summary.launches += 1;
                summary.rockets += admitted;
                next_launch += 1;
            }

            let started = Instant::now();
            let report = self.driver.frame(frame_time)?;
            let elapsed = started.elapsed().as_secs_f32();

            summary.spawned += report.spawned;
            summary.dropped += report.dropped;
            summary.expired += report.expired;
            summary.peak_particles = summary.peak_particles.max(report.live);

            if let Some(sample) = self.stats.record(elapsed) {
                info!(
                    "{:.1}ms/frame ({} FPS), {} particles",
                    sample.average_ms, sample.fps, report.live
                );
            }
        }

        summary.frames = self.driver.frames();
        summary.simulated_secs = summary.frames as f32 * frame_time;
        summary.final_particles = self.driver.simulation().particle_count();
        summary.last_sample = self.stats.last();

        info!(
            "Show finished: {} launches, peak {} particles, {} dropped",
            summary.launches, summary.peak_particles, summary.dropped
        );
        Ok(summary)
    }
}
