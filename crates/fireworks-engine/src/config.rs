//! Show configuration.
//!
//! Provides the simulation, launch and schedule parameters of a show.
//! Configuration can be loaded from and saved to a TOML file.

use fireworks_common::ConfigError;
use fireworks_kernel::{FireworkKind, LaunchSettings, RuleTuning, GRAVITY, MAX_PARTICLES};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration file name.
pub const CONFIG_FILE: &str = "fireworks.toml";

/// A launch fired at a fixed point in the show.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledLaunch {
    /// Show time in seconds
    pub at_secs: f32,
    /// Firework to launch
    pub kind: FireworkKind,
}

/// Show configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowConfig {
    // === Simulation ===
    /// Random seed (None = random)
    pub seed: Option<u64>,
    /// Particle capacity
    pub max_particles: usize,
    /// Fixed frame time in seconds
    pub frame_time: f32,
    /// Downward acceleration
    pub gravity: f32,

    // === Show ===
    /// Show length in seconds
    pub duration_secs: f32,
    /// Seconds between frame statistics reports
    pub stats_interval_secs: f32,
    /// Where to write the JSON summary (None = don't write)
    pub report_path: Option<PathBuf>,

    // === Tables ===
    /// Settings applied to every launch
    pub launch: LaunchSettings,
    /// Per-type rule constants
    pub tuning: RuleTuning,
    /// Launches in show order
    pub schedule: Vec<ScheduledLaunch>,
}

impl Default for ShowConfig {
    fn default() -> Self {
        let schedule = FireworkKind::ALL
            .iter()
            .enumerate()
            .map(|(i, kind)| ScheduledLaunch {
                at_secs: i as f32 * 1.5,
                kind: *kind,
            })
            .collect();

        Self {
            seed: None,
            max_particles: MAX_PARTICLES,
            frame_time: 1.0 / 60.0,
            gravity: GRAVITY,

            duration_secs: 15.0,
            stats_interval_secs: 0.5,
            report_path: None,

            launch: LaunchSettings::default(),
            tuning: RuleTuning::default(),
            schedule,
        }
    }
}

impl ShowConfig {
    /// Load configuration from a specific path.
    /// Returns default config if the file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file {} not found, using defaults", path.display());
            return Self::default();
        }

        match Self::try_load_from(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            },
            Err(e) => {
                warn!("{e}, using defaults");
                Self::default()
            },
        }
    }

    /// Load configuration from a specific path, reporting any failure.
    pub fn try_load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let write_err = |source: std::io::Error| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        fs::write(path, contents).map_err(write_err)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        // Simulation
        self.max_particles = self.max_particles.clamp(1, MAX_PARTICLES);
        if !self.frame_time.is_finite() {
            warn!("Frame time {} is not finite, using 1/60", self.frame_time);
            self.frame_time = 1.0 / 60.0;
        }
        self.frame_time = self.frame_time.clamp(0.001, 0.25);
        if !self.gravity.is_finite() {
            self.gravity = GRAVITY;
        }

        // Show
        self.duration_secs = self.duration_secs.clamp(0.0, 3600.0);
        self.stats_interval_secs = self.stats_interval_secs.clamp(0.05, 60.0);

        self.launch.validate();
        self.tuning.validate();

        self.schedule.retain(|launch| {
            let keep = launch.at_secs.is_finite() && launch.at_secs >= 0.0;
            if !keep {
                warn!("Dropping launch of {:?} at {}s", launch.kind, launch.at_secs);
            }
            keep
        });
        self.schedule.sort_by(|a, b| a.at_secs.total_cmp(&b.at_secs));
    }
}
