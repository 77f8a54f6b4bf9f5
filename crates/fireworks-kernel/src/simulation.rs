//! Simulation context and step.
//!
//! A [`Simulation`] owns everything a show needs: the particle store, the
//! rule table, the random source and the gravity constant. Several can run
//! side by side; nothing is global.
//!
//! ## Step
//!
//! [`Simulation::step`] advances every live particle by one frame:
//! 1. `position += velocity * dt`, then `velocity.y += gravity * dt`
//! 2. `life -= dt`
//! 3. the type's in-flight rule
//! 4. the type's burst rule if `life <= 0`
//! 5. expired particles are compacted out and their slot revisited
//!
//! Spawns are admitted as soon as the emitting particle's visit ends, so
//! spawns landing past the cursor get their first update this frame and the
//! rest get it next frame.

use fireworks_common::{SimError, SimResult};
use tracing::debug;

use crate::launch::{FireworkKind, LaunchSettings};
use crate::particle::{RenderRecord, SimRecord};
use crate::random::ParticleRng;
use crate::rules::{RuleTable, Spawner};
use crate::store::{ParticleStore, Visit, MAX_PARTICLES};

/// Default downward acceleration, tuned for pleasant firework arcs.
pub const GRAVITY: f32 = -30.0;

/// Outcome of one simulation step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Particles updated.
    pub visited: usize,
    /// Particles spawned by rules and admitted.
    pub spawned: usize,
    /// Particles spawned by rules but dropped at capacity.
    pub dropped: usize,
    /// Particles that expired and were removed.
    pub expired: usize,
    /// Live particles after the step.
    pub live: usize,
}

/// An independent firework simulation.
#[derive(Debug)]
pub struct Simulation {
    store: ParticleStore,
    rules: RuleTable,
    rng: ParticleRng,
    gravity: f32,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    /// Creates a simulation with [`MAX_PARTICLES`] capacity and the built-in
    /// rules.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(MAX_PARTICLES)
    }

    /// Creates a simulation with a custom capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        debug!("Created simulation with max {} particles", capacity);
        Self {
            store: ParticleStore::with_capacity(capacity),
            rules: RuleTable::default(),
            rng: ParticleRng::new(),
            gravity: GRAVITY,
        }
    }

    /// Replaces the rule table.
    #[must_use]
    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.rules = rules;
        self
    }

    /// Seeds the random source.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ParticleRng::with_seed(seed);
        self
    }

    /// Sets the gravity constant.
    #[must_use]
    pub const fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Returns the particle store.
    #[must_use]
    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    /// Returns the rule table.
    #[must_use]
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Returns the rule table for registering new types.
    pub fn rules_mut(&mut self) -> &mut RuleTable {
        &mut self.rules
    }

    /// Returns the number of live particles.
    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.store.len()
    }

    /// Returns the gravity constant.
    #[must_use]
    pub const fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Sets the gravity constant.
    pub fn set_gravity(&mut self, gravity: f32) {
        self.gravity = gravity;
    }

    /// Adds a particle if there is room.
    pub fn spawn(&mut self, render: RenderRecord, sim: SimRecord) -> bool {
        self.store.try_append(render, sim)
    }

    /// Launches `settings.count` rockets of the given kind.
    ///
    /// Returns the number of rockets admitted.
    pub fn launch(&mut self, kind: FireworkKind, settings: &LaunchSettings) -> usize {
        let mut admitted = 0;
        for _ in 0..settings.count {
            let rocket = settings.rocket(kind, &mut self.rng);
            if self.store.try_append(rocket.render, rocket.sim) {
                admitted += 1;
            }
        }
        debug!(
            "Launched {}/{} {:?} rockets ({} live particles)",
            admitted,
            settings.count,
            kind,
            self.store.len()
        );
        admitted
    }

    /// Advances the simulation by `frame_time` seconds.
    ///
    /// # Errors
    /// - [`SimError::InvalidFrameTime`] if `frame_time` is negative or not
    ///   finite; nothing is touched.
    /// - [`SimError::UnregisteredType`] if a particle's type has no rule; the
    ///   step stops at that particle.
    pub fn step(&mut self, frame_time: f32) -> SimResult<StepReport> {
        if !frame_time.is_finite() || frame_time < 0.0 {
            return Err(SimError::InvalidFrameTime(frame_time));
        }

        let gravity = self.gravity;
        let rules = &self.rules;
        let rng = &mut self.rng;

        let stats = self.store.for_each_mut(|render, sim, queue| -> SimResult<Visit> {
            let rule = rules.lookup(sim.kind)?;

            render.position += sim.velocity * frame_time;
            sim.velocity.y += gravity * frame_time;
            sim.life -= frame_time;

            let mut spawner = Spawner::new(queue, &mut *rng);
            rule.on_tick(render, sim, frame_time, &mut spawner);

            if sim.is_expired() {
                rule.on_expire(render, sim, &mut spawner);
                Ok(Visit::Remove)
            } else {
                Ok(Visit::Keep)
            }
        })?;

        if stats.dropped > 0 {
            debug!(
                "Particle store full ({} particles), dropped {} spawns this step",
                self.store.capacity(),
                stats.dropped
            );
        }

        Ok(StepReport {
            visited: stats.visited,
            spawned: stats.appended,
            dropped: stats.dropped,
            expired: stats.removed,
            live: self.store.len(),
        })
    }

    /// Removes every particle.
    pub fn clear(&mut self) {
        self.store.clear();
    }
}
