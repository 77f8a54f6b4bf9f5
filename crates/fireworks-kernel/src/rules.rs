//! Per-type particle rules.
//!
//! Each [`ParticleType`] maps to one [`ParticleRule`] in a [`RuleTable`]. The
//! simulation step looks the rule up once per particle and calls
//! [`ParticleRule::on_tick`] every frame and [`ParticleRule::on_expire`] on
//! the frame the particle's life runs out.
//!
//! Adding a firework type means implementing the trait and registering it;
//! existing rules are never touched.

use std::fmt;

use fireworks_common::{SimError, SimResult};
use tracing::debug;

use crate::builtin::{BurstRocketRule, RuleTuning, SimpleStarRule, TrailStarRule};
use crate::particle::{Particle, ParticleType, RenderRecord, SimRecord};
use crate::random::ParticleRng;
use crate::store::SpawnQueue;

/// Collects particles emitted by a rule during one visit.
///
/// Emitted particles are admitted into the store after the rule returns.
/// Emits past the room left in the store are dropped on the spot.
pub struct Spawner<'a> {
    queue: &'a mut SpawnQueue,
    rng: &'a mut ParticleRng,
}

impl<'a> Spawner<'a> {
    /// Creates a spawner writing into `queue`.
    pub fn new(queue: &'a mut SpawnQueue, rng: &'a mut ParticleRng) -> Self {
        Self { queue, rng }
    }

    /// Requests a new particle.
    pub fn emit(&mut self, render: RenderRecord, sim: SimRecord) {
        self.queue.push(Particle::new(render, sim));
    }

    /// Number of particles that can still be emitted without being dropped.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.remaining()
    }

    /// Counts `count` emissions that were skipped because there is no room.
    pub fn drop_excess(&mut self, count: usize) {
        self.queue.record_dropped(count);
    }

    /// Random source for emission parameters.
    pub fn rng(&mut self) -> &mut ParticleRng {
        &mut *self.rng
    }
}

impl fmt::Debug for Spawner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spawner")
            .field("queued", &self.queue.particles().len())
            .field("dropped", &self.queue.dropped())
            .finish_non_exhaustive()
    }
}

/// Behaviour of one particle type.
pub trait ParticleRule: fmt::Debug + Send + Sync {
    /// In-flight update. Runs every frame after motion integration and life
    /// decrement, including the frame the particle expires.
    fn on_tick(
        &self,
        render: &mut RenderRecord,
        sim: &mut SimRecord,
        frame_time: f32,
        spawner: &mut Spawner<'_>,
    );

    /// End-of-life emission. Runs once, on the frame life reaches zero.
    fn on_expire(&self, _render: &RenderRecord, _sim: &SimRecord, _spawner: &mut Spawner<'_>) {}
}

/// Dispatch table from particle type to rule.
pub struct RuleTable {
    rules: [Option<Box<dyn ParticleRule>>; ParticleType::COUNT],
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::builtin(&RuleTuning::default())
    }
}

impl RuleTable {
    /// Creates a table with no rules.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rules: std::array::from_fn(|_| None),
        }
    }

    /// Creates a table with the built-in firework rules.
    ///
    /// `FancyPeonyRocket` is left unregistered.
    #[must_use]
    pub fn builtin(tuning: &RuleTuning) -> Self {
        let mut table = Self::empty();
        table.register(ParticleType::StarSimple, SimpleStarRule::new(tuning.star));
        table.register(
            ParticleType::StarSmallTrail,
            TrailStarRule::new(tuning.star, tuning.star_trail),
        );
        table.register(
            ParticleType::PeonyRocket,
            BurstRocketRule::new(tuning.peony_burst),
        );
        table.register(
            ParticleType::CometRocket,
            BurstRocketRule::new(tuning.comet_burst).with_flight_trail(tuning.comet_trail),
        );
        table.register(
            ParticleType::BrocadeRocket,
            BurstRocketRule::new(tuning.brocade_burst),
        );
        table
    }

    /// Registers the rule for a type.
    ///
    /// Returns the rule previously registered for that type, if any.
    pub fn register<R>(&mut self, kind: ParticleType, rule: R) -> Option<Box<dyn ParticleRule>>
    where
        R: ParticleRule + 'static,
    {
        debug!("Registered rule for {}: {:?}", kind.name(), rule);
        self.rules[kind.index()].replace(Box::new(rule))
    }

    /// Removes the rule for a type.
    pub fn unregister(&mut self, kind: ParticleType) -> Option<Box<dyn ParticleRule>> {
        self.rules[kind.index()].take()
    }

    /// Looks up the rule for a type.
    ///
    /// # Errors
    /// Returns [`SimError::UnregisteredType`] if no rule is registered.
    pub fn lookup(&self, kind: ParticleType) -> SimResult<&dyn ParticleRule> {
        self.rules[kind.index()]
            .as_deref()
            .ok_or(SimError::UnregisteredType { name: kind.name() })
    }

    /// Returns whether a rule is registered for a type.
    #[must_use]
    pub fn is_registered(&self, kind: ParticleType) -> bool {
        self.rules[kind.index()].is_some()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.iter().filter(|rule| rule.is_some()).count()
    }

    /// Returns whether no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registered: Vec<&str> = ParticleType::ALL
            .iter()
            .filter(|kind| self.is_registered(**kind))
            .map(|kind| kind.name())
            .collect();
        f.debug_struct("RuleTable")
            .field("registered", &registered)
            .finish()
    }
}
