//! Built-in firework rules and their tuning.
//!
//! Every constant that shapes a firework lives in a tuning struct owned by
//! the rule that uses it. Rules that look alike (the comet trail and the star
//! trail, the three rocket bursts) keep separate values so each can be tuned
//! on its own.

use fireworks_common::ColourRgba;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::particle::{ParticleType, RenderRecord, SimRecord};
use crate::rules::{ParticleRule, Spawner};

/// Shortest allowed trail re-arm interval in seconds.
pub const MIN_TRAIL_INTERVAL: f32 = 0.001;

/// Visual decay of a star in flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarTuning {
    /// Alpha lost per second.
    pub fade_rate: f32,
    /// Scale lost per second.
    pub shrink_rate: f32,
    /// Fraction of velocity kept after one second.
    pub damping: f32,
}

impl Default for StarTuning {
    fn default() -> Self {
        Self {
            fade_rate: 0.5,
            shrink_rate: 1.0,
            damping: 0.5,
        }
    }
}

impl StarTuning {
    /// Fades, shrinks and slows a star.
    pub fn apply(&self, render: &mut RenderRecord, sim: &mut SimRecord, frame_time: f32) {
        render.colour.a -= self.fade_rate * frame_time;
        render.scale -= self.shrink_rate * frame_time;
        // Exponential so the decay does not depend on frame rate
        sim.velocity *= self.damping.powf(frame_time);
    }
}

/// Short-lived simple stars shed behind a moving particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailTuning {
    /// Seconds between emissions (timer-driven trails only).
    pub interval: f32,
    /// Scale of each trail star.
    pub scale: f32,
    /// Life of each trail star in seconds.
    pub life: f32,
    /// Fraction of the parent velocity inherited.
    pub velocity_lag: f32,
    /// Per-axis random velocity added to each trail star.
    pub jitter: f32,
    /// Timer value given to each trail star.
    pub initial_timer: f32,
}

impl Default for TrailTuning {
    fn default() -> Self {
        Self {
            interval: 0.05,
            scale: 0.75,
            life: 0.4,
            velocity_lag: 0.5,
            jitter: 5.0,
            initial_timer: 0.0,
        }
    }
}

impl TrailTuning {
    /// Emits one trail star at the parent's position and colour.
    pub fn emit(&self, render: &RenderRecord, sim: &SimRecord, spawner: &mut Spawner<'_>) {
        let velocity = sim.velocity * self.velocity_lag + spawner.rng().jitter(self.jitter);
        spawner.emit(
            RenderRecord::at(render.position, self.scale, render.colour),
            SimRecord::new(ParticleType::StarSimple, velocity, self.life)
                .with_timer(self.initial_timer),
        );
    }
}

/// Stars released when a rocket bursts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstTuning {
    /// Per-axis random velocity added to each star.
    pub jitter: f32,
    /// Scale of each star.
    pub scale: f32,
    /// Life of each star in seconds.
    pub life: f32,
    /// Timer value given to each star.
    pub timer: f32,
}

impl Default for BurstTuning {
    fn default() -> Self {
        Self {
            jitter: 50.0,
            scale: 1.5,
            life: 1.4,
            timer: 0.0,
        }
    }
}

impl BurstTuning {
    /// Emits `count` stars of `kind` from the burst point.
    pub fn emit(
        &self,
        render: &RenderRecord,
        sim: &SimRecord,
        kind: ParticleType,
        count: u32,
        colour: ColourRgba,
        spawner: &mut Spawner<'_>,
    ) {
        for _ in 0..count {
            let velocity = sim.velocity + spawner.rng().jitter(self.jitter);
            spawner.emit(
                RenderRecord::at(render.position, self.scale, colour),
                SimRecord::new(kind, velocity, self.life).with_timer(self.timer),
            );
        }
    }
}

/// Every per-type constant used by the built-in rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleTuning {
    /// Decay shared by simple and trail stars.
    pub star: StarTuning,
    /// Trail shed by `StarSmallTrail`.
    pub star_trail: TrailTuning,
    /// Trail shed by `CometRocket` every tick.
    pub comet_trail: TrailTuning,
    /// Burst of `PeonyRocket`.
    pub peony_burst: BurstTuning,
    /// Burst of `CometRocket`.
    pub comet_burst: BurstTuning,
    /// Burst of `BrocadeRocket`.
    pub brocade_burst: BurstTuning,
}

impl Default for RuleTuning {
    fn default() -> Self {
        Self {
            star: StarTuning::default(),
            star_trail: TrailTuning::default(),
            comet_trail: TrailTuning {
                initial_timer: 0.05,
                ..TrailTuning::default()
            },
            peony_burst: BurstTuning::default(),
            comet_burst: BurstTuning::default(),
            brocade_burst: BurstTuning {
                jitter: 60.0,
                life: 7.0,
                timer: 0.05,
                ..BurstTuning::default()
            },
        }
    }
}

impl RuleTuning {
    /// Clamps tuning values to ranges the rules can run with.
    pub fn validate(&mut self) {
        self.star.damping = self.star.damping.clamp(0.0, 1.0);
        self.star.fade_rate = self.star.fade_rate.max(0.0);
        self.star.shrink_rate = self.star.shrink_rate.max(0.0);

        for trail in [&mut self.star_trail, &mut self.comet_trail] {
            trail.interval = trail.interval.max(MIN_TRAIL_INTERVAL);
            trail.life = trail.life.max(0.0);
            trail.jitter = trail.jitter.abs();
        }

        for burst in [
            &mut self.peony_burst,
            &mut self.comet_burst,
            &mut self.brocade_burst,
        ] {
            burst.life = burst.life.max(0.0);
            burst.jitter = burst.jitter.abs();
        }
    }
}

/// `StarSimple`: fades, shrinks and slows down. Emits nothing.
#[derive(Debug, Clone, Copy)]
pub struct SimpleStarRule {
    star: StarTuning,
}

impl SimpleStarRule {
    /// Creates the rule.
    #[must_use]
    pub const fn new(star: StarTuning) -> Self {
        Self { star }
    }
}

impl ParticleRule for SimpleStarRule {
    fn on_tick(
        &self,
        render: &mut RenderRecord,
        sim: &mut SimRecord,
        frame_time: f32,
        _spawner: &mut Spawner<'_>,
    ) {
        self.star.apply(render, sim, frame_time);
    }
}

/// `StarSmallTrail`: a simple star that sheds trail stars on a timer.
#[derive(Debug, Clone, Copy)]
pub struct TrailStarRule {
    star: StarTuning,
    trail: TrailTuning,
}

impl TrailStarRule {
    /// Creates the rule.
    #[must_use]
    pub const fn new(star: StarTuning, trail: TrailTuning) -> Self {
        Self { star, trail }
    }
}

impl ParticleRule for TrailStarRule {
    fn on_tick(
        &self,
        render: &mut RenderRecord,
        sim: &mut SimRecord,
        frame_time: f32,
        spawner: &mut Spawner<'_>,
    ) {
        self.star.apply(render, sim, frame_time);

        sim.timer -= frame_time;
        if sim.timer > 0.0 {
            return;
        }

        // Every re-arm the frame covered emits once; the timer lands in
        // (0, interval]
        let (due, timer) = rearm(sim.timer, self.trail.interval.max(MIN_TRAIL_INTERVAL));
        sim.timer = timer;

        let emitted = due.min(spawner.remaining());
        for _ in 0..emitted {
            self.trail.emit(render, sim, spawner);
        }
        spawner.drop_excess(due - emitted);
    }
}

/// Number of `interval` re-arms needed to lift an expired `timer` above zero,
/// and the timer after them.
fn rearm(timer: f32, interval: f32) -> (usize, f32) {
    let interval = f64::from(interval);
    let mut timer = f64::from(timer);
    let mut due = (-timer / interval).floor() + 1.0;
    timer += due * interval;
    if timer <= 0.0 {
        timer += interval;
        due += 1.0;
    }
    (due as usize, (timer as f32).clamp(f32::MIN_POSITIVE, interval as f32))
}

/// Rockets: fly without decay, optionally shed a trail every tick, and burst
/// into their payloads on expiry.
#[derive(Debug, Clone, Copy)]
pub struct BurstRocketRule {
    burst: BurstTuning,
    flight_trail: Option<TrailTuning>,
}

impl BurstRocketRule {
    /// Creates a rocket rule with no in-flight trail.
    #[must_use]
    pub const fn new(burst: BurstTuning) -> Self {
        Self {
            burst,
            flight_trail: None,
        }
    }

    /// Sheds one trail star every tick while in flight.
    #[must_use]
    pub const fn with_flight_trail(mut self, trail: TrailTuning) -> Self {
        self.flight_trail = Some(trail);
        self
    }
}

impl ParticleRule for BurstRocketRule {
    fn on_tick(
        &self,
        render: &mut RenderRecord,
        sim: &mut SimRecord,
        _frame_time: f32,
        spawner: &mut Spawner<'_>,
    ) {
        if let Some(trail) = &self.flight_trail {
            trail.emit(render, sim, spawner);
        }
    }

    fn on_expire(&self, render: &RenderRecord, sim: &SimRecord, spawner: &mut Spawner<'_>) {
        let payload = &sim.payload;
        self.burst.emit(
            render,
            sim,
            payload.type_a,
            payload.count_a,
            payload.colour_a,
            spawner,
        );
        self.burst.emit(
            render,
            sim,
            payload.type_b,
            payload.count_b,
            payload.colour_b,
            spawner,
        );
    }
}
