//! Launch presets.
//!
//! A launch creates one or more rockets from the current [`LaunchSettings`].
//! Each [`FireworkKind`] picks the rocket type, its payload and how far from
//! vertical it may lean.

use fireworks_common::ColourRgba;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::particle::{Particle, ParticleType, Payload, RenderRecord, SimRecord};
use crate::random::ParticleRng;

/// Fireworks that can be launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FireworkKind {
    /// Rocket bursting into simple stars.
    #[default]
    Peony,
    /// Rocket shedding a trail while it climbs, then bursting.
    Comet,
    /// Rocket fired in any direction, bursting into long-lived trail stars.
    Brocade,
    /// Peony whose stars leave small trails.
    PeonyWithTrails,
}

impl FireworkKind {
    /// All launchable kinds.
    pub const ALL: [Self; 4] = [Self::Peony, Self::Comet, Self::Brocade, Self::PeonyWithTrails];

    /// Particle type of the rocket.
    #[must_use]
    pub const fn rocket_type(self) -> ParticleType {
        match self {
            Self::Peony | Self::PeonyWithTrails => ParticleType::PeonyRocket,
            Self::Comet => ParticleType::CometRocket,
            Self::Brocade => ParticleType::BrocadeRocket,
        }
    }

    /// Particle type released when the rocket bursts.
    #[must_use]
    pub const fn payload_type(self) -> ParticleType {
        match self {
            Self::Peony | Self::Comet => ParticleType::StarSimple,
            Self::Brocade | Self::PeonyWithTrails => ParticleType::StarSmallTrail,
        }
    }

    /// Half-angle in degrees of the launch cone around straight up.
    #[must_use]
    pub const fn cone_degrees(self) -> f32 {
        match self {
            Self::Brocade => 180.0,
            Self::Peony | Self::Comet | Self::PeonyWithTrails => 15.0,
        }
    }
}

/// Parameters applied to every rocket of a launch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchSettings {
    /// Rockets per launch (1-5).
    pub count: u32,
    /// Colour of the rocket and its stars.
    pub colour: ColourRgba,
    /// Launch position.
    pub position: [f32; 3],
    /// Stars released by the burst (0-360).
    pub burst_particles: u32,
    /// Seconds before the rocket bursts (0-5).
    pub rocket_life: f32,
    /// Rocket scale (0-5).
    pub scale: f32,
    /// Rocket rotation in degrees (0-360).
    pub rotation: f32,
    /// Launch speed (70-100).
    pub initial_speed: f32,
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            count: 2,
            colour: ColourRgba::WHITE,
            position: [0.0, 0.0, 0.0],
            burst_particles: 100,
            rocket_life: 3.0,
            scale: 1.0,
            rotation: 0.0,
            initial_speed: 70.0,
        }
    }
}

impl LaunchSettings {
    /// Clamp values to the ranges offered by the launch controls.
    pub fn validate(&mut self) {
        self.count = self.count.clamp(1, 5);
        self.colour = self.colour.clamped();
        self.burst_particles = self.burst_particles.min(360);
        self.rocket_life = self.rocket_life.clamp(0.0, 5.0);
        self.scale = self.scale.clamp(0.0, 5.0);
        self.rotation = self.rotation.clamp(0.0, 360.0);
        self.initial_speed = self.initial_speed.clamp(70.0, 100.0);
    }

    /// Builds one rocket of the given kind.
    pub fn rocket(&self, kind: FireworkKind, rng: &mut ParticleRng) -> Particle {
        let direction = rng.vector_in_cone(Vec3::Y, kind.cone_degrees());
        let render = RenderRecord {
            position: Vec3::from_array(self.position),
            scale: self.scale,
            colour: self.colour,
            rotation: self.rotation,
        };
        let sim = SimRecord::new(
            kind.rocket_type(),
            direction * self.initial_speed,
            self.rocket_life,
        )
        .with_payload(Payload {
            type_a: kind.payload_type(),
            count_a: self.burst_particles,
            colour_a: self.colour,
            ..Payload::default()
        });
        Particle::new(render, sim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(FireworkKind::Peony.rocket_type(), ParticleType::PeonyRocket);
        assert_eq!(FireworkKind::Comet.rocket_type(), ParticleType::CometRocket);
        assert_eq!(
            FireworkKind::Brocade.rocket_type(),
            ParticleType::BrocadeRocket
        );
        assert_eq!(
            FireworkKind::PeonyWithTrails.rocket_type(),
            ParticleType::PeonyRocket
        );
        assert_eq!(
            FireworkKind::PeonyWithTrails.payload_type(),
            ParticleType::StarSmallTrail
        );
        assert_eq!(
            FireworkKind::Brocade.payload_type(),
            ParticleType::StarSmallTrail
        );
    }

    #[test]
    fn test_settings_validate() {
        let mut settings = LaunchSettings {
            count: 12,
            burst_particles: 1000,
            rocket_life: 9.0,
            initial_speed: 10.0,
            rotation: -20.0,
            ..LaunchSettings::default()
        };
        settings.validate();

        assert_eq!(settings.count, 5);
        assert_eq!(settings.burst_particles, 360);
        assert!((settings.rocket_life - 5.0).abs() < f32::EPSILON);
        assert!((settings.initial_speed - 70.0).abs() < f32::EPSILON);
        assert!(settings.rotation.abs() < f32::EPSILON);
    }

    #[test]
    fn test_rocket_from_settings() {
        let settings = LaunchSettings {
            colour: ColourRgba::new(0.9, 0.1, 0.3, 1.0),
            position: [5.0, 0.0, -2.0],
            burst_particles: 80,
            initial_speed: 90.0,
            ..LaunchSettings::default()
        };
        let mut rng = ParticleRng::with_seed(2);
        let rocket = settings.rocket(FireworkKind::Peony, &mut rng);

        assert_eq!(rocket.render.position, Vec3::new(5.0, 0.0, -2.0));
        assert_eq!(rocket.render.colour, settings.colour);
        assert_eq!(rocket.sim.kind, ParticleType::PeonyRocket);
        assert!((rocket.sim.life - 3.0).abs() < f32::EPSILON);
        assert!((rocket.sim.velocity.length() - 90.0).abs() < 1e-3);
        // Within 15 degrees of straight up
        let cos = rocket.sim.velocity.normalize().dot(Vec3::Y);
        assert!(cos >= 15.0_f32.to_radians().cos() - 1e-4);

        let payload = rocket.sim.payload;
        assert_eq!(payload.type_a, ParticleType::StarSimple);
        assert_eq!(payload.count_a, 80);
        assert_eq!(payload.colour_a, settings.colour);
        assert_eq!(payload.count_b, 0);
    }

    #[test]
    fn test_kind_serde_names() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            kind: FireworkKind,
        }
        let text = toml::to_string(&Wrapper {
            kind: FireworkKind::PeonyWithTrails,
        })
        .expect("serialize kind");
        assert!(text.contains("peony_with_trails"));
    }
}
