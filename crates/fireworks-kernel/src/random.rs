//! Random sources for particle emission.
//!
//! Wraps a seedable [`fastrand::Rng`] so a simulation can be replayed
//! exactly from its seed.

use glam::Vec3;

/// Seedable random source owned by a simulation.
#[derive(Debug, Clone)]
pub struct ParticleRng {
    rng: fastrand::Rng,
}

impl Default for ParticleRng {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleRng {
    /// Creates a randomly seeded source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Creates a source with a fixed seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Uniform value in `min..max`. Returns `min` when the range is empty.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        min + self.rng.f32() * (max - min)
    }

    /// Vector with each axis drawn independently from `-magnitude..magnitude`.
    pub fn jitter(&mut self, magnitude: f32) -> Vec3 {
        Vec3::new(
            self.range(-magnitude, magnitude),
            self.range(-magnitude, magnitude),
            self.range(-magnitude, magnitude),
        )
    }

    /// Unit vector uniformly distributed inside a cone around `direction`.
    ///
    /// `max_angle_degrees` is the half-angle of the cone: 0 returns the
    /// normalised direction, 180 covers the whole sphere. A zero direction
    /// yields a zero vector.
    pub fn vector_in_cone(&mut self, direction: Vec3, max_angle_degrees: f32) -> Vec3 {
        let axis = direction.normalize_or_zero();
        if axis == Vec3::ZERO {
            return Vec3::ZERO;
        }

        let max_angle = max_angle_degrees.clamp(0.0, 180.0).to_radians();

        // Uniform over the spherical cap: pick cos(theta) uniformly
        let cos_theta = self.range(max_angle.cos(), 1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
        let phi = self.range(0.0, std::f32::consts::TAU);

        let (u, v) = axis.any_orthonormal_pair();
        axis * cos_theta + (u * phi.cos() + v * phi.sin()) * sin_theta
    }
}
