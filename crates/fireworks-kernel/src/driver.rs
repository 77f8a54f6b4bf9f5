//! Frame driver and render seam.
//!
//! The driver runs exactly one simulation step per frame, then hands the
//! renderer a read-only [`FrameSnapshot`] of the render records. The
//! renderer copies what it needs during [`RenderSink::submit`]; the borrow
//! ends before the next step can move any record.

use fireworks_common::SimResult;

use crate::particle::RenderRecord;
use crate::simulation::{Simulation, StepReport};

/// Render data for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot<'a> {
    /// Index of the frame, starting at zero.
    pub frame_index: u64,
    /// Render records of every live particle.
    pub records: &'a [RenderRecord],
}

impl FrameSnapshot<'_> {
    /// Number of particles to draw.
    #[must_use]
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Records as raw bytes, ready for a vertex buffer upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.records)
    }
}

/// Consumer of per-frame render data.
pub trait RenderSink {
    /// Receives the render records produced by the last step.
    fn submit(&mut self, frame: FrameSnapshot<'_>);
}

/// Sink that discards every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn submit(&mut self, _frame: FrameSnapshot<'_>) {}
}

/// Runs one step per frame and forwards the result to a sink.
#[derive(Debug)]
pub struct FrameDriver<S> {
    simulation: Simulation,
    sink: S,
    frame_index: u64,
}

impl<S: RenderSink> FrameDriver<S> {
    /// Creates a driver.
    pub fn new(simulation: Simulation, sink: S) -> Self {
        Self {
            simulation,
            sink,
            frame_index: 0,
        }
    }

    /// Runs one frame: step the simulation, then submit the snapshot.
    ///
    /// Nothing is submitted when the step fails.
    ///
    /// # Errors
    /// Propagates errors from [`Simulation::step`].
    pub fn frame(&mut self, frame_time: f32) -> SimResult<StepReport> {
        let report = self.simulation.step(frame_time)?;
        self.sink.submit(FrameSnapshot {
            frame_index: self.frame_index,
            records: self.simulation.store().render_records(),
        });
        self.frame_index += 1;
        Ok(report)
    }

    /// Number of frames completed.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frame_index
    }

    /// Returns the simulation.
    #[must_use]
    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Returns the simulation for launches between frames.
    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.simulation
    }

    /// Returns the sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the driver, returning the simulation and sink.
    pub fn into_parts(self) -> (Simulation, S) {
        (self.simulation, self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launch::{FireworkKind, LaunchSettings};
    use crate::particle::{ParticleType, SimRecord};
    use fireworks_common::SimError;
    use glam::Vec3;

    /// Sink remembering what it was given.
    #[derive(Debug, Default)]
    struct RecordingSink {
        counts: Vec<usize>,
        frames: Vec<u64>,
        bytes: usize,
    }

    impl RenderSink for RecordingSink {
        fn submit(&mut self, frame: FrameSnapshot<'_>) {
            self.counts.push(frame.count());
            self.frames.push(frame.frame_index);
            self.bytes = frame.as_bytes().len();
        }
    }

    #[test]
    fn test_driver_submits_after_each_step() {
        let simulation = Simulation::with_capacity(1000).with_seed(5);
        let mut driver = FrameDriver::new(simulation, RecordingSink::default());
        driver
            .simulation_mut()
            .launch(FireworkKind::Peony, &LaunchSettings::default());

        for _ in 0..3 {
            let report = driver.frame(1.0 / 60.0).expect("frame");
            assert_eq!(report.live, driver.simulation().particle_count());
        }

        assert_eq!(driver.frames(), 3);
        assert_eq!(driver.sink().counts, vec![2, 2, 2]);
        assert_eq!(driver.sink().frames, vec![0, 1, 2]);
        assert_eq!(driver.sink().bytes, 2 * RenderRecord::SIZE);
    }

    #[test]
    fn test_failed_step_submits_nothing() {
        let mut simulation = Simulation::with_capacity(4);
        simulation.spawn(
            RenderRecord::default(),
            SimRecord::new(ParticleType::FancyPeonyRocket, Vec3::ZERO, 1.0),
        );
        let mut driver = FrameDriver::new(simulation, RecordingSink::default());

        let err = driver.frame(0.1).expect_err("unregistered");
        assert!(matches!(err, SimError::UnregisteredType { .. }));
        assert!(driver.sink().counts.is_empty());
        assert_eq!(driver.frames(), 0);
    }

    #[test]
    fn test_into_parts() {
        let driver = FrameDriver::new(Simulation::with_capacity(8), NullSink);
        let (simulation, _sink) = driver.into_parts();
        assert_eq!(simulation.store().capacity(), 8);
    }
}
