//! Headless render sink.
//!
//! Stands in for the GPU vertex buffer: every frame the render records are
//! copied into a staging buffer sized for the full particle capacity, and
//! the instance count of the draw call is recorded.

use fireworks_kernel::{FrameSnapshot, RenderRecord, RenderSink};
use tracing::trace;

/// Staging copy of the particle vertex buffer.
#[derive(Debug)]
pub struct StagingSink {
    /// Bytes of the last uploaded frame, capacity reserved up front
    staging: Vec<u8>,
    /// Instances in the last draw
    draw_count: usize,
    /// Frames received
    frames: u64,
    /// Largest draw seen
    peak_draw_count: usize,
}

impl StagingSink {
    /// Create a sink able to hold `max_particles` records without growing.
    #[must_use]
    pub fn new(max_particles: usize) -> Self {
        Self {
            staging: Vec::with_capacity(max_particles * RenderRecord::SIZE),
            draw_count: 0,
            frames: 0,
            peak_draw_count: 0,
        }
    }

    /// Bytes of the last frame.
    #[must_use]
    pub fn staging(&self) -> &[u8] {
        &self.staging
    }

    /// Reserved size of the staging buffer in bytes.
    #[must_use]
    pub fn staging_capacity(&self) -> usize {
        self.staging.capacity()
    }

    /// Instances drawn in the last frame.
    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.draw_count
    }

    /// Largest instance count drawn so far.
    #[must_use]
    pub fn peak_draw_count(&self) -> usize {
        self.peak_draw_count
    }

    /// Frames received.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderSink for StagingSink {
    fn submit(&mut self, frame: FrameSnapshot<'_>) {
        self.staging.clear();
        self.staging.extend_from_slice(frame.as_bytes());
        self.draw_count = frame.count();
        self.peak_draw_count = self.peak_draw_count.max(self.draw_count);
        self.frames += 1;

        trace!(
            "Frame {}: uploaded {} particles ({} bytes)",
            frame.frame_index,
            self.draw_count,
            self.staging.len()
        );
    }
}
