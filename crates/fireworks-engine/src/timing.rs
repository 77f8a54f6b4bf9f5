//! Frame statistics.
//!
//! Frame times are summed until they pass the reporting interval, then
//! averaged into a [`FrameSample`] and reset.

use serde::{Deserialize, Serialize};

/// Averages over one reporting interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSample {
    /// Average frame time in milliseconds
    pub average_ms: f32,
    /// Frames per second, rounded to the nearest integer
    pub fps: u32,
    /// Frames in the interval
    pub frames: u32,
}

/// Interval-averaged frame time tracker.
#[derive(Debug)]
pub struct FrameStats {
    /// Reporting interval in seconds
    interval: f32,
    /// Frame time accumulated since the last report
    elapsed: f32,
    /// Frame count since the last report
    frame_count: u32,
    /// Most recent report
    last: Option<FrameSample>,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl FrameStats {
    /// Create a tracker reporting every `interval` seconds.
    #[must_use]
    pub fn new(interval: f32) -> Self {
        Self {
            interval: interval.max(0.001),
            elapsed: 0.0,
            frame_count: 0,
            last: None,
        }
    }

    /// Record one frame. Returns a sample once the summed time passes the interval.
    pub fn record(&mut self, frame_secs: f32) -> Option<FrameSample> {
        self.elapsed += frame_secs.max(0.0);
        self.frame_count += 1;

        if self.elapsed <= self.interval {
            return None;
        }

        let average = self.elapsed / self.frame_count as f32;
        let fps = if average > 0.0 {
            (1.0 / average + 0.5) as u32
        } else {
            0
        };
        let sample = FrameSample {
            average_ms: average * 1000.0,
            fps,
            frames: self.frame_count,
        };

        self.elapsed = 0.0;
        self.frame_count = 0;
        self.last = Some(sample);
        Some(sample)
    }

    /// Get the most recent sample.
    #[must_use]
    pub fn last(&self) -> Option<FrameSample> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_sample_before_interval() {
        let mut stats = FrameStats::new(0.5);
        for _ in 0..10 {
            assert!(stats.record(0.01).is_none());
        }
        assert!(stats.last().is_none());
    }

    #[test]
    fn test_sample_at_interval() {
        let mut stats = FrameStats::new(0.5);
        let mut sample = None;
        // 1/32s frames: 16 make exactly 0.5s, which is not yet past it
        for _ in 0..16 {
            sample = stats.record(0.031_25).or(sample);
        }
        assert!(sample.is_none());
        sample = stats.record(0.031_25);

        let sample = sample.expect("interval passed");
        assert_eq!(sample.frames, 17);
        assert_eq!(sample.fps, 32);
        assert!((sample.average_ms - 31.25).abs() < 0.01);
        assert_eq!(stats.last(), Some(sample));
    }

    #[test]
    fn test_fps_rounds_to_nearest() {
        let mut stats = FrameStats::new(0.01);
        // 1 / 0.0165 = 60.6
        let sample = stats.record(0.0165).expect("single frame fills interval");
        assert_eq!(sample.fps, 61);
    }

    #[test]
    fn test_counters_reset_after_sample() {
        let mut stats = FrameStats::new(0.1);
        assert!(stats.record(0.2).is_some());
        assert!(stats.record(0.05).is_none());
        let sample = stats.record(0.06).expect("second interval");
        assert_eq!(sample.frames, 2);
        assert_eq!(stats.last(), Some(sample));
    }
}
