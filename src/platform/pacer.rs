//! Native frame pacing
//!
//! Measures wall-clock frame time, caps it so a stall cannot dump seconds of
//! simulation into one frame, and sleeps out the rest of each frame budget.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct FramePacer {
    frame_budget: Duration,
    max_delta: Duration,
    frame_start: Instant,
    last_frame: Instant,
    frames: u64,
}

impl FramePacer {
    /// Largest delta handed to the simulation in one frame
    pub const MAX_DELTA: Duration = Duration::from_millis(250);

    pub fn new(target_fps: f32) -> Self {
        let now = Instant::now();
        Self {
            frame_budget: Duration::from_secs_f32(1.0 / target_fps),
            max_delta: Self::MAX_DELTA,
            frame_start: now,
            last_frame: now,
            frames: 0,
        }
    }

    pub fn frame_budget(&self) -> Duration {
        self.frame_budget
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Start a frame; returns the capped time since the previous one
    pub fn begin_frame(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_start = now;
        self.frames += 1;
        self.clamp_delta(dt)
    }

    /// Sleep out whatever is left of the frame budget
    pub fn end_frame(&mut self) {
        let spent = self.frame_start.elapsed();
        if spent < self.frame_budget {
            spin_sleep::sleep(self.frame_budget - spent);
        } else {
            log::warn!(
                "Frame behind schedule by {:?}",
                spent - self.frame_budget
            );
        }
    }

    fn clamp_delta(&self, dt: Duration) -> Duration {
        if dt > self.max_delta {
            log::warn!(
                "Frame took {:.1}ms, capping to {}ms",
                dt.as_secs_f32() * 1000.0,
                self.max_delta.as_millis()
            );
            return self.max_delta;
        }
        dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_from_fps() {
        let pacer = FramePacer::new(60.0);
        let budget = pacer.frame_budget().as_secs_f64();
        assert!((budget - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_stall_is_capped() {
        let pacer = FramePacer::new(60.0);
        assert_eq!(
            pacer.clamp_delta(Duration::from_secs(3)),
            FramePacer::MAX_DELTA
        );
        assert_eq!(
            pacer.clamp_delta(Duration::from_millis(16)),
            Duration::from_millis(16)
        );
    }

    #[test]
    fn test_frames_counted() {
        let mut pacer = FramePacer::new(1000.0);
        pacer.begin_frame();
        pacer.end_frame();
        let dt = pacer.begin_frame();
        assert!(dt <= FramePacer::MAX_DELTA);
        assert_eq!(pacer.frames(), 2);
    }
}
