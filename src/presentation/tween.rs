//! Linear tween track

use std::time::Duration;

use super::Tween;
use crate::lerp;

/// A single animated value moving linearly toward its latest target
#[derive(Debug, Clone, PartialEq)]
pub struct TweenTrack {
    value: f32,
    from: f32,
    target: f32,
    elapsed: Duration,
    duration: Duration,
    active: bool,
}

impl TweenTrack {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            from: value,
            target: value,
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
            active: false,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Restart from the current value toward a new target
    pub fn retarget(&mut self, tween: &Tween) {
        self.from = self.value;
        self.target = tween.target;
        self.elapsed = Duration::ZERO;
        self.duration = tween.duration;
        self.active = true;
    }

    /// Advance by `dt`. Returns true on the step the tween completes.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if !self.active {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.value = self.target;
            self.active = false;
            return true;
        }
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.value = lerp(self.from, self.target, t);
        false
    }
}
