//! Player kinematics along the track
//!
//! Pure 1-D integration. Goal and boundary checks belong to the round.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::REFERENCE_FPS;

/// Player position and velocity. Velocity is either 0 or the run speed,
/// except while easing to a stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub position_x: f32,
    /// Track units per 60 Hz frame, toward the goal (negative X)
    pub velocity: f32,
}

/// Linear decay of velocity to zero after a stop
#[derive(Debug, Clone, Copy, PartialEq)]
struct StopEase {
    from: f32,
    elapsed: Duration,
    duration: Duration,
}

#[derive(Debug, Clone)]
pub struct PlayerKinematics {
    state: PlayerState,
    run_speed: f32,
    stop_ease: Duration,
    easing: Option<StopEase>,
}

impl PlayerKinematics {
    pub fn new(start_position: f32, run_speed: f32, stop_ease: Duration) -> Self {
        Self {
            state: PlayerState {
                position_x: start_position,
                velocity: 0.0,
            },
            run_speed,
            stop_ease,
            easing: None,
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn is_moving(&self) -> bool {
        self.state.velocity > 0.0
    }

    pub fn is_stopping(&self) -> bool {
        self.easing.is_some()
    }

    /// Jump straight to run speed, cancelling any stop in progress
    pub fn start_moving(&mut self) {
        self.easing = None;
        self.state.velocity = self.run_speed;
    }

    /// Begin easing velocity to zero. A stop already in progress is left alone.
    pub fn stop_moving(&mut self) {
        if !self.is_moving() || self.easing.is_some() {
            return;
        }
        if self.stop_ease.is_zero() {
            self.state.velocity = 0.0;
            return;
        }
        self.easing = Some(StopEase {
            from: self.state.velocity,
            elapsed: Duration::ZERO,
            duration: self.stop_ease,
        });
    }

    /// Advance the stop ease, then integrate position toward the goal
    pub fn tick(&mut self, dt: Duration) {
        if let Some(ease) = self.easing.as_mut() {
            ease.elapsed += dt;
            if ease.elapsed >= ease.duration {
                self.state.velocity = 0.0;
                self.easing = None;
                log::debug!("Player stopped at x={:.3}", self.state.position_x);
            } else {
                let t = ease.elapsed.as_secs_f32() / ease.duration.as_secs_f32();
                self.state.velocity = (ease.from * (1.0 - t)).max(0.0);
            }
        }

        self.state.position_x -= self.state.velocity * dt.as_secs_f32() * REFERENCE_FPS;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FRAME: Duration = Duration::from_nanos(16_666_667);

    fn player() -> PlayerKinematics {
        PlayerKinematics::new(3.0, 0.03, Duration::from_millis(100))
    }

    #[test]
    fn test_start_is_instant() {
        let mut p = player();
        assert_eq!(p.state().velocity, 0.0);
        p.start_moving();
        assert_eq!(p.state().velocity, 0.03);
    }

    #[test]
    fn test_one_frame_moves_run_speed() {
        let mut p = player();
        p.start_moving();
        p.tick(FRAME);
        assert!((p.state().position_x - 2.97).abs() < 1e-4);
    }

    #[test]
    fn test_idle_player_does_not_move() {
        let mut p = player();
        for _ in 0..60 {
            p.tick(FRAME);
        }
        assert_eq!(p.state().position_x, 3.0);
    }

    #[test]
    fn test_stop_leaves_residual_velocity() {
        let mut p = player();
        p.start_moving();
        p.stop_moving();
        assert!(p.is_stopping());
        p.tick(Duration::from_millis(50));
        assert!(p.is_moving());
        assert!((p.state().velocity - 0.015).abs() < 1e-5);
        p.tick(Duration::from_millis(50));
        assert_eq!(p.state().velocity, 0.0);
        assert!(!p.is_stopping());
    }

    #[test]
    fn test_second_stop_does_not_restart_ease() {
        let mut p = player();
        p.start_moving();
        p.stop_moving();
        p.tick(Duration::from_millis(60));
        p.stop_moving();
        p.tick(Duration::from_millis(40));
        assert_eq!(p.state().velocity, 0.0);
    }

    #[test]
    fn test_start_during_ease_restores_run_speed() {
        let mut p = player();
        p.start_moving();
        p.stop_moving();
        p.tick(Duration::from_millis(50));
        p.start_moving();
        assert!(!p.is_stopping());
        assert_eq!(p.state().velocity, 0.03);
        p.tick(Duration::from_millis(200));
        assert_eq!(p.state().velocity, 0.03);
    }

    #[test]
    fn test_stop_when_idle_is_noop() {
        let mut p = player();
        p.stop_moving();
        assert!(!p.is_stopping());
        assert_eq!(p.state().velocity, 0.0);
    }

    #[test]
    fn test_zero_ease_stops_immediately() {
        let mut p = PlayerKinematics::new(3.0, 0.03, Duration::ZERO);
        p.start_moving();
        p.stop_moving();
        assert_eq!(p.state().velocity, 0.0);
    }

    proptest! {
        #[test]
        fn prop_position_strictly_decreases_while_running(
            steps in proptest::collection::vec(1u64..100, 1..200)
        ) {
            let mut p = player();
            p.start_moving();
            let mut last = p.state().position_x;
            for ms in steps {
                p.tick(Duration::from_millis(ms));
                prop_assert!(p.state().position_x < last);
                last = p.state().position_x;
            }
        }

        #[test]
        fn prop_stop_ease_is_monotone_and_bounded(
            steps in proptest::collection::vec(1u64..40, 1..50)
        ) {
            let mut p = player();
            p.start_moving();
            p.stop_moving();
            let mut elapsed = Duration::ZERO;
            let mut last = p.state().velocity;
            for ms in steps {
                let dt = Duration::from_millis(ms);
                p.tick(dt);
                elapsed += dt;
                let v = p.state().velocity;
                prop_assert!(v >= 0.0);
                prop_assert!(v <= last);
                if elapsed >= Duration::from_millis(100) {
                    prop_assert_eq!(v, 0.0);
                }
                last = v;
            }
        }
    }
}
