//! Presentation boundary
//!
//! Rendering, tweening and status text live outside the simulation. The round
//! drives a [`Presentation`] implementation and never reads anything back from it.

mod headless;
mod tween;

use std::time::Duration;

pub use headless::HeadlessPresentation;
pub use tween::TweenTrack;

use crate::sim::FrameView;

/// Numeric properties the animator can interpolate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimatedProperty {
    /// Controller rotation around the vertical axis (radians)
    ControllerRotation,
    /// Horizontal scale of the time-remaining bar (1 = full)
    ProgressBarScale,
}

/// Request to linearly interpolate a property toward `target` over `duration`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub property: AnimatedProperty,
    pub target: f32,
    pub duration: Duration,
}

impl Tween {
    pub fn new(property: AnimatedProperty, target: f32, duration: Duration) -> Self {
        Self {
            property,
            target,
            duration,
        }
    }
}

/// Renderer + animator + status display
pub trait Presentation {
    /// Draw one frame from the transforms in `view`
    fn render(&mut self, view: &FrameView, dt: Duration);

    /// Replace the on-screen status message
    fn set_status_text(&mut self, message: &str);

    /// Start (or retarget) a tween. Purely visual; gameplay never waits on it.
    fn animate(&mut self, tween: Tween);
}
