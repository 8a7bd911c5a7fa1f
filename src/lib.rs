//! Red Light - a single-player "red light / green light" reaction game
//!
//! Core modules:
//! - `sim`: Deterministic round simulation (scheduler, controller, player, state machine)
//! - `presentation`: Renderer/animator/status-text boundary and a headless implementation
//! - `platform`: Input mapping, native frame pacing, demo autopilot
//! - `settings`: Session configuration loaded once at startup

pub mod error;
pub mod platform;
pub mod presentation;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, ConfigResult};
pub use settings::GameConfig;

/// Game configuration constants
pub mod consts {
    /// Reference frame rate the run speed is expressed against (units per frame at 60 Hz)
    pub const REFERENCE_FPS: f32 = 60.0;

    /// Controller rotation when facing the player (radians)
    pub const FACING_ROTATION: f32 = 0.0;
    /// Controller rotation when turned away from the player (radians)
    pub const TURNED_AWAY_ROTATION: f32 = -3.15;

    /// Player depth in front of the track
    pub const PLAYER_DEPTH: f32 = 1.0;
}

/// Linear interpolation between `a` and `b` by `t` in [0, 1]
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
