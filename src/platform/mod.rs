//! Platform layer
//!
//! Handles everything between the OS and the simulation:
//! - Key events to move input
//! - Native frame pacing
//! - A scripted input source for unattended runs

mod autopilot;
mod pacer;

pub use autopilot::Autopilot;
pub use pacer::FramePacer;

pub use crate::sim::MoveInput;

/// The key that moves the player
pub const MOVE_KEY: &str = "ArrowUp";

/// Map a key press/release to a move event
pub fn move_input_for_key(key: &str, pressed: bool) -> Option<MoveInput> {
    if key != MOVE_KEY {
        return None;
    }
    Some(if pressed {
        MoveInput::Start
    } else {
        MoveInput::Stop
    })
}
