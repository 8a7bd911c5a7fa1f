//! Round state and core simulation types

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::controller::ControllerPhase;
use super::player::PlayerState;
use crate::consts::PLAYER_DEPTH;
use crate::settings::GameConfig;

/// Top-level stage of the session. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Waiting for presentation assets
    Loading,
    /// Status countdown before play
    Countdown,
    /// Active gameplay
    Running,
    /// Terminal; an outcome is set
    Ended,
}

/// Terminal result of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
    TimedOut,
}

impl Outcome {
    /// Status text shown when the round ends this way
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Won => "You won ~!!!",
            Outcome::Lost => "You lose",
            Outcome::TimedOut => "Time over !!",
        }
    }
}

/// Discrete move events from the input adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveInput {
    Start,
    Stop,
}

/// Status text shown at the end of each countdown step; the last one starts play
pub const COUNTDOWN_LABELS: [&str; 4] = [
    "Starting in 3",
    "Starting in 2",
    "Starting in 1",
    "Go !!",
];

/// Track layout along the X axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackGeometry {
    /// Where the player starts (+half length)
    pub start_position: f32,
    /// Goal line (-half length)
    pub end_position: f32,
    /// Player wins once strictly below this
    pub win_threshold: f32,
}

impl TrackGeometry {
    pub fn new(half_length: f32, win_margin: f32) -> Self {
        let end_position = -half_length;
        Self {
            start_position: half_length,
            end_position,
            win_threshold: end_position + win_margin,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.track_half_length, config.win_margin)
    }

    /// Exclusive: a player exactly on the threshold has not won yet
    pub fn is_past_goal(&self, position_x: f32) -> bool {
        position_x < self.win_threshold
    }
}

/// Per-frame transforms handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameView {
    /// Player sphere translation
    pub player_translation: Vec3,
    /// Where the controller is visibly facing
    pub controller_orientation: ControllerPhase,
    /// Whether movement is currently penalized
    pub watching: bool,
    /// Fraction of the time limit remaining (1 before play, 0 at time over)
    pub time_remaining: f32,
    pub phase: RoundPhase,
}

impl FrameView {
    pub fn player_translation_for(position_x: f32) -> Vec3 {
        Vec3::new(position_x, 0.0, PLAYER_DEPTH)
    }
}

/// Serializable summary of a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub phase: RoundPhase,
    pub outcome: Option<Outcome>,
    pub player: PlayerState,
    pub controller_orientation: ControllerPhase,
    pub controller_phase: ControllerPhase,
    pub elapsed_ms: u64,
    pub ticks: u64,
    pub seed: u64,
}
