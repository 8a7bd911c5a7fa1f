//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual time only, advanced by the caller
//! - Seeded RNG only
//! - Timers delivered in deadline order, ties in scheduling order
//! - No rendering or platform dependencies beyond the `Presentation` trait

pub mod clock;
pub mod controller;
pub mod player;
pub mod round;
pub mod state;

pub use clock::{Scheduler, TimerId};
pub use controller::{ControllerCycle, ControllerPhase, ControllerTimer, CycleTiming};
pub use player::{PlayerKinematics, PlayerState};
pub use round::{RoundState, TimerEvent};
pub use state::{
    COUNTDOWN_LABELS, FrameView, MoveInput, Outcome, RoundPhase, RoundSnapshot, TrackGeometry,
};
