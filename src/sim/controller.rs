//! The controller ("the doll") and its randomized look cycle
//!
//! Two timestamps per turn: the visual turn begins immediately, the
//! authoritative phase flips only after a settle delay. Turning toward the
//! player settles slower than turning away, which gives a moving player a
//! window to stop.

use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::{Scheduler, TimerId};
use crate::consts::{FACING_ROTATION, TURNED_AWAY_ROTATION};
use crate::presentation::{AnimatedProperty, Presentation, Tween};
use crate::settings::{DurationRange, GameConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerPhase {
    Watching,
    NotWatching,
}

/// Timer events owned by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerTimer {
    /// Begin the next visual turn
    Turn,
    /// Make the given phase authoritative
    Settle(ControllerPhase),
}

/// Timing parameters for the look cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleTiming {
    pub watching: DurationRange,
    pub not_watching: DurationRange,
    pub watch_settle: Duration,
    pub release_settle: Duration,
    pub turn_animation: Duration,
}

impl CycleTiming {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            watching: config.watching,
            not_watching: config.not_watching,
            watch_settle: config.watch_settle(),
            release_settle: config.release_settle(),
            turn_animation: config.turn_animation(),
        }
    }
}

#[derive(Debug)]
pub struct ControllerCycle {
    rng: Pcg32,
    timing: CycleTiming,
    /// Where the controller is visibly facing
    orientation: ControllerPhase,
    /// Gameplay-authoritative phase
    phase: ControllerPhase,
    turn_timer: Option<TimerId>,
    settle_timer: Option<TimerId>,
    running: bool,
    turns: u32,
}

impl ControllerCycle {
    /// Idle controller facing the player but not enforcing yet
    pub fn new(timing: CycleTiming, seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            timing,
            orientation: ControllerPhase::Watching,
            phase: ControllerPhase::NotWatching,
            turn_timer: None,
            settle_timer: None,
            running: false,
            turns: 0,
        }
    }

    /// Authoritative watching-state; the only value lose detection may use
    pub fn is_watching(&self) -> bool {
        self.phase == ControllerPhase::Watching
    }

    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    pub fn orientation(&self) -> ControllerPhase {
        self.orientation
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of visual turns begun since start
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Start the cycle with a turn away from the player
    pub fn start<E, P>(&mut self, sched: &mut Scheduler<E>, presentation: &mut P)
    where
        E: From<ControllerTimer>,
        P: Presentation + ?Sized,
    {
        if self.running {
            return;
        }
        self.running = true;
        self.turn_away(sched, presentation);
    }

    /// Cancel pending turns and settles. Phases freeze where they are.
    pub fn stop<E>(&mut self, sched: &mut Scheduler<E>) {
        self.running = false;
        for id in [self.turn_timer.take(), self.settle_timer.take()]
            .into_iter()
            .flatten()
        {
            sched.cancel(id);
        }
    }

    /// Handle one of our timers. Stale timers after `stop` are ignored.
    pub fn handle<E, P>(
        &mut self,
        timer: ControllerTimer,
        sched: &mut Scheduler<E>,
        presentation: &mut P,
    ) where
        E: From<ControllerTimer>,
        P: Presentation + ?Sized,
    {
        if !self.running {
            return;
        }
        match timer {
            ControllerTimer::Turn => {
                self.turn_timer = None;
                match self.orientation {
                    ControllerPhase::Watching => self.turn_away(sched, presentation),
                    ControllerPhase::NotWatching => self.turn_toward(sched, presentation),
                }
            }
            ControllerTimer::Settle(phase) => {
                self.settle_timer = None;
                if phase == self.orientation && phase != self.phase {
                    self.phase = phase;
                    log::debug!("Controller settled: {:?}", phase);
                }
            }
        }
    }

    fn turn_away<E, P>(&mut self, sched: &mut Scheduler<E>, presentation: &mut P)
    where
        E: From<ControllerTimer>,
        P: Presentation + ?Sized,
    {
        let dwell = self.timing.not_watching.sample(&mut self.rng);
        self.begin_turn(
            ControllerPhase::NotWatching,
            TURNED_AWAY_ROTATION,
            self.timing.release_settle,
            dwell,
            sched,
            presentation,
        );
    }

    fn turn_toward<E, P>(&mut self, sched: &mut Scheduler<E>, presentation: &mut P)
    where
        E: From<ControllerTimer>,
        P: Presentation + ?Sized,
    {
        let dwell = self.timing.watch_settle + self.timing.watching.sample(&mut self.rng);
        self.begin_turn(
            ControllerPhase::Watching,
            FACING_ROTATION,
            self.timing.watch_settle,
            dwell,
            sched,
            presentation,
        );
    }

    /// Start a visual turn now, settle it after `settle`, turn again after `dwell`
    fn begin_turn<E, P>(
        &mut self,
        toward: ControllerPhase,
        rotation: f32,
        settle: Duration,
        dwell: Duration,
        sched: &mut Scheduler<E>,
        presentation: &mut P,
    ) where
        E: From<ControllerTimer>,
        P: Presentation + ?Sized,
    {
        if let Some(id) = self.settle_timer.take() {
            sched.cancel(id);
        }
        if let Some(id) = self.turn_timer.take() {
            sched.cancel(id);
        }

        self.orientation = toward;
        self.turns += 1;
        presentation.animate(Tween::new(
            AnimatedProperty::ControllerRotation,
            rotation,
            self.timing.turn_animation,
        ));

        self.settle_timer = Some(sched.after(settle, ControllerTimer::Settle(toward).into()));
        self.turn_timer = Some(sched.after(dwell, ControllerTimer::Turn.into()));

        log::debug!(
            "Controller turning {:?} at {:?} (settle {:?}, next turn in {:?})",
            toward,
            sched.now(),
            settle,
            dwell
        );
    }
}
