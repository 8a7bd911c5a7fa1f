//! Round state machine
//!
//! Loading -> Countdown -> Running -> Ended. Each frame drains due timers
//! (countdown steps, controller turns and settles, time over), then runs the
//! gameplay tick, then renders. Every callback checks the phase on entry, so a
//! timer or tick arriving after the round resolved does nothing.

use std::time::Duration;

use super::clock::{Scheduler, TimerId};
use super::controller::{ControllerCycle, ControllerTimer, CycleTiming};
use super::player::{PlayerKinematics, PlayerState};
use super::state::{
    COUNTDOWN_LABELS, FrameView, MoveInput, Outcome, RoundPhase, RoundSnapshot, TrackGeometry,
};
use crate::presentation::{AnimatedProperty, Presentation, Tween};
use crate::settings::GameConfig;

/// Everything the round schedules on its clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Countdown step `n` finished; show its label
    Countdown(usize),
    /// Time limit reached
    TimeOver,
    Controller(ControllerTimer),
}

impl From<ControllerTimer> for TimerEvent {
    fn from(timer: ControllerTimer) -> Self {
        TimerEvent::Controller(timer)
    }
}

/// A single session: created once, never restarted
#[derive(Debug)]
pub struct RoundState {
    seed: u64,
    track: TrackGeometry,
    time_limit: Duration,
    countdown_step: Duration,
    phase: RoundPhase,
    outcome: Option<Outcome>,
    scheduler: Scheduler<TimerEvent>,
    controller: ControllerCycle,
    player: PlayerKinematics,
    render_loop: Option<TimerId>,
    tick_loop: Option<TimerId>,
    time_over: Option<TimerId>,
    countdown: Option<TimerId>,
    running_since: Option<Duration>,
    ended_at: Option<Duration>,
    /// Gameplay ticks evaluated while running
    ticks: u64,
}

impl RoundState {
    /// Expects a validated config (see [`GameConfig::validate`])
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let track = TrackGeometry::from_config(config);
        let mut scheduler = Scheduler::new();
        let render_loop = Some(scheduler.every_frame());

        Self {
            seed,
            track,
            time_limit: config.time_limit(),
            countdown_step: config.countdown_step(),
            phase: RoundPhase::Loading,
            outcome: None,
            scheduler,
            controller: ControllerCycle::new(CycleTiming::from_config(config), seed),
            player: PlayerKinematics::new(
                track.start_position,
                config.run_speed,
                config.stop_ease(),
            ),
            render_loop,
            tick_loop: None,
            time_over: None,
            countdown: None,
            running_since: None,
            ended_at: None,
            ticks: 0,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Set once the phase is `Ended`
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn player(&self) -> &PlayerState {
        self.player.state()
    }

    pub fn controller(&self) -> &ControllerCycle {
        &self.controller
    }

    pub fn track(&self) -> &TrackGeometry {
        &self.track
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Time spent running; frozen once ended
    pub fn elapsed(&self) -> Duration {
        match self.running_since {
            Some(since) => self
                .ended_at
                .unwrap_or(self.scheduler.now())
                .saturating_sub(since),
            None => Duration::ZERO,
        }
    }

    /// Fraction of the time limit left, 1 before running
    pub fn time_remaining(&self) -> f32 {
        if self.time_limit.is_zero() {
            return if self.running_since.is_some() {
                0.0
            } else {
                1.0
            };
        }
        let used = self.elapsed().as_secs_f32() / self.time_limit.as_secs_f32();
        (1.0 - used).clamp(0.0, 1.0)
    }

    /// Presentation assets are loaded; begin the countdown.
    /// A missing controller visual only affects presentation.
    pub fn assets_ready<P>(&mut self, controller_visual: bool, presentation: &mut P)
    where
        P: Presentation + ?Sized,
    {
        if self.phase != RoundPhase::Loading {
            return;
        }
        if !controller_visual {
            log::warn!("Controller model missing; watching-state still follows the cycle");
        }
        self.phase = RoundPhase::Countdown;
        log::info!("Assets ready, starting countdown");
        presentation.animate(Tween::new(AnimatedProperty::ProgressBarScale, 1.0, Duration::ZERO));
        self.countdown = Some(self.scheduler.after(self.countdown_step, TimerEvent::Countdown(0)));
    }

    /// Apply a move event. Ignored unless running.
    pub fn handle_input(&mut self, input: MoveInput) {
        if self.phase != RoundPhase::Running {
            return;
        }
        match input {
            MoveInput::Start => self.player.start_moving(),
            MoveInput::Stop => self.player.stop_moving(),
        }
    }

    /// Advance the session by one frame of `dt`
    pub fn frame<P>(&mut self, dt: Duration, presentation: &mut P)
    where
        P: Presentation + ?Sized,
    {
        if self.phase == RoundPhase::Ended {
            return;
        }
        let render = self.loop_active(self.render_loop);

        let target = self.scheduler.now() + dt;
        while let Some((_, event)) = self.scheduler.pop_due(target) {
            self.dispatch(event, presentation);
        }
        self.scheduler.advance_to(target);

        if self.loop_active(self.tick_loop) {
            self.tick(dt, presentation);
        }

        if render {
            presentation.render(&self.view(), dt);
        }
    }

    /// Transforms for the renderer
    pub fn view(&self) -> FrameView {
        FrameView {
            player_translation: FrameView::player_translation_for(self.player.state().position_x),
            controller_orientation: self.controller.orientation(),
            watching: self.controller.is_watching(),
            time_remaining: self.time_remaining(),
            phase: self.phase,
        }
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            phase: self.phase,
            outcome: self.outcome,
            player: *self.player.state(),
            controller_orientation: self.controller.orientation(),
            controller_phase: self.controller.phase(),
            elapsed_ms: self.elapsed().as_millis() as u64,
            ticks: self.ticks,
            seed: self.seed,
        }
    }

    fn loop_active(&self, id: Option<TimerId>) -> bool {
        id.is_some_and(|id| self.scheduler.is_active(id))
    }

    fn dispatch<P>(&mut self, event: TimerEvent, presentation: &mut P)
    where
        P: Presentation + ?Sized,
    {
        match event {
            TimerEvent::Countdown(step) => self.countdown_step_done(step, presentation),
            TimerEvent::TimeOver => {
                self.time_over = None;
                self.end(Outcome::TimedOut, presentation);
            }
            TimerEvent::Controller(timer) => {
                if self.phase == RoundPhase::Running {
                    self.controller.handle(timer, &mut self.scheduler, presentation);
                }
            }
        }
    }

    fn countdown_step_done<P>(&mut self, step: usize, presentation: &mut P)
    where
        P: Presentation + ?Sized,
    {
        self.countdown = None;
        if self.phase != RoundPhase::Countdown {
            return;
        }
        let Some(label) = COUNTDOWN_LABELS.get(step) else {
            return;
        };
        presentation.set_status_text(label);

        if step + 1 < COUNTDOWN_LABELS.len() {
            self.countdown = Some(
                self.scheduler
                    .after(self.countdown_step, TimerEvent::Countdown(step + 1)),
            );
        } else {
            self.begin_running(presentation);
        }
    }

    fn begin_running<P>(&mut self, presentation: &mut P)
    where
        P: Presentation + ?Sized,
    {
        self.phase = RoundPhase::Running;
        self.running_since = Some(self.scheduler.now());
        log::info!(
            "Round running (limit {:?}, seed {})",
            self.time_limit,
            self.seed
        );

        self.controller.start(&mut self.scheduler, presentation);
        self.time_over = Some(self.scheduler.after(self.time_limit, TimerEvent::TimeOver));
        self.tick_loop = Some(self.scheduler.every_frame());
        presentation.animate(Tween::new(
            AnimatedProperty::ProgressBarScale,
            0.0,
            self.time_limit,
        ));
    }

    /// Integrate the player, then check win before lose
    fn tick<P>(&mut self, dt: Duration, presentation: &mut P)
    where
        P: Presentation + ?Sized,
    {
        if self.phase != RoundPhase::Running {
            return;
        }
        self.player.tick(dt);
        self.ticks += 1;

        let player = *self.player.state();
        if self.track.is_past_goal(player.position_x) {
            self.end(Outcome::Won, presentation);
        } else if player.velocity > 0.0 && self.controller.is_watching() {
            self.end(Outcome::Lost, presentation);
        }
    }

    /// Resolve the round. No-op unless running, so it can only happen once.
    fn end<P>(&mut self, outcome: Outcome, presentation: &mut P) -> bool
    where
        P: Presentation + ?Sized,
    {
        if self.phase != RoundPhase::Running {
            return false;
        }
        self.phase = RoundPhase::Ended;
        self.outcome = Some(outcome);
        self.ended_at = Some(self.scheduler.now());

        self.controller.stop(&mut self.scheduler);
        for id in [
            self.tick_loop.take(),
            self.render_loop.take(),
            self.time_over.take(),
            self.countdown.take(),
        ]
        .into_iter()
        .flatten()
        {
            self.scheduler.cancel(id);
        }

        presentation.set_status_text(outcome.message());
        log::info!(
            "Round ended: {:?} after {:.2}s at x={:.3}",
            outcome,
            self.elapsed().as_secs_f32(),
            self.player.state().position_x
        );
        true
    }
}
