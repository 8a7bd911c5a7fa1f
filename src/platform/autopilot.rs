//! Autopilot input source
//!
//! Plays like a careful human: runs while the controller is visibly turned
//! away and settled, lets go as soon as it starts turning back. Every decision
//! lands only after a reaction delay.

use std::time::Duration;

use crate::sim::{ControllerPhase, MoveInput, RoundPhase, RoundState};

#[derive(Debug, Clone)]
pub struct Autopilot {
    reaction: Duration,
    holding: bool,
    /// Input being reacted to and how long it has been wanted
    pending: Option<(MoveInput, Duration)>,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(Self::DEFAULT_REACTION)
    }
}

impl Autopilot {
    pub const DEFAULT_REACTION: Duration = Duration::from_millis(200);

    pub fn new(reaction: Duration) -> Self {
        Self {
            reaction,
            holding: false,
            pending: None,
        }
    }

    pub fn is_holding(&self) -> bool {
        self.holding
    }

    /// Observe the round after `dt` has passed; returns an input once its reaction delay is up
    pub fn update(&mut self, round: &RoundState, dt: Duration) -> Option<MoveInput> {
        if round.phase() != RoundPhase::Running {
            self.pending = None;
            return None;
        }

        let controller = round.controller();
        let clear = controller.orientation() == ControllerPhase::NotWatching
            && !controller.is_watching();
        let want = if clear { MoveInput::Start } else { MoveInput::Stop };
        let current = if self.holding {
            MoveInput::Start
        } else {
            MoveInput::Stop
        };
        if want == current {
            self.pending = None;
            return None;
        }

        let waited = match self.pending {
            Some((input, waited)) if input == want => waited + dt,
            _ => Duration::ZERO,
        };
        if waited >= self.reaction {
            self.pending = None;
            self.holding = want == MoveInput::Start;
            log::debug!("Autopilot: {:?}", want);
            Some(want)
        } else {
            self.pending = Some((want, waited));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameConfig;
    use crate::presentation::HeadlessPresentation;
    use crate::sim::Outcome;

    const FRAME: Duration = Duration::from_nanos(16_666_667);

    fn play(seed: u64, autopilot: &mut Autopilot) -> RoundState {
        let mut round = RoundState::new(&GameConfig::default(), seed);
        let mut p = HeadlessPresentation::new();
        round.assets_ready(true, &mut p);
        while round.phase() != RoundPhase::Ended {
            if let Some(input) = autopilot.update(&round, FRAME) {
                round.handle_input(input);
            }
            round.frame(FRAME, &mut p);
        }
        round
    }

    #[test]
    fn test_autopilot_wins() {
        for seed in [0, 17, 256, 4096, 65535] {
            let round = play(seed, &mut Autopilot::default());
            assert_eq!(round.outcome(), Some(Outcome::Won), "seed {seed}");
        }
    }

    #[test]
    fn test_idle_before_running() {
        let round = RoundState::new(&GameConfig::default(), 1);
        let mut autopilot = Autopilot::new(Duration::ZERO);
        assert_eq!(autopilot.update(&round, FRAME), None);
        assert!(!autopilot.is_holding());
    }

    #[test]
    fn test_waits_for_reaction_delay() {
        let mut round = RoundState::new(&GameConfig::default(), 1);
        let mut p = HeadlessPresentation::new();
        round.assets_ready(true, &mut p);
        for _ in 0..4 {
            round.frame(Duration::from_millis(500), &mut p);
        }
        // Let the first turn away settle
        round.frame(Duration::from_millis(150), &mut p);
        assert!(!round.controller().is_watching());

        let mut autopilot = Autopilot::new(Duration::from_millis(100));
        let step = Duration::from_millis(40);
        assert_eq!(autopilot.update(&round, step), None);
        assert_eq!(autopilot.update(&round, step), None);
        assert_eq!(autopilot.update(&round, step), None);
        assert_eq!(autopilot.update(&round, step), Some(MoveInput::Start));
        assert!(autopilot.is_holding());
        assert_eq!(autopilot.update(&round, step), None);
    }
}
