//! Headless presentation: samples tweens, keeps the last frame, logs status text

use std::collections::HashMap;
use std::time::Duration;

use super::{AnimatedProperty, Presentation, Tween, TweenTrack};
use crate::consts::FACING_ROTATION;
use crate::sim::FrameView;

#[derive(Debug, Clone)]
pub struct HeadlessPresentation {
    tracks: HashMap<AnimatedProperty, TweenTrack>,
    status: Option<String>,
    status_history: Vec<String>,
    last_view: Option<FrameView>,
    frames_rendered: u64,
}

impl Default for HeadlessPresentation {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessPresentation {
    pub fn new() -> Self {
        let tracks = HashMap::from([
            (
                AnimatedProperty::ControllerRotation,
                TweenTrack::new(FACING_ROTATION),
            ),
            (AnimatedProperty::ProgressBarScale, TweenTrack::new(1.0)),
        ]);
        Self {
            tracks,
            status: None,
            status_history: Vec::new(),
            last_view: None,
            frames_rendered: 0,
        }
    }

    /// Current status message, if any has been shown
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Every status message shown so far, oldest first
    pub fn status_history(&self) -> &[String] {
        &self.status_history
    }

    /// Current animated value of a property
    pub fn value(&self, property: AnimatedProperty) -> f32 {
        self.tracks
            .get(&property)
            .map(TweenTrack::value)
            .unwrap_or_default()
    }

    pub fn last_view(&self) -> Option<&FrameView> {
        self.last_view.as_ref()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

impl Presentation for HeadlessPresentation {
    fn render(&mut self, view: &FrameView, dt: Duration) {
        for (property, track) in self.tracks.iter_mut() {
            if track.advance(dt) {
                log::debug!("Tween {:?} complete at {:.2}", property, track.value());
            }
        }
        self.last_view = Some(*view);
        self.frames_rendered += 1;
    }

    fn set_status_text(&mut self, message: &str) {
        log::info!("{message}");
        self.status = Some(message.to_string());
        self.status_history.push(message.to_string());
    }

    fn animate(&mut self, tween: Tween) {
        self.tracks
            .entry(tween.property)
            .or_insert_with(|| TweenTrack::new(0.0))
            .retarget(&tween);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TURNED_AWAY_ROTATION;
    use crate::sim::{ControllerPhase, RoundPhase};

    fn view() -> FrameView {
        FrameView {
            player_translation: FrameView::player_translation_for(3.0),
            controller_orientation: ControllerPhase::NotWatching,
            watching: false,
            time_remaining: 1.0,
            phase: RoundPhase::Running,
        }
    }

    #[test]
    fn test_render_advances_tweens() {
        let mut p = HeadlessPresentation::new();
        p.animate(Tween::new(
            AnimatedProperty::ControllerRotation,
            TURNED_AWAY_ROTATION,
            Duration::from_millis(400),
        ));
        assert_eq!(p.value(AnimatedProperty::ControllerRotation), FACING_ROTATION);

        p.render(&view(), Duration::from_millis(200));
        let half = p.value(AnimatedProperty::ControllerRotation);
        assert!((half - TURNED_AWAY_ROTATION / 2.0).abs() < 1e-4);

        p.render(&view(), Duration::from_millis(300));
        assert_eq!(p.value(AnimatedProperty::ControllerRotation), TURNED_AWAY_ROTATION);
        assert_eq!(p.frames_rendered(), 2);
        assert_eq!(p.last_view().map(|v| v.player_translation.x), Some(3.0));
    }

    #[test]
    fn test_status_history() {
        let mut p = HeadlessPresentation::new();
        assert_eq!(p.status(), None);
        p.set_status_text("Go !!");
        p.set_status_text("You lose");
        assert_eq!(p.status(), Some("You lose"));
        assert_eq!(p.status_history(), ["Go !!", "You lose"]);
    }
}
