//! Game configuration
//!
//! Fixed at session start. Loaded from an optional JSON file, never changed at runtime.

use std::fs;
use std::path::Path;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Inclusive range of milliseconds a randomized dwell is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DurationRange {
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// Draw a duration uniformly from the range
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min_ms >= self.max_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rng.random_range(self.min_ms..=self.max_ms))
    }

    pub fn min(&self) -> Duration {
        Duration::from_millis(self.min_ms)
    }

    pub fn max(&self) -> Duration {
        Duration::from_millis(self.max_ms)
    }

    fn validate(&self, field: &'static str) -> ConfigResult<()> {
        if self.min_ms > self.max_ms {
            return Err(ConfigError::InvalidRange {
                field,
                min: self.min_ms,
                max: self.max_ms,
            });
        }
        Ok(())
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Track ===
    /// Distance from the track center to the start line (goal is at the negative end)
    pub track_half_length: f32,
    /// How far past the goal line the win threshold sits
    pub win_margin: f32,

    // === Round ===
    /// Round time limit once running
    pub time_limit_secs: u64,
    /// Duration of each countdown step
    pub countdown_step_ms: u64,

    // === Player ===
    /// Run speed in track units per 60 Hz frame
    pub run_speed: f32,
    /// Time for velocity to ease to zero after releasing move
    pub stop_ease_ms: u64,

    // === Controller ===
    /// Watching dwell, counted after the watch settle completes
    pub watching: DurationRange,
    /// Not-watching dwell, counted from the start of the turn away
    pub not_watching: DurationRange,
    /// Delay between turning toward the player and enforcement starting
    pub watch_settle_ms: u64,
    /// Delay between turning away and enforcement stopping
    pub release_settle_ms: u64,
    /// Visual turn duration handed to the animator
    pub turn_animation_ms: u64,

    /// RNG seed; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            track_half_length: 3.0,
            win_margin: 0.4,

            time_limit_secs: 10,
            countdown_step_ms: 500,

            run_speed: 0.03,
            stop_ease_ms: 100,

            watching: DurationRange::new(450, 750),
            not_watching: DurationRange::new(1000, 2000),
            watch_settle_ms: 450,
            release_settle_ms: 150,
            turn_animation_ms: 450,

            seed: None,
        }
    }
}

impl GameConfig {
    /// Environment variable naming a config file for the native binary
    pub const ENV_PATH: &'static str = "RED_LIGHT_CONFIG";

    /// Load config from a JSON file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let Some(path) = path else {
            log::info!("Using default config");
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        };

        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.track_half_length > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "track_half_length",
            });
        }
        if !(self.run_speed > 0.0) {
            return Err(ConfigError::NonPositive { field: "run_speed" });
        }
        if self.time_limit_secs == 0 {
            return Err(ConfigError::NonPositive {
                field: "time_limit_secs",
            });
        }
        if self.countdown_step_ms == 0 {
            return Err(ConfigError::NonPositive {
                field: "countdown_step_ms",
            });
        }
        let track_length = self.track_half_length * 2.0;
        if !(self.win_margin >= 0.0) || self.win_margin >= track_length {
            return Err(ConfigError::MarginTooLarge {
                margin: self.win_margin,
                track_length,
            });
        }
        self.watching.validate("watching")?;
        self.not_watching.validate("not_watching")?;
        Ok(())
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs)
    }

    pub fn countdown_step(&self) -> Duration {
        Duration::from_millis(self.countdown_step_ms)
    }

    pub fn stop_ease(&self) -> Duration {
        Duration::from_millis(self.stop_ease_ms)
    }

    pub fn watch_settle(&self) -> Duration {
        Duration::from_millis(self.watch_settle_ms)
    }

    pub fn release_settle(&self) -> Duration {
        Duration::from_millis(self.release_settle_ms)
    }

    pub fn turn_animation(&self) -> Duration {
        Duration::from_millis(self.turn_animation_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.time_limit(), Duration::from_secs(10));
        assert_eq!(config.watching, DurationRange::new(450, 750));
        assert_eq!(config.not_watching, DurationRange::new(1000, 2000));
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        assert_eq!(GameConfig::load(None).unwrap(), GameConfig::default());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = GameConfig::from_json(r#"{ "time_limit_secs": 5, "seed": 7 }"#).unwrap();
        assert_eq!(config.time_limit_secs, 5);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.run_speed, 0.03);
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = GameConfig::from_json(r#"{ "watching": { "min_ms": 800, "max_ms": 200 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidRange { field: "watching", min: 800, max: 200 }
        ));
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = GameConfig {
            run_speed: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "run_speed" })
        ));

        let config = GameConfig {
            win_margin: 6.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MarginTooLarge { .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = GameConfig::load(Some(Path::new("/nonexistent/red-light.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_range_sample_bounds() {
        let mut rng = Pcg32::seed_from_u64(1);
        let range = DurationRange::new(1000, 2000);
        for _ in 0..200 {
            let d = range.sample(&mut rng);
            assert!(d >= range.min() && d <= range.max());
        }
        assert_eq!(
            DurationRange::new(300, 300).sample(&mut rng),
            Duration::from_millis(300)
        );
    }
}
