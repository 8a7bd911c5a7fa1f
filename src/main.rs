//! Red Light entry point
//!
//! Runs a headless round driven by the autopilot and prints the final snapshot.
//!
//! Usage: `red-light [config.json] [--instant]`

use std::env;
use std::path::PathBuf;

use anyhow::Context;

use red_light::GameConfig;
use red_light::consts::REFERENCE_FPS;
use red_light::platform::{Autopilot, FramePacer};
use red_light::presentation::HeadlessPresentation;
use red_light::sim::{RoundPhase, RoundState};

struct Args {
    config: Option<PathBuf>,
    /// Step fixed frames without sleeping
    instant: bool,
}

fn parse_args() -> Args {
    let mut config = None;
    let mut instant = false;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--instant" => instant = true,
            _ => config = Some(PathBuf::from(arg)),
        }
    }
    Args {
        config: config.or_else(|| env::var_os(GameConfig::ENV_PATH).map(PathBuf::from)),
        instant,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args();
    let config = GameConfig::load(args.config.as_deref()).context("loading game config")?;
    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!("Red Light starting (seed {seed})");

    let mut round = RoundState::new(&config, seed);
    let mut presentation = HeadlessPresentation::new();
    let mut autopilot = Autopilot::default();
    round.assets_ready(true, &mut presentation);

    let mut pacer = FramePacer::new(REFERENCE_FPS);
    let fixed_dt = pacer.frame_budget();
    while round.phase() != RoundPhase::Ended {
        let dt = if args.instant {
            fixed_dt
        } else {
            pacer.begin_frame()
        };

        if let Some(input) = autopilot.update(&round, dt) {
            round.handle_input(input);
        }
        round.frame(dt, &mut presentation);

        if !args.instant {
            pacer.end_frame();
        }
    }

    log::info!(
        "Finished after {} frames ({:?} simulated)",
        presentation.frames_rendered(),
        round.now()
    );
    let summary = serde_json::to_string_pretty(&round.snapshot()).context("serializing snapshot")?;
    println!("{summary}");
    Ok(())
}
