//! Flap3D headless driver
//!
//! Runs the simulation at a fixed 60 Hz with a simple autopilot and logs what
//! happens. Rendering and input wiring belong to the host application.
//!
//! Usage: `flap3d [config.json] [seed]`

use std::process::ExitCode;

use flap3d::GameConfig;
use flap3d::render::Frame;
use flap3d::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

const FRAME_DT: f32 = 1.0 / 60.0;
const RUN_SECONDS: f32 = 120.0;
/// Crashes to sit through before stopping
const MAX_RUNS: u32 = 3;

fn load_config(path: Option<&str>) -> Result<GameConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            let config = GameConfig::from_json(&json)?;
            log::info!("Loaded config from {}", path);
            Ok(config)
        }
        None => Ok(GameConfig::default()),
    }
}

/// Flap whenever the body sinks below the middle of the next gap
fn autopilot(state: &GameState) -> TickInput {
    let field = &state.config.field;
    let target = state
        .obstacles()
        .into_iter()
        .find(|i| i.offset + field.pillar_half_width >= -state.body.radius)
        .map(|i| i.obstacle.lower_height() + field.pipe_gap * 0.5)
        .unwrap_or(state.config.body.rest_height);

    // Past the top of the current arc
    let body = &state.config.body;
    let falling = state
        .body
        .impulse_time
        .is_none_or(|t0| state.clock.now() - t0 > body.base_velocity / body.gravity);

    TickInput {
        flap: state.phase == GamePhase::Idle || (state.body.position < target && falling),
        restart: state.phase == GamePhase::Ended,
        ..Default::default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match load_config(args.first().map(String::as_str)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Bad config: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let seed = args
        .get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5EED_F1A9);

    let mut state = match GameState::new(config, seed) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid config: {}", e);
            return ExitCode::FAILURE;
        }
    };
    log::info!("Flap3D (headless) starting with seed {}", seed);

    let mut runs = 0;
    let mut best = 0;
    let mut t = 0.0;
    while t < RUN_SECONDS && runs < MAX_RUNS {
        t += FRAME_DT;
        let input = autopilot(&state);
        for event in tick(&mut state, &input, t) {
            if let GameEvent::Collided { .. } = event {
                runs += 1;
                best = best.max(state.score());
            }
            log::debug!("t={:.3} {:?}", t, event);
        }
    }

    let frame = Frame::capture(&state);
    log::info!(
        "Finished at t={:.1}s: {} crashes, best score {}, last frame {} boxes",
        t,
        runs,
        best.max(state.score()),
        frame.instances().len()
    );
    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives the library directly
}
