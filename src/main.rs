//! Runner Core headless demo
//!
//! Plays a few runs with a simple autopilot on a simulated 60 Hz clock and
//! logs how each one went. Set `RUST_LOG=debug` to watch every spawn.
//!
//! Usage: `runner-core [seed] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use runner_core::sim::{Frame, GameEvent, GamePhase, GameState, autopilot};
    use runner_core::{FrameOutcome, GameLoop, Tuning};

    /// Ticks per run before the demo gives up and moves on
    const MAX_TICKS_PER_RUN: u64 = 60 * 120;
    const RUNS: u32 = 3;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5EED);
    let tuning = match args.next() {
        Some(path) => {
            let loaded = std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
            match loaded {
                Ok(tuning) => tuning,
                Err(e) => {
                    log::error!("Could not load tuning from {}: {}", path, e);
                    std::process::exit(1);
                }
            }
        }
        None => Tuning::default(),
    };

    let state = match GameState::new(seed, tuning) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid tuning: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("Runner Core (native) starting, seed {}", seed);

    let mut game = GameLoop::new(state, autopilot);
    let dt = game.state().tuning().tick_interval();
    let mut now = 0.0;

    for run in 1..=RUNS {
        game.start();
        let mut cleared = 0u32;
        let mut last_frame: Option<Frame> = None;

        while game.state().phase == GamePhase::Running
            && game.state().time_ticks < MAX_TICKS_PER_RUN
        {
            let outcome = game.frame(now, |frame| {
                cleared += frame
                    .events
                    .iter()
                    .filter(|e| matches!(e, GameEvent::ObstacleCleared { .. }))
                    .count() as u32;
                last_frame = Some(frame.clone());
            });
            now += dt;
            if outcome == FrameOutcome::Closed {
                break;
            }
        }

        if let Some(frame) = last_frame {
            log::info!(
                "Run {}: {:?} after {} ticks, score {}, {} obstacles cleared, camera at {:.0}",
                run,
                frame.game_over_cause,
                game.state().time_ticks,
                frame.score,
                cleared,
                frame.camera_x
            );
        }
        game.restart();
    }

    game.close();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::init, this is just to satisfy the compiler
}
