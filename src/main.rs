//! Hop Block entry point
//!
//! Headless native driver: plays a seeded game with the autopilot and logs
//! what happens. Usage: `hop-block [seed] [rounds]`.

use hop_block::sim::{Autopilot, Game, GameEvent, GamePhase, Viewport};
use hop_block::{GameError, SceneLog};

/// Frames allowed per round before giving up
const FRAMES_PER_ROUND: u64 = 1_000;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2024);
    let rounds = args.next().and_then(|s| s.parse().ok()).unwrap_or(10);

    log::info!("Hop Block (native) starting, seed {}", seed);
    if let Err(e) = run(seed, rounds) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is driven by the host page
}

#[cfg(not(target_arch = "wasm32"))]
fn run(seed: u64, rounds: u32) -> Result<(), GameError> {
    let mut scene = SceneLog::new();
    let mut game = Game::new(seed);
    game.on_success(|score| log::info!("success callback: {}", score));
    game.on_failure(|score| log::info!("failure callback: {}", score));
    game.init(Viewport::new(1280.0, 720.0), &mut scene)?;

    let mut pilot = Autopilot::new();
    let budget = FRAMES_PER_ROUND * u64::from(rounds.max(1));
    while game.score() < rounds && game.phase() != GamePhase::GameOver {
        if game.time_ticks() >= budget {
            log::warn!("frame budget exhausted");
            break;
        }
        if let Some(event) = pilot.input(&game) {
            game.handle_pointer(event);
        }
        game.tick(&mut scene)?;

        for event in game.drain_events() {
            match event {
                GameEvent::PlatformCreated { id, position } => {
                    log::debug!("platform {} at ({}, {})", id, position.x, position.z)
                }
                GameEvent::Fell { score } => log::info!("fell with score {}", score),
                other => log::debug!("{:?}", other),
            }
        }
    }

    log::info!(
        "finished after {} frames: score {}, {} draws",
        game.time_ticks(),
        game.score(),
        scene.draws
    );
    Ok(())
}
