//! Neon Pong headless runner
//!
//! Plays an attract-mode match (CPU on both paddles) at a simulated 60 Hz with
//! frame-time jitter, logging what the audio and render layers would receive.
//!
//! Usage: `neon-pong [settings.json] [seed]`

use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use neon_pong::Settings;
use neon_pong::sim::{Action, Difficulty, GameEvent, GameState, Snapshot, Status, apply_action, tick};

/// Ten minutes of frames at 60 Hz
const MAX_FRAMES: u32 = 60 * 60 * 10;

/// Frames to wait after a point before serving again
const SERVE_DELAY_FRAMES: u32 = 45;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });

    log::info!("Starting attract-mode match, seed {}", seed);
    let mut state = GameState::new(settings, seed);
    state.set_autopilot(true);
    apply_action(&mut state, Action::SelectPlayers(1));
    apply_action(&mut state, Action::SelectDifficulty(Difficulty::Hard));

    let mut idle_frames = 0;
    for frame in 0..MAX_FRAMES {
        if !state.ball.in_play && state.winner().is_none() {
            idle_frames += 1;
            if idle_frames >= SERVE_DELAY_FRAMES {
                apply_action(&mut state, Action::Serve);
                idle_frames = 0;
            }
        }

        // Display frames are never perfectly even
        let jitter = if frame % 7 == 0 { 0.004 } else { 0.0 };
        tick(&mut state, 1.0 / 60.0 + jitter);

        for event in state.drain_events() {
            match event {
                GameEvent::Score { .. } | GameEvent::GameOver { .. } => {
                    log::info!("[frame {}] {}", frame, Status::of(&state).message());
                }
                _ => log::debug!("[frame {}] event {}", frame, event.name()),
            }
        }

        if state.winner().is_some() {
            break;
        }
    }

    let snapshot = Snapshot::capture(&state);
    log::info!(
        "Final score {} - {} after {} ticks",
        snapshot.left.score,
        snapshot.right.score,
        state.time_ticks
    );
    match snapshot.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Failed to serialize snapshot: {}", e);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
