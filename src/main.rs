//! Cave Flyer entry point
//!
//! Runs one headless flight with the autopilot, plays the cues through the
//! logging sink and records the result on the leaderboard.

use std::time::{SystemTime, UNIX_EPOCH};

use cave_flyer::audio::{AudioManager, LogSink};
use cave_flyer::consts::SIM_DT;
use cave_flyer::renderer::{scene, tessellate};
use cave_flyer::sim::{GameState, TickInput, tick};
use cave_flyer::{Leaderboard, Settings};

const DEFAULT_SETTINGS_PATH: &str = "cave-flyer.json";

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::init();
    log::info!("Cave Flyer (headless) starting...");

    let settings_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
    let settings = Settings::load(&settings_path);

    let mut audio = AudioManager::new(LogSink::default());
    audio.set_master_volume(settings.master_volume);
    audio.set_sfx_volume(settings.sfx_volume);
    audio.set_music_volume(settings.music_volume);
    audio.set_muted(settings.muted);

    let seed = settings.seed.unwrap_or_else(clock_seed);
    let mut state = GameState::new(seed);
    let input = TickInput {
        autopilot: settings.autopilot,
        ..Default::default()
    };

    while !state.is_over() && state.time_ticks < settings.demo_ticks {
        tick(&mut state, &input, SIM_DT);
        let events = state.drain_events();
        audio.handle_events(&events);
        audio.update_music(state.craft.started, state.is_over());

        if state.time_ticks % 600 == 0 {
            log::debug!(
                "t={} distance={:.0} missiles={} rocks={}",
                state.time_ticks,
                state.distance(),
                state.pool.missiles.len(),
                state.pool.rocks.len()
            );
        }
    }

    let vertices = tessellate(&scene(&state));
    log::info!(
        "Final frame: {} vertices, {} cues played",
        vertices.len(),
        audio.sink().played
    );

    let score = state.score();
    if state.is_over() {
        log::info!("Crashed after {} ticks, score {score}", state.time_ticks);
    } else {
        log::info!("Demo finished without crashing, score {score}");
    }

    let mut board = match Leaderboard::load(&settings.leaderboard_path) {
        Ok(board) => board,
        Err(e) => {
            log::error!("Failed to read leaderboard: {e}");
            return;
        }
    };
    log::debug!("Leaderboard at {}", board.path().display());

    if board.qualifies(score) {
        match board.add_entry(&settings.player_name, score) {
            Ok(Some(rank)) => log::info!("New high score, rank {rank}"),
            Ok(None) => {}
            Err(e) => log::error!("Failed to save leaderboard: {e}"),
        }
    }

    for (i, entry) in board.entries.iter().enumerate() {
        log::info!("{:>2}. {:<9} {}", i + 1, entry.name, entry.score);
    }
}
