//! I Can't Breathe entry point
//!
//! Headless host: loads settings and levels, auto-starts a run and walks the
//! player on a fixed script. Usage: `cant-breathe [seconds] [settings.json]`

use std::path::PathBuf;

use cant_breathe::audio::NullAudio;
use cant_breathe::consts::SIM_DT;
use cant_breathe::level::open_source;
use cant_breathe::platform::Key;
use cant_breathe::sim::GamePhase;
use cant_breathe::{Game, Settings};

/// Key held during each second of the scripted walk
const SCRIPT: [Key; 4] = [Key::D, Key::S, Key::D, Key::W];

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seconds: f32 = match args.next().map(|a| a.parse()) {
        Some(Ok(s)) => s,
        Some(Err(e)) => {
            log::warn!("Bad duration ({}), running for 10s", e);
            10.0
        }
        None => 10.0,
    };
    let settings_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("settings.json"));

    let settings = Settings::load_from(&settings_path);
    let levels = open_source(&settings);
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let mut game = Game::new(settings, levels, Box::new(NullAudio), seed);
    log::info!("Running headless for {:.1}s (seed {})", seconds, seed);

    game.on_key_press(Key::Space);

    let mut held: Option<Key> = None;
    let mut t = 0.0;
    while t < seconds && game.phase() == GamePhase::Playing {
        let key = SCRIPT[(t as usize) % SCRIPT.len()];
        if held != Some(key) {
            if let Some(prev) = held {
                game.on_key_release(prev);
            }
            game.on_key_press(key);
            held = Some(key);
        }
        game.on_tick(SIM_DT);
        t += SIM_DT;
    }

    let world = &game.world;
    match world.phase {
        GamePhase::GameOver => log::info!(
            "Ran out of oxygen on level {} after {:.1}s",
            world.level,
            world.elapsed
        ),
        GamePhase::LevelClear => log::info!("Cleared all levels in {:.1}s", world.elapsed),
        _ => log::info!(
            "Stopped on level {} with {:.0} oxygen after {:.1}s",
            world.level,
            world.oxygen,
            world.elapsed
        ),
    }
}
