//! Ship Tap entry point
//!
//! Native build runs the headless engine with the demo player at the wheel.
//! Usage: `ship-tap [settings.json]`

use std::path::PathBuf;

use ship_tap::highscores::{HighScores, now_millis};
use ship_tap::settings::Settings;
use ship_tap::sim::run_demo;

fn main() {
    env_logger::init();
    log::info!("Ship Tap (native) starting...");

    let settings_path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = Settings::load(settings_path.as_deref());
    let seed = settings.seed.unwrap_or_else(|| now_millis() as u64);
    log::info!("Game initialized with seed: {}", seed);

    let mut highscores = match &settings.highscores_path {
        Some(path) => HighScores::load_from(path).unwrap_or_else(|e| {
            log::warn!("{e}; starting fresh");
            HighScores::new()
        }),
        None => HighScores::new(),
    };

    let summary = run_demo(&settings, seed, &mut highscores);
    if !summary.played {
        return;
    }

    if let Some(path) = &settings.highscores_path {
        if let Err(e) = highscores.save_to(path) {
            log::warn!("{e}");
        }
    }

    println!("\nRounds played: {}", summary.scores.len());
    for (i, score) in summary.scores.iter().enumerate() {
        println!("  Round {}: {}", i + 1, score);
    }
    if let Some(best) = highscores.top_score() {
        println!("Best ever: {}", best);
    }
    println!("{}", summary.status);
}
